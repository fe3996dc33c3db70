use axum::http::Uri;

use crate::error::AppError;

/// The API lives on its own origin. Without this, a misrouted `/api` call
/// would fall through to the SPA and come back as `index.html`.
pub async fn not_served(uri: Uri) -> AppError {
    tracing::debug!(path = %uri.path(), "api request reached the edge");
    AppError::NotFound(format!("{} is not served here", uri.path()))
}
