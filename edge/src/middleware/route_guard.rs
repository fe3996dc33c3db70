use axum::{
    extract::Request,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use storefront_common::{is_protected_route, login_url_with_redirect, SessionCookies};

use crate::error::AppError;

/// Redirects guests away from protected pages before any HTML is served,
/// using the same prefix list and cookies as the in-app guard.
pub async fn route_guard(req: Request, next: Next) -> Result<Response, AppError> {
    let path = req.uri().path().to_string();
    if !is_protected_route(&path) || session_from_headers(req.headers()).is_authenticated() {
        return Ok(next.run(req).await);
    }

    let target = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| path.clone());
    let location = login_url_with_redirect(&target);
    tracing::info!(path = %path, location = %location, "Redirecting unauthenticated request to login");

    let value = HeaderValue::from_str(&location)
        .map_err(|e| AppError::InternalServerError(e.into()))?;
    Ok((StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, value)]).into_response())
}

/// HTTP/2 clients may split cookies over several headers.
fn session_from_headers(headers: &HeaderMap) -> SessionCookies {
    let joined = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect::<Vec<_>>()
        .join("; ");
    SessionCookies::from_cookie_header(&joined)
}
