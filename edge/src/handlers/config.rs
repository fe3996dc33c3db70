use axum::{extract::State, http::header, response::IntoResponse, Json};
use serde::Serialize;

use crate::config::Config;

#[derive(Serialize)]
pub struct RuntimeConfigResponse {
    pub api_base_url: String,
}

/// Served fresh on every load so a redeploy can repoint the frontend without
/// rebuilding it.
pub async fn get_runtime_config(State(config): State<Config>) -> impl IntoResponse {
    (
        [(header::CACHE_CONTROL, "no-store")],
        Json(RuntimeConfigResponse {
            api_base_url: config.api_base_url,
        }),
    )
}
