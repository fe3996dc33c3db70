use axum::{
    middleware as axum_middleware,
    routing::{any, get},
    Router,
};
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::{config::Config, handlers, middleware::route_guard};

pub fn build_app(config: Config) -> Router {
    let index_path = config.static_dir.join("index.html");
    let spa_service = ServeDir::new(&config.static_dir)
        .append_index_html_on_directories(true)
        .fallback(ServeFile::new(index_path));

    Router::new()
        .route("/config.json", get(handlers::config::get_runtime_config))
        .route("/api", any(handlers::api::not_served))
        .route("/api/{*rest}", any(handlers::api::not_served))
        .with_state(config)
        .fallback_service(spa_service)
        .layer(axum_middleware::from_fn(route_guard))
        .layer(TraceLayer::new_for_http())
}
