#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, Response},
    Router,
};
use std::fs;
use storefront_edge::{app::build_app, config::Config};
use tempfile::TempDir;

pub const INDEX_HTML: &str = "<!doctype html><html><body>storefront-shell</body></html>";

/// App over a throwaway static dir holding the SPA shell and one asset. The
/// dir must outlive the router.
pub fn test_app() -> (Router, TempDir) {
    let dir = tempfile::tempdir().expect("create static dir");
    fs::write(dir.path().join("index.html"), INDEX_HTML).expect("write index");
    fs::create_dir(dir.path().join("assets")).expect("create assets");
    fs::write(dir.path().join("assets/app.js"), "console.log('app');").expect("write asset");

    let config = Config {
        bind_addr: "127.0.0.1:0".parse().expect("addr"),
        static_dir: dir.path().to_path_buf(),
        api_base_url: "https://api.example.com/v1".into(),
    };
    (build_app(config), dir)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).expect("request")
}

pub fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("cookie", cookie)
        .body(Body::empty())
        .expect("request")
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    String::from_utf8_lossy(&bytes).to_string()
}
