mod support;

use axum::http::{header, StatusCode};
use support::{body_string, get, test_app};
use tower::ServiceExt;

#[tokio::test]
async fn config_json_exposes_api_base_url() {
    let (app, _dir) = test_app();
    let response = app.oneshot(get("/config.json")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-store"
    );
    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["api_base_url"], "https://api.example.com/v1");
}

#[tokio::test]
async fn api_paths_are_not_answered_with_the_spa_shell() {
    let (app, _dir) = test_app();
    let response = app.oneshot(get("/api/cart/add-cart")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn static_assets_are_served_directly() {
    let (app, _dir) = test_app();
    let response = app.oneshot(get("/assets/app.js")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "console.log('app');");
}
