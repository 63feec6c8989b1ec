//! System endpoint tests

use super::{build_test_router, get_json, TestAppState};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use lunchvote_core::api::health::HealthResponse;
use pretty_assertions::assert_eq;
use serde_json::Value;
use tower::ServiceExt;

#[tokio::test]
async fn test_health_endpoint() {
    let app = build_test_router(TestAppState::new());

    let (status, body): (StatusCode, Option<HealthResponse>) = get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body.status, "healthy");
    assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_ready_endpoint() {
    let app = build_test_router(TestAppState::new());

    let response = app
        .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"ready");
}

#[tokio::test]
async fn test_metrics_disabled_without_recorder() {
    let app = build_test_router(TestAppState::new());

    let response = app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_openapi_document_lists_vote_paths() {
    let app = build_test_router(TestAppState::new());

    let (status, body): (StatusCode, Option<Value>) =
        get_json(&app, "/api-docs/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    let doc = body.unwrap();
    assert!(doc["paths"]["/api/votes"]["post"].is_object());
    assert!(doc["paths"]["/api/votes/results/today"]["get"].is_object());
    assert!(doc["components"]["securitySchemes"]["bearer_jwt"].is_object());
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = build_test_router(TestAppState::new());

    let response = app
        .oneshot(Request::builder().uri("/api/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
