use axum::body::Body;
use axum::http::{Request, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use super::*;
use crate::config::ServerConfig;

/// Router whose upstream refuses connections.
fn test_router() -> Router {
    let config = ServerConfig::from_lookup(|key| match key {
        "CRM_API_URL" => Some("http://127.0.0.1:9".to_owned()),
        "RELAY_TIMEOUT_SECS" => Some("2".to_owned()),
        _ => None,
    })
    .unwrap();
    api_routes(AppState::new(config).unwrap())
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn healthz_returns_ok() {
    let request = Request::builder().uri("/healthz").body(Body::empty()).unwrap();
    let response = test_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn graphql_relay_reports_unreachable_upstream() {
    let request = Request::builder()
        .method("POST")
        .uri("/graphql")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"query":"{ dealBoards { _id } }"}"#))
        .unwrap();
    let response = test_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert!(body["message"].as_str().unwrap().starts_with("upstream request failed"));
}

#[tokio::test]
async fn upload_relay_requires_content_type() {
    let request = Request::builder()
        .method("POST")
        .uri("/upload-file?type=deal")
        .body(Body::from("raw"))
        .unwrap();
    let response = test_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "missing content-type header");
}

#[tokio::test]
async fn graphql_relay_rejects_get() {
    let request = Request::builder().uri("/graphql").body(Body::empty()).unwrap();
    let response = test_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
