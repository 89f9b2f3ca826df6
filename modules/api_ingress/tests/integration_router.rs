//! Router-level tests for the ingress: base routes, docs toggle and body limit.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::post,
    Router,
};
use tower::ServiceExt;
use utoipa::OpenApi;

use api_ingress::{ApiIngress, ApiIngressConfig};

#[derive(OpenApi)]
#[openapi(info(title = "fixture", version = "0.0.1"))]
struct FixtureDoc;

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn root_says_hello() {
    let app = ApiIngress::new(ApiIngressConfig::default())
        .build_router(Router::new())
        .unwrap();

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "Hello World!");
}

#[tokio::test]
async fn health_reports_healthy() {
    let app = ApiIngress::new(ApiIngressConfig::default())
        .build_router(Router::new())
        .unwrap();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["status"], "healthy");
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn openapi_is_served_only_when_enabled() {
    let disabled = ApiIngress::new(ApiIngressConfig::default())
        .with_openapi(FixtureDoc::openapi())
        .build_router(Router::new())
        .unwrap();
    let response = disabled
        .oneshot(
            Request::builder()
                .uri("/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let config = ApiIngressConfig {
        enable_docs: true,
        ..Default::default()
    };
    let enabled = ApiIngress::new(config)
        .with_openapi(FixtureDoc::openapi())
        .build_router(Router::new())
        .unwrap();
    let response = enabled
        .oneshot(
            Request::builder()
                .uri("/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["info"]["title"], "fixture");
}

#[tokio::test]
async fn oversized_bodies_are_rejected() {
    let config = ApiIngressConfig {
        body_limit_bytes: 8,
        ..Default::default()
    };
    let routes = Router::new().route("/sink", post(|body: String| async move { body }));
    let app = ApiIngress::new(config).build_router(routes).unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/sink")
                .header("content-length", "32")
                .body(Body::from("x".repeat(32)))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
