use axum::body::Body;
use axum::http::{HeaderMap, HeaderValue, Request, StatusCode};
use axum::routing::get;
use axum::{Extension, Router, middleware};
use tower::ServiceExt;

use truthbot::infrastructure::observability::{
    MAX_REQUEST_ID_LEN, REQUEST_ID_HEADER, RequestId, incoming_request_id,
    request_id_middleware,
};

fn app() -> Router {
    Router::new()
        .route(
            "/echo",
            get(|Extension(id): Extension<RequestId>| async move { id.0 }),
        )
        .layer(middleware::from_fn(request_id_middleware))
}

#[test]
fn given_request_id_header_constant_when_accessed_then_returns_correct_value() {
    assert_eq!(REQUEST_ID_HEADER, "x-request-id");
}

#[tokio::test]
async fn given_incoming_request_id_when_handling_then_reuses_and_echoes_it() {
    let request = Request::builder()
        .uri("/echo")
        .header(REQUEST_ID_HEADER, "test-123")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[REQUEST_ID_HEADER], "test-123");
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"test-123");
}

#[tokio::test]
async fn given_no_request_id_when_handling_then_generates_uuid() {
    let request = Request::builder().uri("/echo").body(Body::empty()).unwrap();

    let response = app().oneshot(request).await.unwrap();

    let header = response.headers()[REQUEST_ID_HEADER].to_str().unwrap().to_string();
    assert!(uuid::Uuid::parse_str(&header).is_ok());
}

#[tokio::test]
async fn given_empty_request_id_when_handling_then_generates_new_one() {
    let request = Request::builder()
        .uri("/echo")
        .header(REQUEST_ID_HEADER, "")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert!(!response.headers()[REQUEST_ID_HEADER].is_empty());
}

#[tokio::test]
async fn given_overlong_request_id_when_handling_then_replaces_it_with_uuid() {
    let long_id = "a".repeat(MAX_REQUEST_ID_LEN + 1);
    let request = Request::builder()
        .uri("/echo")
        .header(REQUEST_ID_HEADER, long_id.as_str())
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    let header = response.headers()[REQUEST_ID_HEADER].to_str().unwrap().to_string();
    assert_ne!(header, long_id);
    assert!(uuid::Uuid::parse_str(&header).is_ok());
}

#[test]
fn given_header_values_when_reading_incoming_id_then_only_visible_ascii_is_kept() {
    let mut headers = HeaderMap::new();
    assert_eq!(incoming_request_id(&headers), None);

    headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("  trace-42  "));
    assert_eq!(incoming_request_id(&headers), Some("trace-42".to_string()));

    headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("has space"));
    assert_eq!(incoming_request_id(&headers), None);

    let at_limit = "b".repeat(MAX_REQUEST_ID_LEN);
    headers.insert(REQUEST_ID_HEADER, HeaderValue::from_str(&at_limit).unwrap());
    assert_eq!(incoming_request_id(&headers), Some(at_limit));
}
