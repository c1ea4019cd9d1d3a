use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::Router;
use serde_json::{Value, json};

use truthbot::application::ports::{BackendResponse, FinishReason, LlmClient, LlmClientError};
use truthbot::infrastructure::llm::{GeminiClient, GenerationOptions};

#[derive(Debug, Clone)]
struct CapturedRequest {
    path: String,
    api_key: Option<String>,
    body: Value,
}

type Capture = Arc<Mutex<Option<CapturedRequest>>>;

#[derive(Clone)]
struct MockState {
    capture: Capture,
    status: StatusCode,
    reply: Value,
    delay: Duration,
}

async fn mock_handler(
    State(state): State<MockState>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    *state.capture.lock().unwrap() = Some(CapturedRequest {
        path: uri.path().to_string(),
        api_key: headers
            .get("x-goog-api-key")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });
    tokio::time::sleep(state.delay).await;
    (state.status, Json(state.reply))
}

async fn spawn_mock(status: StatusCode, reply: Value, delay: Duration) -> (String, Capture) {
    let capture: Capture = Arc::new(Mutex::new(None));
    let state = MockState {
        capture: capture.clone(),
        status,
        reply,
        delay,
    };
    // Gemini paths contain `:generateContent`, so match everything.
    let app = Router::new().fallback(mock_handler).with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), capture)
}

fn client(base_url: &str) -> GeminiClient {
    GeminiClient::new(
        "test-key",
        "gemini-test",
        Some(base_url),
        GenerationOptions::default(),
    )
    .unwrap()
}

fn candidate(text: &str, finish_reason: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }], "role": "model" },
            "finishReason": finish_reason
        }]
    })
}

#[tokio::test]
async fn given_stop_finish_when_generating_text_then_returns_normal_text() {
    let (base_url, capture) =
        spawn_mock(StatusCode::OK, candidate("{\"verified\":true}", "STOP"), Duration::ZERO).await;

    let response = client(&base_url).generate_text("check this").await.unwrap();

    assert_eq!(response, BackendResponse::NormalText("{\"verified\":true}".to_string()));

    let captured = capture.lock().unwrap().clone().unwrap();
    assert_eq!(captured.path, "/v1beta/models/gemini-test:generateContent");
    assert_eq!(captured.api_key.as_deref(), Some("test-key"));
    assert_eq!(captured.body["contents"][0]["parts"][0]["text"], json!("check this"));
    assert_eq!(captured.body["generationConfig"]["maxOutputTokens"], json!(1024));
}

#[tokio::test]
async fn given_multiple_parts_when_generating_then_concatenates_text() {
    let reply = json!({
        "candidates": [{
            "content": { "parts": [{ "text": "{\"a\":" }, { "text": "1}" }] },
            "finishReason": "STOP"
        }]
    });
    let (base_url, _) = spawn_mock(StatusCode::OK, reply, Duration::ZERO).await;

    let response = client(&base_url).generate_text("p").await.unwrap();

    assert_eq!(response, BackendResponse::NormalText("{\"a\":1}".to_string()));
}

#[tokio::test]
async fn given_empty_candidates_when_generating_then_returns_no_candidates() {
    let reply = json!({ "promptFeedback": { "blockReason": "SAFETY" } });
    let (base_url, _) = spawn_mock(StatusCode::OK, reply, Duration::ZERO).await;

    let response = client(&base_url).generate_text("p").await.unwrap();

    assert_eq!(response, BackendResponse::NoCandidates);
}

#[tokio::test]
async fn given_safety_finish_when_generating_then_returns_safety_abnormal_finish() {
    let (base_url, _) = spawn_mock(StatusCode::OK, candidate("", "SAFETY"), Duration::ZERO).await;

    let response = client(&base_url).generate_text("p").await.unwrap();

    assert!(matches!(
        response,
        BackendResponse::AbnormalFinish { reason: FinishReason::Safety, .. }
    ));
}

#[tokio::test]
async fn given_max_tokens_finish_when_generating_then_keeps_partial_text() {
    let (base_url, _) =
        spawn_mock(StatusCode::OK, candidate("{\"verified\": tr", "MAX_TOKENS"), Duration::ZERO).await;

    let response = client(&base_url).generate_text("p").await.unwrap();

    assert_eq!(
        response,
        BackendResponse::AbnormalFinish {
            reason: FinishReason::Other("MAX_TOKENS".to_string()),
            text: "{\"verified\": tr".to_string(),
        }
    );
}

#[tokio::test]
async fn given_image_when_generating_vision_then_sends_inline_data_with_sniffed_mime() {
    let (base_url, capture) = spawn_mock(StatusCode::OK, candidate("{}", "STOP"), Duration::ZERO).await;
    let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    client(&base_url).generate_vision("read it", &png).await.unwrap();

    let captured = capture.lock().unwrap().clone().unwrap();
    let parts = &captured.body["contents"][0]["parts"];
    assert_eq!(parts[0]["text"], json!("read it"));
    assert_eq!(parts[1]["inline_data"]["mime_type"], json!("image/png"));
    assert_eq!(parts[1]["inline_data"]["data"], json!("iVBORw0KGgo="));
}

#[tokio::test]
async fn given_status_errors_when_generating_then_maps_to_typed_errors() {
    let cases = [
        (StatusCode::NOT_FOUND, json!({ "error": { "message": "models/x is not found" } })),
        (StatusCode::TOO_MANY_REQUESTS, json!({ "error": { "message": "quota" } })),
        (StatusCode::BAD_REQUEST, json!({ "error": { "message": "API key not valid", "status": "API_KEY_INVALID" } })),
        (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": { "message": "boom" } })),
    ];

    let mut results = Vec::new();
    for (status, reply) in cases {
        let (base_url, _) = spawn_mock(status, reply, Duration::ZERO).await;
        results.push(client(&base_url).generate_text("p").await.unwrap_err());
    }

    assert!(matches!(results[0], LlmClientError::ModelNotFound(_)));
    assert!(matches!(results[1], LlmClientError::RateLimited));
    assert!(matches!(results[2], LlmClientError::InvalidCredentials(_)));
    assert!(matches!(results[3], LlmClientError::ApiRequestFailed(_)));
}

#[tokio::test]
async fn given_slow_backend_when_generating_then_returns_timeout() {
    let (base_url, _) =
        spawn_mock(StatusCode::OK, candidate("{}", "STOP"), Duration::from_secs(5)).await;
    let options = GenerationOptions {
        timeout: Duration::from_millis(200),
        ..GenerationOptions::default()
    };
    let client = GeminiClient::new("test-key", "gemini-test", Some(&base_url), options).unwrap();

    let result = client.generate_text("p").await;

    assert!(matches!(result, Err(LlmClientError::Timeout)));
}

#[tokio::test]
async fn given_model_when_reading_engine_name_then_includes_provider_and_model() {
    let client = GeminiClient::new("k", "gemini-2.0-flash-001", None, GenerationOptions::default()).unwrap();
    assert_eq!(client.engine_name(), "gemini:gemini-2.0-flash-001");
}
