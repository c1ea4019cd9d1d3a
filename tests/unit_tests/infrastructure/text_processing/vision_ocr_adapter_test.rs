use std::sync::{Arc, Mutex};

use truthbot::application::ports::{
    BackendResponse, FileLoader, FileLoaderError, FinishReason, LlmClient, LlmClientError,
};
use truthbot::application::services::OCR_PROMPT;
use truthbot::domain::{MediaCategory, VerificationRequest};
use truthbot::infrastructure::text_processing::VisionOcrAdapter;

struct ScriptedVision {
    response: fn() -> Result<BackendResponse, LlmClientError>,
    last_prompt: Mutex<Option<String>>,
}

impl ScriptedVision {
    fn new(response: fn() -> Result<BackendResponse, LlmClientError>) -> Arc<Self> {
        Arc::new(Self {
            response,
            last_prompt: Mutex::new(None),
        })
    }
}

#[async_trait::async_trait]
impl LlmClient for ScriptedVision {
    async fn generate_text(&self, _prompt: &str) -> Result<BackendResponse, LlmClientError> {
        Err(LlmClientError::ApiRequestFailed("text path not expected".to_string()))
    }

    async fn generate_vision(
        &self,
        prompt: &str,
        _image: &[u8],
    ) -> Result<BackendResponse, LlmClientError> {
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        (self.response)()
    }

    fn engine_name(&self) -> String {
        "scripted".to_string()
    }
}

fn image_request() -> VerificationRequest {
    VerificationRequest::new("poster.png".to_string(), MediaCategory::Image, 4)
}

#[tokio::test]
async fn given_transcription_when_extracting_then_returns_sanitized_text_using_ocr_prompt() {
    let client = ScriptedVision::new(|| {
        Ok(BackendResponse::NormalText(
            "  SALE   ENDS\n\n\n\nTODAY  ".to_string(),
        ))
    });
    let adapter = VisionOcrAdapter::new(client.clone());

    let text = adapter.extract_text(b"\x89PNG", &image_request()).await.unwrap();

    assert_eq!(text, "SALE ENDS\n\nTODAY");
    assert_eq!(client.last_prompt.lock().unwrap().as_deref(), Some(OCR_PROMPT));
}

#[tokio::test]
async fn given_partial_transcription_when_extracting_then_keeps_text() {
    let client = ScriptedVision::new(|| {
        Ok(BackendResponse::AbnormalFinish {
            reason: FinishReason::Other("MAX_TOKENS".to_string()),
            text: "partial words".to_string(),
        })
    });
    let adapter = VisionOcrAdapter::new(client);

    let text = adapter.extract_text(b"\x89PNG", &image_request()).await.unwrap();

    assert_eq!(text, "partial words");
}

#[tokio::test]
async fn given_no_candidates_when_extracting_then_returns_no_text_found() {
    let adapter = VisionOcrAdapter::new(ScriptedVision::new(|| Ok(BackendResponse::NoCandidates)));

    let result = adapter.extract_text(b"\x89PNG", &image_request()).await;

    assert!(matches!(result, Err(FileLoaderError::NoTextFound(_))));
}

#[tokio::test]
async fn given_backend_failure_when_extracting_then_returns_extraction_failed() {
    let adapter = VisionOcrAdapter::new(ScriptedVision::new(|| Err(LlmClientError::RateLimited)));

    let result = adapter.extract_text(b"\x89PNG", &image_request()).await;

    assert!(matches!(result, Err(FileLoaderError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_non_image_category_when_extracting_then_returns_unsupported() {
    let adapter = VisionOcrAdapter::new(ScriptedVision::new(|| Ok(BackendResponse::NoCandidates)));
    let request = VerificationRequest::new("notes.txt".to_string(), MediaCategory::Text, 1);

    let result = adapter.extract_text(b"x", &request).await;

    assert!(matches!(
        result,
        Err(FileLoaderError::UnsupportedMediaCategory(_))
    ));
}
