use crate::application::ports::{BackendResponse, LlmClient, LlmClientError};

pub const MOCK_VERDICT_JSON: &str = r#"{"verified": true, "percentage": 92, "analysis": "Consistent with known facts.", "errors": [], "summary": "Accurate"}"#;

/// Answers every prompt with the same clean verdict.
pub struct MockLlmClient;

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn generate_text(&self, _prompt: &str) -> Result<BackendResponse, LlmClientError> {
        Ok(BackendResponse::NormalText(MOCK_VERDICT_JSON.to_string()))
    }

    async fn generate_vision(
        &self,
        _prompt: &str,
        _image: &[u8],
    ) -> Result<BackendResponse, LlmClientError> {
        Ok(BackendResponse::NormalText(MOCK_VERDICT_JSON.to_string()))
    }

    fn engine_name(&self) -> String {
        "mock".to_string()
    }
}
