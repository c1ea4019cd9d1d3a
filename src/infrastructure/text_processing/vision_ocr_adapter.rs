use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{BackendResponse, FileLoader, FileLoaderError, LlmClient};
use crate::application::services::OCR_PROMPT;
use crate::domain::{MediaCategory, VerificationRequest};

use super::pdf_adapter::EXTRACTION_TIMEOUT;
use super::text_sanitizer::sanitize_extracted_text;

/// Transcribes images with a vision-capable model.
pub struct VisionOcrAdapter {
    llm_client: Arc<dyn LlmClient>,
}

impl VisionOcrAdapter {
    pub fn new(llm_client: Arc<dyn LlmClient>) -> Self {
        Self { llm_client }
    }
}

#[async_trait]
impl FileLoader for VisionOcrAdapter {
    #[tracing::instrument(
        skip(self, data),
        fields(
            request_id = %request.id,
            filename = %request.filename,
            size_bytes = request.size_bytes,
        )
    )]
    async fn extract_text(
        &self,
        data: &[u8],
        request: &VerificationRequest,
    ) -> Result<String, FileLoaderError> {
        if request.category != MediaCategory::Image {
            return Err(FileLoaderError::UnsupportedMediaCategory(
                request.category.as_str().to_string(),
            ));
        }

        let response = tokio::time::timeout(
            EXTRACTION_TIMEOUT,
            self.llm_client.generate_vision(OCR_PROMPT, data),
        )
        .await
        .map_err(|_| FileLoaderError::ExtractionFailed("OCR timed out".to_string()))?
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("OCR request failed: {e}")))?;

        let text = match response {
            BackendResponse::NormalText(text) | BackendResponse::AbnormalFinish { text, .. } => {
                sanitize_extracted_text(&text)
            }
            BackendResponse::NoCandidates => String::new(),
        };

        if text.is_empty() {
            return Err(FileLoaderError::NoTextFound(request.filename.clone()));
        }

        tracing::info!(chars = text.chars().count(), "OCR transcription complete");

        Ok(text)
    }
}
