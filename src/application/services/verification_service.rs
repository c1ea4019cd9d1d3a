use std::sync::Arc;

use crate::application::ports::{BackendResponse, FileLoader, LlmClient, LlmClientError, SearchProvider};
use crate::domain::{
    FailureClassification, MediaCategory, SearchContext, VerdictRecord, VerificationRequest,
    file_extension,
};
use crate::infrastructure::observability::sanitize_prompt;

use super::prompt_builder::{PromptBuilder, truncate_chars};
use super::verdict_normalizer::{backend_error_record, fallback_record, normalize};

pub const DEFAULT_SEARCH_QUERY_CHARS: usize = 200;

/// How image uploads reach the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageStrategy {
    /// Send the image bytes to the vision endpoint for combined reading and verification.
    Vision,
    /// Transcribe through the extraction router, then verify as text.
    Ocr,
}

#[derive(Debug, Clone)]
pub struct VerificationConfig {
    pub max_prompt_chars: usize,
    pub search_query_chars: usize,
    pub image_strategy: ImageStrategy,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            max_prompt_chars: super::prompt_builder::DEFAULT_MAX_SUBJECT_CHARS,
            search_query_chars: DEFAULT_SEARCH_QUERY_CHARS,
            image_strategy: ImageStrategy::Vision,
        }
    }
}

/// Sequences validation, extraction, search, prompting and normalization for
/// one upload. Holds no per-request state.
pub struct VerificationService {
    extractor: Arc<dyn FileLoader>,
    llm_client: Arc<dyn LlmClient>,
    search_provider: Arc<dyn SearchProvider>,
    prompt_builder: PromptBuilder,
    config: VerificationConfig,
}

impl VerificationService {
    pub fn new(
        extractor: Arc<dyn FileLoader>,
        llm_client: Arc<dyn LlmClient>,
        search_provider: Arc<dyn SearchProvider>,
        config: VerificationConfig,
    ) -> Self {
        Self {
            extractor,
            llm_client,
            search_provider,
            prompt_builder: PromptBuilder::new(config.max_prompt_chars),
            config,
        }
    }

    pub fn engine_name(&self) -> String {
        self.llm_client.engine_name()
    }

    pub fn search_engine_name(&self) -> String {
        self.search_provider.engine_name()
    }

    /// Verifies any accepted upload. Never fails: every outcome is a record.
    #[tracing::instrument(skip(self, data), fields(bytes = data.len()))]
    pub async fn verify(&self, filename: &str, data: &[u8]) -> VerdictRecord {
        let Some(category) = MediaCategory::from_filename(filename) else {
            let extension = file_extension(filename)
                .map(|ext| format!(".{ext}"))
                .unwrap_or_else(|| String::from("(none)"));
            return self.reject(
                FailureClassification::UnsupportedFileType,
                Some(&format!("Unsupported file type: {extension}")),
            );
        };

        if data.is_empty() {
            return self.reject(FailureClassification::EmptyInput, None);
        }

        let request = VerificationRequest::new(filename.to_string(), category, data.len() as u64);
        tracing::debug!(
            request_id = %request.id,
            category = category.as_str(),
            size_bytes = request.size_bytes,
            "Verification request accepted"
        );

        if category == MediaCategory::Image && self.config.image_strategy == ImageStrategy::Vision {
            return self.verify_with_vision(data).await;
        }

        self.verify_extracted(data, &request).await
    }

    /// Verifies raw image bytes through the vision path.
    #[tracing::instrument(skip(self, data), fields(bytes = data.len()))]
    pub async fn verify_image(&self, data: &[u8]) -> VerdictRecord {
        if data.is_empty() {
            return self.reject(FailureClassification::EmptyInput, None);
        }

        self.verify_with_vision(data).await
    }

    async fn verify_extracted(&self, data: &[u8], request: &VerificationRequest) -> VerdictRecord {
        let text = match self.extractor.extract_text(data, request).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "Extraction returned an error");
                String::new()
            }
        };

        if text.trim().is_empty() {
            return self.reject(FailureClassification::ExtractionFailed, None);
        }

        tracing::debug!(
            chars = text.chars().count(),
            preview = %sanitize_prompt(&text),
            "Text extracted"
        );

        let context = self.fetch_search_context(&text).await;
        let prompt = self.prompt_builder.build_prompt(&text, &context);

        self.finish(self.llm_client.generate_text(&prompt).await)
    }

    async fn verify_with_vision(&self, data: &[u8]) -> VerdictRecord {
        let prompt = self.prompt_builder.build_vision_prompt();
        self.finish(self.llm_client.generate_vision(&prompt, data).await)
    }

    async fn fetch_search_context(&self, text: &str) -> SearchContext {
        let query = search_query(text, self.config.search_query_chars);
        if query.is_empty() {
            return SearchContext::empty();
        }

        match self.search_provider.search(&query).await {
            Ok(context) => {
                tracing::debug!(snippets = context.len(), "Search context fetched");
                context
            }
            Err(e) => {
                tracing::warn!(error = %e, "Search failed, continuing without context");
                SearchContext::empty()
            }
        }
    }

    fn finish(&self, result: Result<BackendResponse, LlmClientError>) -> VerdictRecord {
        let record = match result {
            Ok(response) => normalize(&response),
            Err(e) => backend_error_record(&e),
        };

        tracing::info!(
            verified = record.verified,
            percentage = record.percentage,
            error_count = record.errors.len(),
            "Verification complete"
        );

        record
    }

    fn reject(&self, classification: FailureClassification, detail: Option<&str>) -> VerdictRecord {
        tracing::warn!(
            classification = %classification,
            input_error = classification.is_input_error(),
            "Request rejected before reaching the backend"
        );
        fallback_record(classification, detail)
    }
}

/// Leading characters of the text on a single line, used as the search query.
pub fn search_query(text: &str, max_chars: usize) -> String {
    truncate_chars(text.trim(), max_chars)
        .replace(['\r', '\n'], " ")
        .trim()
        .to_string()
}
