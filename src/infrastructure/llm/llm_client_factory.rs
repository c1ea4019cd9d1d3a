use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::LlmClient;
use crate::presentation::config::{LlmProvider, LlmSettings};

use super::gemini_client::GeminiClient;
use super::generation_options::GenerationOptions;
use super::ollama_client::OllamaClient;

#[derive(Debug, thiserror::Error)]
pub enum LlmClientFactoryError {
    #[error("missing API key: the Gemini provider requires llm.api_key")]
    MissingApiKey,
    #[error("client initialization failed: {0}")]
    InitializationFailed(String),
}

pub struct LlmClientFactory;

impl LlmClientFactory {
    pub fn create(settings: &LlmSettings) -> Result<Arc<dyn LlmClient>, LlmClientFactoryError> {
        let options = GenerationOptions {
            temperature: settings.temperature,
            max_output_tokens: settings.max_output_tokens,
            timeout: Duration::from_secs(settings.timeout_seconds),
        };

        match settings.provider {
            LlmProvider::Gemini => {
                let key = settings
                    .api_key
                    .as_deref()
                    .filter(|k| !k.is_empty())
                    .ok_or(LlmClientFactoryError::MissingApiKey)?;
                tracing::info!(model = %settings.model, "Using Gemini backend");
                let client =
                    GeminiClient::new(key, &settings.model, settings.base_url.as_deref(), options)
                        .map_err(|e| LlmClientFactoryError::InitializationFailed(e.to_string()))?;
                Ok(Arc::new(client))
            }
            LlmProvider::Ollama => {
                tracing::info!(
                    model = %settings.model,
                    vision_model = settings.vision_model.as_deref().unwrap_or(settings.model.as_str()),
                    "Using Ollama backend"
                );
                let client = OllamaClient::new(
                    settings.base_url.as_deref(),
                    &settings.model,
                    settings.vision_model.as_deref(),
                    options,
                )
                .map_err(|e| LlmClientFactoryError::InitializationFailed(e.to_string()))?;
                Ok(Arc::new(client))
            }
        }
    }
}
