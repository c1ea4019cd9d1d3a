use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{BackendResponse, FinishReason, LlmClient, LlmClientError};

use super::generation_options::GenerationOptions;
use super::http_error::map_status_error;

pub const OLLAMA_BASE_URL: &str = "http://localhost:11434";

/// Local Ollama server. Text prompts go to `model`, image prompts to
/// `vision_model`.
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
    vision_model: String,
    options: GenerationOptions,
}

impl OllamaClient {
    pub fn new(
        base_url: Option<&str>,
        model: &str,
        vision_model: Option<&str>,
        options: GenerationOptions,
    ) -> Result<Self, LlmClientError> {
        let client = Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(|e| LlmClientError::ApiRequestFailed(format!("http client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url
                .unwrap_or(OLLAMA_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            model: model.to_string(),
            vision_model: vision_model.unwrap_or(model).to_string(),
            options,
        })
    }

    async fn chat(
        &self,
        model: &str,
        prompt: &str,
        images: Vec<String>,
    ) -> Result<BackendResponse, LlmClientError> {
        let mut message = serde_json::json!({ "role": "user", "content": prompt });
        if !images.is_empty() {
            message["images"] = serde_json::json!(images);
        }

        let body = serde_json::json!({
            "model": model,
            "messages": [message],
            "stream": false,
            "options": {
                "temperature": self.options.temperature,
                "num_predict": self.options.max_output_tokens
            }
        });

        let url = format!("{}/api/chat", self.base_url);
        tracing::debug!(model, "Sending request to Ollama");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(LlmClientError::from_transport)?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(map_status_error(status, &text));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmClientError::InvalidResponse(format!("Ollama JSON parse error: {e}")))?;

        Ok(parsed.into_backend_response())
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    message: Option<ChatMessage>,
    done_reason: Option<String>,
}

#[derive(Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: String,
}

impl ChatResponse {
    fn into_backend_response(self) -> BackendResponse {
        let Some(message) = self.message else {
            return BackendResponse::NoCandidates;
        };

        match self.done_reason.as_deref() {
            None | Some("stop") => BackendResponse::NormalText(message.content),
            Some(other) => BackendResponse::AbnormalFinish {
                reason: FinishReason::Other(other.to_string()),
                text: message.content,
            },
        }
    }
}

#[async_trait]
impl LlmClient for OllamaClient {
    #[tracing::instrument(skip(self, prompt), fields(model = %self.model, prompt_chars = prompt.len()))]
    async fn generate_text(&self, prompt: &str) -> Result<BackendResponse, LlmClientError> {
        self.chat(&self.model, prompt, Vec::new()).await
    }

    #[tracing::instrument(skip(self, prompt, image), fields(model = %self.vision_model, image_bytes = image.len()))]
    async fn generate_vision(
        &self,
        prompt: &str,
        image: &[u8],
    ) -> Result<BackendResponse, LlmClientError> {
        let encoded = general_purpose::STANDARD.encode(image);
        self.chat(&self.vision_model, prompt, vec![encoded]).await
    }

    fn engine_name(&self) -> String {
        format!("ollama:{}", self.model)
    }
}
