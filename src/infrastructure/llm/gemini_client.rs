use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{BackendResponse, FinishReason, LlmClient, LlmClientError};
use crate::domain::sniff_image_mime;

use super::generation_options::GenerationOptions;
use super::http_error::map_status_error;

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    options: GenerationOptions,
}

impl GeminiClient {
    pub fn new(
        api_key: &str,
        model: &str,
        base_url: Option<&str>,
        options: GenerationOptions,
    ) -> Result<Self, LlmClientError> {
        let client = Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(|e| LlmClientError::ApiRequestFailed(format!("http client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url
                .unwrap_or(GEMINI_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            options,
        })
    }

    async fn generate(&self, parts: serde_json::Value) -> Result<BackendResponse, LlmClientError> {
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model);

        let body = serde_json::json!({
            "contents": [{ "role": "user", "parts": parts }],
            "generationConfig": {
                "temperature": self.options.temperature,
                "maxOutputTokens": self.options.max_output_tokens
            }
        });

        tracing::debug!(model = %self.model, "Sending request to Gemini");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(LlmClientError::from_transport)?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(map_status_error(status, &text));
        }

        let raw_bytes = response.bytes().await.map_err(LlmClientError::from_transport)?;

        let parsed: GenerateContentResponse = serde_json::from_slice(&raw_bytes).map_err(|e| {
            tracing::error!(
                raw_response = %String::from_utf8_lossy(&raw_bytes),
                "Failed to parse Gemini JSON"
            );
            LlmClientError::InvalidResponse(format!("Gemini JSON parse error: {e}"))
        })?;

        Ok(parsed.into_backend_response())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    fn into_backend_response(self) -> BackendResponse {
        let Some(candidate) = self.candidates.into_iter().next() else {
            let block_reason = self
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .unwrap_or_else(|| "unspecified".to_string());
            tracing::warn!(block_reason = %block_reason, "Gemini returned no candidates");
            return BackendResponse::NoCandidates;
        };

        let text = candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        match candidate.finish_reason.as_deref() {
            None | Some("STOP") => BackendResponse::NormalText(text),
            Some("SAFETY" | "PROHIBITED_CONTENT" | "BLOCKLIST" | "SPII") => {
                BackendResponse::AbnormalFinish {
                    reason: FinishReason::Safety,
                    text,
                }
            }
            Some(other) => BackendResponse::AbnormalFinish {
                reason: FinishReason::Other(other.to_string()),
                text,
            },
        }
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    #[tracing::instrument(skip(self, prompt), fields(model = %self.model, prompt_chars = prompt.len()))]
    async fn generate_text(&self, prompt: &str) -> Result<BackendResponse, LlmClientError> {
        self.generate(serde_json::json!([{ "text": prompt }])).await
    }

    #[tracing::instrument(skip(self, prompt, image), fields(model = %self.model, image_bytes = image.len()))]
    async fn generate_vision(
        &self,
        prompt: &str,
        image: &[u8],
    ) -> Result<BackendResponse, LlmClientError> {
        let parts = serde_json::json!([
            { "text": prompt },
            {
                "inline_data": {
                    "mime_type": sniff_image_mime(image),
                    "data": general_purpose::STANDARD.encode(image)
                }
            }
        ]);

        self.generate(parts).await
    }

    fn engine_name(&self) -> String {
        format!("gemini:{}", self.model)
    }
}
