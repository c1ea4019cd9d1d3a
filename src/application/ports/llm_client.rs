use async_trait::async_trait;

/// Why the backend stopped generating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinishReason {
    Normal,
    Safety,
    Other(String),
}

/// Shape of a single backend answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendResponse {
    /// Nothing was generated, typically a pre-generation block.
    NoCandidates,
    /// Generation stopped for a reason other than normal completion.
    AbnormalFinish { reason: FinishReason, text: String },
    NormalText(String),
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn generate_text(&self, prompt: &str) -> Result<BackendResponse, LlmClientError>;

    async fn generate_vision(
        &self,
        prompt: &str,
        image: &[u8],
    ) -> Result<BackendResponse, LlmClientError>;

    /// Human-readable engine name, reported by the health endpoint.
    fn engine_name(&self) -> String;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("model not found: {0}")]
    ModelNotFound(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),
    #[error("request timed out")]
    Timeout,
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl LlmClientError {
    /// Maps a transport error, keeping timeouts distinguishable.
    pub fn from_transport(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else {
            Self::ApiRequestFailed(error.to_string())
        }
    }
}
