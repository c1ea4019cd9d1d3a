mod gemini_client;
mod generation_options;
mod http_error;
mod llm_client_factory;
mod mock_llm_client;
mod ollama_client;

pub use gemini_client::{GEMINI_BASE_URL, GeminiClient};
pub use generation_options::{DEFAULT_TIMEOUT, GenerationOptions};
pub use http_error::map_status_error;
pub use llm_client_factory::{LlmClientFactory, LlmClientFactoryError};
pub use mock_llm_client::{MOCK_VERDICT_JSON, MockLlmClient};
pub use ollama_client::{OLLAMA_BASE_URL, OllamaClient};
