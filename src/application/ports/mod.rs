mod file_loader;
mod llm_client;
mod search_provider;

pub use file_loader::{FileLoader, FileLoaderError};
pub use llm_client::{BackendResponse, FinishReason, LlmClient, LlmClientError};
pub use search_provider::{SearchError, SearchProvider};
