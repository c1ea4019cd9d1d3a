use async_trait::async_trait;

use crate::domain::SearchContext;

#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<SearchContext, SearchError>;

    fn engine_name(&self) -> String;
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    RequestFailed(String),
    #[error("search timed out")]
    Timeout,
    #[error("invalid search response: {0}")]
    InvalidResponse(String),
}
