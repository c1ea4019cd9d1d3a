use async_trait::async_trait;

use crate::application::ports::{SearchError, SearchProvider};
use crate::domain::SearchContext;

/// Used when search is disabled or unconfigured; always returns no evidence.
pub struct NoSearchProvider;

#[async_trait]
impl SearchProvider for NoSearchProvider {
    async fn search(&self, _query: &str) -> Result<SearchContext, SearchError> {
        Ok(SearchContext::empty())
    }

    fn engine_name(&self) -> String {
        "none".to_string()
    }
}
