use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{SearchError, SearchProvider};
use crate::presentation::config::SearchSettings;

use super::no_search_provider::NoSearchProvider;
use super::serper_client::SerperClient;

pub struct SearchProviderFactory;

impl SearchProviderFactory {
    /// Falls back to [`NoSearchProvider`] when search is disabled or no key is set.
    pub fn create(settings: &SearchSettings) -> Result<Arc<dyn SearchProvider>, SearchError> {
        let key = settings.api_key.as_deref().filter(|k| !k.is_empty());

        match key {
            Some(key) if settings.enabled => {
                tracing::info!(num_results = settings.num_results, "Using Serper search");
                let client = SerperClient::new(
                    key,
                    settings.base_url.as_deref(),
                    settings.num_results,
                    Duration::from_secs(settings.timeout_seconds),
                )?;
                Ok(Arc::new(client))
            }
            _ => {
                tracing::warn!(
                    enabled = settings.enabled,
                    "Web search unavailable, verifying without external evidence"
                );
                Ok(Arc::new(NoSearchProvider))
            }
        }
    }
}
