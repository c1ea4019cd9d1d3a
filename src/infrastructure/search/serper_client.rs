use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{SearchError, SearchProvider};
use crate::domain::{SearchContext, SearchSnippet};

pub const SERPER_BASE_URL: &str = "https://google.serper.dev";
pub const DEFAULT_NUM_RESULTS: usize = 5;

/// Serper.dev Google search, organic results only.
pub struct SerperClient {
    client: Client,
    base_url: String,
    api_key: String,
    num_results: usize,
}

impl SerperClient {
    pub fn new(
        api_key: &str,
        base_url: Option<&str>,
        num_results: usize,
        timeout: Duration,
    ) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SearchError::RequestFailed(format!("http client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url
                .unwrap_or(SERPER_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            api_key: api_key.to_string(),
            num_results,
        })
    }
}

#[derive(Debug, Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<SerperItem>,
}

#[derive(Debug, Deserialize)]
struct SerperItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
}

#[async_trait]
impl SearchProvider for SerperClient {
    #[tracing::instrument(skip(self, query), fields(query_chars = query.len()))]
    async fn search(&self, query: &str) -> Result<SearchContext, SearchError> {
        let response = self
            .client
            .post(format!("{}/search", self.base_url))
            .header("X-API-KEY", &self.api_key)
            .json(&serde_json::json!({ "q": query, "num": self.num_results }))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::Timeout
                } else {
                    SearchError::RequestFailed(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::RequestFailed(format!("status {status}: {body}")));
        }

        let parsed: SerperResponse = response
            .json()
            .await
            .map_err(|e| SearchError::InvalidResponse(e.to_string()))?;

        let snippets = parsed
            .organic
            .into_iter()
            .filter(|item| !item.title.is_empty() || !item.snippet.is_empty())
            .take(self.num_results)
            .map(|item| SearchSnippet {
                title: item.title,
                snippet: item.snippet,
            })
            .collect::<Vec<_>>();

        tracing::info!(results = snippets.len(), "Serper search complete");

        Ok(SearchContext::new(snippets))
    }

    fn engine_name(&self) -> String {
        "serper".to_string()
    }
}
