use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{MediaCategory, VerificationRequest};

/// Dispatches a request to the adapter registered for its media category.
///
/// Adapter errors are logged and turned into an empty string, so callers only
/// ever see `Ok`. A missing adapter is treated the same way.
pub struct ExtractionRouter {
    adapters: HashMap<MediaCategory, Arc<dyn FileLoader>>,
}

impl ExtractionRouter {
    pub fn new(adapters: Vec<(MediaCategory, Arc<dyn FileLoader>)>) -> Self {
        Self {
            adapters: adapters.into_iter().collect(),
        }
    }

    /// Extracts by filename alone. Extensions outside the accepted set are
    /// decoded as plain text.
    pub async fn extract(&self, filename: &str, data: &[u8]) -> String {
        let category = MediaCategory::from_filename(filename).unwrap_or(MediaCategory::Text);
        let request = VerificationRequest::new(filename.to_string(), category, data.len() as u64);

        self.extract_text(data, &request).await.unwrap_or_default()
    }
}

#[async_trait]
impl FileLoader for ExtractionRouter {
    async fn extract_text(
        &self,
        data: &[u8],
        request: &VerificationRequest,
    ) -> Result<String, FileLoaderError> {
        let Some(adapter) = self.adapters.get(&request.category) else {
            tracing::warn!(
                category = request.category.as_str(),
                "No extraction adapter registered"
            );
            return Ok(String::new());
        };

        match adapter.extract_text(data, request).await {
            Ok(text) => Ok(text),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    category = request.category.as_str(),
                    filename = %request.filename,
                    "Extraction failed, returning empty text"
                );
                Ok(String::new())
            }
        }
    }
}
