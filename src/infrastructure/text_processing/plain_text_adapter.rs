use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{MediaCategory, VerificationRequest};

/// Decodes bytes as UTF-8, replacing undecodable sequences instead of failing.
pub struct PlainTextAdapter;

#[async_trait]
impl FileLoader for PlainTextAdapter {
    async fn extract_text(
        &self,
        data: &[u8],
        request: &VerificationRequest,
    ) -> Result<String, FileLoaderError> {
        if request.category != MediaCategory::Text {
            return Err(FileLoaderError::UnsupportedMediaCategory(
                request.category.as_str().to_string(),
            ));
        }

        Ok(decode_lossy(data))
    }
}

/// Lossy UTF-8 decode with replacement characters removed.
pub fn decode_lossy(data: &[u8]) -> String {
    String::from_utf8_lossy(data)
        .chars()
        .filter(|c| *c != char::REPLACEMENT_CHARACTER)
        .collect()
}
