use std::io::Write;
use std::time::Duration;

use async_trait::async_trait;
use pdf_oxide::PdfDocument;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{MediaCategory, VerificationRequest};

use super::text_sanitizer::sanitize_extracted_text;

pub const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Default)]
pub struct PdfAdapter;

impl PdfAdapter {
    pub fn new() -> Self {
        Self
    }

    /// One entry per page in document order; a page that fails to extract
    /// contributes an empty string.
    fn extract_pages(path: &std::path::Path) -> Result<Vec<String>, FileLoaderError> {
        let mut doc = PdfDocument::open(path)
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("failed to parse PDF: {e}")))?;

        let page_count = doc.page_count().map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to read page count: {e}"))
        })?;

        let pages = (0..page_count)
            .map(|page_index| match doc.extract_text(page_index) {
                Ok(text) => sanitize_extracted_text(&text),
                Err(e) => {
                    tracing::debug!(page_index, error = %e, "Page extraction failed");
                    String::new()
                }
            })
            .collect();

        Ok(pages)
    }
}

#[async_trait]
impl FileLoader for PdfAdapter {
    #[tracing::instrument(
        skip(self, data),
        fields(
            request_id = %request.id,
            filename = %request.filename,
            size_bytes = request.size_bytes,
        )
    )]
    async fn extract_text(
        &self,
        data: &[u8],
        request: &VerificationRequest,
    ) -> Result<String, FileLoaderError> {
        if request.category != MediaCategory::Pdf {
            return Err(FileLoaderError::UnsupportedMediaCategory(
                request.category.as_str().to_string(),
            ));
        }

        let mut temp_file = tempfile::NamedTempFile::new().map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to create temp file: {e}"))
        })?;

        temp_file.write_all(data).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to write temp file: {e}"))
        })?;

        let temp_path = temp_file.path().to_path_buf();

        let pages = tokio::time::timeout(
            EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || {
                std::panic::catch_unwind(|| Self::extract_pages(&temp_path)).unwrap_or_else(|_| {
                    Err(FileLoaderError::ExtractionFailed(
                        "panic during PDF parsing".to_string(),
                    ))
                })
            }),
        )
        .await
        .map_err(|_| FileLoaderError::ExtractionFailed("PDF extraction timed out".to_string()))?
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("task join error: {e}")))??;

        drop(temp_file);

        let non_empty = pages.iter().filter(|p| !p.is_empty()).count();
        tracing::info!(page_count = pages.len(), non_empty, "PDF text extraction complete");

        if non_empty == 0 {
            return Err(FileLoaderError::NoTextFound(request.filename.clone()));
        }

        Ok(pages.join("\n"))
    }
}
