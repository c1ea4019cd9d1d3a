use std::sync::Arc;

use crate::application::ports::{FileLoader, LlmClient};
use crate::domain::MediaCategory;

use super::extraction_router::ExtractionRouter;
use super::pdf_adapter::PdfAdapter;
use super::plain_text_adapter::PlainTextAdapter;
use super::vision_ocr_adapter::VisionOcrAdapter;

pub struct ExtractorFactory;

impl ExtractorFactory {
    /// Text and PDF strategies are always registered. The OCR strategy is
    /// registered only when a vision client for transcription is supplied.
    pub fn create(ocr_client: Option<Arc<dyn LlmClient>>) -> ExtractionRouter {
        let mut adapters: Vec<(MediaCategory, Arc<dyn FileLoader>)> = vec![
            (MediaCategory::Text, Arc::new(PlainTextAdapter)),
            (MediaCategory::Pdf, Arc::new(PdfAdapter::new())),
        ];

        if let Some(client) = ocr_client {
            tracing::info!(engine = %client.engine_name(), "Registering vision OCR adapter");
            adapters.push((MediaCategory::Image, Arc::new(VisionOcrAdapter::new(client))));
        }

        ExtractionRouter::new(adapters)
    }
}
