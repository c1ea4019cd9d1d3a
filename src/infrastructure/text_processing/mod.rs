mod extraction_router;
mod extractor_factory;
mod pdf_adapter;
mod plain_text_adapter;
mod text_sanitizer;
mod vision_ocr_adapter;

pub use extraction_router::ExtractionRouter;
pub use extractor_factory::ExtractorFactory;
pub use pdf_adapter::{EXTRACTION_TIMEOUT, PdfAdapter};
pub use plain_text_adapter::{PlainTextAdapter, decode_lossy};
pub use text_sanitizer::sanitize_extracted_text;
pub use vision_ocr_adapter::VisionOcrAdapter;
