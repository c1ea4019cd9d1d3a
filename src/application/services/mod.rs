mod prompt_builder;
mod verdict_normalizer;
mod verification_service;

pub use prompt_builder::{DEFAULT_MAX_SUBJECT_CHARS, OCR_PROMPT, PromptBuilder, truncate_chars};
pub use verdict_normalizer::{
    MALFORMED_PERCENTAGE, MAX_RAW_ANALYSIS_CHARS, PARSE_FAILURE_ERROR, SAFETY_BLOCK_ERROR,
    SAFETY_SOFT_PASS_PERCENTAGE, VERIFIED_THRESHOLD, backend_error_record, fallback_record,
    normalize, normalize_text, strip_code_fences,
};
pub use verification_service::{
    DEFAULT_SEARCH_QUERY_CHARS, ImageStrategy, VerificationConfig, VerificationService,
    search_query,
};
