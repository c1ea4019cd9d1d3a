mod failure_classification;
mod media_category;
mod search_context;
mod verdict_record;
mod verification_request;

pub use failure_classification::FailureClassification;
pub use media_category::{ACCEPTED_EXTENSIONS, MediaCategory, file_extension, sniff_image_mime};
pub use search_context::{SearchContext, SearchSnippet};
pub use verdict_record::VerdictRecord;
pub use verification_request::VerificationRequest;
