use uuid::Uuid;

use super::media_category::MediaCategory;

/// One uploaded file, created per incoming request and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationRequest {
    pub id: Uuid,
    pub filename: String,
    pub category: MediaCategory,
    pub size_bytes: u64,
}

impl VerificationRequest {
    pub fn new(filename: String, category: MediaCategory, size_bytes: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            filename,
            category,
            size_bytes,
        }
    }
}
