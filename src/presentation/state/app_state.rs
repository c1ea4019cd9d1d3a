use std::sync::Arc;

use crate::application::services::VerificationService;

#[derive(Clone)]
pub struct AppState {
    pub verification_service: Arc<VerificationService>,
    pub max_upload_size_bytes: usize,
}
