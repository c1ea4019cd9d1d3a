use std::fmt;

/// Why a verdict did not come from a clean backend parse. Never serialized;
/// it only selects fallback wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClassification {
    UnsupportedFileType,
    EmptyInput,
    ExtractionFailed,
    BackendUnreachable,
    BackendRejectedContent,
    MalformedBackendResponse,
    PartialBackendResponse,
}

impl FailureClassification {
    /// Caller-input failures are detected before the backend is contacted.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFileType | Self::EmptyInput | Self::ExtractionFailed
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnsupportedFileType => "unsupported_file_type",
            Self::EmptyInput => "empty_input",
            Self::ExtractionFailed => "extraction_failed",
            Self::BackendUnreachable => "backend_unreachable",
            Self::BackendRejectedContent => "backend_rejected_content",
            Self::MalformedBackendResponse => "malformed_backend_response",
            Self::PartialBackendResponse => "partial_backend_response",
        }
    }
}

impl fmt::Display for FailureClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
