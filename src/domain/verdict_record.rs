use serde::{Deserialize, Serialize};

/// The five-field verdict returned for every request, success or failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictRecord {
    pub verified: bool,
    pub percentage: u8,
    pub analysis: String,
    pub errors: Vec<String>,
    pub summary: String,
}

impl VerdictRecord {
    /// Builds a record, clamping `percentage` to 100.
    pub fn new(
        verified: bool,
        percentage: u8,
        analysis: impl Into<String>,
        errors: Vec<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            verified,
            percentage: percentage.min(100),
            analysis: analysis.into(),
            errors,
            summary: summary.into(),
        }
    }

    /// A record with `verified = false` and a single flagged error.
    pub fn rejected(
        percentage: u8,
        error: impl Into<String>,
        analysis: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self::new(false, percentage, analysis, vec![error.into()], summary)
    }
}
