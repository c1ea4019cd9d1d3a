//! Turns whatever the generative backend produced into a [`VerdictRecord`].
//!
//! Every backend outcome maps to a distinguishable record:
//!
//! | outcome                          | verified | percentage | errors                          |
//! |----------------------------------|----------|------------|---------------------------------|
//! | no candidates                    | false    | 0          | safety block message            |
//! | safety stop after generating     | true     | 75         | empty                           |
//! | parsed JSON object               | backend  | backend    | backend (backfilled if missing) |
//! | unparsable text                  | false    | 50         | `Unable to parse AI response`   |
//! | transport or API error           | false    | 0          | humanized error                 |

use serde_json::{Map, Value};

use crate::application::ports::{BackendResponse, FinishReason, LlmClientError};
use crate::domain::{ACCEPTED_EXTENSIONS, FailureClassification, VerdictRecord};

use super::prompt_builder::truncate_chars;

/// `verified` is derived as `percentage >= VERIFIED_THRESHOLD` when the backend omits it.
pub const VERIFIED_THRESHOLD: u8 = 70;
/// Score for output that could not be parsed: uncertain, not necessarily false.
pub const MALFORMED_PERCENTAGE: u8 = 50;
/// Score for a safety stop after generation started.
pub const SAFETY_SOFT_PASS_PERCENTAGE: u8 = 75;
/// Upper bound on raw backend text copied into `analysis`.
pub const MAX_RAW_ANALYSIS_CHARS: usize = 1000;

pub const PARSE_FAILURE_ERROR: &str = "Unable to parse AI response";
pub const SAFETY_BLOCK_ERROR: &str =
    "Content was blocked by safety filters before it could be analyzed.";

const DEFAULT_ANALYSIS: &str = "Analysis completed.";
const DEFAULT_SUMMARY: &str = "Verification completed.";

/// Normalizes one backend answer. Pure and deterministic.
pub fn normalize(response: &BackendResponse) -> VerdictRecord {
    match response {
        BackendResponse::NoCandidates => {
            tracing::warn!("Backend returned no candidates");
            fallback_record(FailureClassification::BackendRejectedContent, None)
        }
        BackendResponse::AbnormalFinish {
            reason: FinishReason::Safety,
            ..
        } => {
            tracing::warn!("Backend stopped generation on a safety filter");
            safety_soft_pass()
        }
        BackendResponse::AbnormalFinish {
            reason: FinishReason::Other(reason),
            text,
        } => {
            tracing::warn!(finish_reason = %reason, "Backend finished abnormally, parsing partial output");
            normalize_text(text)
        }
        BackendResponse::AbnormalFinish {
            reason: FinishReason::Normal,
            text,
        }
        | BackendResponse::NormalText(text) => normalize_text(text),
    }
}

/// Fence-strips, parses and backfills a raw backend answer.
pub fn normalize_text(raw: &str) -> VerdictRecord {
    let stripped = strip_code_fences(raw);

    let object = match serde_json::from_str::<Value>(stripped) {
        Ok(Value::Object(object)) => object,
        Ok(other) => {
            tracing::warn!(kind = json_kind(&other), "Backend JSON is not an object");
            return malformed_record(raw);
        }
        Err(e) => {
            tracing::warn!(error = %e, "Backend response is not valid JSON");
            return malformed_record(raw);
        }
    };

    backfill(&object)
}

/// Removes one surrounding pair of triple-backtick fences, with or without a
/// language tag on the opening fence. The tag may sit on its own line or
/// directly before the JSON. Text without fences is only trimmed.
pub fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix("```") {
        text = match rest.find('\n') {
            Some(newline) if is_language_tag(&rest[..newline]) => &rest[newline + 1..],
            _ => strip_inline_language_tag(rest),
        };
    }

    if let Some(rest) = text.trim_end().strip_suffix("```") {
        text = rest;
    }

    text.trim()
}

fn is_language_tag(candidate: &str) -> bool {
    candidate
        .trim()
        .chars()
        .all(is_language_tag_char)
}

fn is_language_tag_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// `json {...}` on the fence line: drops the tag only when JSON follows it.
fn strip_inline_language_tag(rest: &str) -> &str {
    let tag_end = rest
        .find(|c: char| !is_language_tag_char(c))
        .unwrap_or(rest.len());
    let after = rest[tag_end..].trim_start();

    if tag_end > 0 && (after.starts_with('{') || after.starts_with('[')) {
        after
    } else {
        rest
    }
}

/// Fills missing fields deterministically so all five always exist.
fn backfill(object: &Map<String, Value>) -> VerdictRecord {
    let verified = object.get("verified").and_then(coerce_bool);
    let percentage = object.get("percentage").and_then(coerce_percentage);
    let errors = object.get("errors").and_then(coerce_errors);
    let analysis = object.get("analysis").and_then(coerce_text);
    let summary = object.get("summary").and_then(coerce_text);

    let complete = verified.is_some()
        && percentage.is_some()
        && errors.is_some()
        && analysis.is_some()
        && summary.is_some();

    if !complete {
        tracing::debug!(
            classification = %FailureClassification::PartialBackendResponse,
            has_verified = verified.is_some(),
            has_percentage = percentage.is_some(),
            has_errors = errors.is_some(),
            has_analysis = analysis.is_some(),
            has_summary = summary.is_some(),
            "Backfilling missing verdict fields"
        );
    }

    let verified = verified.unwrap_or_else(|| percentage.is_some_and(|p| p >= VERIFIED_THRESHOLD));
    let percentage = percentage.unwrap_or(if verified { 100 } else { 0 });
    let analysis = analysis
        .or_else(|| summary.clone())
        .unwrap_or_else(|| DEFAULT_ANALYSIS.to_string());
    let summary = summary.unwrap_or_else(|| DEFAULT_SUMMARY.to_string());

    VerdictRecord::new(
        verified,
        percentage,
        analysis,
        errors.unwrap_or_default(),
        summary,
    )
}

fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn coerce_percentage(value: &Value) -> Option<u8> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok()?,
        _ => return None,
    };

    if !number.is_finite() {
        return None;
    }

    Some(number.round().clamp(0.0, 100.0) as u8)
}

fn coerce_errors(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.trim().to_string()),
                    Value::Null => None,
                    other => Some(other.to_string()),
                })
                .filter(|s| !s.is_empty())
                .collect(),
        ),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
                Some(Vec::new())
            } else {
                Some(vec![trimmed.to_string()])
            }
        }
        Value::Null => Some(Vec::new()),
        _ => None,
    }
}

fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn malformed_record(raw: &str) -> VerdictRecord {
    let raw = truncate_chars(raw.trim(), MAX_RAW_ANALYSIS_CHARS);
    let analysis = if raw.is_empty() {
        String::from("The AI returned an empty response.")
    } else {
        raw.to_string()
    };

    VerdictRecord::rejected(
        MALFORMED_PERCENTAGE,
        PARSE_FAILURE_ERROR,
        analysis,
        "The AI response could not be parsed; the result is inconclusive.",
    )
}

fn safety_soft_pass() -> VerdictRecord {
    VerdictRecord::new(
        true,
        SAFETY_SOFT_PASS_PERCENTAGE,
        "The AI safety filter stopped the analysis before it finished. \
         This reflects the model's caution, not evidence that the content is false; \
         technical or educational material often triggers it.",
        Vec::new(),
        "Safety filter triggered; content is likely benign but was not fully verified.",
    )
}

/// Humanized record for a backend call that failed outright.
pub fn backend_error_record(error: &LlmClientError) -> VerdictRecord {
    let message = humanize_backend_error(error);
    tracing::error!(error = %error, category = message, "Backend call failed");
    fallback_record(FailureClassification::BackendUnreachable, Some(message))
}

fn humanize_backend_error(error: &LlmClientError) -> &'static str {
    const MODEL_NOT_FOUND: &str =
        "The configured AI model was not found. Check the model name in the server settings.";
    const RATE_LIMITED: &str =
        "The AI service is rate limiting requests. Please try again in a moment.";
    const INVALID_CREDENTIALS: &str =
        "The AI service rejected the server credentials. Check the configured API key.";
    const TIMEOUT: &str = "The AI service did not respond in time. Please try again.";
    const UNAVAILABLE: &str = "The AI service is currently unavailable. Please try again later.";

    match error {
        LlmClientError::ModelNotFound(_) => MODEL_NOT_FOUND,
        LlmClientError::RateLimited => RATE_LIMITED,
        LlmClientError::InvalidCredentials(_) => INVALID_CREDENTIALS,
        LlmClientError::Timeout => TIMEOUT,
        LlmClientError::ApiRequestFailed(message) | LlmClientError::InvalidResponse(message) => {
            let lowered = message.to_lowercase();
            if lowered.contains("404") || lowered.contains("not found") {
                MODEL_NOT_FOUND
            } else if lowered.contains("429")
                || lowered.contains("quota")
                || lowered.contains("rate limit")
            {
                RATE_LIMITED
            } else if lowered.contains("401")
                || lowered.contains("403")
                || lowered.contains("api key")
                || lowered.contains("api_key")
            {
                INVALID_CREDENTIALS
            } else if lowered.contains("timed out") || lowered.contains("timeout") {
                TIMEOUT
            } else {
                UNAVAILABLE
            }
        }
    }
}

/// Locally synthesized record for a failure class. `detail` replaces the
/// default error text when given.
pub fn fallback_record(classification: FailureClassification, detail: Option<&str>) -> VerdictRecord {
    match classification {
        FailureClassification::UnsupportedFileType => VerdictRecord::rejected(
            0,
            detail.unwrap_or("Unsupported file type."),
            format!(
                "Accepted file types are: {}.",
                ACCEPTED_EXTENSIONS
                    .iter()
                    .map(|ext| format!(".{ext}"))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            "Unsupported file type",
        ),
        FailureClassification::EmptyInput => VerdictRecord::rejected(
            0,
            detail.unwrap_or("The uploaded file is empty."),
            "No content was received, so nothing could be verified.",
            "Empty file",
        ),
        FailureClassification::ExtractionFailed => VerdictRecord::rejected(
            0,
            detail.unwrap_or(
                "Could not read any text from this file. It might be blurry or empty.",
            ),
            "Text extraction produced no readable content.",
            "No text extracted",
        ),
        FailureClassification::BackendUnreachable => VerdictRecord::rejected(
            0,
            detail.unwrap_or("The AI service is currently unavailable. Please try again later."),
            "The verification service could not get an answer from the AI backend.",
            "Verification unavailable",
        ),
        FailureClassification::BackendRejectedContent => VerdictRecord::rejected(
            0,
            detail.unwrap_or(SAFETY_BLOCK_ERROR),
            "The AI backend refused to generate an answer for this content.",
            "Blocked by safety filters",
        ),
        FailureClassification::MalformedBackendResponse => {
            malformed_record(detail.unwrap_or_default())
        }
        FailureClassification::PartialBackendResponse => backfill(&Map::new()),
    }
}
