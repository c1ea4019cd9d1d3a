use reqwest::StatusCode;

use crate::application::ports::LlmClientError;

/// Maps a non-success backend status to a typed error.
pub fn map_status_error(status: StatusCode, body: &str) -> LlmClientError {
    match status {
        StatusCode::NOT_FOUND => LlmClientError::ModelNotFound(body.to_string()),
        StatusCode::TOO_MANY_REQUESTS => LlmClientError::RateLimited,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            LlmClientError::InvalidCredentials(body.to_string())
        }
        StatusCode::BAD_REQUEST
            if body.contains("API_KEY_INVALID") || body.contains("API key not valid") =>
        {
            LlmClientError::InvalidCredentials(body.to_string())
        }
        _ => LlmClientError::ApiRequestFailed(format!("status {status}: {body}")),
    }
}
