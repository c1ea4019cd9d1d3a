use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::services::fallback_record;
use crate::domain::{FailureClassification, MediaCategory, VerdictRecord};
use crate::presentation::state::AppState;

const FILE_FIELD: &str = "file";

struct Upload {
    filename: String,
    data: Vec<u8>,
}

/// Reads the `file` field, or the first file-bearing field when none is named `file`.
async fn read_upload(multipart: &mut Multipart) -> Result<Upload, Response> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => {
                tracing::warn!("Verify request with no file");
                return Err(bad_request("No file uploaded."));
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return Err(bad_request(&format!("Failed to read upload: {e}")));
            }
        };

        let is_file = field.name() == Some(FILE_FIELD) || field.file_name().is_some();
        if !is_file {
            continue;
        }

        let filename = field.file_name().unwrap_or("unknown").to_string();

        let data = match field.bytes().await {
            Ok(d) => d,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read file bytes");
                return Err(bad_request(&format!("Failed to read file: {e}")));
            }
        };

        tracing::debug!(filename = %filename, bytes = data.len(), "File data received");

        return Ok(Upload {
            filename,
            data: data.to_vec(),
        });
    }
}

fn bad_request(detail: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(fallback_record(FailureClassification::EmptyInput, Some(detail))),
    )
        .into_response()
}

fn verdict_response(record: VerdictRecord) -> Response {
    (StatusCode::OK, Json(record)).into_response()
}

#[tracing::instrument(skip(state, multipart))]
pub async fn verify_handler(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let upload = match read_upload(&mut multipart).await {
        Ok(upload) => upload,
        Err(response) => return response,
    };

    let record = state
        .verification_service
        .verify(&upload.filename, &upload.data)
        .await;

    verdict_response(record)
}

/// Same contract as `/verify`, except accepted images always take the vision path.
#[tracing::instrument(skip(state, multipart))]
pub async fn verify_image_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Response {
    let upload = match read_upload(&mut multipart).await {
        Ok(upload) => upload,
        Err(response) => return response,
    };

    let record = match MediaCategory::from_filename(&upload.filename) {
        Some(MediaCategory::Image) => state.verification_service.verify_image(&upload.data).await,
        _ => {
            state
                .verification_service
                .verify(&upload.filename, &upload.data)
                .await
        }
    };

    verdict_response(record)
}
