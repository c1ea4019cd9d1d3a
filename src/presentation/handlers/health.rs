use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub ai_engine: String,
    pub search_engine: String,
}

pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            service: "TruthBot".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            ai_engine: state.verification_service.engine_name(),
            search_engine: state.verification_service.search_engine_name(),
        }),
    )
}
