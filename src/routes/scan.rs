//! `POST /scan`

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

use crate::app::AppState;
use crate::core::error::ScanError;
use crate::core::models::{ScanRequest, ScanResponse};
use crate::core::scanner::run_scan;

pub const FAILURE_MESSAGE: &str = "Error: Unable to analyze link safety.";

/// The body is read raw so that a missing or malformed JSON payload is
/// answered with the same 400 as a missing `url`.
pub async fn scan(State(state): State<AppState>, body: Bytes) -> Result<Json<ScanResponse>, ScanError> {
    let request: ScanRequest = if body.is_empty() {
        ScanRequest::default()
    } else {
        serde_json::from_slice(&body).unwrap_or_else(|e| {
            warn!(error = %e, "Scan body is not a JSON object with a string url.");
            ScanRequest::default()
        })
    };

    let verdict = run_scan(&state.scanner, &request).await?;
    Ok(Json(ScanResponse::message(verdict.message())))
}

impl IntoResponse for ScanError {
    fn into_response(self) -> Response {
        match self {
            ScanError::Validation => {
                warn!("No URL provided by client.");
                (StatusCode::BAD_REQUEST, Json(ScanResponse::message(self.to_string()))).into_response()
            }
            other => {
                error!(error = %other, "Scan failed.");
                let body = ScanResponse {
                    message: FAILURE_MESSAGE.to_string(),
                    detail: Some(other.detail()),
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}
