use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::error::{ErrorKind, ExtractionError};

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Extraction(e) => match e.kind() {
                ErrorKind::InvalidInput => {
                    tracing::debug!("Rejected extraction request: {e}");
                    (StatusCode::BAD_REQUEST, e.public_message())
                }
                ErrorKind::ExtractionFailed => {
                    // Root cause stays in operator logs; the client gets the generic message.
                    tracing::error!("Error extracting contract information: {e}");
                    (StatusCode::INTERNAL_SERVER_ERROR, e.public_message())
                }
            },
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
