//! Axum route handlers for the Extraction API.
//!
//! Bodies are read as raw bytes and parsed by the service, so a missing
//! content-type or malformed JSON is reported as invalid input, not a framework
//! rejection.

use axum::{body::Bytes, extract::State, Json};
use serde_json::Value;
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::models::ContractExtraction;
use crate::extraction::summary::render_summary;
use crate::state::AppState;

/// POST /api/extract
///
/// Extracts the structured record from `{ "contractText": string }`.
pub async fn handle_extract(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ContractExtraction>, AppError> {
    let record = run_extraction(&state, &body).await?;
    Ok(Json(record))
}

/// POST /api/extract/summary
///
/// Same input contract as `/api/extract`; returns a plain-text reviewer summary.
pub async fn handle_extract_summary(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<String, AppError> {
    let record = run_extraction(&state, &body).await?;
    Ok(render_summary(&record))
}

/// GET /api/schema
///
/// JSON Schema of the extraction record, for presentation clients.
pub async fn handle_schema(State(state): State<AppState>) -> Json<Value> {
    Json(state.extractor.schema().clone())
}

async fn run_extraction(state: &AppState, body: &[u8]) -> Result<ContractExtraction, AppError> {
    let span = info_span!("extract", request_id = %Uuid::new_v4(), body_bytes = body.len());
    let record = state.extractor.extract_body(body).instrument(span).await?;
    Ok(record)
}
