pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::extraction::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Extraction API
        .route("/api/extract", post(handlers::handle_extract))
        .route(
            "/api/extract/summary",
            post(handlers::handle_extract_summary),
        )
        .route("/api/schema", get(handlers::handle_schema))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
