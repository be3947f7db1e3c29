use crate::config::Config;
use crate::extraction::service::ExtractionService;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no per-request data; every extraction builds its own prompt and result.
#[derive(Clone)]
pub struct AppState {
    pub extractor: ExtractionService,
    pub config: Config,
}
