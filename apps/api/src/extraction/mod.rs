// Contract extraction: schema, model-driven extraction, validation and HTTP handlers.
// All model calls go through llm_client — no direct provider calls here.

pub mod error;
pub mod handlers;
pub mod language;
pub mod models;
pub mod prompts;
pub mod schema;
pub mod service;
pub mod summary;
pub mod validation;
