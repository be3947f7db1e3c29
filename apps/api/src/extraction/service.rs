//! Extraction Service — turns contract text into a validated `ContractExtraction`.
//!
//! Flow: input check → render instruction → one schema-constrained model call
//! (bounded by the configured timeout) → validation → advisory language check.
//!
//! The service holds no per-request state. Dropping the future returned by
//! `extract` drops the in-flight provider call, so a disconnected client never
//! has its result acted upon.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::extraction::error::ExtractionError;
use crate::extraction::language::untranslated;
use crate::extraction::models::ContractExtraction;
use crate::extraction::prompts::{
    render_extraction_prompt, EXTRACTION_SYSTEM, EXTRACTION_TOOL_DESCRIPTION, EXTRACTION_TOOL_NAME,
};
use crate::extraction::schema::{json_schema, CONTRACT_FIELDS};
use crate::extraction::validation::{json_type_name, validate};
use crate::llm_client::{OutputSchema, StructuredModel, StructuredPrompt};

/// Contract text that passed the input precondition: a non-empty string.
///
/// Whitespace-only text is still a string and is sent to the model like any other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractText(String);

impl ContractText {
    pub fn new(text: impl Into<String>) -> Result<Self, ExtractionError> {
        let text = text.into();
        if text.is_empty() {
            return Err(ExtractionError::InvalidInput {
                received: "empty string",
            });
        }
        Ok(Self(text))
    }

    /// Reads `contractText` from a request payload. Any shape other than a string is rejected.
    pub fn from_payload(payload: &Value) -> Result<Self, ExtractionError> {
        match payload.get("contractText") {
            Some(Value::String(text)) => Self::new(text.as_str()),
            Some(other) => Err(ExtractionError::InvalidInput {
                received: json_type_name(other),
            }),
            None => Err(ExtractionError::InvalidInput {
                received: "no contractText",
            }),
        }
    }

    /// Parses a raw request body. Bodies that are not JSON are invalid input.
    pub fn from_body(body: &[u8]) -> Result<Self, ExtractionError> {
        let payload: Value =
            serde_json::from_slice(body).map_err(|_| ExtractionError::InvalidInput {
                received: "malformed JSON",
            })?;
        Self::from_payload(&payload)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone)]
pub struct ExtractionService {
    model: Arc<dyn StructuredModel>,
    timeout: Duration,
    schema: Arc<Value>,
}

impl ExtractionService {
    pub fn new(model: Arc<dyn StructuredModel>, timeout: Duration) -> Self {
        Self {
            model,
            timeout,
            schema: Arc::new(json_schema()),
        }
    }

    /// JSON Schema the model output is constrained to.
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// Validates a raw request body and extracts from it. Invalid input never reaches the model.
    pub async fn extract_body(&self, body: &[u8]) -> Result<ContractExtraction, ExtractionError> {
        let contract = ContractText::from_body(body)?;
        self.extract(&contract).await
    }

    /// Runs one extraction. All-or-nothing: either a fully validated record or an error.
    pub async fn extract(
        &self,
        contract: &ContractText,
    ) -> Result<ContractExtraction, ExtractionError> {
        let prompt = render_extraction_prompt(contract.as_str());
        debug!("Extraction prompt rendered: {} chars", prompt.len());

        let call = self.model.complete(
            StructuredPrompt {
                system: EXTRACTION_SYSTEM,
                prompt: &prompt,
            },
            OutputSchema {
                name: EXTRACTION_TOOL_NAME,
                description: EXTRACTION_TOOL_DESCRIPTION,
                schema: &self.schema,
            },
        );

        let raw = tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| ExtractionError::Timeout(self.timeout))??;

        let record = validate(&raw, CONTRACT_FIELDS)?;

        let flagged = untranslated(record.translated_text());
        if !flagged.is_empty() {
            warn!(
                "Extraction returned {} fragment(s) that do not appear to be English; returning as-is",
                flagged.len()
            );
        }

        info!(
            "Extraction succeeded: parties={}, penalties={}, key_clauses={}",
            record.signing_parties.len(),
            record.penalties.len(),
            record.key_clauses.len()
        );

        Ok(record)
    }
}
