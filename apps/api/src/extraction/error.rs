use std::time::Duration;

use thiserror::Error;

use crate::extraction::validation::ValidationError;
use crate::llm_client::LlmError;

/// Stable client-facing message for rejected input.
pub const INVALID_INPUT_MESSAGE: &str = "Contract text is required";
/// Stable client-facing message for every failure past input validation.
pub const EXTRACTION_FAILED_MESSAGE: &str = "Failed to extract contract information";

/// The two outcomes a caller can distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller's data failed the precondition. No model call was made.
    InvalidInput,
    /// Anything that went wrong downstream of a valid input.
    ExtractionFailed,
}

/// Every way an extraction can fail. The `Display` text is for operators only;
/// clients see the message for `kind()`.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("contract text is required (received {received})")]
    InvalidInput { received: &'static str },

    #[error("model invocation failed: {0}")]
    Model(#[from] LlmError),

    #[error("model call timed out after {0:?}")]
    Timeout(Duration),

    #[error("model output failed schema validation: {0}")]
    Validation(#[from] ValidationError),
}

impl ExtractionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExtractionError::InvalidInput { .. } => ErrorKind::InvalidInput,
            ExtractionError::Model(_)
            | ExtractionError::Timeout(_)
            | ExtractionError::Validation(_) => ErrorKind::ExtractionFailed,
        }
    }

    /// The message safe to show a caller.
    pub fn public_message(&self) -> &'static str {
        match self.kind() {
            ErrorKind::InvalidInput => INVALID_INPUT_MESSAGE,
            ErrorKind::ExtractionFailed => EXTRACTION_FAILED_MESSAGE,
        }
    }
}
