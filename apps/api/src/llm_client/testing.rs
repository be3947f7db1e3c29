//! Deterministic `StructuredModel` substitutes for tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use super::{LlmError, OutputSchema, StructuredModel, StructuredPrompt};

#[derive(Debug, Clone)]
pub enum Reply {
    Value(Value),
    ApiError { status: u16, message: String },
    /// Never resolves; used to exercise the timeout and cancellation paths.
    Hang,
}

/// Returns one fixed reply and records every call it receives.
#[derive(Debug)]
pub struct FixedModel {
    reply: Reply,
    calls: AtomicUsize,
    cancelled: AtomicBool,
    last_prompt: Mutex<Option<String>>,
    last_schema: Mutex<Option<Value>>,
}

impl FixedModel {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
            cancelled: AtomicBool::new(false),
            last_prompt: Mutex::new(None),
            last_schema: Mutex::new(None),
        })
    }

    pub fn returning(value: Value) -> Arc<Self> {
        Self::new(Reply::Value(value))
    }

    pub fn failing(status: u16, message: &str) -> Arc<Self> {
        Self::new(Reply::ApiError {
            status,
            message: message.to_string(),
        })
    }

    pub fn hanging() -> Arc<Self> {
        Self::new(Reply::Hang)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// True once a hanging call has been dropped before resolving.
    pub fn was_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }

    pub fn last_schema(&self) -> Option<Value> {
        self.last_schema.lock().unwrap().clone()
    }
}

#[async_trait]
impl StructuredModel for FixedModel {
    async fn complete(
        &self,
        prompt: StructuredPrompt<'_>,
        output: OutputSchema<'_>,
    ) -> Result<Value, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.prompt.to_string());
        *self.last_schema.lock().unwrap() = Some(output.schema.clone());

        match &self.reply {
            Reply::Value(v) => Ok(v.clone()),
            Reply::ApiError { status, message } => Err(LlmError::Api {
                status: *status,
                message: message.clone(),
            }),
            Reply::Hang => {
                let _guard = CancelGuard(&self.cancelled);
                std::future::pending().await
            }
        }
    }
}

/// Sets its flag when dropped, i.e. when the owning future is dropped mid-call.
struct CancelGuard<'a>(&'a AtomicBool);

impl Drop for CancelGuard<'_> {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}
