//! Mechanical validation of raw model output against the Schema Definer.
//!
//! Rules: the root is an object, every declared field is present, `Text` fields are
//! strings and `TextList` fields are arrays of strings. Nothing is coerced. Undeclared
//! keys are dropped.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::extraction::models::ContractExtraction;
use crate::extraction::schema::{FieldKind, FieldSpec};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("model output must be a JSON object, got {actual}")]
    NotAnObject { actual: &'static str },

    #[error("required field '{field}' is missing")]
    MissingField { field: &'static str },

    #[error("field '{field}' must be {expected}, got {actual}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("field '{field}' item {index} must be string, got {actual}")]
    WrongItemType {
        field: &'static str,
        index: usize,
        actual: &'static str,
    },

    #[error("declared fields do not match the record type: {0}")]
    Shape(String),
}

/// Validates `raw` against `fields` and returns the typed record on success.
pub fn validate(raw: &Value, fields: &[FieldSpec]) -> Result<ContractExtraction, ValidationError> {
    let object = raw.as_object().ok_or(ValidationError::NotAnObject {
        actual: json_type_name(raw),
    })?;

    let mut declared = Map::with_capacity(fields.len());
    for spec in fields {
        let value = object
            .get(spec.name)
            .ok_or(ValidationError::MissingField { field: spec.name })?;
        check_field(spec, value)?;
        declared.insert(spec.name.to_string(), value.clone());
    }

    serde_json::from_value(Value::Object(declared))
        .map_err(|e| ValidationError::Shape(e.to_string()))
}

fn check_field(spec: &FieldSpec, value: &Value) -> Result<(), ValidationError> {
    match spec.kind {
        FieldKind::Text => {
            if !value.is_string() {
                return Err(wrong_type(spec, value));
            }
        }
        FieldKind::TextList => {
            let items = value.as_array().ok_or_else(|| wrong_type(spec, value))?;
            if let Some((index, item)) = items.iter().enumerate().find(|(_, i)| !i.is_string()) {
                return Err(ValidationError::WrongItemType {
                    field: spec.name,
                    index,
                    actual: json_type_name(item),
                });
            }
        }
    }
    Ok(())
}

fn wrong_type(spec: &FieldSpec, value: &Value) -> ValidationError {
    ValidationError::WrongType {
        field: spec.name,
        expected: spec.kind.json_type(),
        actual: json_type_name(value),
    }
}

pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
