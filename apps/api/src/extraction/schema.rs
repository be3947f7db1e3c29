//! Schema Definer — the single declaration of the extraction record.
//!
//! Every consumer (provider schema, instruction field guide, validator, reviewer
//! summary) walks `CONTRACT_FIELDS`. The typed record maps the same names onto its
//! fields in `ContractExtraction::value_of`; `test_value_of_matches_declared_kind`
//! keeps the two in step.

use serde_json::{json, Map, Value};

/// Structural type of a field in the extraction record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A single string; empty when the contract does not state it.
    Text,
    /// A sequence of strings; empty when nothing was found.
    TextList,
}

impl FieldKind {
    /// JSON type name as used in JSON Schema and in validation messages.
    pub fn json_type(self) -> &'static str {
        match self {
            FieldKind::Text => "string",
            FieldKind::TextList => "array",
        }
    }

    fn schema_fragment(self, description: &str) -> Value {
        match self {
            FieldKind::Text => json!({ "type": "string", "description": description }),
            FieldKind::TextList => json!({
                "type": "array",
                "items": { "type": "string" },
                "description": description,
            }),
        }
    }

    fn empty_default(self) -> &'static str {
        match self {
            FieldKind::Text => "\"\"",
            FieldKind::TextList => "[]",
        }
    }
}

/// One field of the extraction record.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Wire name, exactly as it appears in the HTTP response.
    pub name: &'static str,
    /// Reviewer-facing label.
    pub label: &'static str,
    pub kind: FieldKind,
    /// Semantics handed to the model, including language and empty-default policy.
    pub description: &'static str,
    /// What a reviewer sees when the field is empty.
    pub empty_placeholder: &'static str,
}

pub const CONTRACT_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "signingParties",
        label: "Signing Parties",
        kind: FieldKind::TextList,
        description: "Names of all parties signing the contract, one entry per party, \
            exactly as named in the contract. Empty array if no party is named.",
        empty_placeholder: "No signing parties identified",
    },
    FieldSpec {
        name: "startDate",
        label: "Start Date",
        kind: FieldKind::Text,
        description: "Contract start date or effective date as stated in the contract, \
            written in English. Empty string if not stated.",
        empty_placeholder: "Not specified",
    },
    FieldSpec {
        name: "endDate",
        label: "End Date",
        kind: FieldKind::Text,
        description: "Contract end date or expiration date as stated in the contract, \
            written in English. Empty string if not stated.",
        empty_placeholder: "Not specified",
    },
    FieldSpec {
        name: "duration",
        label: "Duration",
        kind: FieldKind::Text,
        description: "Contract duration or term length, written in English. \
            Empty string if not stated.",
        empty_placeholder: "Not specified",
    },
    FieldSpec {
        name: "penalties",
        label: "Penalties",
        kind: FieldKind::TextList,
        description: "Penalties, fines, or consequences mentioned in the contract, one entry \
            per penalty, written in English. Empty array if the contract mentions none; \
            never invent a penalty.",
        empty_placeholder: "No penalties identified",
    },
    FieldSpec {
        name: "contractPurpose",
        label: "Contract Purpose",
        kind: FieldKind::Text,
        description: "Main purpose or objective of the contract, summarized in English. \
            Empty string if it cannot be determined.",
        empty_placeholder: "Not identified",
    },
    FieldSpec {
        name: "keyClauses",
        label: "Key Clauses",
        kind: FieldKind::TextList,
        description: "Important clauses, terms, or conditions in the contract, one entry per \
            clause, summarized in English. Empty array if none are identifiable.",
        empty_placeholder: "No key clauses identified",
    },
];

/// JSON Schema of the extraction record. Handed to the provider as the binding output shape.
pub fn json_schema() -> Value {
    let mut properties = Map::new();
    for spec in CONTRACT_FIELDS {
        properties.insert(
            spec.name.to_string(),
            spec.kind.schema_fragment(spec.description),
        );
    }
    let required: Vec<&str> = CONTRACT_FIELDS.iter().map(|f| f.name).collect();

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false,
    })
}

/// Human-readable field list embedded in the model instruction.
pub fn field_guide() -> String {
    CONTRACT_FIELDS
        .iter()
        .map(|f| {
            format!(
                "- {} ({}, empty value {}): {}",
                f.name,
                f.kind.json_type(),
                f.kind.empty_default(),
                f.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
