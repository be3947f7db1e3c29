use serde::{Deserialize, Serialize};

use crate::extraction::schema::FieldSpec;

/// Structured facts extracted from one contract.
///
/// Produced once per request after validation and never mutated. Missing information is
/// an empty string or empty list; every field is always present on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractExtraction {
    pub signing_parties: Vec<String>,
    pub start_date: String,
    pub end_date: String,
    pub duration: String,
    pub penalties: Vec<String>,
    pub contract_purpose: String,
    pub key_clauses: Vec<String>,
}

/// Borrowed view of one field's value, shaped by its `FieldKind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    TextList(&'a [String]),
}

impl FieldValue<'_> {
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::TextList(items) => items.iter().all(|i| i.trim().is_empty()),
        }
    }
}

impl ContractExtraction {
    /// Returns the value of a declared field, or `None` for a name this record does not carry.
    pub fn value_of(&self, spec: &FieldSpec) -> Option<FieldValue<'_>> {
        let value = match spec.name {
            "signingParties" => FieldValue::TextList(&self.signing_parties),
            "startDate" => FieldValue::Text(&self.start_date),
            "endDate" => FieldValue::Text(&self.end_date),
            "duration" => FieldValue::Text(&self.duration),
            "penalties" => FieldValue::TextList(&self.penalties),
            "contractPurpose" => FieldValue::Text(&self.contract_purpose),
            "keyClauses" => FieldValue::TextList(&self.key_clauses),
            _ => return None,
        };
        Some(value)
    }

    /// All free-text content of the record, used for the advisory language check.
    pub fn translated_text(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.contract_purpose.as_str())
            .chain(std::iter::once(self.duration.as_str()))
            .chain(self.penalties.iter().map(String::as_str))
            .chain(self.key_clauses.iter().map(String::as_str))
    }
}
