//! Plain-text reviewer summary of an extraction, laid out from the schema labels.

use std::fmt::Write;

use crate::extraction::models::{ContractExtraction, FieldValue};
use crate::extraction::schema::CONTRACT_FIELDS;

pub fn render_summary(record: &ContractExtraction) -> String {
    let mut out = String::from("CONTRACT EXTRACTION\n");

    for spec in CONTRACT_FIELDS {
        let Some(value) = record.value_of(spec) else {
            continue;
        };
        out.push('\n');
        match value {
            _ if value.is_empty() => {
                let _ = writeln!(out, "{}: {}", spec.label, spec.empty_placeholder);
            }
            FieldValue::Text(text) => {
                let _ = writeln!(out, "{}: {}", spec.label, text.trim());
            }
            FieldValue::TextList(items) => {
                let _ = writeln!(out, "{}:", spec.label);
                for item in items.iter().filter(|i| !i.trim().is_empty()) {
                    let _ = writeln!(out, "  - {}", item.trim());
                }
            }
        }
    }

    out
}
