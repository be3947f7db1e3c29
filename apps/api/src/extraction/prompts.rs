// Contract extraction prompt templates.
// All prompts for the extraction module are defined here.

use crate::extraction::schema::field_guide;

/// Name of the provider-side tool whose input schema is the extraction record.
pub const EXTRACTION_TOOL_NAME: &str = "record_contract_extraction";

pub const EXTRACTION_TOOL_DESCRIPTION: &str =
    "Record the structured information extracted from a legal contract.";

pub const EXTRACTION_SYSTEM: &str = "\
You are a meticulous legal analyst who extracts structured facts from contracts. \
You report only what the contract states. \
You write every extracted value in English.";

/// Extraction prompt template. Replace `{field_guide}` and `{contract_text}` before sending.
pub const EXTRACTION_PROMPT_TEMPLATE: &str = r#"Analyze the following legal contract and extract the key information into the fields listed below.

FIELDS:
{field_guide}

RULES:
1. The contract may be written in Spanish or English. Handle both languages with equal accuracy.
2. If information is not available, return an empty string or an empty array as appropriate. Never omit a field and never invent information the contract does not contain.
3. Always return the extracted information in English for consistency, even if the original contract is in Spanish.
4. Be thorough and accurate: list every signing party, penalty and key clause the contract mentions.

CONTRACT TEXT:
{contract_text}"#;

/// Renders the full instruction for one contract.
pub fn render_extraction_prompt(contract_text: &str) -> String {
    EXTRACTION_PROMPT_TEMPLATE
        .replace("{field_guide}", &field_guide())
        .replace("{contract_text}", contract_text)
}
