/// LLM Client — the single point of entry for all model calls in the service.
///
/// ARCHITECTURAL RULE: No other module may call the provider API directly.
/// Callers depend on the `StructuredModel` trait; `LlmClient` is the Anthropic
/// Messages API implementation wired in at startup.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

#[cfg(test)]
pub mod testing;

const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 4096;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Instruction half of a structured call.
#[derive(Debug, Clone, Copy)]
pub struct StructuredPrompt<'a> {
    pub system: &'a str,
    pub prompt: &'a str,
}

/// Output constraint half of a structured call: a named JSON Schema the reply must satisfy.
#[derive(Debug, Clone, Copy)]
pub struct OutputSchema<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub schema: &'a Value,
}

/// A generative model that answers with a value constrained to a JSON Schema.
///
/// Carried in `AppState` as `Arc<dyn StructuredModel>` so tests can substitute a
/// deterministic implementation for the live provider.
#[async_trait]
pub trait StructuredModel: Send + Sync {
    async fn complete(
        &self,
        prompt: StructuredPrompt<'_>,
        output: OutputSchema<'_>,
    ) -> Result<Value, LlmError>;
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
    tools: Vec<AnthropicTool<'a>>,
    tool_choice: ToolChoice<'a>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct AnthropicTool<'a> {
    name: &'a str,
    description: &'a str,
    input_schema: &'a Value,
}

#[derive(Debug, Serialize)]
struct ToolChoice<'a> {
    #[serde(rename = "type")]
    choice_type: &'a str,
    name: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
    pub name: Option<String>,
    pub input: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content from the first text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }

    /// Extracts the input of the first `tool_use` block addressed to `tool`.
    pub fn tool_input(&self, tool: &str) -> Option<&Value> {
        self.content
            .iter()
            .filter(|b| b.block_type == "tool_use")
            .find(|b| b.name.as_deref() == Some(tool))
            .and_then(|b| b.input.as_ref())
    }

    /// The structured reply: the forced tool's input, or JSON found in a text block.
    pub fn structured(&self, tool: &str) -> Result<Value, LlmError> {
        if let Some(input) = self.tool_input(tool) {
            return Ok(input.clone());
        }
        let text = self.text().ok_or(LlmError::EmptyContent)?;
        serde_json::from_str(strip_json_fences(text)).map_err(LlmError::Parse)
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// Anthropic Messages API client.
/// Makes exactly one HTTP attempt per call; schema conformance is forced through tool use.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    api_url: String,
    model: String,
}

impl LlmClient {
    pub fn new(
        api_key: String,
        model: String,
        api_url: String,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            api_url,
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Makes a raw call to the Messages API with a single forced tool, returning the full response.
    pub async fn call(
        &self,
        prompt: StructuredPrompt<'_>,
        output: OutputSchema<'_>,
    ) -> Result<LlmResponse, LlmError> {
        let request_body = AnthropicRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            system: prompt.system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt.prompt,
            }],
            tools: vec![AnthropicTool {
                name: output.name,
                description: output.description,
                input_schema: output.schema,
            }],
            tool_choice: ToolChoice {
                choice_type: "tool",
                name: output.name,
            },
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: parse_error_message(body),
            });
        }

        let llm_response: LlmResponse = response.json().await?;

        debug!(
            "LLM call succeeded: input_tokens={}, output_tokens={}",
            llm_response.usage.input_tokens, llm_response.usage.output_tokens
        );

        Ok(llm_response)
    }
}

#[async_trait]
impl StructuredModel for LlmClient {
    async fn complete(
        &self,
        prompt: StructuredPrompt<'_>,
        output: OutputSchema<'_>,
    ) -> Result<Value, LlmError> {
        let response = self.call(prompt, output).await?;
        response.structured(output.name)
    }
}

/// Pulls the human message out of a provider error body, falling back to the raw body.
fn parse_error_message(body: String) -> String {
    serde_json::from_str::<AnthropicError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(stripped) = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
    else {
        return text;
    };
    stripped
        .trim_start()
        .strip_suffix("```")
        .map(|s| s.trim())
        .unwrap_or(stripped.trim_start())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn response(content: Value) -> LlmResponse {
        serde_json::from_value(json!({
            "content": content,
            "usage": { "input_tokens": 10, "output_tokens": 20 }
        }))
        .unwrap()
    }

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_structured_prefers_forced_tool_input() {
        let resp = response(json!([
            { "type": "text", "text": "Here is the extraction." },
            { "type": "tool_use", "id": "toolu_1", "name": "record", "input": { "duration": "two years" } }
        ]));
        assert_eq!(resp.structured("record").unwrap(), json!({ "duration": "two years" }));
    }

    #[test]
    fn test_structured_ignores_other_tools() {
        let resp = response(json!([
            { "type": "tool_use", "id": "toolu_1", "name": "other", "input": {} }
        ]));
        assert!(matches!(resp.structured("record"), Err(LlmError::EmptyContent)));
    }

    #[test]
    fn test_structured_falls_back_to_fenced_text() {
        let resp = response(json!([
            { "type": "text", "text": "```json\n{\"duration\": \"\"}\n```" }
        ]));
        assert_eq!(resp.structured("record").unwrap(), json!({ "duration": "" }));
    }

    #[test]
    fn test_structured_rejects_prose() {
        let resp = response(json!([
            { "type": "text", "text": "I could not find any parties." }
        ]));
        assert!(matches!(resp.structured("record"), Err(LlmError::Parse(_))));
    }

    #[test]
    fn test_parse_error_message_reads_provider_body() {
        let body = r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#;
        assert_eq!(parse_error_message(body.to_string()), "Overloaded");
        assert_eq!(parse_error_message("bad gateway".to_string()), "bad gateway");
    }

    #[test]
    fn test_request_forces_the_output_tool() {
        let schema = json!({ "type": "object" });
        let body = AnthropicRequest {
            model: "claude-sonnet-4-5",
            max_tokens: MAX_TOKENS,
            system: "sys",
            messages: vec![AnthropicMessage { role: "user", content: "hi" }],
            tools: vec![AnthropicTool {
                name: "record",
                description: "desc",
                input_schema: &schema,
            }],
            tool_choice: ToolChoice { choice_type: "tool", name: "record" },
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["tool_choice"], json!({ "type": "tool", "name": "record" }));
        assert_eq!(value["tools"][0]["input_schema"], schema);
    }
}
