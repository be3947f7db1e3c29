use std::time::Duration;

use anyhow::{bail, Context, Result};

const DEFAULT_MODEL: &str = "claude-sonnet-4-5";
const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub llm_model: String,
    pub llm_api_url: String,
    /// Upper bound for one model invocation. Expiry is reported as an extraction failure.
    pub extraction_timeout: Duration,
    /// HTTP framing limit; the extraction layer itself does not cap contract length.
    pub max_body_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let timeout_secs = parse_env("EXTRACTION_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            bail!("EXTRACTION_TIMEOUT_SECS must be greater than zero");
        }

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            llm_model: optional_env("LLM_MODEL", DEFAULT_MODEL),
            llm_api_url: optional_env("LLM_API_URL", DEFAULT_API_URL),
            extraction_timeout: Duration::from_secs(timeout_secs),
            max_body_bytes: parse_env("MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?,
            port: parse_env("PORT", 8080)?,
            rust_log: optional_env("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own variable name so parallel tests never race on the environment.

    #[test]
    fn test_parse_env_falls_back_to_default() {
        let value: u16 = parse_env("CONTRACT_EXTRACTOR_TEST_UNSET_PORT", 8080).unwrap();
        assert_eq!(value, 8080);
    }

    #[test]
    fn test_parse_env_reads_value() {
        std::env::set_var("CONTRACT_EXTRACTOR_TEST_TIMEOUT", " 15 ");
        let value: u64 = parse_env("CONTRACT_EXTRACTOR_TEST_TIMEOUT", 60).unwrap();
        assert_eq!(value, 15);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("CONTRACT_EXTRACTOR_TEST_BAD_PORT", "eighty");
        let err = parse_env::<u16>("CONTRACT_EXTRACTOR_TEST_BAD_PORT", 8080).unwrap_err();
        assert!(err.to_string().contains("CONTRACT_EXTRACTOR_TEST_BAD_PORT"));
    }

    #[test]
    fn test_require_env_names_missing_variable() {
        let err = require_env("CONTRACT_EXTRACTOR_TEST_MISSING_KEY").unwrap_err();
        assert!(err.to_string().contains("CONTRACT_EXTRACTOR_TEST_MISSING_KEY"));
    }
}
