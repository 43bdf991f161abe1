//! Configuration for the language model connection.

use derive_getters::Getters;
use herald_error::{GenerationError, GenerationErrorKind};
use std::time::Duration;

/// Default chat completions endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Configuration for an OpenAI-compatible chat completions endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct GeneratorConfig {
    /// Bearer token for the service
    api_key: String,
    /// Full URL of the chat completions endpoint
    #[builder(default = "DEFAULT_BASE_URL.to_string()")]
    base_url: String,
    /// Model identifier to request
    #[builder(default = "DEFAULT_MODEL.to_string()")]
    model: String,
    /// Request timeout
    #[builder(default = "Duration::from_secs(DEFAULT_TIMEOUT_SECS)")]
    timeout: Duration,
    /// Sampling temperature
    #[builder(default = "Some(70)")]
    temperature_percent: Option<u8>,
}

impl GeneratorConfig {
    /// Creates a builder for GeneratorConfig.
    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder::default()
    }

    /// Create config from environment variables
    ///
    /// Reads:
    /// - `HERALD_LLM_API_KEY` (required, `OPENAI_API_KEY` accepted as fallback)
    /// - `HERALD_LLM_BASE_URL` (default: OpenAI chat completions)
    /// - `HERALD_LLM_MODEL` (default: "gpt-4o-mini")
    /// - `HERALD_LLM_TIMEOUT_SECS` (default: 60)
    pub fn from_env() -> Result<Self, GenerationError> {
        let api_key = std::env::var("HERALD_LLM_API_KEY")
            .or_else(|_| std::env::var("OPENAI_API_KEY"))
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| GenerationError::new(GenerationErrorKind::MissingApiKey))?;

        let mut builder = Self::builder();
        builder.api_key(api_key);
        if let Ok(url) = std::env::var("HERALD_LLM_BASE_URL") {
            builder.base_url(url);
        }
        if let Ok(model) = std::env::var("HERALD_LLM_MODEL") {
            builder.model(model);
        }
        if let Some(secs) = std::env::var("HERALD_LLM_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            builder.timeout(Duration::from_secs(secs));
        }

        builder.build().map_err(|e| {
            GenerationError::new(GenerationErrorKind::Http(format!(
                "Invalid generator configuration: {}",
                e
            )))
        })
    }

    /// Temperature as the float the API expects.
    pub fn temperature(&self) -> Option<f32> {
        self.temperature_percent.map(|p| f32::from(p) / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = GeneratorConfig::builder().api_key("sk-test").build().unwrap();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.model(), DEFAULT_MODEL);
        assert_eq!(*config.timeout(), Duration::from_secs(60));
        assert_eq!(config.temperature(), Some(0.7));
    }
}
