//! Generation provider configuration.

use crate::error::Error;
use crate::schema::ValidationError;
use crate::Result;

const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Configuration for the Gemini generateContent driver.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl GeminiConfig {
    pub fn builder() -> GeminiConfigBuilder {
        GeminiConfigBuilder::new()
    }

    /// Read configuration from the environment (`GEMINI_API_KEY`, with
    /// optional `GEMINI_MODEL` and `GEMINI_BASE_URL` overrides).
    pub fn from_env() -> Result<Self> {
        let mut builder = GeminiConfigBuilder::new();
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            builder = builder.api_key(key);
        }
        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            builder = builder.model(model);
        }
        if let Ok(url) = std::env::var("GEMINI_BASE_URL") {
            builder = builder.base_url(url);
        }
        builder.build()
    }
}

pub struct GeminiConfigBuilder {
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
    timeout_secs: u64,
}

impl GeminiConfigBuilder {
    pub fn new() -> Self {
        Self {
            api_key: None,
            model: None,
            base_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn build(self) -> Result<GeminiConfig> {
        let api_key = self.api_key.filter(|k| !k.is_empty()).ok_or_else(|| {
            Error::Validation(ValidationError::without_path(
                "Gemini API key must be configured (GEMINI_API_KEY)",
            ))
        })?;
        Ok(GeminiConfig {
            api_key,
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: self
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout_secs: self.timeout_secs,
        })
    }
}

impl Default for GeminiConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = GeminiConfig::builder().api_key("test-key").build().unwrap();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_builder_requires_api_key() {
        assert!(GeminiConfig::builder().build().is_err());
        assert!(GeminiConfig::builder().api_key("").build().is_err());
    }

    #[test]
    fn test_builder_overrides() {
        let config = GeminiConfig::builder()
            .api_key("k")
            .model("gemini-2.0-flash")
            .base_url("http://localhost:4010")
            .timeout_secs(5)
            .build()
            .unwrap();
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.base_url, "http://localhost:4010");
        assert_eq!(config.timeout_secs, 5);
    }
}
