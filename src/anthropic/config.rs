//! Anthropic client configuration.

/// Default base URL for Anthropic API.
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
/// Default timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 60_000;
/// Default model.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
/// Default max tokens for a generation response.
pub const DEFAULT_MAX_TOKENS: u32 = 8192;

/// Client configuration for the Anthropic API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Model identifier used for generation requests.
    pub model: String,
}

impl ClientConfig {
    /// Create a new client configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set timeout in milliseconds.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_builders() {
        let config = ClientConfig::new()
            .with_base_url("http://localhost:8080")
            .with_timeout_ms(10_000)
            .with_model("claude-test");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_ms, 10_000);
        assert_eq!(config.model, "claude-test");
    }
}
