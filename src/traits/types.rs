//! Shared types for the traits module.
//!
//! This module defines the request/response types used across the
//! generation pipeline:
//! - [`Message`]: API message structure
//! - [`CompletionConfig`]: Completion request configuration
//! - [`CompletionResponse`]: API response structure
//! - [`Usage`]: Token usage information

/// Message for API requests.
///
/// Represents a single message in a conversation with the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Role of the message sender (user or assistant).
    pub role: String,
    /// Content of the message.
    pub content: String,
}

impl Message {
    /// Create a new message.
    #[must_use]
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    /// Create a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    /// Create an assistant message.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }
}

/// Completion configuration.
///
/// Configuration options for API completion requests.
#[derive(Debug, Clone, Default, PartialEq)]
// Cannot derive Eq: f32 temperature field does not implement Eq (IEEE 754 NaN != NaN)
#[allow(clippy::derive_partial_eq_without_eq)]
pub struct CompletionConfig {
    /// Maximum tokens to generate.
    pub max_tokens: Option<u32>,
    /// Temperature for sampling (0.0 to 1.0).
    pub temperature: Option<f32>,
    /// System prompt to prepend.
    pub system_prompt: Option<String>,
}

impl CompletionConfig {
    /// Create a new completion config with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set max tokens.
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set temperature.
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set system prompt.
    #[must_use]
    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }
}

/// Token usage information.
///
/// Tracks the number of tokens used in a request/response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Usage {
    /// Input tokens (prompt).
    pub input_tokens: u32,
    /// Output tokens (completion).
    pub output_tokens: u32,
}

impl Usage {
    /// Create new usage info.
    #[must_use]
    pub const fn new(input_tokens: u32, output_tokens: u32) -> Self {
        Self {
            input_tokens,
            output_tokens,
        }
    }

    /// Total tokens used.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }
}

/// Completion response.
///
/// The response from an API completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    /// Response content.
    pub content: String,
    /// Token usage.
    pub usage: Usage,
}

impl CompletionResponse {
    /// Create a new completion response.
    #[must_use]
    pub fn new(content: impl Into<String>, usage: Usage) -> Self {
        Self {
            content: content.into(),
            usage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        let user = Message::user("Hello");
        assert_eq!(user.role, "user");
        assert_eq!(user.content, "Hello");

        let assistant = Message::assistant("Hi");
        assert_eq!(assistant.role, "assistant");
    }

    #[test]
    fn test_completion_config_builders() {
        let config = CompletionConfig::new()
            .with_max_tokens(8192)
            .with_temperature(0.3)
            .with_system_prompt("You are a coach");
        assert_eq!(config.max_tokens, Some(8192));
        assert_eq!(config.temperature, Some(0.3));
        assert_eq!(config.system_prompt.as_deref(), Some("You are a coach"));
    }

    #[test]
    fn test_usage_total() {
        assert_eq!(Usage::new(100, 50).total(), 150);
        assert_eq!(Usage::default().total(), 0);
    }

    #[test]
    fn test_completion_response_new() {
        let response = CompletionResponse::new("text", Usage::new(1, 2));
        assert_eq!(response.content, "text");
        assert_eq!(response.usage.total(), 3);
    }
}
