//! Anthropic API request and response types.
//!
//! This module provides:
//! - Request types for the Messages API
//! - Response types including content blocks
//! - Token usage accounting
//!
//! Plan generation only ever sends plain text messages and reads plain
//! text back, so the wire types stay deliberately small.

use serde::{Deserialize, Serialize};

/// Request to the Anthropic Messages API.
#[derive(Debug, Clone, Serialize)]
pub struct ApiRequest {
    /// Model identifier (e.g., "claude-sonnet-4-20250514").
    pub model: String,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Temperature for sampling (0.0-1.0).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// System prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    /// Conversation messages.
    pub messages: Vec<ApiMessage>,
}

impl ApiRequest {
    /// Create a new API request with required fields.
    #[must_use]
    pub fn new(model: impl Into<String>, max_tokens: u32, messages: Vec<ApiMessage>) -> Self {
        Self {
            model: model.into(),
            max_tokens,
            temperature: None,
            system: None,
            messages,
        }
    }

    /// Set temperature.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set system prompt.
    #[must_use]
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}

/// A message in the conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiMessage {
    /// Role: "user" or "assistant".
    pub role: String,
    /// Message content.
    pub content: String,
}

impl ApiMessage {
    /// Create a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Create an assistant message.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Response from the Anthropic Messages API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    /// Unique message ID.
    pub id: String,
    /// Content blocks in the response.
    pub content: Vec<ContentBlock>,
    /// Model used.
    pub model: String,
    /// Token usage.
    pub usage: ApiUsage,
    /// Reason the response stopped.
    pub stop_reason: String,
}

/// Content block in an API response.
///
/// Plan generation requests never enable tools or extended thinking, so
/// text is the only block kind a response may carry.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum ContentBlock {
    /// Text content.
    #[serde(rename = "text")]
    Text {
        /// The text content.
        text: String,
    },
}

impl ContentBlock {
    /// Get text content if this is a text block.
    #[must_use]
    pub fn as_text(&self) -> &str {
        match self {
            Self::Text { text } => text,
        }
    }
}

/// Token usage in API response.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
pub struct ApiUsage {
    /// Input tokens consumed.
    pub input_tokens: u32,
    /// Output tokens generated.
    pub output_tokens: u32,
}

impl ApiUsage {
    /// Create new usage.
    #[must_use]
    pub const fn new(input_tokens: u32, output_tokens: u32) -> Self {
        Self {
            input_tokens,
            output_tokens,
        }
    }

    /// Get total tokens.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }
}
