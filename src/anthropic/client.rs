//! Anthropic API client.
//!
//! This module provides:
//! - HTTP client for the Anthropic Messages API
//! - Request validation
//! - Response parsing
//!
//! Each `complete` call maps to exactly one HTTP request. There is no
//! retry loop here: a plan generation attempt either succeeds or fails,
//! and any retry cadence belongs to the caller.

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::uninlined_format_args)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::config::ClientConfig;
use super::types::{ApiMessage, ApiRequest, ApiResponse, ApiUsage};
use crate::error::GenerationError;
use crate::traits::{CompletionConfig, CompletionResponse, Message, ModelClient, Usage};

/// Maximum number of messages per request.
pub const MAX_MESSAGES: usize = 50;
/// Maximum content length per message (50KB).
pub const MAX_CONTENT_LENGTH: usize = 50_000;

/// Anthropic API version header value.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic API client.
#[derive(Debug)]
pub struct AnthropicClient {
    client: Client,
    api_key: String,
    config: ClientConfig,
}

/// Parsed completion result: the response text plus token accounting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientResponse {
    /// Concatenated text content from the response.
    pub raw_text: String,
    /// Token usage.
    pub usage: ApiUsage,
}

impl AnthropicClient {
    /// Create a new Anthropic client.
    pub fn new(api_key: impl Into<String>, config: ClientConfig) -> Result<Self, GenerationError> {
        let timeout = Duration::from_millis(config.timeout_ms);
        let client =
            Client::builder()
                .timeout(timeout)
                .build()
                .map_err(|e| GenerationError::Network {
                    message: format!("Failed to create HTTP client: {e}"),
                })?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            config,
        })
    }

    /// Create a client with default configuration.
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self, GenerationError> {
        Self::new(api_key, ClientConfig::default())
    }

    /// Get the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Get the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send a completion request. Exactly one HTTP attempt.
    pub async fn complete(&self, request: ApiRequest) -> Result<ClientResponse, GenerationError> {
        Self::validate_request(&request)?;

        let url = format!("{}/messages", self.config.base_url);
        let start = std::time::Instant::now();

        tracing::debug!(
            url = %url,
            model = %request.model,
            max_tokens = request.max_tokens,
            timeout_ms = self.config.timeout_ms,
            "Starting Anthropic API request"
        );

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                let elapsed_ms = start.elapsed().as_millis() as u64;
                if e.is_timeout() {
                    tracing::error!(
                        url = %url,
                        elapsed_ms = elapsed_ms,
                        timeout_ms = self.config.timeout_ms,
                        "Anthropic API request timed out"
                    );
                    GenerationError::Timeout {
                        timeout_ms: self.config.timeout_ms,
                    }
                } else {
                    tracing::error!(
                        url = %url,
                        elapsed_ms = elapsed_ms,
                        error = %e,
                        "Anthropic API request failed"
                    );
                    GenerationError::Network {
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        tracing::debug!(
            url = %url,
            status = %status,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Anthropic API response received"
        );

        // Handle specific error status codes - fail fast, no fallbacks
        if status.as_u16() == 401 {
            return Err(GenerationError::AuthenticationFailed);
        }

        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(60);
            return Err(GenerationError::RateLimited {
                retry_after_seconds: retry_after,
            });
        }

        if status.as_u16() == 529 {
            return Err(GenerationError::ModelOverloaded {
                model: request.model.clone(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::UnexpectedResponse {
                message: format!("Status {}: {}", status, body),
            });
        }

        // Parse successful response
        let body: ApiResponse =
            response
                .json()
                .await
                .map_err(|e| GenerationError::UnexpectedResponse {
                    message: format!("Failed to parse response: {e}"),
                })?;

        Self::parse_response(body)
    }

    /// Validate request size limits.
    fn validate_request(request: &ApiRequest) -> Result<(), GenerationError> {
        if request.messages.len() > MAX_MESSAGES {
            return Err(GenerationError::InvalidRequest {
                message: format!(
                    "Too many messages: {} > {}",
                    request.messages.len(),
                    MAX_MESSAGES
                ),
            });
        }

        for msg in &request.messages {
            let content_len = msg.content.len();
            if content_len > MAX_CONTENT_LENGTH {
                return Err(GenerationError::InvalidRequest {
                    message: format!(
                        "Message too large: {} > {}",
                        content_len, MAX_CONTENT_LENGTH
                    ),
                });
            }
        }

        Ok(())
    }

    /// Collect text blocks into a `ClientResponse`.
    fn parse_response(response: ApiResponse) -> Result<ClientResponse, GenerationError> {
        let mut raw_text = String::new();

        for block in &response.content {
            let text = block.as_text();
            if !raw_text.is_empty() {
                raw_text.push('\n');
            }
            raw_text.push_str(text);
        }

        if raw_text.is_empty() {
            return Err(GenerationError::UnexpectedResponse {
                message: "No content in response".to_string(),
            });
        }

        Ok(ClientResponse {
            raw_text,
            usage: response.usage,
        })
    }
}

/// Convert trait types to API types and call the underlying client.
#[async_trait]
impl ModelClient for AnthropicClient {
    async fn complete(
        &self,
        messages: Vec<Message>,
        config: CompletionConfig,
    ) -> Result<CompletionResponse, GenerationError> {
        let api_messages: Vec<ApiMessage> = messages
            .into_iter()
            .map(|m| {
                if m.role == "user" {
                    ApiMessage::user(m.content)
                } else {
                    ApiMessage::assistant(m.content)
                }
            })
            .collect();

        let max_tokens = config.max_tokens.unwrap_or(super::config::DEFAULT_MAX_TOKENS);
        let mut request = ApiRequest::new(&self.config.model, max_tokens, api_messages);

        if let Some(temp) = config.temperature {
            request = request.with_temperature(f64::from(temp));
        }
        if let Some(system) = config.system_prompt.as_ref() {
            request = request.with_system(system);
        }

        let response = Self::complete(self, request).await?;

        Ok(CompletionResponse::new(
            response.raw_text,
            Usage::new(response.usage.input_tokens, response.usage.output_tokens),
        ))
    }
}

/// Blanket implementation for `Arc<AnthropicClient>`.
#[async_trait]
impl ModelClient for Arc<AnthropicClient> {
    async fn complete(
        &self,
        messages: Vec<Message>,
        config: CompletionConfig,
    ) -> Result<CompletionResponse, GenerationError> {
        <AnthropicClient as ModelClient>::complete(self.as_ref(), messages, config).await
    }
}
