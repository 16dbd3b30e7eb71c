//! Anthropic API integration.
//!
//! This module provides:
//! - [`AnthropicClient`]: HTTP client for the Messages API
//! - [`ClientConfig`]: endpoint, timeout, and model configuration
//! - Request and response types
//!
//! The client implements the [`ModelClient`] seam so the generation
//! pipeline can be tested against a mock.
//!
//! [`ModelClient`]: crate::traits::ModelClient

mod client;
mod config;
mod types;

pub use client::{AnthropicClient, ClientResponse, MAX_CONTENT_LENGTH, MAX_MESSAGES};
pub use config::{
    ClientConfig, DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TIMEOUT_MS,
};
pub use types::{ApiMessage, ApiRequest, ApiResponse, ApiUsage, ContentBlock};
