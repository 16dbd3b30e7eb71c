//! Configuration management.
//!
//! This module handles:
//! - Environment variable loading
//! - Configuration validation
//! - Default value handling
//! - Secure API key storage via [`SecretString`]
//!
//! # Example
//!
//! ```
//! use learning_compass::config::{Config, SecretString, DEFAULT_MODEL};
//!
//! // Create a config directly (use Config::from_env() in production)
//! let config = Config {
//!     api_key: SecretString::new("sk-ant-example-key"),
//!     database_path: "./data/recommendations.db".to_string(),
//!     analytics_base_url: "https://api.school.example/v1".to_string(),
//!     log_level: "info".to_string(),
//!     request_timeout_ms: 30000,
//!     max_tokens: 8192,
//!     model: DEFAULT_MODEL.to_string(),
//!     freshness_window_days: 7,
//! };
//!
//! println!("Using model: {}", config.model);
//! // API key is protected from accidental logging
//! let debug = format!("{:?}", config);
//! assert!(debug.contains("<REDACTED>"));
//! assert!(!debug.contains("sk-ant-example-key"));
//! ```

mod secret;
mod validation;

pub use secret::SecretString;
pub use validation::{
    validate_config, MAX_FRESHNESS_DAYS, MAX_TIMEOUT_MS, MIN_FRESHNESS_DAYS, MIN_TIMEOUT_MS,
};

use crate::error::ConfigError;

/// Default database path.
pub const DEFAULT_DATABASE_PATH: &str = "./data/recommendations.db";

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default request timeout in milliseconds.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 60_000;

/// Default maximum tokens for a plan generation response.
pub const DEFAULT_MAX_TOKENS: u32 = 8192;

/// Default Anthropic model.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Default freshness window in days: a plan younger than this is served
/// from the store and regeneration is throttled.
pub const DEFAULT_FRESHNESS_WINDOW_DAYS: i64 = 7;

/// Application configuration.
///
/// Use [`Config::from_env`] to load configuration from environment
/// variables. The `api_key` field uses [`SecretString`] to prevent
/// accidental logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Anthropic API key (protected from logging via [`SecretString`]).
    pub api_key: SecretString,
    /// Database path for the recommendation store.
    pub database_path: String,
    /// Base URL of the school platform REST API (analytics aggregator).
    pub analytics_base_url: String,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: String,
    /// Request timeout in milliseconds (model and analytics calls).
    pub request_timeout_ms: u64,
    /// Maximum tokens for a plan generation response.
    pub max_tokens: u32,
    /// Anthropic model to use.
    pub model: String,
    /// Freshness window in days for the regeneration cadence.
    pub freshness_window_days: i64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `ANTHROPIC_API_KEY`: Anthropic API key
    /// - `ANALYTICS_BASE_URL`: Base URL of the platform REST API
    ///
    /// Optional environment variables (with defaults):
    /// - `DATABASE_PATH`: Path to the `SQLite` database (default: `./data/recommendations.db`)
    /// - `LOG_LEVEL`: Logging level (default: `info`)
    /// - `REQUEST_TIMEOUT_MS`: Request timeout (default: `60000`)
    /// - `MAX_TOKENS`: Response token cap (default: `8192`)
    /// - `ANTHROPIC_MODEL`: Model to use (default: `claude-sonnet-4-20250514`)
    /// - `FRESHNESS_WINDOW_DAYS`: Regeneration cadence (default: `7`)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a required variable is missing, a numeric
    /// variable does not parse, or any value fails validation (see
    /// [`validate_config`]).
    #[must_use = "configuration should be used"]
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors)
        let _ = dotenvy::dotenv();

        let api_key =
            std::env::var("ANTHROPIC_API_KEY").map_err(|_| ConfigError::MissingRequired {
                var: "ANTHROPIC_API_KEY".into(),
            })?;

        let analytics_base_url =
            std::env::var("ANALYTICS_BASE_URL").map_err(|_| ConfigError::MissingRequired {
                var: "ANALYTICS_BASE_URL".into(),
            })?;

        let database_path =
            std::env::var("DATABASE_PATH").unwrap_or_else(|_| DEFAULT_DATABASE_PATH.into());

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.into());

        let request_timeout_ms = parse_env_u64("REQUEST_TIMEOUT_MS", DEFAULT_REQUEST_TIMEOUT_MS)?;
        let max_tokens = parse_env_u32("MAX_TOKENS", DEFAULT_MAX_TOKENS)?;
        let freshness_window_days =
            parse_env_i64("FRESHNESS_WINDOW_DAYS", DEFAULT_FRESHNESS_WINDOW_DAYS)?;

        let model = std::env::var("ANTHROPIC_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());

        let config = Self {
            api_key: SecretString::new(api_key),
            database_path,
            analytics_base_url,
            log_level,
            request_timeout_ms,
            max_tokens,
            model,
            freshness_window_days,
        };

        validate_config(&config)?;
        Ok(config)
    }
}

/// Parse an environment variable as u64, using a default if not set.
fn parse_env_u64(name: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
            var: name.into(),
            reason: format!("'{value}' is not a valid positive integer"),
        }),
        Err(_) => Ok(default),
    }
}

/// Parse an environment variable as u32, using a default if not set.
fn parse_env_u32(name: &str, default: u32) -> Result<u32, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
            var: name.into(),
            reason: format!("'{value}' is not a valid positive integer"),
        }),
        Err(_) => Ok(default),
    }
}

/// Parse an environment variable as i64, using a default if not set.
fn parse_env_i64(name: &str, default: i64) -> Result<i64, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
            var: name.into(),
            reason: format!("'{value}' is not a valid integer"),
        }),
        Err(_) => Ok(default),
    }
}
