//! Configuration validation.
//!
//! This module provides validation logic for configuration values,
//! ensuring they are within acceptable ranges.

use super::Config;
use crate::error::ConfigError;

/// Minimum allowed timeout in milliseconds (1 second).
pub const MIN_TIMEOUT_MS: u64 = 1000;

/// Maximum allowed timeout in milliseconds (5 minutes).
pub const MAX_TIMEOUT_MS: u64 = 300_000;

/// Minimum allowed freshness window in days.
pub const MIN_FRESHNESS_DAYS: i64 = 1;

/// Maximum allowed freshness window in days.
pub const MAX_FRESHNESS_DAYS: i64 = 90;

/// Validate configuration values.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] if any value is out of range:
/// - `ANTHROPIC_API_KEY` must not be empty
/// - `ANALYTICS_BASE_URL` must be an http(s) URL
/// - `REQUEST_TIMEOUT_MS` must be between 1000 and 300000
/// - `FRESHNESS_WINDOW_DAYS` must be between 1 and 90
#[must_use = "validation result should be checked"]
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // API key must not be empty
    if config.api_key.is_empty() {
        return Err(ConfigError::InvalidValue {
            var: "ANTHROPIC_API_KEY".into(),
            reason: "must not be empty".into(),
        });
    }

    if !config.analytics_base_url.starts_with("http://")
        && !config.analytics_base_url.starts_with("https://")
    {
        return Err(ConfigError::InvalidValue {
            var: "ANALYTICS_BASE_URL".into(),
            reason: "must be an http(s) URL".into(),
        });
    }

    // Timeout must be reasonable (1s to 5m)
    if config.request_timeout_ms < MIN_TIMEOUT_MS || config.request_timeout_ms > MAX_TIMEOUT_MS {
        return Err(ConfigError::InvalidValue {
            var: "REQUEST_TIMEOUT_MS".into(),
            reason: format!("must be between {MIN_TIMEOUT_MS} and {MAX_TIMEOUT_MS} ms"),
        });
    }

    // The regeneration cadence is configuration, not a hard-coded literal.
    // A zero window would make every plan immediately stale.
    if config.freshness_window_days < MIN_FRESHNESS_DAYS
        || config.freshness_window_days > MAX_FRESHNESS_DAYS
    {
        return Err(ConfigError::InvalidValue {
            var: "FRESHNESS_WINDOW_DAYS".into(),
            reason: format!("must be between {MIN_FRESHNESS_DAYS} and {MAX_FRESHNESS_DAYS} days"),
        });
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::SecretString;

    fn create_valid_config() -> Config {
        Config {
            api_key: SecretString::new("sk-ant-test-key"),
            database_path: "./data/recommendations.db".to_string(),
            analytics_base_url: "https://api.school.example/v1".to_string(),
            log_level: "info".to_string(),
            request_timeout_ms: 30000,
            max_tokens: 8192,
            model: "claude-sonnet-4-20250514".to_string(),
            freshness_window_days: 7,
        }
    }

    #[test]
    fn test_valid_config() {
        let config = create_valid_config();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_api_key() {
        let mut config = create_valid_config();
        config.api_key = SecretString::new("");
        let result = validate_config(&config);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { var, .. } if var == "ANTHROPIC_API_KEY"));
    }

    #[test]
    fn test_non_http_analytics_url() {
        let mut config = create_valid_config();
        config.analytics_base_url = "ftp://api.school.example".to_string();
        let result = validate_config(&config);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { var, .. } if var == "ANALYTICS_BASE_URL"));
    }

    #[test]
    fn test_timeout_too_low() {
        let mut config = create_valid_config();
        config.request_timeout_ms = 999;
        let result = validate_config(&config);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { var, .. } if var == "REQUEST_TIMEOUT_MS")
        );
    }

    #[test]
    fn test_timeout_too_high() {
        let mut config = create_valid_config();
        config.request_timeout_ms = 300_001;
        let result = validate_config(&config);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { var, .. } if var == "REQUEST_TIMEOUT_MS")
        );
    }

    #[test]
    fn test_freshness_window_zero() {
        let mut config = create_valid_config();
        config.freshness_window_days = 0;
        let result = validate_config(&config);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { var, .. } if var == "FRESHNESS_WINDOW_DAYS")
        );
    }

    #[test]
    fn test_freshness_window_too_long() {
        let mut config = create_valid_config();
        config.freshness_window_days = 91;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_boundary_timeout_min() {
        let mut config = create_valid_config();
        config.request_timeout_ms = MIN_TIMEOUT_MS;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_boundary_timeout_max() {
        let mut config = create_valid_config();
        config.request_timeout_ms = MAX_TIMEOUT_MS;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_boundary_freshness_days() {
        let mut config = create_valid_config();
        config.freshness_window_days = MIN_FRESHNESS_DAYS;
        assert!(validate_config(&config).is_ok());
        config.freshness_window_days = MAX_FRESHNESS_DAYS;
        assert!(validate_config(&config).is_ok());
    }
}
