//! Error types for the learning-compass crate.
//!
//! This module defines a hierarchical error system:
//! - [`AppError`]: Top-level application errors
//! - [`GenerationError`]: Generative model transport/API errors
//! - [`SchemaViolation`]: Plan responses that break the output contract
//! - [`StorageError`]: Recommendation store errors
//! - [`AnalyticsError`]: Platform analytics aggregator errors
//! - [`PlanError`]: Lifecycle-level failures surfaced to the caller
//! - [`ConfigError`]: Configuration errors
//!
//! All errors implement `Send + Sync` for async compatibility. No failure
//! is fatal to the process: every variant is recoverable at the call site.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::plan::StudyPlan;

/// Top-level application error.
///
/// This is the main error type returned by public API functions.
/// It wraps all subsystem errors for unified error handling.
#[derive(Debug, Error)]
pub enum AppError {
    /// Generative model API error.
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    /// Plan schema violation.
    #[error("Schema violation: {0}")]
    Schema(#[from] SchemaViolation),

    /// Storage error.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Analytics aggregator error.
    #[error("Analytics error: {0}")]
    Analytics(#[from] AnalyticsError),

    /// Plan lifecycle error.
    #[error("Plan error: {0}")]
    Plan(#[from] PlanError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Generative model API errors.
///
/// These errors represent failures when communicating with the model
/// endpoint. The pipeline submits exactly one request per generation
/// attempt and never retries internally; [`GenerationError::is_retryable`]
/// is a hint for callers that implement their own retry policy.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// Authentication failed due to invalid API key.
    #[error("Authentication failed: invalid API key")]
    AuthenticationFailed,

    /// Request was rate limited.
    #[error("Rate limited: retry after {retry_after_seconds}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_seconds: u64,
    },

    /// The requested model is overloaded.
    #[error("Model overloaded: {model}")]
    ModelOverloaded {
        /// The model that is overloaded.
        model: String,
    },

    /// Request timed out.
    #[error("Request timeout after {timeout_ms}ms")]
    Timeout {
        /// Timeout duration in milliseconds.
        timeout_ms: u64,
    },

    /// Invalid request parameters.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Description of what's invalid.
        message: String,
    },

    /// Network communication error.
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error.
        message: String,
    },

    /// Unexpected response from the API.
    #[error("Unexpected response: {message}")]
    UnexpectedResponse {
        /// Description of what was unexpected.
        message: String,
    },
}

impl GenerationError {
    /// Returns true if this error is retryable by the caller.
    ///
    /// Rate limiting, overload, timeout, and network errors are retryable.
    /// Authentication and invalid request errors are not.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. }
                | Self::ModelOverloaded { .. }
                | Self::Timeout { .. }
                | Self::Network { .. }
        )
    }
}

/// A model response that does not conform to the study-plan contract.
///
/// Each variant carries the path of the offending field (dotted, with
/// bracketed indices, e.g. `performance_projection[4].past_performance`).
/// Violating responses are never coerced, repaired, or persisted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaViolation {
    /// A required field is absent or has the wrong JSON type.
    #[error("Missing required field: {path}")]
    MissingField {
        /// Path of the missing field.
        path: String,
    },

    /// A field is present but its value is invalid.
    #[error("Invalid value for {path}: {reason}")]
    InvalidValue {
        /// Path of the offending field.
        path: String,
        /// Why the value is invalid.
        reason: String,
    },

    /// A sequence has the wrong number of elements.
    #[error("Wrong cardinality for {path}: expected {expected}, got {actual}")]
    WrongCardinality {
        /// Path of the offending sequence.
        path: String,
        /// Required element count.
        expected: usize,
        /// Observed element count.
        actual: usize,
    },
}

impl SchemaViolation {
    /// Path of the field that violated the contract.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::MissingField { path }
            | Self::InvalidValue { path, .. }
            | Self::WrongCardinality { path, .. } => path,
        }
    }
}

/// Storage errors.
///
/// These errors represent failures in the recommendation store. All of
/// them surface to callers as "storage unavailable" conditions; nothing
/// in this crate retries them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Failed to connect to the database.
    #[error("Database connection failed: {message}")]
    ConnectionFailed {
        /// Description of the connection failure.
        message: String,
    },

    /// A database query failed.
    #[error("Query failed: {query} - {message}")]
    QueryFailed {
        /// The query that failed (may be truncated).
        query: String,
        /// Description of the failure.
        message: String,
    },

    /// Database migration failed.
    #[error("Migration failed: {version} - {message}")]
    MigrationFailed {
        /// The migration version that failed.
        version: String,
        /// Description of the failure.
        message: String,
    },

    /// Internal storage error.
    #[error("Internal storage error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

/// Analytics aggregator errors.
///
/// Failures while building an [`AnalyticsSnapshot`] from the platform
/// REST API.
///
/// [`AnalyticsSnapshot`]: crate::analytics::AnalyticsSnapshot
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    /// Network communication error.
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error.
        message: String,
    },

    /// The platform API returned a non-success status.
    #[error("Unexpected status {status} from {endpoint}")]
    UnexpectedStatus {
        /// The endpoint that was queried.
        endpoint: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The platform API returned a body that could not be decoded.
    #[error("Failed to decode {endpoint} response: {message}")]
    Decode {
        /// The endpoint that was queried.
        endpoint: String,
        /// Description of the decode failure.
        message: String,
    },
}

/// Plan lifecycle errors.
///
/// Everything `request_new_plan` can fail with. All variants are
/// recoverable at the call site; none leave a partial record behind.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlanError {
    /// Regeneration requested before the cooldown elapsed.
    ///
    /// Not a system fault: carries the exact instant at which generation
    /// next becomes eligible.
    #[error("Generation throttled until {next_eligible_at}")]
    ThrottleActive {
        /// When the student may next request a plan.
        next_eligible_at: DateTime<Utc>,
    },

    /// The model call failed; nothing was persisted.
    #[error("Plan generation failed: {0}")]
    Generation(#[from] GenerationError),

    /// The model response broke the output contract; nothing was persisted.
    #[error("Plan rejected: {0}")]
    Schema(#[from] SchemaViolation),

    /// The analytics snapshot could not be built; nothing was persisted.
    #[error("Analytics fetch failed: {0}")]
    Analytics(#[from] AnalyticsError),

    /// The store could not accept the append.
    ///
    /// When a plan was already generated and validated, it rides along in
    /// `plan` so the caller may still display it transiently. It is not
    /// durably stored and this crate does not retry the append.
    #[error("Storage unavailable: {source}")]
    Storage {
        /// The underlying storage failure.
        #[source]
        source: StorageError,
        /// The orphaned plan, when generation had already succeeded.
        plan: Option<Box<StudyPlan>>,
    },
}

impl From<StorageError> for PlanError {
    fn from(source: StorageError) -> Self {
        Self::Storage { source, plan: None }
    }
}

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Required configuration is missing.
    #[error("Missing required: {var}")]
    MissingRequired {
        /// The missing variable name.
        var: String,
    },

    /// Configuration value is invalid.
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue {
        /// The variable name.
        var: String,
        /// Why the value is invalid.
        reason: String,
    },
}
