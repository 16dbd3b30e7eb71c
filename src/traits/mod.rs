//! Trait definitions for mockable dependencies.
//!
//! This module defines traits for:
//! - [`ModelClient`]: generative model client abstraction
//! - [`RecommendationStore`]: persistence abstraction
//! - [`AnalyticsProvider`]: analytics aggregator abstraction
//! - [`TimeProvider`]: time abstraction for testing
//!
//! It also re-exports shared request/response types from the `types`
//! submodule.
//!
//! # Mocking
//!
//! All traits are annotated with `#[cfg_attr(test, mockall::automock)]`
//! which generates mock implementations automatically for testing.
//!
//! # Example
//!
//! ```
//! use learning_compass::traits::{TimeProvider, RealTimeProvider};
//!
//! let time_provider = RealTimeProvider;
//! let now = time_provider.now();
//! println!("Current time: {now}");
//! ```

mod types;

pub use types::{CompletionConfig, CompletionResponse, Message, Usage};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::analytics::AnalyticsSnapshot;
use crate::error::{AnalyticsError, GenerationError, StorageError};
use crate::plan::StudyPlan;
use crate::storage::RecommendationRecord;

/// Generative model client trait for mocking.
///
/// Implementations submit exactly one request per call and never retry
/// internally; retry policy belongs to the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Send a completion request to the model.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] if the request is invalid or the model
    /// call fails.
    async fn complete(
        &self,
        messages: Vec<Message>,
        config: CompletionConfig,
    ) -> Result<CompletionResponse, GenerationError>;
}

/// Recommendation store trait for mocking.
///
/// An append-only log of generated plans keyed by student. Records are
/// never mutated or deleted.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecommendationStore: Send + Sync {
    /// Persist a plan for a student, assigning `id` and `created_at`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the store cannot accept the append.
    async fn append(
        &self,
        student_id: &str,
        plan: &StudyPlan,
    ) -> Result<RecommendationRecord, StorageError>;

    /// Fetch the student's most recent record, if any.
    ///
    /// The most recent record is the one with the greatest `created_at`;
    /// identical timestamps are broken by highest `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the query fails.
    async fn most_recent(
        &self,
        student_id: &str,
    ) -> Result<Option<RecommendationRecord>, StorageError>;
}

/// Analytics aggregator trait for mocking.
///
/// Queries are idempotent, read-only, and built fresh on demand.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalyticsProvider: Send + Sync {
    /// Build a fresh performance snapshot for the student.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError`] if any source query fails.
    async fn snapshot(&self, student_id: &str) -> Result<AnalyticsSnapshot, AnalyticsError>;
}

/// Time provider trait for deterministic testing.
///
/// This trait abstracts time operations to allow for deterministic
/// testing by providing fixed timestamps.
#[cfg_attr(test, mockall::automock)]
pub trait TimeProvider: Send + Sync {
    /// Get the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Real time provider using the system clock.
///
/// This is the production implementation that returns the actual current time.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealTimeProvider;

impl TimeProvider for RealTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
