//! Recommendation lifecycle manager.
//!
//! The single entry point used by the presentation layer. Composes the
//! analytics aggregator, the plan generator, and the recommendation
//! store, and enforces the regeneration cadence:
//!
//! - [`RecommendationLifecycle::get_active_plan`] is the cheap read path:
//!   it classifies the stored state as no-plan / fresh / stale and never
//!   contacts the model.
//! - [`RecommendationLifecycle::request_new_plan`] re-checks freshness,
//!   then runs aggregate, generate, validate, persist strictly in that
//!   order. An invalid plan is never stored, and a failed step leaves the
//!   previously stored plan untouched.
//!
//! There is no per-student mutual exclusion: two concurrent regeneration
//! requests (duplicate clicks) may both pass the freshness check and both
//! append. That race is accepted; the store's most-recent-wins read
//! resolves it deterministically. Cancellation is safe by construction:
//! the append is the final await, so a request dropped mid-flight
//! persists nothing.

use chrono::{DateTime, Duration, Utc};

use crate::error::{PlanError, StorageError};
use crate::generation::PlanGenerator;
use crate::storage::RecommendationRecord;
use crate::traits::{AnalyticsProvider, ModelClient, RecommendationStore, TimeProvider};

/// Lifecycle configuration.
///
/// The freshness window is injected so tests can run with simulated
/// clocks and deployments can tune the cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleConfig {
    /// How long a stored plan stays fresh (and regeneration throttled).
    pub freshness_window: Duration,
}

impl LifecycleConfig {
    /// Create a config with the given freshness window.
    #[must_use]
    pub const fn new(freshness_window: Duration) -> Self {
        Self { freshness_window }
    }

    /// Create a config with a window expressed in days.
    #[must_use]
    pub const fn from_days(days: i64) -> Self {
        Self::new(Duration::days(days))
    }
}

impl Default for LifecycleConfig {
    /// The standard weekly cadence.
    fn default() -> Self {
        Self::from_days(7)
    }
}

/// The plan state a student sees on page load.
#[derive(Debug, Clone, PartialEq)]
pub enum ActivePlan {
    /// No plan has ever been generated; the student is immediately
    /// eligible to request one.
    NoPlan,
    /// A plan younger than the freshness window; regeneration is
    /// throttled.
    Fresh {
        /// The record to display.
        record: RecommendationRecord,
    },
    /// A plan at or past the freshness window: still displayed, but the
    /// student may request regeneration.
    Stale {
        /// The record to display.
        record: RecommendationRecord,
        /// When the plan crossed the freshness boundary.
        eligible_since: DateTime<Utc>,
    },
}

impl ActivePlan {
    /// The record to display, if any.
    #[must_use]
    pub const fn record(&self) -> Option<&RecommendationRecord> {
        match self {
            Self::NoPlan => None,
            Self::Fresh { record } | Self::Stale { record, .. } => Some(record),
        }
    }

    /// True when a regeneration request would be accepted.
    #[must_use]
    pub const fn can_regenerate(&self) -> bool {
        matches!(self, Self::NoPlan | Self::Stale { .. })
    }
}

/// Orchestrates plan reads and regeneration for the presentation layer.
///
/// Holds no per-student state: every decision is re-derived from the
/// store on each call.
pub struct RecommendationLifecycle<S, C, A, T>
where
    S: RecommendationStore,
    C: ModelClient,
    A: AnalyticsProvider,
    T: TimeProvider,
{
    store: S,
    generator: PlanGenerator<C>,
    analytics: A,
    clock: T,
    config: LifecycleConfig,
}

impl<S, C, A, T> RecommendationLifecycle<S, C, A, T>
where
    S: RecommendationStore,
    C: ModelClient,
    A: AnalyticsProvider,
    T: TimeProvider,
{
    /// Create a new lifecycle manager.
    #[must_use]
    pub fn new(
        store: S,
        generator: PlanGenerator<C>,
        analytics: A,
        clock: T,
        config: LifecycleConfig,
    ) -> Self {
        Self {
            store,
            generator,
            analytics,
            clock,
            config,
        }
    }

    /// Classify the student's stored plan state.
    ///
    /// Read-only and side-effect free; never contacts the model. A plan
    /// is fresh iff its age is strictly less than the freshness window.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the store cannot be queried.
    pub async fn get_active_plan(&self, student_id: &str) -> Result<ActivePlan, StorageError> {
        let record = self.store.most_recent(student_id).await?;
        Ok(self.classify(record))
    }

    /// When the student may next request a plan.
    ///
    /// `None` means eligible now (no record exists). The returned instant
    /// may already be in the past for a stale plan.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the store cannot be queried.
    pub async fn next_eligible_at(
        &self,
        student_id: &str,
    ) -> Result<Option<DateTime<Utc>>, StorageError> {
        let record = self.store.most_recent(student_id).await?;
        Ok(record.map(|r| r.created_at + self.config.freshness_window))
    }

    /// Generate and persist a new plan for the student.
    ///
    /// Re-checks freshness first: a request inside the window fails with
    /// [`PlanError::ThrottleActive`] carrying the exact eligibility
    /// instant, and nothing is regenerated early. Otherwise the steps run
    /// strictly in order: build a fresh analytics snapshot, generate and
    /// validate the plan, then append it. Validation always precedes
    /// persistence.
    ///
    /// # Errors
    ///
    /// Any failure leaves the store unchanged and the previously active
    /// plan (if any) in place. An append failure after successful
    /// generation returns [`PlanError::Storage`] with the orphaned plan
    /// attached.
    pub async fn request_new_plan(
        &self,
        student_id: &str,
    ) -> Result<RecommendationRecord, PlanError> {
        if let Some(record) = self.store.most_recent(student_id).await? {
            let next_eligible_at = record.created_at + self.config.freshness_window;
            if self.clock.now() < next_eligible_at {
                tracing::info!(
                    student_id,
                    record_id = record.id,
                    %next_eligible_at,
                    "Regeneration throttled"
                );
                return Err(PlanError::ThrottleActive { next_eligible_at });
            }
        }

        let snapshot = self.analytics.snapshot(student_id).await?;
        let plan = self.generator.generate(student_id, &snapshot).await?;

        match self.store.append(student_id, &plan).await {
            Ok(record) => {
                tracing::info!(
                    student_id,
                    record_id = record.id,
                    created_at = %record.created_at,
                    "Persisted new study plan"
                );
                Ok(record)
            }
            Err(source) => {
                tracing::warn!(
                    student_id,
                    error = %source,
                    "Generated plan could not be persisted"
                );
                Err(PlanError::Storage {
                    source,
                    plan: Some(Box::new(plan)),
                })
            }
        }
    }

    fn classify(&self, record: Option<RecommendationRecord>) -> ActivePlan {
        match record {
            None => ActivePlan::NoPlan,
            Some(record) => {
                let eligible_at = record.created_at + self.config.freshness_window;
                if self.clock.now() < eligible_at {
                    ActivePlan::Fresh { record }
                } else {
                    ActivePlan::Stale {
                        record,
                        eligible_since: eligible_at,
                    }
                }
            }
        }
    }
}
