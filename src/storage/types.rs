//! Stored record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::plan::StudyPlan;

/// A persisted study-plan record.
///
/// Records are immutable once created: the store assigns `id` and
/// `created_at` at append time and never mutates or deletes rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRecord {
    /// Store-assigned identifier, monotonically increasing per append.
    pub id: i64,
    /// Owning student.
    pub student_id: String,
    /// The validated plan payload.
    pub plan: StudyPlan,
    /// When the record was persisted.
    pub created_at: DateTime<Utc>,
}

impl RecommendationRecord {
    /// Age of this record at `now`.
    ///
    /// Clamps to zero if `now` is earlier than `created_at` (clock skew
    /// between writer and reader).
    #[must_use]
    pub fn age_at(&self, now: DateTime<Utc>) -> chrono::Duration {
        (now - self.created_at).max(chrono::Duration::zero())
    }
}
