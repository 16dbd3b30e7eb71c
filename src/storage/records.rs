//! Recommendation record operations.
//!
//! The log is append-only: inserts and reads, nothing else. The active
//! record for a student is the one with the greatest `created_at`;
//! identical timestamps are broken by highest `id`, which is total
//! because ids are assigned by `AUTOINCREMENT`.

#![allow(clippy::missing_errors_doc)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;

use super::core::SqliteStorage;
use super::types::RecommendationRecord;
use crate::error::StorageError;
use crate::plan::StudyPlan;
use crate::traits::RecommendationStore;

impl SqliteStorage {
    /// Append a plan for a student, assigning `id` and `created_at`.
    pub async fn append_record(
        &self,
        student_id: &str,
        plan: &StudyPlan,
    ) -> Result<RecommendationRecord, StorageError> {
        self.insert_record(student_id, plan, Utc::now()).await
    }

    /// Fetch the most recent record for a student, if any.
    pub async fn most_recent_record(
        &self,
        student_id: &str,
    ) -> Result<Option<RecommendationRecord>, StorageError> {
        let row = sqlx::query(
            "SELECT id, student_id, plan, created_at FROM recommendations \
             WHERE student_id = ? ORDER BY created_at DESC, id DESC LIMIT 1",
        )
        .bind(student_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Self::query_error("SELECT recommendations", format!("{e}")))?;

        match row {
            Some(row) => {
                let id: i64 = row.get("id");
                let student_id: String = row.get("student_id");
                let plan_json: String = row.get("plan");
                let created_at_str: String = row.get("created_at");

                let plan: StudyPlan =
                    serde_json::from_str(&plan_json).map_err(|e| StorageError::Internal {
                        message: format!("Corrupt plan payload for record {id}: {e}"),
                    })?;
                let created_at = Self::parse_datetime(&created_at_str)?;

                Ok(Some(RecommendationRecord {
                    id,
                    student_id,
                    plan,
                    created_at,
                }))
            }
            None => Ok(None),
        }
    }

    /// Count all records for a student.
    pub async fn record_count(&self, student_id: &str) -> Result<i64, StorageError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM recommendations WHERE student_id = ?")
            .bind(student_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Self::query_error("COUNT recommendations", format!("{e}")))?;
        Ok(row.get("n"))
    }

    async fn insert_record(
        &self,
        student_id: &str,
        plan: &StudyPlan,
        created_at: DateTime<Utc>,
    ) -> Result<RecommendationRecord, StorageError> {
        let plan_json = serde_json::to_string(plan).map_err(|e| StorageError::Internal {
            message: format!("Failed to serialize plan: {e}"),
        })?;
        let created_at_str = created_at.to_rfc3339();

        let result =
            sqlx::query("INSERT INTO recommendations (student_id, plan, created_at) VALUES (?, ?, ?)")
                .bind(student_id)
                .bind(&plan_json)
                .bind(&created_at_str)
                .execute(&self.pool)
                .await
                .map_err(|e| Self::query_error("INSERT recommendations", format!("{e}")))?;

        Ok(RecommendationRecord {
            id: result.last_insert_rowid(),
            student_id: student_id.to_string(),
            plan: plan.clone(),
            created_at,
        })
    }

    /// Insert with a caller-controlled timestamp. Test-only: production
    /// appends always stamp the current instant.
    #[cfg(test)]
    pub(crate) async fn insert_record_at(
        &self,
        student_id: &str,
        plan: &StudyPlan,
        created_at: DateTime<Utc>,
    ) -> Result<RecommendationRecord, StorageError> {
        self.insert_record(student_id, plan, created_at).await
    }
}

#[async_trait]
impl RecommendationStore for SqliteStorage {
    async fn append(
        &self,
        student_id: &str,
        plan: &StudyPlan,
    ) -> Result<RecommendationRecord, StorageError> {
        self.append_record(student_id, plan).await
    }

    async fn most_recent(
        &self,
        student_id: &str,
    ) -> Result<Option<RecommendationRecord>, StorageError> {
        self.most_recent_record(student_id).await
    }
}
