//! REST-backed analytics aggregator.
//!
//! Builds an [`AnalyticsSnapshot`] from the school platform's REST API.
//! The three source queries (progress analytics, recent activities,
//! available lessons) are idempotent reads and run concurrently; the
//! aggregator holds no state beyond its HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::types::{AnalyticsSnapshot, RecentActivity};
use crate::error::AnalyticsError;
use crate::traits::AnalyticsProvider;

/// How many recent activities to include in a snapshot.
const RECENT_ACTIVITY_PAGE_SIZE: usize = 20;

/// Analytics aggregator backed by the platform REST API.
#[derive(Debug, Clone)]
pub struct RestAnalyticsAggregator {
    client: Client,
    base_url: String,
}

/// Paginated envelope used by the platform list endpoints.
#[derive(Debug, Deserialize)]
struct Paginated<T> {
    results: Vec<T>,
}

/// Core analytics payload, minus activities and lessons.
#[derive(Debug, Deserialize)]
struct ProgressAnalytics {
    today_study_minutes: u32,
    weekly_study_minutes: Vec<super::types::DailyStudy>,
    attendance: super::types::Attendance,
    subject_distribution: Vec<super::types::SubjectDistribution>,
    subject_progress: Vec<super::types::SubjectProgress>,
    quiz_attempts: Vec<super::types::QuizAttempt>,
}

/// Lesson entry from the catalog endpoint.
#[derive(Debug, Deserialize)]
struct LessonEntry {
    title: String,
}

impl RestAnalyticsAggregator {
    /// Create a new aggregator against the given platform base URL.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::Network`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout_ms: u64) -> Result<Self, AnalyticsError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| AnalyticsError::Network {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Get the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        url: String,
    ) -> Result<T, AnalyticsError> {
        tracing::debug!(endpoint, url = %url, "Querying platform API");

        let response =
            self.client
                .get(&url)
                .send()
                .await
                .map_err(|e| AnalyticsError::Network {
                    message: e.to_string(),
                })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalyticsError::UnexpectedStatus {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        response.json().await.map_err(|e| AnalyticsError::Decode {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })
    }

    async fn fetch_progress(&self, student_id: &str) -> Result<ProgressAnalytics, AnalyticsError> {
        let url = format!("{}/students/{student_id}/progress-analytics", self.base_url);
        self.get_json("progress-analytics", url).await
    }

    async fn fetch_activities(
        &self,
        student_id: &str,
    ) -> Result<Vec<RecentActivity>, AnalyticsError> {
        let url = format!(
            "{}/students/{student_id}/recent-activities?page_size={RECENT_ACTIVITY_PAGE_SIZE}",
            self.base_url
        );
        let page: Paginated<RecentActivity> = self.get_json("recent-activities", url).await?;
        Ok(page.results)
    }

    async fn fetch_lesson_titles(&self, student_id: &str) -> Result<Vec<String>, AnalyticsError> {
        let url = format!("{}/students/{student_id}/lessons", self.base_url);
        let page: Paginated<LessonEntry> = self.get_json("lessons", url).await?;
        Ok(page.results.into_iter().map(|l| l.title).collect())
    }
}

#[async_trait]
impl AnalyticsProvider for RestAnalyticsAggregator {
    async fn snapshot(&self, student_id: &str) -> Result<AnalyticsSnapshot, AnalyticsError> {
        let (progress, recent_activities, available_lesson_titles) = tokio::try_join!(
            self.fetch_progress(student_id),
            self.fetch_activities(student_id),
            self.fetch_lesson_titles(student_id),
        )?;

        Ok(AnalyticsSnapshot {
            today_study_minutes: progress.today_study_minutes,
            weekly_study_minutes: progress.weekly_study_minutes,
            attendance: progress.attendance,
            subject_distribution: progress.subject_distribution,
            subject_progress: progress.subject_progress,
            quiz_attempts: progress.quiz_attempts,
            recent_activities,
            available_lesson_titles,
        })
    }
}
