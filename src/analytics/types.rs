//! Student analytics data model.
//!
//! The read-only performance snapshot consumed by plan generation. A
//! snapshot is built fresh for each generation attempt and is never
//! persisted by this crate.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A student's multi-dimensional performance snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    /// Minutes studied today.
    pub today_study_minutes: u32,
    /// Per-day study minutes for the trailing week, oldest first.
    pub weekly_study_minutes: Vec<DailyStudy>,
    /// Attendance counters.
    pub attendance: Attendance,
    /// Total study minutes per subject.
    pub subject_distribution: Vec<SubjectDistribution>,
    /// Lesson completion per subject.
    pub subject_progress: Vec<SubjectProgress>,
    /// Quiz attempt history.
    pub quiz_attempts: Vec<QuizAttempt>,
    /// Most recent platform activities, newest first.
    pub recent_activities: Vec<RecentActivity>,
    /// Lesson titles the student can take next.
    pub available_lesson_titles: Vec<String>,
}

/// Study minutes for a single calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyStudy {
    /// The day of the study session.
    pub date: NaiveDate,
    /// Minutes studied on that day.
    pub duration_minutes: u32,
}

/// Attendance counters for the current term.
///
/// `present_days` never exceeds `total_days`; the platform guarantees the
/// invariant and this crate treats the snapshot as read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendance {
    /// School days so far.
    pub total_days: u32,
    /// Days the student was present.
    pub present_days: u32,
}

/// Total study time spent on one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectDistribution {
    /// Subject name.
    pub subject_name: String,
    /// Total minutes spent on the subject.
    pub total_duration_minutes: u32,
}

/// Lesson completion counters for one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectProgress {
    /// Subject name.
    pub subject_name: String,
    /// Lessons completed in the subject.
    pub completed_lessons: u32,
    /// Total lessons in the subject (at least `completed_lessons`).
    pub total_lessons: u32,
}

impl SubjectProgress {
    /// Completion rate in [0, 1]; zero when the subject has no lessons.
    #[must_use]
    pub fn completion_rate(&self) -> f64 {
        if self.total_lessons == 0 {
            0.0
        } else {
            f64::from(self.completed_lessons) / f64::from(self.total_lessons)
        }
    }
}

/// Quiz attempt history for one lesson.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizAttempt {
    /// Title of the lesson quiz.
    pub lesson_title: String,
    /// Number of attempts (at least 1).
    pub attempts: u32,
    /// Final score percentage in [0, 100], absent if never finished.
    pub final_score_percent: Option<f64>,
}

/// One entry in the student's recent activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentActivity {
    /// Kind of activity.
    pub activity_type: ActivityType,
    /// Human-readable description of the activity.
    pub details: String,
    /// When the activity occurred.
    pub timestamp: DateTime<Utc>,
}

/// Kind of platform activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityType {
    /// Viewed or completed a lesson.
    Lesson,
    /// Attempted a quiz.
    Quiz,
    /// Earned a reward.
    Reward,
    /// Logged in.
    Login,
    /// Logged out.
    Logout,
    /// Used the library.
    Library,
    /// Anything the platform reports that is not covered above.
    #[serde(other)]
    Other,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_completion_rate() {
        let progress = SubjectProgress {
            subject_name: "History".to_string(),
            completed_lessons: 3,
            total_lessons: 12,
        };
        assert_eq!(progress.completion_rate(), 0.25);
    }

    #[test]
    fn test_completion_rate_empty_subject() {
        let progress = SubjectProgress {
            subject_name: "Electives".to_string(),
            completed_lessons: 0,
            total_lessons: 0,
        };
        assert_eq!(progress.completion_rate(), 0.0);
    }

    #[test]
    fn test_activity_type_known_labels() {
        let parsed: ActivityType = serde_json::from_value(json!("Quiz")).unwrap();
        assert_eq!(parsed, ActivityType::Quiz);
        assert_eq!(
            serde_json::to_value(ActivityType::Library).unwrap(),
            json!("Library")
        );
    }

    #[test]
    fn test_activity_type_unknown_label_falls_back() {
        let parsed: ActivityType = serde_json::from_value(json!("ForumPost")).unwrap();
        assert_eq!(parsed, ActivityType::Other);
    }

    #[test]
    fn test_snapshot_serializes_quiz_score_null() {
        let attempt = QuizAttempt {
            lesson_title: "Photosynthesis".to_string(),
            attempts: 2,
            final_score_percent: None,
        };
        let json = serde_json::to_value(&attempt).unwrap();
        assert_eq!(json["final_score_percent"], serde_json::Value::Null);
    }

    #[test]
    fn test_daily_study_date_roundtrip() {
        let day = DailyStudy {
            date: NaiveDate::from_ymd_opt(2026, 2, 14).unwrap(),
            duration_minutes: 45,
        };
        let json = serde_json::to_value(&day).unwrap();
        assert_eq!(json["date"], json!("2026-02-14"));
        let back: DailyStudy = serde_json::from_value(json).unwrap();
        assert_eq!(back, day);
    }
}
