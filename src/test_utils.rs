//! Shared fixtures for unit tests.

#![allow(clippy::unwrap_used, clippy::expect_used, missing_docs)]

use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::{json, Value};

use crate::analytics::{
    ActivityType, AnalyticsSnapshot, Attendance, DailyStudy, QuizAttempt, RecentActivity,
    SubjectDistribution, SubjectProgress,
};

/// A model response that satisfies every contract rule, timetable included.
pub fn valid_plan_json() -> Value {
    let days = ["MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"];
    let timetable: Vec<Value> = days
        .iter()
        .map(|day| {
            json!({
                "day": day,
                "slots": [
                    {
                        "time": "6:00 AM",
                        "subject": "Algebra Basics",
                        "activity": "Study Time",
                        "details": "Focus on factoring"
                    },
                    {
                        "time": "3:00 PM",
                        "subject": "The Solar System",
                        "activity": "Revision"
                    },
                    {
                        "time": "8:00 PM",
                        "subject": "Break",
                        "activity": "Free Time"
                    }
                ]
            })
        })
        .collect();

    json!({
        "analysis": {
            "praise": [
                "Consistent daily logins all week",
                "380 study minutes in Science"
            ],
            "improvement_areas": [
                "Three attempts on 'Algebra Basics' suggest difficulty with core concepts",
                "History progress is at 2 of 10 lessons"
            ],
            "strategic_summary": "Shift study time toward History while keeping Science momentum."
        },
        "suggested_lessons": [
            {"title": "Algebra Basics", "reason": "Repeated quiz attempts show the fundamentals need another pass."}
        ],
        "suggested_quizzes": [
            {"title": "Photosynthesis", "reason": "An unfinished attempt is still open; completing it locks in the material."}
        ],
        "suggested_videos": [
            {"title": "The Solar System", "reason": "Strong Science scores make this a quick win."}
        ],
        "performance_projection": [
            {"month": "Dec", "past_performance": 58.0, "projected_performance": null},
            {"month": "Jan", "past_performance": 61.0, "projected_performance": null},
            {"month": "Feb", "past_performance": 64.0, "projected_performance": null},
            {"month": "Mar", "past_performance": null, "projected_performance": 68.0},
            {"month": "Apr", "past_performance": null, "projected_performance": 73.0},
            {"month": "May", "past_performance": null, "projected_performance": 78.0}
        ],
        "study_timetable": timetable
    })
}

/// A small but fully populated analytics snapshot.
pub fn sample_snapshot() -> AnalyticsSnapshot {
    AnalyticsSnapshot {
        today_study_minutes: 35,
        weekly_study_minutes: vec![
            DailyStudy {
                date: NaiveDate::from_ymd_opt(2026, 2, 9).unwrap(),
                duration_minutes: 40,
            },
            DailyStudy {
                date: NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
                duration_minutes: 25,
            },
        ],
        attendance: Attendance {
            total_days: 120,
            present_days: 112,
        },
        subject_distribution: vec![SubjectDistribution {
            subject_name: "Science".to_string(),
            total_duration_minutes: 380,
        }],
        subject_progress: vec![
            SubjectProgress {
                subject_name: "Science".to_string(),
                completed_lessons: 9,
                total_lessons: 12,
            },
            SubjectProgress {
                subject_name: "History".to_string(),
                completed_lessons: 2,
                total_lessons: 10,
            },
        ],
        quiz_attempts: vec![QuizAttempt {
            lesson_title: "Algebra Basics".to_string(),
            attempts: 3,
            final_score_percent: Some(55.0),
        }],
        recent_activities: vec![RecentActivity {
            activity_type: ActivityType::Quiz,
            details: "Attempted quiz for Photosynthesis: Scored 85% - Passed".to_string(),
            timestamp: Utc.with_ymd_and_hms(2026, 2, 10, 15, 4, 5).unwrap(),
        }],
        available_lesson_titles: vec![
            "Algebra Basics".to_string(),
            "The Solar System".to_string(),
            "Photosynthesis".to_string(),
        ],
    }
}
