//! Study plan data model.
//!
//! The internal representation of a generated study plan. Instances are
//! only ever constructed by the schema validator (from a model response)
//! or deserialized from the recommendation store; both paths guarantee
//! the shape invariants documented on each type.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A complete, validated study plan for one student.
///
/// Immutable once created. The optional `study_timetable`, when present,
/// always holds exactly seven days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StudyPlan {
    /// The coach's structured analysis of the student's performance.
    pub analysis: PlanAnalysis,
    /// Specific lessons suggested for the student, each with a reason.
    pub suggested_lessons: Vec<SuggestionItem>,
    /// Specific quizzes for practice, each with a reason.
    pub suggested_quizzes: Vec<SuggestionItem>,
    /// Suggested video titles or topics; may be empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggested_videos: Vec<SuggestionItem>,
    /// Six data points plotting past vs. projected performance by month.
    pub performance_projection: Vec<ProjectionPoint>,
    /// Optional 7-day study timetable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub study_timetable: Option<Vec<StudyDay>>,
}

/// Structured analysis section of a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PlanAnalysis {
    /// Positive, data-backed observations (2-3 items).
    pub praise: Vec<String>,
    /// Specific, constructive areas for improvement (2-3 items).
    pub improvement_areas: Vec<String>,
    /// One-sentence summary of the recommended focus.
    pub strategic_summary: String,
}

/// A single suggested lesson, quiz, or video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SuggestionItem {
    /// Title of the suggested item.
    pub title: String,
    /// Why this item is recommended and how it helps.
    pub reason: String,
}

/// One month in the 6-point performance projection.
///
/// The first three points carry real history (`projected_performance` is
/// null); the last three carry the forecast (`past_performance` is null).
/// Both metrics are a unified score out of 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProjectionPoint {
    /// Month label for the data point (e.g. "Jan").
    pub month: String,
    /// Actual average performance for that month, when historical.
    pub past_performance: Option<f64>,
    /// Projected performance if suggestions are followed, when forecast.
    pub projected_performance: Option<f64>,
}

/// One day of the weekly study timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StudyDay {
    /// Day of the week.
    pub day: Weekday,
    /// Time slots scheduled for the day.
    pub slots: Vec<StudySlot>,
}

/// One scheduled slot in a study day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StudySlot {
    /// Slot label, drawn from the fixed slot set (e.g. "6:00 AM").
    pub time: String,
    /// Subject to study or activity name.
    pub subject: String,
    /// What kind of block this is.
    pub activity: SlotActivity,
    /// Optional details like topic or chapter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Activity kind for a timetable slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum SlotActivity {
    /// Focused study of new material.
    #[serde(rename = "Study Time")]
    StudyTime,
    /// Reinforcement of material the student is already strong in.
    #[serde(rename = "Revision")]
    Revision,
    /// Rest block to prevent burnout.
    #[serde(rename = "Free Time")]
    FreeTime,
}

impl SlotActivity {
    /// Returns the wire label for this activity.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::StudyTime => "Study Time",
            Self::Revision => "Revision",
            Self::FreeTime => "Free Time",
        }
    }

    /// Parse a wire label into an activity, if valid.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Study Time" => Some(Self::StudyTime),
            "Revision" => Some(Self::Revision),
            "Free Time" => Some(Self::FreeTime),
            _ => None,
        }
    }
}

impl std::fmt::Display for SlotActivity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Day of the week, in timetable label form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Weekday {
    /// Monday.
    #[serde(rename = "MON")]
    Mon,
    /// Tuesday.
    #[serde(rename = "TUE")]
    Tue,
    /// Wednesday.
    #[serde(rename = "WED")]
    Wed,
    /// Thursday.
    #[serde(rename = "THU")]
    Thu,
    /// Friday.
    #[serde(rename = "FRI")]
    Fri,
    /// Saturday.
    #[serde(rename = "SAT")]
    Sat,
    /// Sunday.
    #[serde(rename = "SUN")]
    Sun,
}

impl Weekday {
    /// All seven days, Monday first.
    pub const ALL: [Self; 7] = [
        Self::Mon,
        Self::Tue,
        Self::Wed,
        Self::Thu,
        Self::Fri,
        Self::Sat,
        Self::Sun,
    ];

    /// Returns the wire label for this day.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mon => "MON",
            Self::Tue => "TUE",
            Self::Wed => "WED",
            Self::Thu => "THU",
            Self::Fri => "FRI",
            Self::Sat => "SAT",
            Self::Sun => "SUN",
        }
    }

    /// Parse a wire label into a day, if valid.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|d| d.as_str() == label)
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_slot_activity_labels() {
        assert_eq!(SlotActivity::StudyTime.as_str(), "Study Time");
        assert_eq!(SlotActivity::Revision.as_str(), "Revision");
        assert_eq!(SlotActivity::FreeTime.as_str(), "Free Time");
    }

    #[test]
    fn test_slot_activity_from_label_roundtrip() {
        for activity in [
            SlotActivity::StudyTime,
            SlotActivity::Revision,
            SlotActivity::FreeTime,
        ] {
            assert_eq!(SlotActivity::from_label(activity.as_str()), Some(activity));
        }
        assert_eq!(SlotActivity::from_label("Homework"), None);
    }

    #[test]
    fn test_slot_activity_serde_uses_labels() {
        let json = serde_json::to_string(&SlotActivity::FreeTime).unwrap();
        assert_eq!(json, "\"Free Time\"");
        let parsed: SlotActivity = serde_json::from_str("\"Study Time\"").unwrap();
        assert_eq!(parsed, SlotActivity::StudyTime);
    }

    #[test]
    fn test_weekday_all_distinct_labels() {
        let labels: std::collections::HashSet<&str> =
            Weekday::ALL.iter().map(Weekday::as_str).collect();
        assert_eq!(labels.len(), 7);
    }

    #[test]
    fn test_weekday_from_label() {
        assert_eq!(Weekday::from_label("MON"), Some(Weekday::Mon));
        assert_eq!(Weekday::from_label("SUN"), Some(Weekday::Sun));
        assert_eq!(Weekday::from_label("Monday"), None);
    }

    #[test]
    fn test_study_plan_serde_roundtrip() {
        let plan = StudyPlan {
            analysis: PlanAnalysis {
                praise: vec!["Consistent daily logins".to_string()],
                improvement_areas: vec!["Low progress in History".to_string()],
                strategic_summary: "Focus on History fundamentals".to_string(),
            },
            suggested_lessons: vec![SuggestionItem {
                title: "The Solar System".to_string(),
                reason: "Builds on your Science momentum".to_string(),
            }],
            suggested_quizzes: vec![SuggestionItem {
                title: "Algebra Basics".to_string(),
                reason: "Three attempts suggest the core concepts need practice".to_string(),
            }],
            suggested_videos: vec![],
            performance_projection: vec![ProjectionPoint {
                month: "Jan".to_string(),
                past_performance: Some(62.0),
                projected_performance: None,
            }],
            study_timetable: None,
        };

        let json = serde_json::to_value(&plan).unwrap();
        // Empty/absent optionals stay off the wire
        assert!(json.get("suggested_videos").is_none());
        assert!(json.get("study_timetable").is_none());

        let back: StudyPlan = serde_json::from_value(json).unwrap();
        assert_eq!(back, plan);
    }

    #[test]
    fn test_study_day_serde_uses_day_labels() {
        let day = StudyDay {
            day: Weekday::Wed,
            slots: vec![StudySlot {
                time: "6:00 PM".to_string(),
                subject: "History".to_string(),
                activity: SlotActivity::Revision,
                details: None,
            }],
        };
        let json = serde_json::to_value(&day).unwrap();
        assert_eq!(json["day"], json!("WED"));
        assert_eq!(json["slots"][0]["activity"], json!("Revision"));
        assert!(json["slots"][0].get("details").is_none());
    }

    #[test]
    fn test_study_plan_json_schema_names_required_fields() {
        let schema = schemars::schema_for!(StudyPlan);
        let text = serde_json::to_string(&schema).unwrap();
        assert!(text.contains("performance_projection"));
        assert!(text.contains("suggested_lessons"));
        assert!(text.contains("strategic_summary"));
    }
}
