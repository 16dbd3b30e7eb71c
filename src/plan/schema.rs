//! Strict validation of model responses against the study-plan contract.
//!
//! The generative model's output is untyped at the wire level. This module
//! is the single gate between raw JSON and the internal [`StudyPlan`]
//! type: parse, validate every field against the contract, then convert.
//! Nothing is coerced and no unknown shape passes through; every rejection
//! is a [`SchemaViolation`] carrying the offending field path.
//!
//! Absent or wrongly-typed fields yield `MissingField`; present fields
//! with out-of-contract values yield `InvalidValue`; fixed-length
//! sequences yield `WrongCardinality`.

use serde_json::Value;

use super::types::{
    PlanAnalysis, ProjectionPoint, SlotActivity, StudyDay, StudyPlan, StudySlot, SuggestionItem,
    Weekday,
};
use crate::error::SchemaViolation;

/// The fixed daily slot labels a timetable may use.
pub const TIME_SLOT_LABELS: [&str; 9] = [
    "6:00 AM", "7:00 AM", "10:00 AM", "11:00 AM", "12:00 PM", "3:00 PM", "6:00 PM", "7:00 PM",
    "8:00 PM",
];

/// Required number of performance projection points.
pub const PROJECTION_POINTS: usize = 6;

/// Projection points that carry real history (the remainder are forecast).
pub const PROJECTION_HISTORY_POINTS: usize = 3;

/// Required number of timetable days when a timetable is present.
pub const TIMETABLE_DAYS: usize = 7;

/// Minimum items in each analysis list (praise, improvement areas).
pub const ANALYSIS_ITEMS_MIN: usize = 2;

/// Maximum items in each analysis list.
pub const ANALYSIS_ITEMS_MAX: usize = 3;

/// Schema configuration for plan validation.
///
/// The slot-label set is injected rather than hard-coded at the use sites
/// so tests and alternate deployments can validate against a different
/// timetable grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaConfig {
    /// Permitted timetable slot labels.
    pub time_slots: Vec<String>,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            time_slots: TIME_SLOT_LABELS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl SchemaConfig {
    /// Create a schema config with the standard slot set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a raw model response and convert it into a [`StudyPlan`].
    ///
    /// # Errors
    ///
    /// Returns [`SchemaViolation`] naming the first offending field if the
    /// response does not conform to the contract.
    pub fn validate(&self, value: &Value) -> Result<StudyPlan, SchemaViolation> {
        let analysis = parse_analysis(value)?;
        let suggested_lessons = parse_suggestions(value, "suggested_lessons", true)?;
        let suggested_quizzes = parse_suggestions(value, "suggested_quizzes", true)?;
        let suggested_videos = match value.get("suggested_videos") {
            None | Some(Value::Null) => Vec::new(),
            Some(_) => parse_suggestions(value, "suggested_videos", false)?,
        };
        let performance_projection = parse_projection(value)?;
        let study_timetable = self.parse_timetable(value)?;

        Ok(StudyPlan {
            analysis,
            suggested_lessons,
            suggested_quizzes,
            suggested_videos,
            performance_projection,
            study_timetable,
        })
    }

    fn parse_timetable(&self, value: &Value) -> Result<Option<Vec<StudyDay>>, SchemaViolation> {
        let timetable = match value.get("study_timetable") {
            None | Some(Value::Null) => return Ok(None),
            Some(t) => t,
        };

        let days = as_array(timetable, "study_timetable")?;
        if days.len() != TIMETABLE_DAYS {
            return Err(SchemaViolation::WrongCardinality {
                path: "study_timetable".to_string(),
                expected: TIMETABLE_DAYS,
                actual: days.len(),
            });
        }

        let mut seen = std::collections::HashSet::new();
        let mut parsed = Vec::with_capacity(TIMETABLE_DAYS);
        for (i, entry) in days.iter().enumerate() {
            let day_path = format!("study_timetable[{i}].day");
            let label = get_str(entry, "day", &day_path)?;
            let day = Weekday::from_label(&label).ok_or_else(|| SchemaViolation::InvalidValue {
                path: day_path.clone(),
                reason: format!("'{label}' is not a day label (MON..SUN)"),
            })?;
            if !seen.insert(day) {
                return Err(SchemaViolation::InvalidValue {
                    path: day_path,
                    reason: format!("duplicate day '{label}'"),
                });
            }

            let slots_path = format!("study_timetable[{i}].slots");
            let slots_value = entry
                .get("slots")
                .ok_or_else(|| SchemaViolation::MissingField {
                    path: slots_path.clone(),
                })?;
            let slots = as_array(slots_value, &slots_path)?;

            let mut day_slots = Vec::with_capacity(slots.len());
            for (j, slot) in slots.iter().enumerate() {
                day_slots.push(self.parse_slot(slot, &format!("{slots_path}[{j}]"))?);
            }

            parsed.push(StudyDay {
                day,
                slots: day_slots,
            });
        }

        Ok(Some(parsed))
    }

    fn parse_slot(&self, slot: &Value, path: &str) -> Result<StudySlot, SchemaViolation> {
        let time = get_str(slot, "time", &format!("{path}.time"))?;
        if !self.time_slots.iter().any(|s| s == &time) {
            return Err(SchemaViolation::InvalidValue {
                path: format!("{path}.time"),
                reason: format!("'{time}' is not one of the fixed slot labels"),
            });
        }

        let subject = get_str(slot, "subject", &format!("{path}.subject"))?;
        if subject.is_empty() {
            return Err(SchemaViolation::InvalidValue {
                path: format!("{path}.subject"),
                reason: "must not be empty".to_string(),
            });
        }

        let activity_path = format!("{path}.activity");
        let activity_label = get_str(slot, "activity", &activity_path)?;
        let activity = SlotActivity::from_label(&activity_label).ok_or_else(|| {
            SchemaViolation::InvalidValue {
                path: activity_path,
                reason: format!(
                    "'{activity_label}' is not one of Study Time, Revision, Free Time"
                ),
            }
        })?;

        let details = match slot.get("details") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                return Err(SchemaViolation::MissingField {
                    path: format!("{path}.details"),
                })
            }
        };

        Ok(StudySlot {
            time,
            subject,
            activity,
            details,
        })
    }
}

fn parse_analysis(value: &Value) -> Result<PlanAnalysis, SchemaViolation> {
    let analysis = value
        .get("analysis")
        .ok_or_else(|| SchemaViolation::MissingField {
            path: "analysis".to_string(),
        })?;

    let praise = parse_analysis_list(analysis, "analysis.praise", "praise")?;
    let improvement_areas =
        parse_analysis_list(analysis, "analysis.improvement_areas", "improvement_areas")?;
    let strategic_summary = get_str(analysis, "strategic_summary", "analysis.strategic_summary")?;
    if strategic_summary.is_empty() {
        return Err(SchemaViolation::InvalidValue {
            path: "analysis.strategic_summary".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    Ok(PlanAnalysis {
        praise,
        improvement_areas,
        strategic_summary,
    })
}

fn parse_analysis_list(
    analysis: &Value,
    path: &str,
    field: &str,
) -> Result<Vec<String>, SchemaViolation> {
    let items = get_string_array(analysis, field, path)?;
    if items.len() < ANALYSIS_ITEMS_MIN || items.len() > ANALYSIS_ITEMS_MAX {
        return Err(SchemaViolation::InvalidValue {
            path: path.to_string(),
            reason: format!(
                "expected {ANALYSIS_ITEMS_MIN} to {ANALYSIS_ITEMS_MAX} items, got {}",
                items.len()
            ),
        });
    }
    Ok(items)
}

fn parse_suggestions(
    value: &Value,
    field: &str,
    required_non_empty: bool,
) -> Result<Vec<SuggestionItem>, SchemaViolation> {
    let entries = value
        .get(field)
        .ok_or_else(|| SchemaViolation::MissingField {
            path: field.to_string(),
        })?;
    let entries = as_array(entries, field)?;

    if required_non_empty && entries.is_empty() {
        return Err(SchemaViolation::InvalidValue {
            path: field.to_string(),
            reason: "must contain at least one item".to_string(),
        });
    }

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            Ok(SuggestionItem {
                title: get_str(entry, "title", &format!("{field}[{i}].title"))?,
                reason: get_str(entry, "reason", &format!("{field}[{i}].reason"))?,
            })
        })
        .collect()
}

fn parse_projection(value: &Value) -> Result<Vec<ProjectionPoint>, SchemaViolation> {
    let points = value
        .get("performance_projection")
        .ok_or_else(|| SchemaViolation::MissingField {
            path: "performance_projection".to_string(),
        })?;
    let points = as_array(points, "performance_projection")?;

    if points.len() != PROJECTION_POINTS {
        return Err(SchemaViolation::WrongCardinality {
            path: "performance_projection".to_string(),
            expected: PROJECTION_POINTS,
            actual: points.len(),
        });
    }

    points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let path = format!("performance_projection[{i}]");
            let month = get_str(point, "month", &format!("{path}.month"))?;
            let past = get_score(point, "past_performance", &path)?;
            let projected = get_score(point, "projected_performance", &path)?;

            // First half is history, second half is forecast; the opposite
            // metric must be null on each side.
            if i < PROJECTION_HISTORY_POINTS && projected.is_some() {
                return Err(SchemaViolation::InvalidValue {
                    path: format!("{path}.projected_performance"),
                    reason: "must be null for a historical month".to_string(),
                });
            }
            if i >= PROJECTION_HISTORY_POINTS && past.is_some() {
                return Err(SchemaViolation::InvalidValue {
                    path: format!("{path}.past_performance"),
                    reason: "must be null for a forecast month".to_string(),
                });
            }

            Ok(ProjectionPoint {
                month,
                past_performance: past,
                projected_performance: projected,
            })
        })
        .collect()
}

/// Read an optional score-out-of-100 field: null or absent is `None`,
/// a number must be in [0, 100].
fn get_score(point: &Value, field: &str, parent: &str) -> Result<Option<f64>, SchemaViolation> {
    let path = format!("{parent}.{field}");
    match point.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => {
            let score = v.as_f64().ok_or_else(|| SchemaViolation::MissingField {
                path: path.clone(),
            })?;
            if !(0.0..=100.0).contains(&score) {
                return Err(SchemaViolation::InvalidValue {
                    path,
                    reason: format!("{score} is outside [0, 100]"),
                });
            }
            Ok(Some(score))
        }
    }
}

fn as_array<'a>(value: &'a Value, path: &str) -> Result<&'a Vec<Value>, SchemaViolation> {
    value.as_array().ok_or_else(|| SchemaViolation::MissingField {
        path: path.to_string(),
    })
}

fn get_str(value: &Value, field: &str, path: &str) -> Result<String, SchemaViolation> {
    value
        .get(field)
        .and_then(Value::as_str)
        .map(String::from)
        .ok_or_else(|| SchemaViolation::MissingField {
            path: path.to_string(),
        })
}

fn get_string_array(value: &Value, field: &str, path: &str) -> Result<Vec<String>, SchemaViolation> {
    let items = value
        .get(field)
        .and_then(Value::as_array)
        .ok_or_else(|| SchemaViolation::MissingField {
            path: path.to_string(),
        })?;

    items
        .iter()
        .enumerate()
        .map(|(i, v)| {
            v.as_str()
                .map(String::from)
                .ok_or_else(|| SchemaViolation::MissingField {
                    path: format!("{path}[{i}]"),
                })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::test_utils::valid_plan_json;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use test_case::test_case;

    fn validate(value: &Value) -> Result<StudyPlan, SchemaViolation> {
        SchemaConfig::new().validate(value)
    }

    #[test]
    fn test_valid_plan_accepted() {
        let plan = validate(&valid_plan_json()).expect("valid plan");
        assert_eq!(plan.analysis.praise.len(), 2);
        assert_eq!(plan.performance_projection.len(), PROJECTION_POINTS);
        let timetable = plan.study_timetable.expect("timetable");
        assert_eq!(timetable.len(), TIMETABLE_DAYS);
        assert_eq!(timetable[0].day, Weekday::Mon);
    }

    #[test]
    fn test_plan_without_timetable_accepted() {
        let mut value = valid_plan_json();
        value.as_object_mut().unwrap().remove("study_timetable");
        let plan = validate(&value).expect("valid plan");
        assert!(plan.study_timetable.is_none());
    }

    #[test]
    fn test_plan_with_null_timetable_accepted() {
        let mut value = valid_plan_json();
        value["study_timetable"] = Value::Null;
        let plan = validate(&value).expect("valid plan");
        assert!(plan.study_timetable.is_none());
    }

    #[test]
    fn test_missing_analysis() {
        let mut value = valid_plan_json();
        value.as_object_mut().unwrap().remove("analysis");
        let err = validate(&value).unwrap_err();
        assert_eq!(err.path(), "analysis");
    }

    #[test]
    fn test_missing_strategic_summary() {
        let mut value = valid_plan_json();
        value["analysis"]
            .as_object_mut()
            .unwrap()
            .remove("strategic_summary");
        let err = validate(&value).unwrap_err();
        assert!(matches!(err, SchemaViolation::MissingField { .. }));
        assert_eq!(err.path(), "analysis.strategic_summary");
    }

    #[test]
    fn test_empty_strategic_summary() {
        let mut value = valid_plan_json();
        value["analysis"]["strategic_summary"] = json!("");
        let err = validate(&value).unwrap_err();
        assert!(matches!(err, SchemaViolation::InvalidValue { .. }));
    }

    #[test_case(1; "one praise item")]
    #[test_case(4; "four praise items")]
    fn test_praise_cardinality_rejected(count: usize) {
        let mut value = valid_plan_json();
        value["analysis"]["praise"] = json!(vec!["Good effort"; count]);
        let err = validate(&value).unwrap_err();
        assert_eq!(err.path(), "analysis.praise");
    }

    #[test]
    fn test_non_string_praise_item() {
        let mut value = valid_plan_json();
        value["analysis"]["praise"] = json!(["Good effort", 42]);
        let err = validate(&value).unwrap_err();
        assert_eq!(err.path(), "analysis.praise[1]");
    }

    #[test]
    fn test_empty_suggested_lessons_rejected() {
        let mut value = valid_plan_json();
        value["suggested_lessons"] = json!([]);
        let err = validate(&value).unwrap_err();
        assert!(matches!(err, SchemaViolation::InvalidValue { .. }));
        assert_eq!(err.path(), "suggested_lessons");
    }

    #[test]
    fn test_empty_suggested_videos_allowed() {
        let mut value = valid_plan_json();
        value["suggested_videos"] = json!([]);
        let plan = validate(&value).expect("valid plan");
        assert!(plan.suggested_videos.is_empty());
    }

    #[test]
    fn test_absent_suggested_videos_allowed() {
        let mut value = valid_plan_json();
        value.as_object_mut().unwrap().remove("suggested_videos");
        assert!(validate(&value).is_ok());
    }

    #[test]
    fn test_suggestion_missing_reason() {
        let mut value = valid_plan_json();
        value["suggested_quizzes"][0]
            .as_object_mut()
            .unwrap()
            .remove("reason");
        let err = validate(&value).unwrap_err();
        assert_eq!(err.path(), "suggested_quizzes[0].reason");
    }

    #[test_case(5; "five points")]
    #[test_case(7; "seven points")]
    fn test_projection_cardinality_rejected(count: usize) {
        let mut value = valid_plan_json();
        let point = value["performance_projection"][0].clone();
        value["performance_projection"] = json!(vec![point; count]);
        let err = validate(&value).unwrap_err();
        assert!(
            matches!(err, SchemaViolation::WrongCardinality { expected, actual, .. }
                if expected == PROJECTION_POINTS && actual == count)
        );
    }

    #[test]
    fn test_projection_historical_month_with_forecast_value() {
        let mut value = valid_plan_json();
        value["performance_projection"][1]["projected_performance"] = json!(80.0);
        let err = validate(&value).unwrap_err();
        assert_eq!(err.path(), "performance_projection[1].projected_performance");
    }

    #[test]
    fn test_projection_forecast_month_with_history_value() {
        let mut value = valid_plan_json();
        value["performance_projection"][4]["past_performance"] = json!(70.0);
        let err = validate(&value).unwrap_err();
        assert_eq!(err.path(), "performance_projection[4].past_performance");
    }

    #[test_case(-1.0; "below range")]
    #[test_case(100.5; "above range")]
    fn test_projection_score_out_of_range(score: f64) {
        let mut value = valid_plan_json();
        value["performance_projection"][0]["past_performance"] = json!(score);
        let err = validate(&value).unwrap_err();
        assert!(matches!(err, SchemaViolation::InvalidValue { .. }));
    }

    #[test]
    fn test_timetable_six_days_rejected() {
        let mut value = valid_plan_json();
        value["study_timetable"].as_array_mut().unwrap().pop();
        let err = validate(&value).unwrap_err();
        assert!(
            matches!(err, SchemaViolation::WrongCardinality { expected, actual, .. }
                if expected == TIMETABLE_DAYS && actual == 6)
        );
    }

    #[test]
    fn test_timetable_duplicate_day_rejected() {
        let mut value = valid_plan_json();
        value["study_timetable"][6]["day"] = json!("MON");
        let err = validate(&value).unwrap_err();
        assert!(matches!(err, SchemaViolation::InvalidValue { .. }));
        assert_eq!(err.path(), "study_timetable[6].day");
    }

    #[test]
    fn test_timetable_unknown_day_rejected() {
        let mut value = valid_plan_json();
        value["study_timetable"][0]["day"] = json!("Monday");
        let err = validate(&value).unwrap_err();
        assert_eq!(err.path(), "study_timetable[0].day");
    }

    #[test]
    fn test_slot_time_outside_fixed_set_rejected() {
        let mut value = valid_plan_json();
        value["study_timetable"][0]["slots"][0]["time"] = json!("8:00 AM");
        let err = validate(&value).unwrap_err();
        assert!(matches!(err, SchemaViolation::InvalidValue { .. }));
        assert_eq!(err.path(), "study_timetable[0].slots[0].time");
    }

    #[test]
    fn test_slot_unknown_activity_rejected() {
        let mut value = valid_plan_json();
        value["study_timetable"][0]["slots"][0]["activity"] = json!("Homework");
        let err = validate(&value).unwrap_err();
        assert_eq!(err.path(), "study_timetable[0].slots[0].activity");
    }

    #[test]
    fn test_slot_empty_subject_rejected() {
        let mut value = valid_plan_json();
        value["study_timetable"][0]["slots"][0]["subject"] = json!("");
        let err = validate(&value).unwrap_err();
        assert!(matches!(err, SchemaViolation::InvalidValue { .. }));
    }

    #[test]
    fn test_custom_slot_set_accepted() {
        let config = SchemaConfig {
            time_slots: vec!["9:00 AM".to_string()],
        };
        let mut value = valid_plan_json();
        for day in value["study_timetable"].as_array_mut().unwrap() {
            for slot in day["slots"].as_array_mut().unwrap() {
                slot["time"] = json!("9:00 AM");
            }
        }
        assert!(config.validate(&value).is_ok());
    }

    #[test]
    fn test_every_standard_slot_label_accepted() {
        let config = SchemaConfig::new();
        for label in TIME_SLOT_LABELS {
            let mut value = valid_plan_json();
            value["study_timetable"][0]["slots"][0]["time"] = json!(label);
            assert!(config.validate(&value).is_ok(), "label {label} rejected");
        }
    }
}
