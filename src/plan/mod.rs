//! Study plan model and output-contract validation.
//!
//! This module provides:
//! - The internal [`StudyPlan`] type and its constituents
//! - The [`SchemaConfig`] validator that gates raw model output
//!
//! A [`StudyPlan`] only comes into existence through the validator (or by
//! deserializing a previously validated record), so downstream code can
//! rely on its cardinality invariants without re-checking them.

mod schema;
mod types;

pub use schema::{
    SchemaConfig, ANALYSIS_ITEMS_MAX, ANALYSIS_ITEMS_MIN, PROJECTION_HISTORY_POINTS,
    PROJECTION_POINTS, TIMETABLE_DAYS, TIME_SLOT_LABELS,
};
pub use types::{
    PlanAnalysis, ProjectionPoint, SlotActivity, StudyDay, StudyPlan, StudySlot, SuggestionItem,
    Weekday,
};
