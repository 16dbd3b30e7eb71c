//! Student analytics snapshot and aggregator.
//!
//! This module provides:
//! - The [`AnalyticsSnapshot`] data model consumed by plan generation
//! - [`RestAnalyticsAggregator`], the platform-backed implementation of
//!   the [`AnalyticsProvider`] seam
//!
//! [`AnalyticsProvider`]: crate::traits::AnalyticsProvider

mod rest;
mod types;

pub use rest::RestAnalyticsAggregator;
pub use types::{
    ActivityType, AnalyticsSnapshot, Attendance, DailyStudy, QuizAttempt, RecentActivity,
    SubjectDistribution, SubjectProgress,
};
