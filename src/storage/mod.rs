//! Recommendation store.
//!
//! This module provides the durable, append-only log of generated plans:
//! - `core`: pool management, migrations, and helper functions
//! - `records`: append / most-recent operations and the
//!   [`RecommendationStore`] trait implementation
//! - `types`: the [`RecommendationRecord`] entity
//!
//! # Architecture
//!
//! The store uses `SQLite` with the `sqlx` crate for async operations.
//! Records are inserted with a store-assigned autoincrement id and an
//! RFC3339 `created_at`, and are never updated or deleted.
//!
//! [`RecommendationStore`]: crate::traits::RecommendationStore

mod core;
mod records;
mod types;

pub use self::core::SqliteStorage;
pub use types::RecommendationRecord;
