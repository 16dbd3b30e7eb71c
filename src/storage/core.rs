//! Core `SQLite` storage implementation.
//!
//! This module provides the main [`SqliteStorage`] struct, pool setup,
//! and migrations.

#![allow(clippy::missing_errors_doc)]

use crate::error::StorageError;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

/// `SQLite` storage backend for the recommendation log.
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    pub(crate) pool: SqlitePool,
}

impl SqliteStorage {
    /// Create a new `SQLite` storage instance.
    ///
    /// # Arguments
    ///
    /// * `database_path` - Path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ConnectionFailed`] if the connection fails.
    pub async fn new(database_path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = database_path.as_ref();

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::ConnectionFailed {
                message: format!("Failed to create database directory: {e}"),
            })?;
        }

        let options =
            SqliteConnectOptions::from_str(&format!("sqlite://{}?mode=rwc", path.display()))
                .map_err(|e| StorageError::ConnectionFailed {
                    message: format!("Invalid database path: {e}"),
                })?
                .journal_mode(SqliteJournalMode::Wal)
                .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| StorageError::ConnectionFailed {
                message: format!("Failed to connect to database: {e}"),
            })?;

        let storage = Self { pool };
        storage.run_migrations().await?;

        Ok(storage)
    }

    /// Create a new in-memory `SQLite` storage instance for testing.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ConnectionFailed`] if the connection fails.
    pub async fn new_in_memory() -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| StorageError::ConnectionFailed {
                message: format!("Invalid memory database options: {e}"),
            })?
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| StorageError::ConnectionFailed {
                message: format!("Failed to create in-memory database: {e}"),
            })?;

        let storage = Self { pool };
        storage.run_migrations().await?;

        Ok(storage)
    }

    /// Run database migrations.
    ///
    /// Migrations are idempotent (IF NOT EXISTS) and safe to re-run.
    pub(crate) async fn run_migrations(&self) -> Result<(), StorageError> {
        let schema_001 = include_str!("../../migrations/001_initial_schema.sql");
        sqlx::query(schema_001)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::MigrationFailed {
                version: "001".to_string(),
                message: format!("Failed to run migration 001: {e}"),
            })?;

        Ok(())
    }

    /// Parse a datetime string from the database.
    pub(crate) fn parse_datetime(s: &str) -> Result<DateTime<Utc>, StorageError> {
        s.parse::<DateTime<Utc>>()
            .map_err(|e| StorageError::Internal {
                message: format!("Failed to parse datetime '{s}': {e}"),
            })
    }

    /// Create a query error with the given query name and message.
    pub(crate) fn query_error(query: &str, message: String) -> StorageError {
        StorageError::QueryFailed {
            query: query.to_string(),
            message,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
pub mod tests {
    use super::*;
    use serial_test::serial;

    pub async fn test_storage() -> SqliteStorage {
        SqliteStorage::new_in_memory()
            .await
            .expect("Failed to create test storage")
    }

    #[tokio::test]
    #[serial]
    async fn test_new_in_memory() {
        let storage = SqliteStorage::new_in_memory().await;
        assert!(storage.is_ok());
    }

    #[tokio::test]
    #[serial]
    async fn test_new_with_file() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let db_path = temp_dir.path().join("recommendations.db");

        let storage = SqliteStorage::new(&db_path).await;
        assert!(storage.is_ok());
    }

    #[tokio::test]
    #[serial]
    async fn test_new_with_nested_path() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let db_path = temp_dir.path().join("deeply").join("nested").join("recs.db");

        // Should create parent directories
        let storage = SqliteStorage::new(&db_path).await;
        assert!(storage.is_ok());
    }

    #[tokio::test]
    #[serial]
    async fn test_migrations_idempotent() {
        let storage = test_storage().await;
        // Running migrations again must not fail
        assert!(storage.run_migrations().await.is_ok());
    }

    #[test]
    fn test_parse_datetime_valid() {
        let dt = SqliteStorage::parse_datetime("2026-01-15T10:30:00Z").expect("datetime");
        assert_eq!(dt.to_rfc3339(), "2026-01-15T10:30:00+00:00");
    }

    #[test]
    fn test_parse_datetime_invalid() {
        let result = SqliteStorage::parse_datetime("not-a-datetime");
        match result {
            Err(StorageError::Internal { message }) => {
                assert!(message.contains("not-a-datetime"));
            }
            other => panic!("Expected Internal error, got {other:?}"),
        }
    }

    #[test]
    fn test_query_error() {
        let err = SqliteStorage::query_error("SELECT recommendations", "locked".to_string());
        match err {
            StorageError::QueryFailed { query, message } => {
                assert_eq!(query, "SELECT recommendations");
                assert_eq!(message, "locked");
            }
            other => panic!("Expected QueryFailed error, got {other:?}"),
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_storage_clone_shares_pool() {
        let storage = test_storage().await;
        let cloned = storage.clone();
        let result = sqlx::query("SELECT 1").fetch_one(&cloned.pool).await;
        assert!(result.is_ok());
    }
}
