//! Error types for the migration executor
//!
//! Every failure carries enough context (sanitized statement text, version,
//! direction) to diagnose it without re-running the migration.

use thiserror::Error;

use crate::config::ConfigError;
use crate::migrations::definitions::MigrationDirection;

/// Result type alias for executor operations
pub type MigrateResult<T> = Result<T, MigrateError>;

/// Result type alias for a single database call
pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Error reported by a [`StatementExecutor`](crate::backends::StatementExecutor)
/// or by transaction control.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    /// Error raised by a non-sqlx executor implementation
    #[error("{0}")]
    Driver(String),
}

impl DatabaseError {
    pub fn driver(message: impl Into<String>) -> Self {
        DatabaseError::Driver(message.into())
    }
}

/// Errors surfaced by [`MigrationExecutor`](crate::migrations::MigrationExecutor)
#[derive(Debug, Error)]
pub enum MigrateError {
    /// The transaction could not be started; no statement was attempted.
    #[error("failed to begin transaction for migration {version} {direction}: {source}")]
    TransactionBegin {
        version: i64,
        direction: MigrationDirection,
        #[source]
        source: DatabaseError,
    },

    /// No connection could be acquired for autocommit execution.
    #[error("failed to acquire connection for migration {version} {direction}: {source}")]
    Connection {
        version: i64,
        direction: MigrationDirection,
        #[source]
        source: DatabaseError,
    },

    #[error("failed to execute SQL query {statement:?} (statement #{index}, migration {version} {direction}): {source}")]
    Statement {
        /// Zero-based position of the statement in the list
        index: usize,
        /// Sanitized statement text, for display only
        statement: String,
        version: i64,
        direction: MigrationDirection,
        #[source]
        source: DatabaseError,
        /// Secondary failure while rolling back, if any
        rollback_error: Option<DatabaseError>,
    },

    #[error("failed to {} version {version}: {source}", .direction.bookkeeping_action())]
    Versioning {
        version: i64,
        direction: MigrationDirection,
        #[source]
        source: DatabaseError,
        rollback_error: Option<DatabaseError>,
    },

    /// Commit failed after every operation succeeded. Whether the migration
    /// applied is unknown to the caller; treat it as failed.
    #[error("failed to commit transaction for migration {version} {direction} (outcome unknown): {source}")]
    Commit {
        version: i64,
        direction: MigrationDirection,
        #[source]
        source: DatabaseError,
    },

    #[error("failed to prepare version table '{table}': {source}")]
    Setup {
        table: String,
        #[source]
        source: DatabaseError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl MigrateError {
    /// True when the database may or may not hold the migration's effects
    pub fn is_commit_ambiguous(&self) -> bool {
        matches!(self, MigrateError::Commit { .. })
    }

    /// Rollback failure recorded alongside the original error
    pub fn rollback_error(&self) -> Option<&DatabaseError> {
        match self {
            MigrateError::Statement { rollback_error, .. }
            | MigrateError::Versioning { rollback_error, .. } => rollback_error.as_ref(),
            _ => None,
        }
    }

    /// Migration version the error relates to, when known
    pub fn version(&self) -> Option<i64> {
        match self {
            MigrateError::TransactionBegin { version, .. }
            | MigrateError::Connection { version, .. }
            | MigrateError::Statement { version, .. }
            | MigrateError::Versioning { version, .. }
            | MigrateError::Commit { version, .. } => Some(*version),
            _ => None,
        }
    }

    /// Direction of the migration the error relates to, when known
    pub fn direction(&self) -> Option<MigrationDirection> {
        match self {
            MigrateError::TransactionBegin { direction, .. }
            | MigrateError::Connection { direction, .. }
            | MigrateError::Statement { direction, .. }
            | MigrateError::Versioning { direction, .. }
            | MigrateError::Commit { direction, .. } => Some(*direction),
            _ => None,
        }
    }

    /// Position of the failing statement, for statement errors
    pub fn statement_index(&self) -> Option<usize> {
        match self {
            MigrateError::Statement { index, .. } => Some(*index),
            _ => None,
        }
    }
}
