//! Migration Definitions - Core types describing one migration execution
//!
//! Defines the direction, execution and versioning modes passed to the
//! executor, the optional [`SqlMigration`] bundle, and the reports returned
//! on success.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Migration direction for execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MigrationDirection {
    /// Apply the migration (run UP statements)
    Up,
    /// Rollback the migration (run DOWN statements)
    Down,
}

impl MigrationDirection {
    /// Value stored in the version table's applied flag
    pub fn is_applied(&self) -> bool {
        matches!(self, MigrationDirection::Up)
    }

    pub(crate) fn bookkeeping_action(&self) -> &'static str {
        match self {
            MigrationDirection::Up => "insert",
            MigrationDirection::Down => "delete",
        }
    }
}

impl fmt::Display for MigrationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MigrationDirection::Up => write!(f, "up"),
            MigrationDirection::Down => write!(f, "down"),
        }
    }
}

/// A migration version paired with the direction it is being run in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationVersion {
    pub version: i64,
    pub direction: MigrationDirection,
}

impl MigrationVersion {
    pub fn up(version: i64) -> Self {
        Self {
            version,
            direction: MigrationDirection::Up,
        }
    }

    pub fn down(version: i64) -> Self {
        Self {
            version,
            direction: MigrationDirection::Down,
        }
    }
}

impl fmt::Display for MigrationVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.version, self.direction)
    }
}

/// How statements are committed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionMode {
    /// All statements plus bookkeeping in one transaction
    Transactional,
    /// Each statement (and the bookkeeping call) commits on its own.
    /// A failure leaves earlier statements applied.
    Autocommit,
}

impl From<bool> for ExecutionMode {
    fn from(use_transaction: bool) -> Self {
        if use_transaction {
            ExecutionMode::Transactional
        } else {
            ExecutionMode::Autocommit
        }
    }
}

/// Whether the version table is touched after the statements succeed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VersioningMode {
    RecordVersion,
    /// Used for baseline and no-op migrations
    SkipVersioning,
}

impl VersioningMode {
    pub fn is_enabled(&self) -> bool {
        matches!(self, VersioningMode::RecordVersion)
    }
}

/// A migration whose up and down directions are already split into statements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqlMigration {
    pub version: i64,
    pub up_statements: Vec<String>,
    pub down_statements: Vec<String>,
    /// Run inside a single transaction (default true)
    pub use_transaction: bool,
}

impl SqlMigration {
    pub fn new(version: i64) -> Self {
        Self {
            version,
            up_statements: Vec::new(),
            down_statements: Vec::new(),
            use_transaction: true,
        }
    }

    pub fn up<I, S>(mut self, statements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.up_statements = statements.into_iter().map(Into::into).collect();
        self
    }

    pub fn down<I, S>(mut self, statements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.down_statements = statements.into_iter().map(Into::into).collect();
        self
    }

    pub fn without_transaction(mut self) -> Self {
        self.use_transaction = false;
        self
    }

    /// Statements for the given direction
    pub fn statements(&self, direction: MigrationDirection) -> &[String] {
        match direction {
            MigrationDirection::Up => &self.up_statements,
            MigrationDirection::Down => &self.down_statements,
        }
    }

    pub fn execution_mode(&self) -> ExecutionMode {
        ExecutionMode::from(self.use_transaction)
    }
}

/// Result of executing a single statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementOutcome {
    pub rows_affected: u64,
    pub elapsed: Duration,
    /// Progress notifications emitted while the statement ran
    pub progress_reports: u32,
}

/// Result of a successful `apply`
#[derive(Debug, Clone)]
pub struct ApplyReport {
    pub version: MigrationVersion,
    pub mode: ExecutionMode,
    pub statements_executed: usize,
    pub rows_affected: u64,
    /// Whether the insert/delete-version operation was issued
    pub versioned: bool,
    pub elapsed: Duration,
}
