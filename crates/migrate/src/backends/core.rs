//! Core Database Backend Traits
//!
//! The executor only needs one capability from the database: run a statement
//! with bind parameters and report rows affected. Transactions and plain
//! pooled connections both provide it through [`StatementExecutor`], so the
//! transactional and autocommit paths share the same code.

use async_trait::async_trait;

use crate::error::DatabaseResult;

/// Execute a SQL statement with bind parameters
#[async_trait]
pub trait StatementExecutor: Send {
    /// Execute a statement and return the affected rows count
    async fn execute(&mut self, sql: &str, params: &[DatabaseValue]) -> DatabaseResult<u64>;
}

/// A transaction owned by the executor for the duration of one `apply` call
#[async_trait]
pub trait MigrationTransaction: StatementExecutor {
    async fn commit(self: Box<Self>) -> DatabaseResult<()>;

    async fn rollback(self: Box<Self>) -> DatabaseResult<()>;
}

/// Source of transactions and connections. The pool's lifecycle belongs to
/// the caller.
#[async_trait]
pub trait MigrationPool: Send + Sync {
    /// Begin a transaction
    async fn begin(&self) -> DatabaseResult<Box<dyn MigrationTransaction>>;

    /// Acquire a connection whose statements commit individually
    async fn acquire(&self) -> DatabaseResult<Box<dyn StatementExecutor>>;
}

/// Database value enumeration for type-safe parameter binding
#[derive(Debug, Clone, PartialEq)]
pub enum DatabaseValue {
    Null,
    Bool(bool),
    Int32(i32),
    Int64(i64),
    Float64(f64),
    String(String),
    Bytes(Vec<u8>),
}

impl DatabaseValue {
    pub fn is_null(&self) -> bool {
        matches!(self, DatabaseValue::Null)
    }
}

impl From<bool> for DatabaseValue {
    fn from(value: bool) -> Self {
        DatabaseValue::Bool(value)
    }
}

impl From<i32> for DatabaseValue {
    fn from(value: i32) -> Self {
        DatabaseValue::Int32(value)
    }
}

impl From<i64> for DatabaseValue {
    fn from(value: i64) -> Self {
        DatabaseValue::Int64(value)
    }
}

impl From<f64> for DatabaseValue {
    fn from(value: f64) -> Self {
        DatabaseValue::Float64(value)
    }
}

impl From<String> for DatabaseValue {
    fn from(value: String) -> Self {
        DatabaseValue::String(value)
    }
}

impl From<&str> for DatabaseValue {
    fn from(value: &str) -> Self {
        DatabaseValue::String(value.to_string())
    }
}

impl From<Vec<u8>> for DatabaseValue {
    fn from(value: Vec<u8>) -> Self {
        DatabaseValue::Bytes(value)
    }
}

impl<T> From<Option<T>> for DatabaseValue
where
    T: Into<DatabaseValue>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => DatabaseValue::Null,
        }
    }
}

/// Version-table statements consumed by the executor.
///
/// The executor treats these as opaque parameterized templates:
/// `insert_version_sql` takes `(version, is_applied)` and
/// `delete_version_sql` takes `(version)`.
pub trait VersionDialect: Send + Sync {
    fn table_name(&self) -> &str;

    fn create_version_table_sql(&self) -> String;

    fn insert_version_sql(&self) -> String;

    fn delete_version_sql(&self) -> String;
}

/// SQL dialect enumeration for generating database-specific SQL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlDialect {
    PostgreSQL,
    SQLite,
}

impl SqlDialect {
    /// Get the parameter placeholder style for this dialect
    pub fn parameter_placeholder(&self, index: usize) -> String {
        match self {
            SqlDialect::PostgreSQL => format!("${}", index + 1),
            SqlDialect::SQLite => "?".to_string(),
        }
    }

    /// Version table bound to this dialect
    pub fn version_table(self, table: impl Into<String>) -> VersionTable {
        VersionTable::new(self, table)
    }
}

/// Built-in [`VersionDialect`] for the supported SQL dialects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionTable {
    dialect: SqlDialect,
    table: String,
}

impl VersionTable {
    pub fn new(dialect: SqlDialect, table: impl Into<String>) -> Self {
        Self {
            dialect,
            table: table.into(),
        }
    }
}

impl VersionDialect for VersionTable {
    fn table_name(&self) -> &str {
        &self.table
    }

    fn create_version_table_sql(&self) -> String {
        match self.dialect {
            SqlDialect::PostgreSQL => format!(
                "CREATE TABLE IF NOT EXISTS {} (\n    \
                    id serial NOT NULL,\n    \
                    version_id bigint NOT NULL,\n    \
                    is_applied boolean NOT NULL,\n    \
                    tstamp timestamp NULL DEFAULT now(),\n    \
                    PRIMARY KEY(id)\n\
                )",
                self.table
            ),
            SqlDialect::SQLite => format!(
                "CREATE TABLE IF NOT EXISTS {} (\n    \
                    id INTEGER PRIMARY KEY AUTOINCREMENT,\n    \
                    version_id INTEGER NOT NULL,\n    \
                    is_applied INTEGER NOT NULL,\n    \
                    tstamp TIMESTAMP DEFAULT (datetime('now'))\n\
                )",
                self.table
            ),
        }
    }

    fn insert_version_sql(&self) -> String {
        format!(
            "INSERT INTO {} (version_id, is_applied) VALUES ({}, {})",
            self.table,
            self.dialect.parameter_placeholder(0),
            self.dialect.parameter_placeholder(1)
        )
    }

    fn delete_version_sql(&self) -> String {
        format!(
            "DELETE FROM {} WHERE version_id = {}",
            self.table,
            self.dialect.parameter_placeholder(0)
        )
    }
}
