//! # elif-migrate: SQL migration executor for elif.rs
//!
//! Applies the statements of a single migration direction against a
//! database, either atomically inside one transaction or statement by
//! statement in autocommit mode, and keeps the version table consistent with
//! what was applied.
//!
//! ```no_run
//! use elif_migrate::{
//!     ExecutionMode, ExecutorConfig, MigrationExecutor, MigrationVersion, SqlDialect,
//!     VersioningMode,
//! };
//!
//! # async fn run(pool: sqlx::PgPool) -> elif_migrate::MigrateResult<()> {
//! let executor = MigrationExecutor::for_dialect(ExecutorConfig::from_env()?, SqlDialect::PostgreSQL)?;
//! executor.ensure_version_table(&pool).await?;
//!
//! let statements = vec!["CREATE TABLE t (x int)".to_string()];
//! executor
//!     .apply(
//!         &pool,
//!         &statements,
//!         ExecutionMode::Transactional,
//!         MigrationVersion::up(2),
//!         VersioningMode::RecordVersion,
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod backends;
pub mod config;
pub mod error;
pub mod migrations;

pub use backends::{
    DatabaseValue, MigrationPool, MigrationTransaction, SqlDialect, StatementExecutor,
    VersionDialect, VersionTable,
};
pub use config::{ConfigError, ExecutorConfig, Verbosity};
pub use error::{DatabaseError, DatabaseResult, MigrateError, MigrateResult};
pub use migrations::*;
