//! Migration Execution
//!
//! Applies one migration's statement list with transactional or autocommit
//! semantics and keeps the version table in step with it.

pub mod definitions;
pub mod runner;
pub mod statement;

pub use definitions::*;
pub use runner::MigrationExecutor;
pub use statement::{format_elapsed, sanitize_statement, StatementRunner};
