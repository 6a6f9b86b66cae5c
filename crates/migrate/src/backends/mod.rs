//! Database Backend Abstractions
//!
//! Executor capabilities and version-table dialects, with sqlx-backed
//! implementations for PostgreSQL and SQLite.

pub mod core;
pub mod postgres;
pub mod sqlite;

pub use self::core::*;
