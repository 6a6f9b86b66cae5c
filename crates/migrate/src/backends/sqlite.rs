//! SQLite Backend Implementation
//!
//! Implements the executor capabilities for sqlx's SQLite pool, pooled
//! connections and transactions.

use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteArguments, SqliteConnection, SqlitePool};
use sqlx::{Sqlite, Transaction};

use super::core::*;
use crate::error::DatabaseResult;

#[async_trait]
impl MigrationPool for SqlitePool {
    async fn begin(&self) -> DatabaseResult<Box<dyn MigrationTransaction>> {
        let tx = sqlx::Pool::begin(self).await?;
        Ok(Box::new(tx))
    }

    async fn acquire(&self) -> DatabaseResult<Box<dyn StatementExecutor>> {
        let conn = sqlx::Pool::acquire(self).await?;
        Ok(Box::new(conn))
    }
}

#[async_trait]
impl StatementExecutor for PoolConnection<Sqlite> {
    async fn execute(&mut self, sql: &str, params: &[DatabaseValue]) -> DatabaseResult<u64> {
        execute_on(&mut **self, sql, params).await
    }
}

#[async_trait]
impl StatementExecutor for Transaction<'static, Sqlite> {
    async fn execute(&mut self, sql: &str, params: &[DatabaseValue]) -> DatabaseResult<u64> {
        execute_on(&mut **self, sql, params).await
    }
}

#[async_trait]
impl MigrationTransaction for Transaction<'static, Sqlite> {
    async fn commit(self: Box<Self>) -> DatabaseResult<()> {
        Transaction::commit(*self).await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> DatabaseResult<()> {
        Transaction::rollback(*self).await?;
        Ok(())
    }
}

async fn execute_on(
    conn: &mut SqliteConnection,
    sql: &str,
    params: &[DatabaseValue],
) -> DatabaseResult<u64> {
    if params.is_empty() {
        let result = sqlx::Executor::execute(conn, sql).await?;
        return Ok(result.rows_affected());
    }

    let mut query = sqlx::query(sql);
    for param in params {
        query = bind_database_value(query, param);
    }

    let result = query.execute(conn).await?;
    Ok(result.rows_affected())
}

fn bind_database_value<'q>(
    query: sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>,
    value: &DatabaseValue,
) -> sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        DatabaseValue::Null => query.bind(Option::<String>::None),
        DatabaseValue::Bool(b) => query.bind(*b),
        DatabaseValue::Int32(i) => query.bind(*i),
        DatabaseValue::Int64(i) => query.bind(*i),
        DatabaseValue::Float64(f) => query.bind(*f),
        DatabaseValue::String(s) => query.bind(s.clone()),
        DatabaseValue::Bytes(b) => query.bind(b.clone()),
    }
}
