//! Migration Runner - Applies one migration's statement list
//!
//! Runs the statements either inside one transaction or on a single
//! connection in autocommit mode, then records or removes the version row.
//! In transactional mode the version bookkeeping shares the transaction with
//! the statements, so a version is recorded exactly when the schema change
//! commits.
//!
//! Autocommit mode has no compensating action: when a statement fails, every
//! statement before it stays applied and no version row is written.

use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::definitions::{
    ApplyReport, ExecutionMode, MigrationDirection, MigrationVersion, SqlMigration, VersioningMode,
};
use super::statement::{sanitize_statement, StatementRunner};
use crate::backends::{
    DatabaseValue, MigrationPool, SqlDialect, StatementExecutor, VersionDialect, VersionTable,
};
use crate::config::ExecutorConfig;
use crate::error::{DatabaseError, MigrateError, MigrateResult};

#[derive(Debug, Default)]
struct Totals {
    statements_executed: usize,
    rows_affected: u64,
    versioned: bool,
}

/// Executes migration statement lists against a [`MigrationPool`]
pub struct MigrationExecutor {
    config: ExecutorConfig,
    dialect: Arc<dyn VersionDialect>,
    runner: StatementRunner,
}

impl MigrationExecutor {
    /// Create an executor with a caller-supplied version dialect
    pub fn new(config: ExecutorConfig, dialect: Arc<dyn VersionDialect>) -> MigrateResult<Self> {
        config.validate()?;
        let runner = StatementRunner::new(&config);
        Ok(Self {
            config,
            dialect,
            runner,
        })
    }

    /// Create an executor using a built-in dialect and `config.version_table`
    pub fn for_dialect(config: ExecutorConfig, dialect: SqlDialect) -> MigrateResult<Self> {
        let table = VersionTable::new(dialect, config.version_table.clone());
        Self::new(config, Arc::new(table))
    }

    pub fn dialect(&self) -> &dyn VersionDialect {
        self.dialect.as_ref()
    }

    /// Create the version table if it does not exist
    pub async fn ensure_version_table<P>(&self, pool: &P) -> MigrateResult<()>
    where
        P: MigrationPool + ?Sized,
    {
        let table = self.dialect.table_name().to_string();
        let mut conn = match pool.acquire().await {
            Ok(conn) => conn,
            Err(source) => return Err(MigrateError::Setup { table, source }),
        };

        self.runner
            .run(conn.as_mut(), &self.dialect.create_version_table_sql(), &[])
            .await
            .map_err(|source| MigrateError::Setup { table, source })?;

        Ok(())
    }

    /// Run the statements of `migration` for `direction`, honouring its
    /// transaction setting.
    pub async fn run_migration<P>(
        &self,
        pool: &P,
        migration: &SqlMigration,
        direction: MigrationDirection,
        versioning: VersioningMode,
    ) -> MigrateResult<ApplyReport>
    where
        P: MigrationPool + ?Sized,
    {
        let version = MigrationVersion {
            version: migration.version,
            direction,
        };

        self.apply(
            pool,
            migration.statements(direction),
            migration.execution_mode(),
            version,
            versioning,
        )
        .await
    }

    /// Apply `statements` in order, then record (up) or remove (down) the
    /// version unless versioning is skipped.
    ///
    /// Stops at the first failing statement. In transactional mode the
    /// transaction is rolled back before the error is returned; a failed
    /// rollback is logged and attached to the original error.
    pub async fn apply<P>(
        &self,
        pool: &P,
        statements: &[String],
        mode: ExecutionMode,
        version: MigrationVersion,
        versioning: VersioningMode,
    ) -> MigrateResult<ApplyReport>
    where
        P: MigrationPool + ?Sized,
    {
        let started = Instant::now();

        let totals = match mode {
            ExecutionMode::Transactional => {
                self.apply_in_transaction(pool, statements, version, versioning).await?
            }
            ExecutionMode::Autocommit => {
                self.apply_autocommit(pool, statements, version, versioning).await?
            }
        };

        let report = ApplyReport {
            version,
            mode,
            statements_executed: totals.statements_executed,
            rows_affected: totals.rows_affected,
            versioned: totals.versioned,
            elapsed: started.elapsed(),
        };

        if self.config.verbosity.is_verbose() {
            info!("Migration {} finished in {:?}", version, report.elapsed);
        } else {
            debug!("Migration {} finished in {:?}", version, report.elapsed);
        }

        Ok(report)
    }

    async fn apply_in_transaction<P>(
        &self,
        pool: &P,
        statements: &[String],
        version: MigrationVersion,
        versioning: VersioningMode,
    ) -> MigrateResult<Totals>
    where
        P: MigrationPool + ?Sized,
    {
        self.log_step("Begin transaction");
        let mut tx = pool
            .begin()
            .await
            .map_err(|source| MigrateError::TransactionBegin {
                version: version.version,
                direction: version.direction,
                source,
            })?;

        match self.execute_all(tx.as_mut(), statements, version, versioning).await {
            Ok(totals) => {
                self.log_step("Commit transaction");
                tx.commit().await.map_err(|source| MigrateError::Commit {
                    version: version.version,
                    direction: version.direction,
                    source,
                })?;
                Ok(totals)
            }
            Err(err) => {
                self.log_step("Rollback transaction");
                match tx.rollback().await {
                    Ok(()) => Err(err),
                    Err(rollback_err) => {
                        warn!(
                            "Failed to roll back migration {} after error ({}): {}",
                            version, err, rollback_err
                        );
                        Err(attach_rollback_error(err, rollback_err))
                    }
                }
            }
        }
    }

    async fn apply_autocommit<P>(
        &self,
        pool: &P,
        statements: &[String],
        version: MigrationVersion,
        versioning: VersioningMode,
    ) -> MigrateResult<Totals>
    where
        P: MigrationPool + ?Sized,
    {
        let mut conn = pool
            .acquire()
            .await
            .map_err(|source| MigrateError::Connection {
                version: version.version,
                direction: version.direction,
                source,
            })?;

        self.execute_all(conn.as_mut(), statements, version, versioning)
            .await
            .map_err(|err| {
                if let Some(applied) = statements_left_applied(&err, statements.len()) {
                    warn!(
                        "Migration {} stopped without a transaction; {} statement(s) remain applied",
                        version, applied
                    );
                }
                err
            })
    }

    async fn execute_all<E>(
        &self,
        executor: &mut E,
        statements: &[String],
        version: MigrationVersion,
        versioning: VersioningMode,
    ) -> MigrateResult<Totals>
    where
        E: StatementExecutor + ?Sized,
    {
        let mut totals = Totals::default();

        for (index, statement) in statements.iter().enumerate() {
            let outcome = self
                .runner
                .run(&mut *executor, statement, &[])
                .await
                .map_err(|source| MigrateError::Statement {
                    index,
                    statement: sanitize_statement(statement),
                    version: version.version,
                    direction: version.direction,
                    source,
                    rollback_error: None,
                })?;

            totals.statements_executed += 1;
            totals.rows_affected += outcome.rows_affected;
        }

        if versioning.is_enabled() {
            let (sql, params) = self.bookkeeping_statement(version);
            self.runner
                .run(&mut *executor, &sql, &params)
                .await
                .map_err(|source| MigrateError::Versioning {
                    version: version.version,
                    direction: version.direction,
                    source,
                    rollback_error: None,
                })?;
            totals.versioned = true;
        }

        Ok(totals)
    }

    fn bookkeeping_statement(&self, version: MigrationVersion) -> (String, Vec<DatabaseValue>) {
        match version.direction {
            MigrationDirection::Up => (
                self.dialect.insert_version_sql(),
                vec![
                    DatabaseValue::Int64(version.version),
                    DatabaseValue::Bool(version.direction.is_applied()),
                ],
            ),
            MigrationDirection::Down => (
                self.dialect.delete_version_sql(),
                vec![DatabaseValue::Int64(version.version)],
            ),
        }
    }

    fn log_step(&self, step: &str) {
        if self.config.verbosity.is_verbose() {
            info!("{}", step);
        } else {
            debug!("{}", step);
        }
    }
}

/// Statements already committed when an autocommit run fails with `err`
fn statements_left_applied(err: &MigrateError, total: usize) -> Option<usize> {
    match err {
        MigrateError::Statement { index, .. } => Some(*index),
        MigrateError::Versioning { .. } => Some(total),
        _ => None,
    }
}

fn attach_rollback_error(err: MigrateError, rollback_err: DatabaseError) -> MigrateError {
    match err {
        MigrateError::Statement {
            index,
            statement,
            version,
            direction,
            source,
            ..
        } => MigrateError::Statement {
            index,
            statement,
            version,
            direction,
            source,
            rollback_error: Some(rollback_err),
        },
        MigrateError::Versioning {
            version,
            direction,
            source,
            ..
        } => MigrateError::Versioning {
            version,
            direction,
            source,
            rollback_error: Some(rollback_err),
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::MigrationTransaction;
    use crate::error::DatabaseResult;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Begin,
        Acquire,
        Execute(String, Vec<DatabaseValue>),
        Commit,
        Rollback,
    }

    /// Pool that records every call and fails on request
    #[derive(Default, Clone)]
    struct ScriptedPool {
        events: Arc<Mutex<Vec<Event>>>,
        fail_statement: Option<String>,
        fail_begin: bool,
        fail_commit: bool,
        fail_rollback: bool,
        fail_acquire: bool,
    }

    impl ScriptedPool {
        fn failing_on(marker: &str) -> Self {
            Self {
                fail_statement: Some(marker.to_string()),
                ..Default::default()
            }
        }

        fn events(&self) -> Vec<Event> {
            self.events.lock().unwrap().clone()
        }

        fn executed(&self) -> Vec<String> {
            self.events()
                .into_iter()
                .filter_map(|event| match event {
                    Event::Execute(sql, _) => Some(sql),
                    _ => None,
                })
                .collect()
        }

        fn record(&self, event: Event) {
            self.events.lock().unwrap().push(event);
        }
    }

    struct ScriptedSession {
        pool: ScriptedPool,
    }

    #[async_trait]
    impl StatementExecutor for ScriptedSession {
        async fn execute(&mut self, sql: &str, params: &[DatabaseValue]) -> DatabaseResult<u64> {
            self.pool.record(Event::Execute(sql.to_string(), params.to_vec()));
            match &self.pool.fail_statement {
                Some(marker) if sql.contains(marker.as_str()) => {
                    Err(DatabaseError::driver(format!("syntax error near {}", marker)))
                }
                _ => Ok(1),
            }
        }
    }

    #[async_trait]
    impl MigrationTransaction for ScriptedSession {
        async fn commit(self: Box<Self>) -> DatabaseResult<()> {
            self.pool.record(Event::Commit);
            if self.pool.fail_commit {
                return Err(DatabaseError::driver("connection closed during commit"));
            }
            Ok(())
        }

        async fn rollback(self: Box<Self>) -> DatabaseResult<()> {
            self.pool.record(Event::Rollback);
            if self.pool.fail_rollback {
                return Err(DatabaseError::driver("connection closed during rollback"));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl MigrationPool for ScriptedPool {
        async fn begin(&self) -> DatabaseResult<Box<dyn MigrationTransaction>> {
            self.record(Event::Begin);
            if self.fail_begin {
                return Err(DatabaseError::driver("too many connections"));
            }
            Ok(Box::new(ScriptedSession { pool: self.clone() }))
        }

        async fn acquire(&self) -> DatabaseResult<Box<dyn StatementExecutor>> {
            self.record(Event::Acquire);
            if self.fail_acquire {
                return Err(DatabaseError::driver("pool timed out"));
            }
            Ok(Box::new(ScriptedSession { pool: self.clone() }))
        }
    }

    fn executor() -> MigrationExecutor {
        MigrationExecutor::for_dialect(ExecutorConfig::default(), SqlDialect::PostgreSQL).unwrap()
    }

    fn statements(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn exec(sql: &str) -> Event {
        Event::Execute(sql.to_string(), Vec::new())
    }

    const INSERT_VERSION: &str =
        "INSERT INTO elif_db_version (version_id, is_applied) VALUES ($1, $2)";
    const DELETE_VERSION: &str = "DELETE FROM elif_db_version WHERE version_id = $1";

    #[tokio::test]
    async fn test_transactional_up_records_version_before_commit() {
        let pool = ScriptedPool::default();
        let list = statements(&["CREATE TABLE t(x int)", "INSERT INTO t VALUES(1)"]);

        let report = executor()
            .apply(
                &pool,
                &list,
                ExecutionMode::Transactional,
                MigrationVersion::up(2),
                VersioningMode::RecordVersion,
            )
            .await
            .unwrap();

        assert_eq!(
            pool.events(),
            vec![
                Event::Begin,
                exec("CREATE TABLE t(x int)"),
                exec("INSERT INTO t VALUES(1)"),
                Event::Execute(
                    INSERT_VERSION.to_string(),
                    vec![DatabaseValue::Int64(2), DatabaseValue::Bool(true)]
                ),
                Event::Commit,
            ]
        );
        assert_eq!(report.statements_executed, 2);
        assert_eq!(report.rows_affected, 2);
        assert!(report.versioned);
        assert_eq!(report.mode, ExecutionMode::Transactional);
    }

    #[tokio::test]
    async fn test_transactional_statement_failure_rolls_back() {
        let pool = ScriptedPool::failing_on("bad syntax");
        let list = statements(&[
            "CREATE TABLE t(x int)",
            "INSERT INTO t VALUES(bad syntax)",
            "INSERT INTO t VALUES(2)",
        ]);

        let err = executor()
            .apply(
                &pool,
                &list,
                ExecutionMode::Transactional,
                MigrationVersion::up(2),
                VersioningMode::RecordVersion,
            )
            .await
            .unwrap_err();

        assert_eq!(
            pool.events(),
            vec![
                Event::Begin,
                exec("CREATE TABLE t(x int)"),
                exec("INSERT INTO t VALUES(bad syntax)"),
                Event::Rollback,
            ]
        );
        match err {
            MigrateError::Statement {
                index,
                statement,
                version,
                rollback_error,
                ..
            } => {
                assert_eq!(index, 1);
                assert_eq!(statement, "INSERT INTO t VALUES(bad syntax)");
                assert_eq!(version, 2);
                assert!(rollback_error.is_none());
            }
            other => panic!("Expected statement error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_versioning_failure_rolls_back() {
        let pool = ScriptedPool::failing_on("INSERT INTO elif_db_version");
        let list = statements(&["CREATE TABLE t(x int)"]);

        let err = executor()
            .apply(
                &pool,
                &list,
                ExecutionMode::Transactional,
                MigrationVersion::up(5),
                VersioningMode::RecordVersion,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, MigrateError::Versioning { version: 5, .. }));
        assert_eq!(pool.events().last(), Some(&Event::Rollback));
        assert!(!pool.events().contains(&Event::Commit));
    }

    #[tokio::test]
    async fn test_rollback_failure_is_attached_not_substituted() {
        let mut pool = ScriptedPool::failing_on("DROP");
        pool.fail_rollback = true;
        let list = statements(&["DROP TABLE t"]);

        let err = executor()
            .apply(
                &pool,
                &list,
                ExecutionMode::Transactional,
                MigrationVersion::down(3),
                VersioningMode::RecordVersion,
            )
            .await
            .unwrap_err();

        assert_eq!(err.statement_index(), Some(0));
        assert!(err.to_string().contains("syntax error near DROP"));
        let rollback = err.rollback_error().expect("rollback failure should be recorded");
        assert!(rollback.to_string().contains("during rollback"));
    }

    #[tokio::test]
    async fn test_commit_failure_is_reported_as_ambiguous() {
        let pool = ScriptedPool {
            fail_commit: true,
            ..Default::default()
        };
        let list = statements(&["CREATE TABLE t(x int)"]);

        let err = executor()
            .apply(
                &pool,
                &list,
                ExecutionMode::Transactional,
                MigrationVersion::up(2),
                VersioningMode::RecordVersion,
            )
            .await
            .unwrap_err();

        assert!(err.is_commit_ambiguous());
        assert_eq!(err.version(), Some(2));
        assert!(!pool.events().contains(&Event::Rollback));
    }

    #[tokio::test]
    async fn test_begin_failure_attempts_nothing() {
        let pool = ScriptedPool {
            fail_begin: true,
            ..Default::default()
        };
        let list = statements(&["CREATE TABLE t(x int)"]);

        let err = executor()
            .apply(
                &pool,
                &list,
                ExecutionMode::Transactional,
                MigrationVersion::up(2),
                VersioningMode::RecordVersion,
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            MigrateError::TransactionBegin {
                version: 2,
                direction: MigrationDirection::Up,
                ..
            }
        ));
        assert_eq!(pool.events(), vec![Event::Begin]);
    }

    #[tokio::test]
    async fn test_acquire_failure_is_connection_error() {
        let pool = ScriptedPool {
            fail_acquire: true,
            ..Default::default()
        };
        let list = statements(&["CREATE INDEX CONCURRENTLY i ON t(x)"]);

        let err = executor()
            .apply(
                &pool,
                &list,
                ExecutionMode::Autocommit,
                MigrationVersion::down(6),
                VersioningMode::RecordVersion,
            )
            .await
            .unwrap_err();

        match &err {
            MigrateError::Connection {
                version, direction, ..
            } => {
                assert_eq!(*version, 6);
                assert_eq!(*direction, MigrationDirection::Down);
            }
            other => panic!("Expected connection error, got {:?}", other),
        }
        assert!(err.to_string().contains("pool timed out"));
        assert_eq!(pool.events(), vec![Event::Acquire]);
    }

    #[tokio::test]
    async fn test_ensure_version_table_acquire_failure_is_setup_error() {
        let pool = ScriptedPool {
            fail_acquire: true,
            ..Default::default()
        };

        let err = executor().ensure_version_table(&pool).await.unwrap_err();

        match err {
            MigrateError::Setup { table, .. } => assert_eq!(table, "elif_db_version"),
            other => panic!("Expected setup error, got {:?}", other),
        }
        assert!(pool.executed().is_empty());
    }

    #[tokio::test]
    async fn test_autocommit_failure_keeps_prior_statements_and_skips_bookkeeping() {
        let pool = ScriptedPool::failing_on("missing");
        let list = statements(&[
            "CREATE TABLE a(x int)",
            "INSERT INTO missing VALUES(1)",
            "INSERT INTO a VALUES(2)",
        ]);

        let err = executor()
            .apply(
                &pool,
                &list,
                ExecutionMode::Autocommit,
                MigrationVersion::up(9),
                VersioningMode::RecordVersion,
            )
            .await
            .unwrap_err();

        assert_eq!(err.statement_index(), Some(1));
        assert_eq!(
            pool.events(),
            vec![
                Event::Acquire,
                exec("CREATE TABLE a(x int)"),
                exec("INSERT INTO missing VALUES(1)"),
            ]
        );
    }

    #[tokio::test]
    async fn test_autocommit_bookkeeping_failure_keeps_statements() {
        let pool = ScriptedPool::failing_on("INSERT INTO elif_db_version");
        let list = statements(&["CREATE TABLE a(x int)", "INSERT INTO a VALUES(1)"]);

        let err = executor()
            .apply(
                &pool,
                &list,
                ExecutionMode::Autocommit,
                MigrationVersion::up(7),
                VersioningMode::RecordVersion,
            )
            .await
            .unwrap_err();

        match &err {
            MigrateError::Versioning {
                version,
                rollback_error,
                ..
            } => {
                assert_eq!(*version, 7);
                assert!(rollback_error.is_none());
            }
            other => panic!("Expected versioning error, got {:?}", other),
        }
        assert_eq!(
            pool.events(),
            vec![
                Event::Acquire,
                exec("CREATE TABLE a(x int)"),
                exec("INSERT INTO a VALUES(1)"),
                Event::Execute(
                    INSERT_VERSION.to_string(),
                    vec![DatabaseValue::Int64(7), DatabaseValue::Bool(true)]
                ),
            ]
        );
        assert_eq!(statements_left_applied(&err, list.len()), Some(2));
    }

    #[test]
    fn test_statements_left_applied() {
        let statement = MigrateError::Statement {
            index: 3,
            statement: "ALTER TABLE t ADD y int".to_string(),
            version: 1,
            direction: MigrationDirection::Up,
            source: DatabaseError::driver("boom"),
            rollback_error: None,
        };
        assert_eq!(statements_left_applied(&statement, 5), Some(3));

        let versioning = MigrateError::Versioning {
            version: 1,
            direction: MigrationDirection::Up,
            source: DatabaseError::driver("boom"),
            rollback_error: None,
        };
        assert_eq!(statements_left_applied(&versioning, 5), Some(5));

        let connection = MigrateError::Connection {
            version: 1,
            direction: MigrationDirection::Up,
            source: DatabaseError::driver("boom"),
        };
        assert_eq!(statements_left_applied(&connection, 5), None);
    }

    #[tokio::test]
    async fn test_skip_versioning_issues_no_bookkeeping() {
        for direction in [MigrationDirection::Up, MigrationDirection::Down] {
            for mode in [ExecutionMode::Transactional, ExecutionMode::Autocommit] {
                let pool = ScriptedPool::default();
                let list = statements(&["SELECT 1"]);
                let version = MigrationVersion { version: 1, direction };

                let report = executor()
                    .apply(&pool, &list, mode, version, VersioningMode::SkipVersioning)
                    .await
                    .unwrap();

                assert!(!report.versioned);
                assert_eq!(pool.executed(), vec!["SELECT 1".to_string()]);
            }
        }
    }

    #[tokio::test]
    async fn test_down_deletes_version_once_after_statements() {
        let pool = ScriptedPool::default();
        let list = statements(&["DROP TABLE t", "DROP TABLE u"]);

        executor()
            .apply(
                &pool,
                &list,
                ExecutionMode::Autocommit,
                MigrationVersion::down(2),
                VersioningMode::RecordVersion,
            )
            .await
            .unwrap();

        assert_eq!(
            pool.events(),
            vec![
                Event::Acquire,
                exec("DROP TABLE t"),
                exec("DROP TABLE u"),
                Event::Execute(DELETE_VERSION.to_string(), vec![DatabaseValue::Int64(2)]),
            ]
        );
    }

    #[tokio::test]
    async fn test_statements_run_in_list_order() {
        let pool = ScriptedPool::default();
        let list: Vec<String> = (0..20).map(|i| format!("UPDATE c SET n = n * 10 + {}", i)).collect();

        executor()
            .apply(
                &pool,
                &list,
                ExecutionMode::Transactional,
                MigrationVersion::up(1),
                VersioningMode::SkipVersioning,
            )
            .await
            .unwrap();

        assert_eq!(pool.executed(), list);
    }

    #[tokio::test]
    async fn test_run_migration_uses_direction_and_transaction_flag() {
        let pool = ScriptedPool::default();
        let migration = SqlMigration::new(4)
            .up(["CREATE TABLE t(x int)"])
            .down(["DROP TABLE t"])
            .without_transaction();

        let report = executor()
            .run_migration(
                &pool,
                &migration,
                MigrationDirection::Down,
                VersioningMode::RecordVersion,
            )
            .await
            .unwrap();

        assert_eq!(report.mode, ExecutionMode::Autocommit);
        assert_eq!(report.version, MigrationVersion::down(4));
        assert_eq!(
            pool.executed(),
            vec!["DROP TABLE t".to_string(), DELETE_VERSION.to_string()]
        );
    }

    #[tokio::test]
    async fn test_error_statement_is_sanitized() {
        let pool = ScriptedPool::failing_on("nope");
        let list = statements(&["-- add a column\nALTER TABLE t\n\nADD nope int;"]);

        let err = executor()
            .apply(
                &pool,
                &list,
                ExecutionMode::Transactional,
                MigrationVersion::up(8),
                VersioningMode::RecordVersion,
            )
            .await
            .unwrap_err();

        match err {
            MigrateError::Statement { statement, .. } => {
                assert_eq!(statement, "ALTER TABLE t\nADD nope int;");
            }
            other => panic!("Expected statement error, got {:?}", other),
        }
        // The original text is what gets executed.
        assert_eq!(
            pool.executed(),
            vec!["-- add a column\nALTER TABLE t\n\nADD nope int;".to_string()]
        );
    }

    #[tokio::test]
    async fn test_ensure_version_table_runs_dialect_ddl() {
        let pool = ScriptedPool::default();
        let executor = executor();

        executor.ensure_version_table(&pool).await.unwrap();

        assert_eq!(
            pool.executed(),
            vec![executor.dialect().create_version_table_sql()]
        );
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = ExecutorConfig::default().with_version_table("");
        let result = MigrationExecutor::for_dialect(config, SqlDialect::SQLite);
        assert!(matches!(result, Err(MigrateError::Config(_))));
    }
}
