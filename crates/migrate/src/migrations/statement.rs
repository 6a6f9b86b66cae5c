//! Statement runner with optional progress reporting
//!
//! In verbose mode a statement's execution is raced against a periodic timer
//! so long-running DDL keeps reporting how long it has been running. The
//! execution future is owned by the runner's future: dropping the caller's
//! future cancels the database call and nothing outlives it.

use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::info;

use super::definitions::StatementOutcome;
use crate::backends::{DatabaseValue, StatementExecutor};
use crate::config::{ExecutorConfig, Verbosity, DEFAULT_PROGRESS_INTERVAL};
use crate::error::DatabaseResult;

static SQL_LINE_COMMENTS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^--[^\n]*(?:\n|\z)").expect("valid comment pattern"));

static EMPTY_LINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\r?\n").expect("valid empty line pattern"));

/// Strip `--` comment lines and blank lines from a statement for display.
///
/// Both patterns remove whole lines including their line break, so a line
/// that survives the first pass is never reinterpreted by a second one.
///
/// The result is only for logs and error messages; it is never executed.
pub fn sanitize_statement(statement: &str) -> String {
    let without_comments = SQL_LINE_COMMENTS.replace_all(statement, "");
    EMPTY_LINES.replace_all(&without_comments, "").into_owned()
}

/// Format an elapsed duration for operators, rounded to whole seconds
/// (`45s`, `1m0s`, `1h2m3s`).
pub fn format_elapsed(elapsed: Duration) -> String {
    let mut secs = elapsed.as_secs();
    if elapsed.subsec_millis() >= 500 {
        secs += 1;
    }

    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// Executes single statements against a transaction or connection
#[derive(Debug, Clone)]
pub struct StatementRunner {
    verbosity: Verbosity,
    progress_interval: Duration,
}

impl StatementRunner {
    pub fn new(config: &ExecutorConfig) -> Self {
        Self {
            verbosity: config.verbosity,
            progress_interval: if config.progress_interval.is_zero() {
                DEFAULT_PROGRESS_INTERVAL
            } else {
                config.progress_interval
            },
        }
    }

    /// Execute one statement. Errors are returned exactly as the executor
    /// reported them; instrumentation never changes completion semantics.
    pub async fn run<E>(
        &self,
        executor: &mut E,
        statement: &str,
        params: &[DatabaseValue],
    ) -> DatabaseResult<StatementOutcome>
    where
        E: StatementExecutor + ?Sized,
    {
        let started = Instant::now();

        if !self.verbosity.is_verbose() {
            let rows_affected = executor.execute(statement, params).await?;
            return Ok(StatementOutcome {
                rows_affected,
                elapsed: started.elapsed(),
                progress_reports: 0,
            });
        }

        info!("Executing statement: {}", sanitize_statement(statement));

        let execution = executor.execute(statement, params);
        tokio::pin!(execution);

        let mut ticker = time::interval_at(started + self.progress_interval, self.progress_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut progress_reports = 0;

        loop {
            tokio::select! {
                biased;

                result = &mut execution => {
                    let rows_affected = result?;
                    return Ok(StatementOutcome {
                        rows_affected,
                        elapsed: started.elapsed(),
                        progress_reports,
                    });
                }
                _ = ticker.tick() => {
                    progress_reports += 1;
                    info!(
                        "Executing statement still in progress for {}",
                        format_elapsed(started.elapsed())
                    );
                }
            }
        }
    }
}
