//! Executor configuration
//!
//! Verbosity is an explicit field threaded into the executor and the
//! statement runner instead of process-wide state.

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Default interval between progress notifications for a running statement
pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_secs(60);

/// Default name of the version tracking table
pub const DEFAULT_VERSION_TABLE: &str = "elif_db_version";

/// Diagnostic output level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// No statement echo, no progress notifications
    #[default]
    Quiet,
    /// Echo sanitized statements and report progress of long-running ones
    Verbose,
}

impl Verbosity {
    pub fn is_verbose(&self) -> bool {
        matches!(self, Verbosity::Verbose)
    }
}

impl FromStr for Verbosity {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "verbose" | "true" | "1" | "yes" | "on" => Ok(Verbosity::Verbose),
            "quiet" | "false" | "0" | "no" | "off" | "" => Ok(Verbosity::Quiet),
            _ => Err(ConfigError::InvalidValue {
                field: "verbosity".to_string(),
                value: s.to_string(),
                expected: "quiet or verbose".to_string(),
            }),
        }
    }
}

/// Configuration for [`MigrationExecutor`](crate::migrations::MigrationExecutor)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutorConfig {
    pub verbosity: Verbosity,
    /// Interval between progress notifications in verbose mode
    #[serde(with = "duration_secs")]
    pub progress_interval: Duration,
    /// Table used by the built-in dialects
    pub version_table: String,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::Quiet,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            version_table: DEFAULT_VERSION_TABLE.to_string(),
        }
    }
}

impl ExecutorConfig {
    /// Verbose configuration with default interval and table
    pub fn verbose() -> Self {
        Self {
            verbosity: Verbosity::Verbose,
            ..Default::default()
        }
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn with_version_table(mut self, table: impl Into<String>) -> Self {
        self.version_table = table.into();
        self
    }

    /// Load configuration from `MIGRATE_VERBOSE`, `MIGRATE_PROGRESS_INTERVAL_SECS`
    /// and `MIGRATE_VERSION_TABLE`, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let verbosity = match get_env_optional("MIGRATE_VERBOSE") {
            Some(value) => Verbosity::from_str(&value)?,
            None => defaults.verbosity,
        };

        let progress_interval = match get_env_optional("MIGRATE_PROGRESS_INTERVAL_SECS") {
            Some(value) => {
                let secs = value.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                    field: "progress_interval".to_string(),
                    value: value.clone(),
                    expected: "a whole number of seconds".to_string(),
                })?;
                Duration::from_secs(secs)
            }
            None => defaults.progress_interval,
        };

        let version_table =
            get_env_optional("MIGRATE_VERSION_TABLE").unwrap_or(defaults.version_table);

        let config = Self {
            verbosity,
            progress_interval,
            version_table,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.progress_interval.is_zero() {
            return Err(ConfigError::ValidationFailed {
                field: "progress_interval".to_string(),
                reason: "Progress interval must be greater than zero".to_string(),
            });
        }

        if self.version_table.is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "version_table".to_string(),
                reason: "Version table name cannot be empty".to_string(),
            });
        }

        let valid_identifier = self
            .version_table
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
        if !valid_identifier {
            return Err(ConfigError::ValidationFailed {
                field: "version_table".to_string(),
                reason: format!(
                    "'{}' may only contain letters, digits, '_' and '.'",
                    self.version_table
                ),
            });
        }

        Ok(())
    }
}

fn get_env_optional(key: &str) -> Option<String> {
    env::var(key).ok()
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {field}: '{value}', expected {expected}")]
    InvalidValue { field: String, value: String, expected: String },

    #[error("Validation failed for {field}: {reason}")]
    ValidationFailed { field: String, reason: String },
}
