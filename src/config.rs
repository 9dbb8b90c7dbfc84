//! Configuration management for tasklog.
//!
//! Configuration can be set via environment variables:
//! - `TASKLOG_CONFIG` - Optional. Path to a YAML (`.yaml`/`.yml`) or JSON file
//!   with the same fields. Environment variables override file values.
//! - `TASKLOG_SINK` - Optional. `console`, `tracing` or `noop`. Defaults to `console`.
//! - `TASKLOG_PREFIX` - Optional. Prefix prepended to every task log line.
//! - `TASKLOG_MESSAGES` - Optional. `standard`, `terse` or `descriptive`. Defaults to `standard`.
//! - `TASKLOG_ABORT_EXECUTES` - Optional. When true, aborting a task also executes it.
//! - `TASKLOG_ABORT_DELAY` - Optional. When set, the binary aborts the task with this delay
//!   after executing it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logger::LogSink;
use crate::task::{AbortPolicy, MessagePreset, TaskMessages, TemplateError};
use crate::util::parse_bool;

/// Every environment variable read by [`Config::from_env`].
pub const ENV_VARS: [&str; 6] = [
    "TASKLOG_CONFIG",
    "TASKLOG_SINK",
    "TASKLOG_PREFIX",
    "TASKLOG_MESSAGES",
    "TASKLOG_ABORT_EXECUTES",
    "TASKLOG_ABORT_DELAY",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),

    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Task logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where task log lines go
    pub sink: LogSink,

    /// Prefix prepended to every line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    /// Templates for the creation, execution and abort lines
    pub messages: TaskMessages,

    /// Whether `abort` also executes
    pub abort_policy: AbortPolicy,

    /// Delay for the binary's abort after executing; no abort when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abort_delay: Option<f64>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for non-unicode values, unknown sink or
    /// preset names and unparseable delays, and file errors when `TASKLOG_CONFIG`
    /// points at an unreadable or invalid file.
    pub fn from_env() -> Result<Self, ConfigError> {
        for key in ENV_VARS {
            if let Err(std::env::VarError::NotUnicode(raw)) = std::env::var(key) {
                return Err(ConfigError::InvalidValue(
                    key.to_string(),
                    format!("not valid unicode: {}", raw.to_string_lossy()),
                ));
            }
        }
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`], reading variables through `lookup`.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup("TASKLOG_CONFIG") {
            Some(path) if !path.trim().is_empty() => Self::from_file(path.trim())?,
            _ => Self::default(),
        };

        if let Some(value) = lookup("TASKLOG_SINK") {
            config.sink = LogSink::parse(&value)
                .ok_or_else(|| ConfigError::InvalidValue("TASKLOG_SINK".to_string(), value))?;
        }

        if let Some(value) = lookup("TASKLOG_PREFIX") {
            config.prefix = Some(value);
        }

        if let Some(value) = lookup("TASKLOG_MESSAGES") {
            config.messages = MessagePreset::parse(&value)
                .ok_or_else(|| ConfigError::InvalidValue("TASKLOG_MESSAGES".to_string(), value))?
                .messages();
        }

        if let Some(value) = lookup("TASKLOG_ABORT_EXECUTES") {
            config.abort_policy = if parse_bool(&value) {
                AbortPolicy::ThenExecute
            } else {
                AbortPolicy::LogOnly
            };
        }

        if let Some(value) = lookup("TASKLOG_ABORT_DELAY") {
            let delay = value.trim().parse::<f64>().map_err(|e| {
                ConfigError::InvalidValue("TASKLOG_ABORT_DELAY".to_string(), format!("{}", e))
            })?;
            config.abort_delay = Some(delay);
        }

        Ok(config)
    }

    /// Load configuration from a YAML or JSON file, chosen by extension.
    ///
    /// Custom templates are validated here.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let config: Config = if is_json {
            serde_json::from_str(&contents).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
        } else {
            serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
        };

        config.messages.validate()?;
        tracing::debug!(path = %path.display(), sink = ?config.sink, "Loaded task config");
        Ok(config)
    }
}
