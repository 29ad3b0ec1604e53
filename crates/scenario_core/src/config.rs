//! Runtime configuration resolved from the environment.
//!
//! # Responsibility
//! - Resolve database path, log level and log directory.
//! - Let front ends override any value explicitly.
//!
//! # Invariants
//! - Blank variables count as unset.
//! - A resolved `log_dir` is always absolute; the logger refuses anything else.

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "SCENARIO_DB_PATH";
pub const LOG_LEVEL_VAR: &str = "SCENARIO_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "SCENARIO_LOG_DIR";

/// Database file used when nothing else is configured.
pub const DEFAULT_DB_FILE_NAME: &str = "scenario.sqlite3";

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Unknown log level name.
    InvalidLogLevel { source_name: &'static str, value: String },
    /// Log directory must be absolute.
    RelativeLogDir { source_name: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel { source_name, value } => write!(
                f,
                "{source_name}: unsupported log level `{value}`; expected trace|debug|info|warn|error"
            ),
            Self::RelativeLogDir { source_name, value } => {
                write!(f, "{source_name}: log directory must be absolute, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: &'static str,
    /// `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Reads the `SCENARIO_*` process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value_of = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        let mut config = Self::default();
        if let Some(path) = value_of(DB_PATH_VAR) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = value_of(LOG_LEVEL_VAR) {
            config.log_level = parse_level(LOG_LEVEL_VAR, &level)?;
        }
        if let Some(dir) = value_of(LOG_DIR_VAR) {
            config.log_dir = Some(parse_log_dir(LOG_DIR_VAR, &dir)?);
        }
        Ok(config)
    }

    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = path.into();
        self
    }

    pub fn with_log_level(mut self, level: &str) -> Result<Self, ConfigError> {
        self.log_level = parse_level("--log-level", level)?;
        Ok(self)
    }

    pub fn with_log_dir(mut self, dir: &str) -> Result<Self, ConfigError> {
        self.log_dir = Some(parse_log_dir("--log-dir", dir)?);
        Ok(self)
    }
}

fn parse_level(source_name: &'static str, value: &str) -> Result<&'static str, ConfigError> {
    normalize_level(value).map_err(|_| ConfigError::InvalidLogLevel {
        source_name,
        value: value.to_string(),
    })
}

fn parse_log_dir(source_name: &'static str, value: &str) -> Result<PathBuf, ConfigError> {
    let path = PathBuf::from(value.trim());
    if !path.is_absolute() {
        return Err(ConfigError::RelativeLogDir {
            source_name,
            value: value.to_string(),
        });
    }
    Ok(path)
}
