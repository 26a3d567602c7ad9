//! Process configuration resolved from the environment.
//!
//! | variable | default |
//! |---|---|
//! | `RITUALIST_DB_PATH` | `<temp>/ritualist.sqlite3` |
//! | `RITUALIST_LOG_LEVEL` | `default_log_level()` |
//! | `RITUALIST_LOG_DIR` | `<temp>/ritualist-logs` |
//!
//! Blank values are treated as unset.

use crate::logging::{default_log_level, LogLevel, LoggingError};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "RITUALIST_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "RITUALIST_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "RITUALIST_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "ritualist.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "ritualist-logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: LogLevel,
    pub log_dir: PathBuf,
}

impl CoreConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self, LoggingError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, LoggingError> {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let log_level = match non_blank(LOG_LEVEL_ENV) {
            Some(raw) => LogLevel::parse(&raw)?,
            None => default_log_level(),
        };
        let db_path = non_blank(DB_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));
        let log_dir = non_blank(LOG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME));

        Ok(Self {
            db_path,
            log_level,
            log_dir,
        })
    }
}
