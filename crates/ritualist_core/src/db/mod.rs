//! SQLite storage for habits, categories, logs and the user profile.
//!
//! # Responsibility
//! - Open connections with `foreign_keys=ON` and a busy timeout.
//! - Apply schema migrations in order: `0001_init` (categories, habits,
//!   habit_logs, migration_events), then `0002_user_profile`.
//! - Expose the recorded migration history for the debug menu.
//!
//! # Invariants
//! - Schema version is mirrored to `PRAGMA user_version`; a newer database is
//!   rejected with [`DbError::UnsupportedSchemaVersion`].
//! - Each applied step leaves one `migration_events` row.
//! - Repositories only see connections whose migrations succeeded.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use migrations::list_migration_events;
pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
