//! SQLite migration registry and executor.
//!
//! # Responsibility
//! - Register schema migrations in strictly increasing order.
//! - Apply pending migrations atomically.
//! - Record every applied step as a `MigrationEvent` for the debug menu.
//!
//! # Invariants
//! - `version` values must remain monotonic.
//! - Applied migration version is mirrored to `PRAGMA user_version`.
//! - `migration_events` is created by migration 1, so every step can be recorded.

use crate::db::{DbError, DbResult};
use crate::model::debug::MigrationEvent;
use chrono::Utc;
use log::info;
use rusqlite::{params, Connection};
use std::time::Instant;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        sql: include_str!("0001_init.sql"),
    },
    Migration {
        version: 2,
        sql: include_str!("0002_user_profile.sql"),
    },
];

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Applies all pending migrations on the provided connection.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current_version = current_user_version(conn)?;
    let latest = latest_version();

    if current_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }

    if current_version == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    let mut previous = current_version;
    for migration in MIGRATIONS {
        if migration.version <= current_version {
            continue;
        }

        let started_at = Instant::now();
        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
        let duration_ms = i64::try_from(started_at.elapsed().as_millis()).unwrap_or(i64::MAX);
        tx.execute(
            "INSERT INTO migration_events (from_version, to_version, applied_at, duration_ms)
             VALUES (?1, ?2, ?3, ?4);",
            params![previous, migration.version, Utc::now().timestamp_millis(), duration_ms],
        )?;
        info!(
            "event=db_migrate module=db status=ok from_version={} to_version={} duration_ms={}",
            previous, migration.version, duration_ms
        );
        previous = migration.version;
    }
    tx.commit()?;

    Ok(())
}

/// Lists recorded migration steps, oldest first.
pub fn list_migration_events(conn: &Connection) -> DbResult<Vec<MigrationEvent>> {
    let mut stmt = conn.prepare(
        "SELECT from_version, to_version, applied_at, duration_ms
         FROM migration_events
         ORDER BY id ASC;",
    )?;
    let events = stmt
        .query_map([], |row| {
            Ok(MigrationEvent {
                from_version: row.get(0)?,
                to_version: row.get(1)?,
                applied_at: row.get(2)?,
                duration_ms: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(events)
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
