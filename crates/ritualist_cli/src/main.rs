//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `ritualist_core` linkage with a deterministic probe.
//! - Validate exported domain snapshots (`validate <snapshot.json>`).
//!
//! # Exit codes
//! - `0`: probe printed, or snapshot valid.
//! - `1`: snapshot loaded but invalid.
//! - `2`: usage error, or snapshot unreadable.

use clap::{Parser, Subcommand};
use ritualist_core::validation::domain_validation::domain_state_failures;
use ritualist_core::{CoreConfig, Habit, HabitCategory, SubscriptionPlan};
use serde::Deserialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const EXIT_INVALID: u8 = 1;
const EXIT_LOAD_ERROR: u8 = 2;

#[derive(Parser)]
#[command(name = "ritualist_cli")]
#[command(about = "Ritualist core smoke probe and snapshot validator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an exported habit snapshot (JSON).
    Validate {
        /// Path to the snapshot file.
        path: PathBuf,
    },
}

/// Exported habit state as written by the app's debug export.
#[derive(Debug, Deserialize)]
struct DomainSnapshot {
    #[serde(default)]
    plan: SubscriptionPlan,
    #[serde(default)]
    habits: Vec<Habit>,
    #[serde(default)]
    categories: Vec<HabitCategory>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        None => {
            println!("ritualist_core ping={}", ritualist_core::ping());
            println!("ritualist_core version={}", ritualist_core::core_version());
            ExitCode::SUCCESS
        }
        Some(Commands::Validate { path }) => {
            init_logging_from_env();
            let stdout = std::io::stdout();
            let stderr = std::io::stderr();
            run_validate(&path, &mut stdout.lock(), &mut stderr.lock())
        }
    }
}

/// Loads and validates `path`, writing the report to `out` and load errors
/// to `err`. Returns the process exit code.
fn run_validate(path: &Path, out: &mut impl Write, err: &mut impl Write) -> ExitCode {
    let snapshot = match load_snapshot(path) {
        Ok(snapshot) => snapshot,
        Err(message) => {
            log::error!("event=snapshot_load module=cli status=error error={message}");
            let _ = writeln!(err, "{message}");
            return ExitCode::from(EXIT_LOAD_ERROR);
        }
    };

    let failures = validate_snapshot(&snapshot);
    log::info!(
        "event=snapshot_validate module=cli status={} habits={} categories={} failures={}",
        if failures.is_empty() { "ok" } else { "invalid" },
        snapshot.habits.len(),
        snapshot.categories.len(),
        failures.len()
    );

    let _ = write_report(&snapshot, &failures, out);
    if failures.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_INVALID)
    }
}

fn validate_snapshot(snapshot: &DomainSnapshot) -> Vec<String> {
    domain_state_failures(&snapshot.habits, &snapshot.categories, snapshot.plan)
}

fn write_report(
    snapshot: &DomainSnapshot,
    failures: &[String],
    out: &mut impl Write,
) -> std::io::Result<()> {
    if failures.is_empty() {
        return writeln!(
            out,
            "valid: {} habits, {} categories, plan={}",
            snapshot.habits.len(),
            snapshot.categories.len(),
            snapshot.plan.as_str()
        );
    }
    for failure in failures {
        writeln!(out, "invalid: {failure}")?;
    }
    Ok(())
}

fn load_snapshot(path: &Path) -> Result<DomainSnapshot, String> {
    let raw = std::fs::read_to_string(path)
        .map_err(|err| format!("failed to read snapshot `{}`: {err}", path.display()))?;
    serde_json::from_str(&raw)
        .map_err(|err| format!("failed to parse snapshot `{}`: {err}", path.display()))
}

/// Logging is best-effort for the CLI; failures are reported and ignored.
fn init_logging_from_env() {
    let result = CoreConfig::from_env().and_then(|config| {
        ritualist_core::init_logging(
            config.log_level.as_str(),
            &config.log_dir.to_string_lossy(),
        )
    });
    if let Err(err) = result {
        eprintln!("logging disabled: {err}");
    }
}
