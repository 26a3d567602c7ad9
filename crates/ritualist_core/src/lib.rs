//! Core domain logic for Ritualist.
//! This crate is the single source of truth for habit business rules.

pub mod config;
pub mod constants;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validation;

pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::category::{CategoryId, HabitCategory};
pub use model::debug::{MigrationEvent, OfferCode, TestDataScenario};
pub use model::habit::{Habit, HabitId, HabitKind, HabitSchedule};
pub use model::habit_log::{HabitLog, LogId};
pub use model::plan::SubscriptionPlan;
pub use model::profile::{AgeGroup, AppearanceMode, DisplayTimezoneMode, Gender, UserProfile};
pub use repo::habit_repo::{HabitRepository, RepoError, RepoResult, SqliteHabitRepository};
pub use repo::profile_repo::{ProfileRepository, SqliteProfileRepository};
pub use service::debug_service::{DebugService, SeedSummary};
pub use service::habit_service::{HabitService, HabitServiceError};
pub use service::offer_codes::{OfferCodeCatalog, OfferCodeError};
pub use service::ports::{
    CloudSync, PermissionStatus, PermissionStatusProvider, PortError, PortResult,
    SubscriptionStatusProvider, SyncSummary,
};
pub use service::settings_service::{
    SettingsPorts, SettingsService, SettingsState, Toast, ToastStyle,
};
pub use validation::{ValidationError, ValidationResult};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
