//! Settings screen state and use-cases.
//!
//! # Responsibility
//! - Own the state the settings screen renders (`SettingsState`).
//! - Orchestrate profile persistence, cloud sync and status lookups.
//!
//! # Invariants
//! - Every busy flag (`is_loading`, `is_saving`, `is_syncing`) is cleared on
//!   all exit paths, including failures.
//! - Failures are captured into `state.error` and logged; nothing is retried.
//! - A failed save keeps the in-memory edit so the user can retry.

use crate::model::plan::SubscriptionPlan;
use crate::model::profile::{AgeGroup, AppearanceMode, DisplayTimezoneMode, Gender, UserProfile};
use crate::repo::profile_repo::ProfileRepository;
use crate::service::ports::{
    CloudSync, PermissionStatus, PermissionStatusProvider, PortError, SubscriptionStatusProvider,
};
use log::{error, info};
use std::fmt::Display;
use std::sync::Arc;
use std::thread;

const PROFILE_NOT_LOADED: &str = "profile is not loaded";

/// Toast severity. `Info` marks a no-op outcome, e.g. a sync with nothing to transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastStyle {
    Success,
    Info,
}

/// Transient message shown after an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub style: ToastStyle,
}

impl Toast {
    fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            style: ToastStyle::Success,
        }
    }

    fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            style: ToastStyle::Info,
        }
    }
}

/// State rendered by the settings screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsState {
    pub profile: Option<UserProfile>,
    pub is_loading: bool,
    pub is_saving: bool,
    pub is_syncing: bool,
    pub error: Option<String>,
    pub toast: Option<Toast>,
    pub notification_status: PermissionStatus,
    pub location_status: PermissionStatus,
    pub plan: SubscriptionPlan,
    /// Epoch milliseconds of the last successful cloud sync.
    pub last_sync_at: Option<i64>,
}

/// Platform ports used by the settings screen.
#[derive(Clone)]
pub struct SettingsPorts {
    pub cloud: Arc<dyn CloudSync>,
    pub permissions: Arc<dyn PermissionStatusProvider>,
    pub subscriptions: Arc<dyn SubscriptionStatusProvider>,
}

struct StatusSnapshot {
    notification: PermissionStatus,
    location: PermissionStatus,
    plan: Result<SubscriptionPlan, PortError>,
}

/// Settings use-case service.
pub struct SettingsService<R: ProfileRepository> {
    repo: R,
    ports: SettingsPorts,
    state: SettingsState,
}

impl<R: ProfileRepository> SettingsService<R> {
    pub fn new(repo: R, ports: SettingsPorts) -> Self {
        Self {
            repo,
            ports,
            state: SettingsState::default(),
        }
    }

    pub fn state(&self) -> &SettingsState {
        &self.state
    }

    /// Loads the profile, then permission and plan statuses in parallel.
    pub fn load(&mut self) {
        self.state.is_loading = true;
        self.state.error = None;

        match self.repo.load_profile() {
            Ok(profile) => self.state.profile = Some(profile),
            Err(err) => self.capture_error("load_profile", err),
        }

        match self.load_statuses() {
            Ok(snapshot) => {
                self.state.notification_status = snapshot.notification;
                self.state.location_status = snapshot.location;
                match snapshot.plan {
                    Ok(plan) => self.state.plan = plan,
                    Err(err) => self.capture_error("load_plan", err),
                }
            }
            Err(err) => self.capture_error("load_statuses", err),
        }
        self.state.last_sync_at = self.ports.cloud.last_sync_at();

        self.state.is_loading = false;
        info!(
            "event=settings_load module=service status={} plan={}",
            if self.state.error.is_none() { "ok" } else { "error" },
            self.state.plan.as_str()
        );
    }

    fn load_statuses(&self) -> Result<StatusSnapshot, PortError> {
        let permissions = self.ports.permissions.as_ref();
        let subscriptions = self.ports.subscriptions.as_ref();

        thread::scope(|scope| {
            let notification = scope.spawn(|| permissions.notification_status());
            let location = scope.spawn(|| permissions.location_status());
            let plan = scope.spawn(|| subscriptions.current_plan());

            let panicked = |name: &str| PortError::Failed(format!("{name} lookup panicked"));
            Ok(StatusSnapshot {
                notification: notification
                    .join()
                    .map_err(|_| panicked("notification status"))?,
                location: location.join().map_err(|_| panicked("location status"))?,
                plan: plan.join().map_err(|_| panicked("subscription plan"))?,
            })
        })
    }

    /// Validates and persists the current profile.
    pub fn save(&mut self) {
        let Some(profile) = self.state.profile.clone() else {
            self.capture_error("save_profile", PROFILE_NOT_LOADED);
            return;
        };
        if let Some(reason) = profile.validate().error_message() {
            self.capture_error("save_profile", reason);
            return;
        }

        self.state.is_saving = true;
        match self.repo.save_profile(&profile) {
            Ok(stored) => {
                self.state.profile = Some(stored);
                self.state.error = None;
                self.state.toast = Some(Toast::success("Profile saved"));
                info!("event=profile_save module=service status=ok");
            }
            Err(err) => self.capture_error("save_profile", err),
        }
        self.state.is_saving = false;
    }

    pub fn update_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.edit_profile(|profile| profile.name = name);
    }

    pub fn update_appearance(&mut self, appearance: AppearanceMode) {
        self.edit_profile(|profile| profile.appearance = appearance);
    }

    pub fn update_gender(&mut self, gender: Option<Gender>) {
        self.edit_profile(|profile| profile.gender = gender);
    }

    pub fn update_age_group(&mut self, age_group: Option<AgeGroup>) {
        self.edit_profile(|profile| profile.age_group = age_group);
    }

    /// Switches timezone display; `custom_timezone` is only kept for `Custom`.
    pub fn update_display_timezone_mode(
        &mut self,
        mode: DisplayTimezoneMode,
        custom_timezone: Option<String>,
    ) {
        self.edit_profile(|profile| {
            profile.display_timezone_mode = mode;
            profile.custom_timezone = match mode {
                DisplayTimezoneMode::Custom => custom_timezone,
                DisplayTimezoneMode::Current | DisplayTimezoneMode::Home => None,
            };
        });
    }

    pub fn update_avatar(&mut self, image_data: Vec<u8>) {
        self.edit_profile(|profile| profile.avatar_image_data = Some(image_data));
    }

    pub fn remove_avatar(&mut self) {
        self.edit_profile(|profile| profile.avatar_image_data = None);
    }

    /// Runs one cloud sync round and records its completion time.
    pub fn sync_with_cloud(&mut self) {
        self.state.is_syncing = true;
        match self.ports.cloud.sync_now() {
            Ok(summary) => {
                self.state.last_sync_at = Some(summary.completed_at);
                self.state.error = None;
                let message = format!("Synced {} records", summary.total_records());
                self.state.toast = Some(if summary.total_records() == 0 {
                    Toast::info(message)
                } else {
                    Toast::success(message)
                });
                info!(
                    "event=cloud_sync module=service status=ok uploaded={} downloaded={}",
                    summary.uploaded, summary.downloaded
                );
            }
            Err(err) => self.capture_error("sync_with_cloud", err),
        }
        self.state.is_syncing = false;
    }

    pub fn dismiss_toast(&mut self) {
        self.state.toast = None;
    }

    pub fn clear_error(&mut self) {
        self.state.error = None;
    }

    fn edit_profile(&mut self, edit: impl FnOnce(&mut UserProfile)) {
        match self.state.profile.as_mut() {
            Some(profile) => {
                edit(profile);
                self.save();
            }
            None => self.capture_error("edit_profile", PROFILE_NOT_LOADED),
        }
    }

    fn capture_error(&mut self, context: &str, err: impl Display) {
        let message = err.to_string();
        error!("event=settings_error module=service status=error context={context} error={message}");
        self.state.error = Some(message);
    }
}
