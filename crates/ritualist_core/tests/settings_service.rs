use ritualist_core::db::open_db_in_memory;
use ritualist_core::{
    AppearanceMode, CloudSync, DisplayTimezoneMode, PermissionStatus, PermissionStatusProvider,
    PortError, PortResult, ProfileRepository, RepoError, RepoResult, SettingsPorts,
    SettingsService, SqliteProfileRepository, SubscriptionPlan, SubscriptionStatusProvider,
    SyncSummary, ToastStyle, UserProfile,
};
use std::sync::Arc;

struct FakeCloud {
    result: PortResult<SyncSummary>,
    last_sync_at: Option<i64>,
}

impl CloudSync for FakeCloud {
    fn sync_now(&self) -> PortResult<SyncSummary> {
        self.result.clone()
    }

    fn last_sync_at(&self) -> Option<i64> {
        self.last_sync_at
    }
}

struct FakePermissions;

impl PermissionStatusProvider for FakePermissions {
    fn notification_status(&self) -> PermissionStatus {
        PermissionStatus::Authorized
    }

    fn location_status(&self) -> PermissionStatus {
        PermissionStatus::Denied
    }
}

struct FakeSubscriptions(PortResult<SubscriptionPlan>);

impl SubscriptionStatusProvider for FakeSubscriptions {
    fn current_plan(&self) -> PortResult<SubscriptionPlan> {
        self.0.clone()
    }
}

fn ports(
    sync: PortResult<SyncSummary>,
    plan: PortResult<SubscriptionPlan>,
) -> SettingsPorts {
    SettingsPorts {
        cloud: Arc::new(FakeCloud {
            result: sync,
            last_sync_at: Some(1_700_000_000_000),
        }),
        permissions: Arc::new(FakePermissions),
        subscriptions: Arc::new(FakeSubscriptions(plan)),
    }
}

fn default_ports() -> SettingsPorts {
    ports(
        Ok(SyncSummary {
            uploaded: 3,
            downloaded: 4,
            completed_at: 1_800_000_000_000,
        }),
        Ok(SubscriptionPlan::Annual),
    )
}

/// Repository whose saves always fail, for error-path checks.
struct FailingSaveRepository {
    profile: UserProfile,
}

impl ProfileRepository for FailingSaveRepository {
    fn load_profile(&self) -> RepoResult<UserProfile> {
        Ok(self.profile.clone())
    }

    fn save_profile(&self, _profile: &UserProfile) -> RepoResult<UserProfile> {
        Err(RepoError::InvalidData("disk full".to_string()))
    }
}

#[test]
fn load_populates_profile_statuses_and_plan() {
    let conn = open_db_in_memory().unwrap();
    let mut service = SettingsService::new(SqliteProfileRepository::new(&conn), default_ports());

    service.load();

    let state = service.state();
    assert!(!state.is_loading);
    assert!(state.error.is_none());
    assert!(state.profile.is_some());
    assert_eq!(state.notification_status, PermissionStatus::Authorized);
    assert_eq!(state.location_status, PermissionStatus::Denied);
    assert_eq!(state.plan, SubscriptionPlan::Annual);
    assert_eq!(state.last_sync_at, Some(1_700_000_000_000));
}

#[test]
fn plan_lookup_failure_is_captured_without_losing_profile() {
    let conn = open_db_in_memory().unwrap();
    let mut service = SettingsService::new(
        SqliteProfileRepository::new(&conn),
        ports(
            Err(PortError::Unavailable("offline".to_string())),
            Err(PortError::Unavailable("store offline".to_string())),
        ),
    );

    service.load();

    let state = service.state();
    assert!(!state.is_loading);
    assert!(state.profile.is_some());
    assert_eq!(state.plan, SubscriptionPlan::Free);
    assert_eq!(
        state.error.as_deref(),
        Some("service unavailable: store offline")
    );
}

#[test]
fn updates_are_saved_and_toasted() {
    let conn = open_db_in_memory().unwrap();
    let mut service = SettingsService::new(SqliteProfileRepository::new(&conn), default_ports());
    service.load();

    service.update_name("Ada");
    service.update_appearance(AppearanceMode::Dark);

    let state = service.state();
    assert!(!state.is_saving);
    assert!(state.error.is_none());
    let toast = state.toast.clone().unwrap();
    assert_eq!(toast.message, "Profile saved");
    assert_eq!(toast.style, ToastStyle::Success);

    let stored = SqliteProfileRepository::new(&conn).load_profile().unwrap();
    assert_eq!(stored.name, "Ada");
    assert_eq!(stored.appearance, AppearanceMode::Dark);

    service.dismiss_toast();
    assert!(service.state().toast.is_none());
}

#[test]
fn invalid_edit_is_rejected_and_kept_in_memory() {
    let conn = open_db_in_memory().unwrap();
    let mut service = SettingsService::new(SqliteProfileRepository::new(&conn), default_ports());
    service.load();

    service.update_display_timezone_mode(DisplayTimezoneMode::Custom, None);

    let state = service.state();
    assert!(!state.is_saving);
    assert_eq!(
        state.error.as_deref(),
        Some("Custom timezone mode requires a timezone")
    );
    assert_eq!(
        state.profile.as_ref().unwrap().display_timezone_mode,
        DisplayTimezoneMode::Custom
    );
    let stored = SqliteProfileRepository::new(&conn).load_profile().unwrap();
    assert_eq!(stored.display_timezone_mode, DisplayTimezoneMode::Current);

    service.update_display_timezone_mode(
        DisplayTimezoneMode::Custom,
        Some("Europe/Lisbon".to_string()),
    );
    assert!(service.state().error.is_none());

    service.update_display_timezone_mode(
        DisplayTimezoneMode::Home,
        Some("Europe/Lisbon".to_string()),
    );
    assert_eq!(service.state().profile.as_ref().unwrap().custom_timezone, None);
}

#[test]
fn oversized_avatar_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let mut service = SettingsService::new(SqliteProfileRepository::new(&conn), default_ports());
    service.load();

    service.update_avatar(vec![0u8; 5 * 1024 * 1024 + 1]);
    assert_eq!(
        service.state().error.as_deref(),
        Some("Avatar image is too large")
    );

    service.clear_error();
    service.remove_avatar();
    assert!(service.state().error.is_none());
    assert_eq!(
        service.state().profile.as_ref().unwrap().avatar_image_data,
        None
    );
}

#[test]
fn repository_failure_clears_saving_flag() {
    let repo = FailingSaveRepository {
        profile: UserProfile::new(0),
    };
    let mut service = SettingsService::new(repo, default_ports());
    service.load();

    service.update_name("Grace");

    let state = service.state();
    assert!(!state.is_saving);
    assert!(state.toast.is_none());
    assert_eq!(
        state.error.as_deref(),
        Some("invalid persisted data: disk full")
    );
    assert_eq!(state.profile.as_ref().unwrap().name, "Grace");
}

#[test]
fn edits_before_load_report_missing_profile() {
    let conn = open_db_in_memory().unwrap();
    let mut service = SettingsService::new(SqliteProfileRepository::new(&conn), default_ports());

    service.update_name("Ada");
    assert_eq!(service.state().error.as_deref(), Some("profile is not loaded"));
}

#[test]
fn sync_success_and_failure() {
    let conn = open_db_in_memory().unwrap();
    let mut service = SettingsService::new(SqliteProfileRepository::new(&conn), default_ports());

    service.sync_with_cloud();
    let state = service.state();
    assert!(!state.is_syncing);
    assert_eq!(state.last_sync_at, Some(1_800_000_000_000));
    assert_eq!(state.toast.as_ref().unwrap().message, "Synced 7 records");
    assert_eq!(state.toast.as_ref().unwrap().style, ToastStyle::Success);

    let mut failing = SettingsService::new(
        SqliteProfileRepository::new(&conn),
        ports(
            Err(PortError::Denied("not signed in".to_string())),
            Ok(SubscriptionPlan::Free),
        ),
    );
    failing.sync_with_cloud();
    let state = failing.state();
    assert!(!state.is_syncing);
    assert_eq!(state.last_sync_at, None);
    assert_eq!(
        state.error.as_deref(),
        Some("operation denied: not signed in")
    );
}

#[test]
fn empty_sync_shows_info_toast() {
    let conn = open_db_in_memory().unwrap();
    let mut service = SettingsService::new(
        SqliteProfileRepository::new(&conn),
        ports(
            Ok(SyncSummary {
                uploaded: 0,
                downloaded: 0,
                completed_at: 1_900_000_000_000,
            }),
            Ok(SubscriptionPlan::Free),
        ),
    );

    service.sync_with_cloud();

    let toast = service.state().toast.clone().unwrap();
    assert_eq!(toast.message, "Synced 0 records");
    assert_eq!(toast.style, ToastStyle::Info);
    assert_eq!(service.state().last_sync_at, Some(1_900_000_000_000));
}
