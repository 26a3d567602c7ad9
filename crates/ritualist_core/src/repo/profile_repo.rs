//! User profile repository contract and SQLite implementation.
//!
//! # Invariants
//! - At most one row lives in `user_profile`.
//! - `save_profile` validates before writing and bumps `updated_at`.

use crate::model::profile::{AgeGroup, AppearanceMode, DisplayTimezoneMode, Gender, UserProfile};
use crate::repo::habit_repo::{parse_uuid, RepoError, RepoResult};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

const PROFILE_SELECT_SQL: &str = "SELECT
    uuid,
    name,
    avatar_image_data,
    appearance,
    gender,
    age_group,
    display_timezone_mode,
    home_timezone,
    custom_timezone,
    created_at,
    updated_at
FROM user_profile";

/// Load/save port for the local user profile.
pub trait ProfileRepository {
    /// Returns the stored profile, creating a default one on first use.
    fn load_profile(&self) -> RepoResult<UserProfile>;
    /// Validates and persists `profile`, returning the stored copy.
    fn save_profile(&self, profile: &UserProfile) -> RepoResult<UserProfile>;
}

/// SQLite-backed profile repository.
pub struct SqliteProfileRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProfileRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ProfileRepository for SqliteProfileRepository<'_> {
    fn load_profile(&self) -> RepoResult<UserProfile> {
        let existing = self
            .conn
            .query_row(
                &format!("{PROFILE_SELECT_SQL} ORDER BY created_at ASC LIMIT 1;"),
                [],
                |row| Ok(read_profile_columns(row)),
            )
            .optional()?;
        if let Some(columns) = existing {
            return columns?.into_profile();
        }

        let profile = UserProfile::new(Utc::now().timestamp_millis());
        write_profile(self.conn, &profile)?;
        Ok(profile)
    }

    fn save_profile(&self, profile: &UserProfile) -> RepoResult<UserProfile> {
        profile.validate().into_result()?;

        let mut stored = profile.clone();
        stored.updated_at = Utc::now().timestamp_millis().max(profile.created_at);

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "DELETE FROM user_profile WHERE uuid <> ?1;",
            [stored.id.to_string()],
        )?;
        write_profile(&tx, &stored)?;
        tx.commit()?;
        Ok(stored)
    }
}

fn write_profile(conn: &Connection, profile: &UserProfile) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO user_profile (
            uuid,
            name,
            avatar_image_data,
            appearance,
            gender,
            age_group,
            display_timezone_mode,
            home_timezone,
            custom_timezone,
            created_at,
            updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
        ON CONFLICT(uuid) DO UPDATE SET
            name = excluded.name,
            avatar_image_data = excluded.avatar_image_data,
            appearance = excluded.appearance,
            gender = excluded.gender,
            age_group = excluded.age_group,
            display_timezone_mode = excluded.display_timezone_mode,
            home_timezone = excluded.home_timezone,
            custom_timezone = excluded.custom_timezone,
            updated_at = excluded.updated_at;",
        params![
            profile.id.to_string(),
            profile.name.trim(),
            profile.avatar_image_data.as_deref(),
            profile.appearance.as_str(),
            profile.gender.map(|gender| gender.as_str()),
            profile.age_group.map(|group| group.as_str()),
            profile.display_timezone_mode.as_str(),
            profile.home_timezone.as_deref(),
            profile.custom_timezone.as_deref(),
            profile.created_at,
            profile.updated_at,
        ],
    )?;
    Ok(())
}

/// Raw column values, decoded outside the rusqlite row callback so enum
/// parse failures surface as `RepoError::InvalidData`.
struct ProfileColumns {
    uuid: String,
    name: String,
    avatar_image_data: Option<Vec<u8>>,
    appearance: String,
    gender: Option<String>,
    age_group: Option<String>,
    display_timezone_mode: String,
    home_timezone: Option<String>,
    custom_timezone: Option<String>,
    created_at: i64,
    updated_at: i64,
}

fn read_profile_columns(row: &Row<'_>) -> RepoResult<ProfileColumns> {
    Ok(ProfileColumns {
        uuid: row.get("uuid")?,
        name: row.get("name")?,
        avatar_image_data: row.get("avatar_image_data")?,
        appearance: row.get("appearance")?,
        gender: row.get("gender")?,
        age_group: row.get("age_group")?,
        display_timezone_mode: row.get("display_timezone_mode")?,
        home_timezone: row.get("home_timezone")?,
        custom_timezone: row.get("custom_timezone")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

impl ProfileColumns {
    fn into_profile(self) -> RepoResult<UserProfile> {
        let appearance = AppearanceMode::parse(&self.appearance).ok_or_else(|| {
            invalid_column("user_profile.appearance", &self.appearance)
        })?;
        let display_timezone_mode = DisplayTimezoneMode::parse(&self.display_timezone_mode)
            .ok_or_else(|| {
                invalid_column(
                    "user_profile.display_timezone_mode",
                    &self.display_timezone_mode,
                )
            })?;
        let gender = match self.gender.as_deref() {
            Some(value) => Some(
                Gender::parse(value)
                    .ok_or_else(|| invalid_column("user_profile.gender", value))?,
            ),
            None => None,
        };
        let age_group = match self.age_group.as_deref() {
            Some(value) => Some(
                AgeGroup::parse(value)
                    .ok_or_else(|| invalid_column("user_profile.age_group", value))?,
            ),
            None => None,
        };

        Ok(UserProfile {
            id: parse_uuid(&self.uuid, "user_profile.uuid")?,
            name: self.name,
            avatar_image_data: self.avatar_image_data,
            appearance,
            gender,
            age_group,
            display_timezone_mode,
            home_timezone: self.home_timezone,
            custom_timezone: self.custom_timezone,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn invalid_column(column: &str, value: &str) -> RepoError {
    RepoError::InvalidData(format!("invalid value `{value}` in {column}"))
}
