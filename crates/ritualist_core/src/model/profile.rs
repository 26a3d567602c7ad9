//! User profile model edited from the settings screen.
//!
//! # Responsibility
//! - Define the single local user profile and its settings enums.
//! - Provide storage string mappings for each enum.
//!
//! # Invariants
//! - There is at most one profile per database.
//! - `Custom` timezone mode requires `custom_timezone`.

use crate::constants::{MAX_AVATAR_BYTES, MAX_PROFILE_NAME_LENGTH};
use crate::validation::ValidationResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ProfileId = Uuid;

macro_rules! storage_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            /// Returns the storage string representation.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }

            /// Parses the storage string representation.
            pub fn parse(value: &str) -> Option<Self> {
                match value {
                    $($text => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

/// Color scheme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppearanceMode {
    #[default]
    FollowSystem,
    Light,
    Dark,
}

storage_enum!(AppearanceMode {
    FollowSystem => "follow_system",
    Light => "light",
    Dark => "dark",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    NonBinary,
    PreferNotToSay,
}

storage_enum!(Gender {
    Male => "male",
    Female => "female",
    NonBinary => "non_binary",
    PreferNotToSay => "prefer_not_to_say",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeGroup {
    Under18,
    From18To24,
    From25To34,
    From35To44,
    From45To54,
    From55To64,
    Over65,
}

storage_enum!(AgeGroup {
    Under18 => "under_18",
    From18To24 => "18_24",
    From25To34 => "25_34",
    From35To44 => "35_44",
    From45To54 => "45_54",
    From55To64 => "55_64",
    Over65 => "65_plus",
});

/// Which timezone dates are rendered in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayTimezoneMode {
    /// Device timezone at render time.
    #[default]
    Current,
    /// The user's home timezone.
    Home,
    /// An explicit IANA identifier in `custom_timezone`.
    Custom,
}

storage_enum!(DisplayTimezoneMode {
    Current => "current",
    Home => "home",
    Custom => "custom",
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: ProfileId,
    pub name: String,
    pub avatar_image_data: Option<Vec<u8>>,
    pub appearance: AppearanceMode,
    pub gender: Option<Gender>,
    pub age_group: Option<AgeGroup>,
    pub display_timezone_mode: DisplayTimezoneMode,
    pub home_timezone: Option<String>,
    pub custom_timezone: Option<String>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
}

impl UserProfile {
    /// Creates an empty profile stamped with `now_ms`.
    pub fn new(now_ms: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            avatar_image_data: None,
            appearance: AppearanceMode::default(),
            gender: None,
            age_group: None,
            display_timezone_mode: DisplayTimezoneMode::default(),
            home_timezone: None,
            custom_timezone: None,
            created_at: now_ms,
            updated_at: now_ms,
        }
    }

    /// Checks field-level profile rules.
    pub fn validate(&self) -> ValidationResult {
        if self.name.trim().chars().count() > MAX_PROFILE_NAME_LENGTH {
            return ValidationResult::invalid(format!(
                "Profile name cannot exceed {MAX_PROFILE_NAME_LENGTH} characters"
            ));
        }
        if let Some(avatar) = &self.avatar_image_data {
            if avatar.len() > MAX_AVATAR_BYTES {
                return ValidationResult::invalid("Avatar image is too large");
            }
        }
        if self.display_timezone_mode == DisplayTimezoneMode::Custom
            && self
                .custom_timezone
                .as_deref()
                .map_or(true, |tz| tz.trim().is_empty())
        {
            return ValidationResult::invalid("Custom timezone mode requires a timezone");
        }
        ValidationResult::Valid
    }

    /// Returns the user-facing name, falling back when unset.
    pub fn display_name(&self) -> &str {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            "Ritualist user"
        } else {
            trimmed
        }
    }
}
