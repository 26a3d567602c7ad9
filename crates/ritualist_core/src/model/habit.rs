//! Habit domain model.
//!
//! # Responsibility
//! - Define the canonical habit record and its recurrence schedule.
//! - Provide constructors with stable defaults for binary/numeric habits.
//!
//! # Invariants
//! - `id` is stable and never reused for another habit.
//! - `is_active == false` is the archive tombstone; habits are never hard deleted.
//! - Numeric habits carry `daily_target` and `unit_label`; binary habits ignore both.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Stable identifier for habits.
pub type HabitId = Uuid;

/// How progress for a habit is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HabitKind {
    /// Done / not done for a day.
    Binary,
    /// Counted towards a daily target (e.g. glasses of water).
    Numeric,
}

impl HabitKind {
    /// Returns the storage string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Numeric => "numeric",
        }
    }

    /// Parses the storage string representation.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "binary" => Some(Self::Binary),
            "numeric" => Some(Self::Numeric),
            _ => None,
        }
    }
}

/// How often a habit recurs.
///
/// Weekdays use ISO numbering: `1` is Monday and `7` is Sunday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HabitSchedule {
    /// Every day.
    Daily,
    /// Only on the listed weekdays.
    DaysOfWeek { days: BTreeSet<u8> },
    /// Any `count` days within a week.
    TimesPerWeek { count: u8 },
}

impl HabitSchedule {
    /// Convenience constructor for weekday schedules.
    pub fn days_of_week(days: impl IntoIterator<Item = u8>) -> Self {
        Self::DaysOfWeek {
            days: days.into_iter().collect(),
        }
    }

    /// Returns whether the habit is expected on the given ISO weekday.
    ///
    /// `TimesPerWeek` habits may be completed on any day.
    pub fn is_expected_on(&self, iso_weekday: u8) -> bool {
        match self {
            Self::Daily | Self::TimesPerWeek { .. } => true,
            Self::DaysOfWeek { days } => days.contains(&iso_weekday),
        }
    }
}

/// Canonical habit record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: HabitId,
    pub name: String,
    pub emoji: Option<String>,
    /// `#RRGGBB` display color.
    pub color_hex: String,
    pub kind: HabitKind,
    /// Meaningful only when `kind == HabitKind::Numeric`.
    pub unit_label: Option<String>,
    /// Meaningful only when `kind == HabitKind::Numeric`.
    pub daily_target: Option<f64>,
    pub schedule: HabitSchedule,
    pub start_date: NaiveDate,
    /// Should be >= `start_date` when set.
    pub end_date: Option<NaiveDate>,
    pub is_active: bool,
    pub category_id: Option<Uuid>,
    pub display_order: i32,
}

impl Habit {
    /// Default display color for new habits.
    pub const DEFAULT_COLOR_HEX: &'static str = "#2DA44E";

    /// Creates a binary daily habit starting on `start_date`.
    pub fn binary(name: impl Into<String>, start_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            emoji: None,
            color_hex: Self::DEFAULT_COLOR_HEX.to_string(),
            kind: HabitKind::Binary,
            unit_label: None,
            daily_target: None,
            schedule: HabitSchedule::Daily,
            start_date,
            end_date: None,
            is_active: true,
            category_id: None,
            display_order: 0,
        }
    }

    /// Creates a numeric daily habit with a target and unit.
    pub fn numeric(
        name: impl Into<String>,
        daily_target: f64,
        unit_label: impl Into<String>,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            kind: HabitKind::Numeric,
            daily_target: Some(daily_target),
            unit_label: Some(unit_label.into()),
            ..Self::binary(name, start_date)
        }
    }

    /// Archives the habit (soft delete).
    pub fn archive(&mut self) {
        self.is_active = false;
    }

    pub fn restore(&mut self) {
        self.is_active = true;
    }
}

#[cfg(test)]
mod tests {
    use super::{Habit, HabitKind, HabitSchedule};
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn numeric_constructor_keeps_binary_defaults() {
        let habit = Habit::numeric("Water", 8.0, "glasses", day(2026, 1, 1));
        assert_eq!(habit.kind, HabitKind::Numeric);
        assert_eq!(habit.daily_target, Some(8.0));
        assert_eq!(habit.unit_label.as_deref(), Some("glasses"));
        assert_eq!(habit.schedule, HabitSchedule::Daily);
        assert!(habit.is_active);
    }

    #[test]
    fn weekday_schedule_only_expects_listed_days() {
        let schedule = HabitSchedule::days_of_week([1, 3, 5]);
        assert!(schedule.is_expected_on(3));
        assert!(!schedule.is_expected_on(2));
        assert!(HabitSchedule::TimesPerWeek { count: 2 }.is_expected_on(7));
    }

    #[test]
    fn kind_storage_strings_are_stable() {
        for kind in [HabitKind::Binary, HabitKind::Numeric] {
            assert_eq!(HabitKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(HabitKind::parse("counter"), None);
    }
}
