//! Habit field and composite validation.

use crate::constants::{
    MAX_DAILY_TARGET, MAX_HABIT_NAME_LENGTH, MAX_UNIT_LABEL_LENGTH, MIN_DAILY_TARGET,
};
use crate::model::habit::{Habit, HabitKind, HabitSchedule};
use crate::validation::{validate_emoji_shape, validate_required_text, ValidationResult};
use chrono::NaiveDate;

pub fn validate_name(name: &str) -> ValidationResult {
    validate_required_text(name, "Habit name", MAX_HABIT_NAME_LENGTH)
}

/// Emoji is optional for habits; when present it must look like one emoji.
pub fn validate_emoji(emoji: Option<&str>) -> ValidationResult {
    match emoji {
        None => ValidationResult::Valid,
        Some(value) => validate_emoji_shape(value, "Habit"),
    }
}

/// Target must lie in `[MIN_DAILY_TARGET, MAX_DAILY_TARGET]`.
pub fn validate_daily_target(target: f64) -> ValidationResult {
    // NaN fails both comparisons and falls through to invalid.
    if (MIN_DAILY_TARGET..=MAX_DAILY_TARGET).contains(&target) {
        ValidationResult::Valid
    } else {
        ValidationResult::invalid(format!(
            "Daily target must be between {MIN_DAILY_TARGET} and {MAX_DAILY_TARGET}"
        ))
    }
}

pub fn validate_schedule(schedule: &HabitSchedule) -> ValidationResult {
    match schedule {
        HabitSchedule::Daily => ValidationResult::Valid,
        HabitSchedule::DaysOfWeek { days } => {
            if days.is_empty() {
                return ValidationResult::invalid("At least one day must be selected");
            }
            if days.iter().any(|day| !(1..=7).contains(day)) {
                return ValidationResult::invalid("Days of week must be between 1 and 7");
            }
            ValidationResult::Valid
        }
        HabitSchedule::TimesPerWeek { count } => {
            if *count == 0 || *count > 7 {
                ValidationResult::invalid("Times per week must be between 1 and 7")
            } else {
                ValidationResult::Valid
            }
        }
    }
}

/// Numeric habits need a short unit label; binary habits ignore it.
pub fn validate_unit_label(unit_label: Option<&str>, kind: HabitKind) -> ValidationResult {
    if kind == HabitKind::Binary {
        return ValidationResult::Valid;
    }
    match unit_label {
        None => ValidationResult::invalid("Unit label cannot be empty"),
        Some(label) => validate_required_text(label, "Unit label", MAX_UNIT_LABEL_LENGTH),
    }
}

pub fn validate_date_range(start: NaiveDate, end: Option<NaiveDate>) -> ValidationResult {
    match end {
        Some(end) if end < start => {
            ValidationResult::invalid("End date cannot be before start date")
        }
        _ => ValidationResult::Valid,
    }
}

/// Validates a whole habit.
///
/// Order: name, emoji, schedule, target (numeric only), unit label, dates.
/// The first failure wins.
pub fn validate_habit(habit: &Habit) -> ValidationResult {
    validate_name(&habit.name)
        .and_then(|| validate_emoji(habit.emoji.as_deref()))
        .and_then(|| validate_schedule(&habit.schedule))
        .and_then(|| match (habit.kind, habit.daily_target) {
            (HabitKind::Binary, _) => ValidationResult::Valid,
            (HabitKind::Numeric, None) => {
                ValidationResult::invalid("Numeric habits require a daily target")
            }
            (HabitKind::Numeric, Some(target)) => validate_daily_target(target),
        })
        .and_then(|| validate_unit_label(habit.unit_label.as_deref(), habit.kind))
        .and_then(|| validate_date_range(habit.start_date, habit.end_date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::habit::Habit;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid date")
    }

    #[test]
    fn empty_and_whitespace_names_are_invalid() {
        assert_eq!(
            validate_name(""),
            ValidationResult::invalid("Habit name cannot be empty")
        );
        for name in [" ", "\t", "\n  \t"] {
            assert!(!validate_name(name).is_valid(), "{name:?} should be invalid");
        }
    }

    #[test]
    fn name_length_boundary() {
        assert!(validate_name(&"a".repeat(MAX_HABIT_NAME_LENGTH)).is_valid());
        assert_eq!(
            validate_name(&"a".repeat(MAX_HABIT_NAME_LENGTH + 1)).error_message(),
            Some("Habit name cannot exceed 30 characters")
        );
    }

    #[test]
    fn name_is_trimmed_before_length_check() {
        let padded = format!("   {}   ", "a".repeat(MAX_HABIT_NAME_LENGTH));
        assert!(validate_name(&padded).is_valid());
    }

    #[test]
    fn daily_target_bounds_are_inclusive() {
        assert!(validate_daily_target(MIN_DAILY_TARGET).is_valid());
        assert!(validate_daily_target(MAX_DAILY_TARGET).is_valid());
        assert!(!validate_daily_target(MIN_DAILY_TARGET - 0.01).is_valid());
        assert!(!validate_daily_target(MAX_DAILY_TARGET + 0.01).is_valid());
        assert!(!validate_daily_target(f64::NAN).is_valid());
    }

    #[test]
    fn schedule_rules() {
        assert!(validate_schedule(&HabitSchedule::Daily).is_valid());
        assert!(!validate_schedule(&HabitSchedule::days_of_week([])).is_valid());
        assert!(validate_schedule(&HabitSchedule::days_of_week([1, 2, 3, 4, 5, 6, 7])).is_valid());
        assert!(validate_schedule(&HabitSchedule::days_of_week([6, 7])).is_valid());
        assert!(!validate_schedule(&HabitSchedule::days_of_week([0, 3])).is_valid());
        assert!(!validate_schedule(&HabitSchedule::days_of_week([3, 8])).is_valid());

        assert!(!validate_schedule(&HabitSchedule::TimesPerWeek { count: 0 }).is_valid());
        assert!(!validate_schedule(&HabitSchedule::TimesPerWeek { count: 8 }).is_valid());
        for count in 1..=7 {
            assert!(validate_schedule(&HabitSchedule::TimesPerWeek { count }).is_valid());
        }
    }

    #[test]
    fn unit_label_only_required_for_numeric() {
        assert!(validate_unit_label(None, HabitKind::Binary).is_valid());
        assert!(!validate_unit_label(None, HabitKind::Numeric).is_valid());
        assert!(!validate_unit_label(Some("  "), HabitKind::Numeric).is_valid());
        assert!(validate_unit_label(Some("km"), HabitKind::Numeric).is_valid());
    }

    #[test]
    fn composite_reports_first_failure_in_fixed_order() {
        let mut habit = Habit::numeric("", 0.0, "", start());
        habit.emoji = Some("abc".to_string());
        habit.schedule = HabitSchedule::days_of_week([]);
        assert_eq!(
            validate_habit(&habit).error_message(),
            Some("Habit name cannot be empty")
        );

        habit.name = "Read".to_string();
        assert_eq!(
            validate_habit(&habit).error_message(),
            Some("Habit emoji must be a single emoji")
        );

        habit.emoji = Some("📚".to_string());
        assert_eq!(
            validate_habit(&habit).error_message(),
            Some("At least one day must be selected")
        );

        habit.schedule = HabitSchedule::Daily;
        assert!(validate_habit(&habit)
            .error_message()
            .is_some_and(|reason| reason.starts_with("Daily target")));

        habit.daily_target = Some(20.0);
        assert_eq!(
            validate_habit(&habit).error_message(),
            Some("Unit label cannot be empty")
        );

        habit.unit_label = Some("pages".to_string());
        habit.end_date = NaiveDate::from_ymd_opt(2026, 2, 1);
        assert_eq!(
            validate_habit(&habit).error_message(),
            Some("End date cannot be before start date")
        );

        habit.end_date = None;
        assert!(validate_habit(&habit).is_valid());
    }

    #[test]
    fn numeric_habit_without_target_is_invalid() {
        let mut habit = Habit::numeric("Water", 8.0, "glasses", start());
        habit.daily_target = None;
        assert_eq!(
            validate_habit(&habit).error_message(),
            Some("Numeric habits require a daily target")
        );
    }

    #[test]
    fn binary_habit_ignores_target_and_unit() {
        let mut habit = Habit::binary("Meditate", start());
        habit.daily_target = Some(-3.0);
        assert!(validate_habit(&habit).is_valid());
    }
}
