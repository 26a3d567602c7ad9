//! Habit log validation.
//!
//! Date checks compare whole UTC days: a log may be dated today or up to one
//! calendar year back, inclusive.

use crate::constants::{LOG_DATE_MAX_PAST_YEARS, MAX_DAILY_TARGET};
use crate::model::habit::{Habit, HabitKind};
use crate::model::habit_log::HabitLog;
use crate::validation::ValidationResult;
use chrono::{DateTime, Months, NaiveDate, Utc};

/// Checks a log value against the habit kind.
///
/// Binary habits accept a missing value or one in `[0, 1]`. Numeric habits
/// require a value in `[0, MAX_DAILY_TARGET]`.
pub fn validate_log_value(value: Option<f64>, habit: &Habit) -> ValidationResult {
    match (habit.kind, value) {
        (HabitKind::Binary, None) => ValidationResult::Valid,
        (HabitKind::Binary, Some(value)) => {
            if (0.0..=1.0).contains(&value) {
                ValidationResult::Valid
            } else {
                ValidationResult::invalid("Binary habit value must be between 0 and 1")
            }
        }
        (HabitKind::Numeric, None) => {
            ValidationResult::invalid("Numeric habits require a value")
        }
        (HabitKind::Numeric, Some(value)) => {
            if (0.0..=MAX_DAILY_TARGET).contains(&value) {
                ValidationResult::Valid
            } else {
                ValidationResult::invalid(format!(
                    "Value must be between 0 and {MAX_DAILY_TARGET}"
                ))
            }
        }
    }
}

/// Checks a log date against the current UTC day.
pub fn validate_log_date(date: DateTime<Utc>) -> ValidationResult {
    validate_log_date_at(date, Utc::now().date_naive())
}

/// Checks a log date against an explicit `today`.
pub fn validate_log_date_at(date: DateTime<Utc>, today: NaiveDate) -> ValidationResult {
    let log_day = date.date_naive();
    if log_day > today {
        return ValidationResult::invalid("Cannot log habits for future dates");
    }
    // Feb 29 clamps to Feb 28 of the previous year.
    let earliest = today
        .checked_sub_months(Months::new(12 * LOG_DATE_MAX_PAST_YEARS))
        .unwrap_or(NaiveDate::MIN);
    if log_day < earliest {
        return ValidationResult::invalid("Cannot log habits more than one year in the past");
    }
    ValidationResult::Valid
}

/// Validates a log for `habit` against the current UTC day.
pub fn validate_log(log: &HabitLog, habit: &Habit) -> ValidationResult {
    validate_log_at(log, habit, Utc::now().date_naive())
}

/// Validates a log for `habit`: ownership, then value, then date.
pub fn validate_log_at(log: &HabitLog, habit: &Habit, today: NaiveDate) -> ValidationResult {
    if log.habit_id != habit.id {
        return ValidationResult::invalid("Log does not belong to this habit");
    }
    validate_log_value(log.value, habit).and_then(|| validate_log_date_at(log.date, today))
}
