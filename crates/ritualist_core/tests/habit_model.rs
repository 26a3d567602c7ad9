use chrono::NaiveDate;
use ritualist_core::{
    AgeGroup, Habit, HabitKind, HabitSchedule, SubscriptionPlan, UserProfile, ValidationResult,
};
use serde_json::json;

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
}

#[test]
fn habit_constructors_set_defaults() {
    let habit = Habit::binary("Stretch", start());

    assert!(!habit.id.is_nil());
    assert_eq!(habit.kind, HabitKind::Binary);
    assert_eq!(habit.schedule, HabitSchedule::Daily);
    assert_eq!(habit.color_hex, Habit::DEFAULT_COLOR_HEX);
    assert_eq!(habit.daily_target, None);
    assert!(habit.is_active);

    let numeric = Habit::numeric("Water", 8.0, "glasses", start());
    assert_eq!(numeric.kind, HabitKind::Numeric);
    assert_eq!(numeric.daily_target, Some(8.0));
    assert_eq!(numeric.unit_label.as_deref(), Some("glasses"));
}

#[test]
fn archive_and_restore_toggle_active_flag() {
    let mut habit = Habit::binary("Stretch", start());
    habit.archive();
    assert!(!habit.is_active);
    habit.restore();
    assert!(habit.is_active);
}

#[test]
fn schedule_wire_shape_is_tagged() {
    assert_eq!(
        serde_json::to_value(HabitSchedule::Daily).unwrap(),
        json!({ "type": "daily" })
    );
    assert_eq!(
        serde_json::to_value(HabitSchedule::days_of_week([5, 1])).unwrap(),
        json!({ "type": "days_of_week", "days": [1, 5] })
    );
}

#[test]
fn habit_json_uses_iso_dates_and_snake_case_kind() {
    let habit = Habit::numeric("Water", 8.0, "glasses", start());
    let value = serde_json::to_value(&habit).unwrap();

    assert_eq!(value["kind"], "numeric");
    assert_eq!(value["start_date"], "2026-03-01");
    assert_eq!(value["end_date"], serde_json::Value::Null);

    let decoded: Habit = serde_json::from_value(value).unwrap();
    assert_eq!(decoded, habit);
}

#[test]
fn validation_result_wire_shape() {
    assert_eq!(
        serde_json::to_value(ValidationResult::Valid).unwrap(),
        json!({ "status": "valid" })
    );
    assert_eq!(
        serde_json::to_value(ValidationResult::invalid("nope")).unwrap(),
        json!({ "status": "invalid", "reason": "nope" })
    );
}

#[test]
fn plan_and_profile_defaults() {
    assert_eq!(SubscriptionPlan::default(), SubscriptionPlan::Free);
    assert_eq!(SubscriptionPlan::Free.max_habits(), Some(5));
    assert_eq!(SubscriptionPlan::Annual.max_habits(), None);

    let profile = UserProfile::new(1_000);
    assert_eq!(profile.display_name(), "Ritualist user");
    assert!(profile.validate().is_valid());
    assert_eq!(AgeGroup::parse("65_plus"), Some(AgeGroup::Over65));
}
