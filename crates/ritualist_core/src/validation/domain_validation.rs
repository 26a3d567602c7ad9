//! Aggregate validation over the whole habit/category state.

use crate::model::category::HabitCategory;
use crate::model::habit::Habit;
use crate::model::plan::SubscriptionPlan;
use crate::validation::category_validation::validate_category;
use crate::validation::habit_validation::validate_habit;
use crate::validation::ValidationResult;

const FAILURE_SEPARATOR: &str = "; ";

/// Validates every habit and category plus the plan habit limit.
///
/// Unlike the per-entity validators this never stops early: every failure is
/// collected and joined into one reason.
pub fn validate_domain_state(
    habits: &[Habit],
    categories: &[HabitCategory],
    plan: SubscriptionPlan,
) -> ValidationResult {
    let failures = domain_state_failures(habits, categories, plan);
    if failures.is_empty() {
        ValidationResult::Valid
    } else {
        ValidationResult::invalid(failures.join(FAILURE_SEPARATOR))
    }
}

/// Lists every failure `validate_domain_state` would report, in order.
pub fn domain_state_failures(
    habits: &[Habit],
    categories: &[HabitCategory],
    plan: SubscriptionPlan,
) -> Vec<String> {
    let mut failures = Vec::new();

    for habit in habits {
        if let Some(reason) = validate_habit(habit).error_message() {
            failures.push(format!("Habit '{}': {reason}", habit.name.trim()));
        }
    }

    for category in categories {
        if let Some(reason) = validate_category(category).error_message() {
            failures.push(format!("Category '{}': {reason}", category.name.trim()));
        }
    }

    if let Some(max) = plan.max_habits() {
        if habits.len() > max {
            failures.push(format!("Habit limit exceeded: {} of {max}", habits.len()));
        }
    }

    failures
}

#[cfg(test)]
mod tests {
    use super::{domain_state_failures, validate_domain_state};
    use crate::model::category::HabitCategory;
    use crate::model::habit::Habit;
    use crate::model::plan::SubscriptionPlan;
    use chrono::NaiveDate;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 5).expect("valid date")
    }

    #[test]
    fn empty_state_is_valid() {
        assert!(validate_domain_state(&[], &[], SubscriptionPlan::Free).is_valid());
    }

    #[test]
    fn collects_every_failure() {
        let habits = vec![
            Habit::binary("", start()),
            Habit::binary("Walk", start()),
            Habit::numeric("Water", 0.0, "glasses", start()),
        ];
        let categories = vec![HabitCategory::new("Health", "", 0)];

        let result = validate_domain_state(&habits, &categories, SubscriptionPlan::Free);
        let reason = result.error_message().expect("state should be invalid");
        assert_eq!(reason.split("; ").count(), 3);
        assert!(reason.contains("Habit '': Habit name cannot be empty"));
        assert!(reason.contains("Habit 'Water': Daily target must be between"));
        assert!(reason.contains("Category 'Health': Category emoji cannot be empty"));
    }

    #[test]
    fn reports_plan_limit_only_for_limited_plans() {
        let habits: Vec<Habit> = (0..6)
            .map(|index| Habit::binary(format!("Habit {index}"), start()))
            .collect();

        let result = validate_domain_state(&habits, &[], SubscriptionPlan::Free);
        assert_eq!(result.error_message(), Some("Habit limit exceeded: 6 of 5"));

        assert!(validate_domain_state(&habits, &[], SubscriptionPlan::Annual).is_valid());
        assert!(validate_domain_state(&habits[..5], &[], SubscriptionPlan::Free).is_valid());
    }

    #[test]
    fn failure_list_keeps_separator_inside_names() {
        let habits = vec![Habit::numeric("Run; swim", 0.0, "km", start())];
        let categories = vec![HabitCategory::new("Body; mind", "", 0)];

        let failures = domain_state_failures(&habits, &categories, SubscriptionPlan::Free);
        assert_eq!(failures.len(), 2);
        assert!(failures[0].starts_with("Habit 'Run; swim': "));
        assert!(failures[1].starts_with("Category 'Body; mind': "));
    }
}
