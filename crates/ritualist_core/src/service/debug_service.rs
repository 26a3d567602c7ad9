//! Debug menu use-cases: migration history, seed data and data reset.

use crate::constants::FREE_MAX_HABITS;
use crate::db::{list_migration_events, DbError};
use crate::model::category::HabitCategory;
use crate::model::debug::{MigrationEvent, TestDataScenario};
use crate::model::habit::{Habit, HabitSchedule};
use crate::model::plan::SubscriptionPlan;
use crate::repo::habit_repo::SqliteHabitRepository;
use crate::service::habit_service::{HabitService, HabitServiceError};
use crate::service::offer_codes::OfferCodeCatalog;
use chrono::{Duration, NaiveDate, Utc};
use log::info;
use rusqlite::Connection;

/// Counts of records created by [`DebugService::populate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub categories: usize,
    pub habits: usize,
    pub logs: usize,
}

/// Debug service bound to one open database.
pub struct DebugService<'conn> {
    conn: &'conn Connection,
    habits: HabitService<SqliteHabitRepository<'conn>>,
    offer_codes: OfferCodeCatalog,
}

impl<'conn> DebugService<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            habits: HabitService::new(SqliteHabitRepository::new(conn)),
            offer_codes: OfferCodeCatalog::new(),
        }
    }

    pub fn migration_history(&self) -> Result<Vec<MigrationEvent>, DbError> {
        list_migration_events(self.conn)
    }

    pub fn offer_codes(&self) -> &OfferCodeCatalog {
        &self.offer_codes
    }

    pub fn offer_codes_mut(&mut self) -> &mut OfferCodeCatalog {
        &mut self.offer_codes
    }

    /// Seeds categories, habits and today's logs for `scenario`.
    ///
    /// Habit creation goes through the normal use-case path, so the plan
    /// allowance still applies.
    pub fn populate(
        &self,
        scenario: TestDataScenario,
        plan: SubscriptionPlan,
    ) -> Result<SeedSummary, HabitServiceError> {
        let today = Utc::now().date_naive();
        let start = today - Duration::days(30);
        let (categories, habits) = scenario_data(scenario, start);

        let mut summary = SeedSummary::default();
        for category in &categories {
            self.habits.create_category(category)?;
            summary.categories += 1;
        }
        for habit in &habits {
            self.habits.create_habit(habit, plan)?;
            summary.habits += 1;
        }
        if scenario == TestDataScenario::Typical {
            let now = Utc::now();
            for habit in &habits {
                let value = habit.daily_target.map(|target| (target / 2.0).floor());
                self.habits.log_progress(habit.id, value.or(Some(1.0)), now)?;
                summary.logs += 1;
            }
        }

        info!(
            "event=debug_populate module=service status=ok scenario={:?} categories={} habits={} logs={}",
            scenario, summary.categories, summary.habits, summary.logs
        );
        Ok(summary)
    }

    pub fn clear_all_data(&self) -> Result<(), HabitServiceError> {
        self.habits.clear_all()
    }
}

fn scenario_data(
    scenario: TestDataScenario,
    start: NaiveDate,
) -> (Vec<HabitCategory>, Vec<Habit>) {
    match scenario {
        TestDataScenario::Minimal => {
            let health = HabitCategory::new("Health", "💪", 0);
            let mut stretch = Habit::binary("Morning stretch", start);
            stretch.emoji = Some("🧘".to_string());
            stretch.category_id = Some(health.id);
            (vec![health], vec![stretch])
        }
        TestDataScenario::Typical => {
            let health = HabitCategory::new("Health", "💪", 0);
            let mind = HabitCategory::new("Mind", "🧠", 1);

            let mut stretch = Habit::binary("Morning stretch", start);
            stretch.emoji = Some("🧘".to_string());
            stretch.category_id = Some(health.id);

            let mut water = Habit::numeric("Drink water", 8.0, "glasses", start);
            water.emoji = Some("💧".to_string());
            water.category_id = Some(health.id);
            water.display_order = 1;

            let mut read = Habit::numeric("Read", 20.0, "pages", start);
            read.emoji = Some("📚".to_string());
            read.schedule = HabitSchedule::days_of_week([1, 3, 5]);
            read.category_id = Some(mind.id);
            read.display_order = 2;

            let mut journal = Habit::binary("Journal", start);
            journal.emoji = Some("✍️".to_string());
            journal.schedule = HabitSchedule::TimesPerWeek { count: 3 };
            journal.category_id = Some(mind.id);
            journal.display_order = 3;

            (vec![health, mind], vec![stretch, water, read, journal])
        }
        TestDataScenario::PlanLimit => {
            let general = HabitCategory::new("General", "⭐", 0);
            let habits = (1..=FREE_MAX_HABITS)
                .map(|index| {
                    let mut habit = Habit::binary(format!("Habit {index}"), start);
                    habit.category_id = Some(general.id);
                    habit.display_order = i32::try_from(index).unwrap_or(i32::MAX);
                    habit
                })
                .collect();
            (vec![general], habits)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::scenario_data;
    use crate::model::debug::TestDataScenario;
    use crate::model::plan::SubscriptionPlan;
    use crate::validation::domain_validation::validate_domain_state;
    use chrono::NaiveDate;

    #[test]
    fn every_scenario_passes_domain_validation() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).expect("valid date");
        for scenario in TestDataScenario::all() {
            let (categories, habits) = scenario_data(scenario, start);
            let result = validate_domain_state(&habits, &categories, SubscriptionPlan::Free);
            assert!(result.is_valid(), "{}: {result:?}", scenario.title());
        }
    }
}
