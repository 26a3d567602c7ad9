//! Habit use-case service.
//!
//! # Responsibility
//! - Provide create/update/archive/log entry points for habit screens.
//! - Enforce subscription plan limits on habit creation and reactivation.
//!
//! # Invariants
//! - Validation runs before any repository write.
//! - Plan limits count active habits only; archived habits do not count.

use crate::model::category::{CategoryId, HabitCategory};
use crate::model::habit::{Habit, HabitId};
use crate::model::habit_log::HabitLog;
use crate::model::plan::SubscriptionPlan;
use crate::repo::habit_repo::{HabitRepository, RepoError};
use crate::validation::category_validation::validate_category;
use crate::validation::domain_validation::validate_domain_state;
use crate::validation::habit_validation::validate_habit;
use crate::validation::log_validation::validate_log;
use crate::validation::ValidationResult;
use chrono::{DateTime, Utc};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for habit use-cases.
#[derive(Debug)]
pub enum HabitServiceError {
    /// Business-rule validation failed; carries the user-facing reason.
    Invalid(String),
    /// Creating another active habit would exceed the plan allowance.
    PlanLimitReached { max: usize },
    HabitNotFound(HabitId),
    Repo(RepoError),
}

impl Display for HabitServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(reason) => write!(f, "{reason}"),
            Self::PlanLimitReached { max } => {
                write!(f, "habit limit reached: current plan allows {max} active habits")
            }
            Self::HabitNotFound(id) => write!(f, "habit not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for HabitServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for HabitServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::HabitNotFound(id),
            RepoError::Validation(err) => Self::Invalid(err.reason),
            other => Self::Repo(other),
        }
    }
}

fn ensure_valid(result: ValidationResult) -> Result<(), HabitServiceError> {
    match result {
        ValidationResult::Valid => Ok(()),
        ValidationResult::Invalid { reason } => Err(HabitServiceError::Invalid(reason)),
    }
}

/// Habit service facade over repository implementations.
pub struct HabitService<R: HabitRepository> {
    repo: R,
}

impl<R: HabitRepository> HabitService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates, checks the plan allowance, then persists a new habit.
    pub fn create_habit(
        &self,
        habit: &Habit,
        plan: SubscriptionPlan,
    ) -> Result<HabitId, HabitServiceError> {
        ensure_valid(validate_habit(habit))?;

        if habit.is_active {
            self.ensure_allowance(plan, "habit_create")?;
        }

        let id = self.repo.create_habit(habit)?;
        info!("event=habit_create module=service status=ok kind={}", habit.kind.as_str());
        Ok(id)
    }

    /// Validates and persists an edit. Reactivating an archived habit is
    /// subject to the same plan allowance as creating one.
    pub fn update_habit(
        &self,
        habit: &Habit,
        plan: SubscriptionPlan,
    ) -> Result<(), HabitServiceError> {
        ensure_valid(validate_habit(habit))?;

        let stored = self
            .repo
            .get_habit(habit.id)?
            .ok_or(HabitServiceError::HabitNotFound(habit.id))?;
        if habit.is_active && !stored.is_active {
            self.ensure_allowance(plan, "habit_restore")?;
        }

        self.repo.update_habit(habit)?;
        Ok(())
    }

    pub fn archive_habit(&self, id: HabitId) -> Result<(), HabitServiceError> {
        self.repo.archive_habit(id)?;
        info!("event=habit_archive module=service status=ok");
        Ok(())
    }

    pub fn get_habit(&self, id: HabitId) -> Result<Option<Habit>, HabitServiceError> {
        Ok(self.repo.get_habit(id)?)
    }

    pub fn list_habits(&self, include_inactive: bool) -> Result<Vec<Habit>, HabitServiceError> {
        Ok(self.repo.list_habits(include_inactive)?)
    }

    pub fn create_category(
        &self,
        category: &HabitCategory,
    ) -> Result<CategoryId, HabitServiceError> {
        ensure_valid(validate_category(category))?;
        Ok(self.repo.create_category(category)?)
    }

    pub fn list_categories(&self) -> Result<Vec<HabitCategory>, HabitServiceError> {
        Ok(self.repo.list_categories()?)
    }

    /// Records progress for one habit on `date`.
    pub fn log_progress(
        &self,
        habit_id: HabitId,
        value: Option<f64>,
        date: DateTime<Utc>,
    ) -> Result<HabitLog, HabitServiceError> {
        let habit = self
            .repo
            .get_habit(habit_id)?
            .ok_or(HabitServiceError::HabitNotFound(habit_id))?;

        let log = HabitLog::new(habit.id, date, value);
        ensure_valid(validate_log(&log, &habit))?;
        self.repo.create_log(&log)?;
        Ok(log)
    }

    pub fn list_logs(&self, habit_id: HabitId) -> Result<Vec<HabitLog>, HabitServiceError> {
        Ok(self.repo.list_logs(habit_id)?)
    }

    /// Runs aggregate validation over active habits and all categories.
    pub fn validate_state(
        &self,
        plan: SubscriptionPlan,
    ) -> Result<ValidationResult, HabitServiceError> {
        let habits = self.repo.list_habits(false)?;
        let categories = self.repo.list_categories()?;
        Ok(validate_domain_state(&habits, &categories, plan))
    }

    /// Fails when one more active habit would exceed the plan allowance.
    fn ensure_allowance(
        &self,
        plan: SubscriptionPlan,
        event: &str,
    ) -> Result<(), HabitServiceError> {
        if let Some(max) = plan.max_habits() {
            if self.repo.count_active_habits()? >= max {
                warn!(
                    "event={event} module=service status=rejected reason=plan_limit plan={} max={max}",
                    plan.as_str()
                );
                return Err(HabitServiceError::PlanLimitReached { max });
            }
        }
        Ok(())
    }

    /// Deletes all habits, logs and categories.
    pub fn clear_all(&self) -> Result<(), HabitServiceError> {
        self.repo.clear_all()?;
        warn!("event=data_clear module=service status=ok");
        Ok(())
    }
}
