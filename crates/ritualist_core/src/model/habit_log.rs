//! Habit log (one progress entry for one habit on one day).

use crate::model::habit::HabitId;
use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type LogId = Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitLog {
    pub id: LogId,
    pub habit_id: HabitId,
    /// Instant the progress belongs to. Validation only looks at the UTC day.
    pub date: DateTime<Utc>,
    /// `None` for binary completions without an explicit value.
    pub value: Option<f64>,
}

impl HabitLog {
    /// `date` is truncated to whole milliseconds, the stored precision.
    pub fn new(habit_id: HabitId, date: DateTime<Utc>, value: Option<f64>) -> Self {
        Self {
            id: Uuid::new_v4(),
            habit_id,
            date: date
                .duration_trunc(TimeDelta::milliseconds(1))
                .unwrap_or(date),
            value,
        }
    }
}
