//! Habit category model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type CategoryId = Uuid;

/// Grouping used to organize habits on the overview screen.
///
/// Predefined categories ship with the app and cannot be renamed by users,
/// but they are validated like any other category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitCategory {
    pub id: CategoryId,
    /// Stable key, e.g. `health`.
    pub name: String,
    /// Localized label shown in the UI.
    pub display_name: String,
    pub emoji: String,
    /// Sort position; lower comes first.
    pub order: i32,
    pub is_active: bool,
    pub is_predefined: bool,
}

impl HabitCategory {
    /// Creates a user-defined category.
    pub fn new(name: impl Into<String>, emoji: impl Into<String>, order: i32) -> Self {
        let name = name.into();
        Self {
            id: Uuid::new_v4(),
            display_name: name.clone(),
            name,
            emoji: emoji.into(),
            order,
            is_active: true,
            is_predefined: false,
        }
    }
}
