//! Subscription plan model.

use crate::constants::FREE_MAX_HABITS;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionPlan {
    #[default]
    Free,
    Monthly,
    Annual,
}

impl SubscriptionPlan {
    /// Maximum active habits allowed, `None` when unlimited.
    pub fn max_habits(&self) -> Option<usize> {
        match self {
            Self::Free => Some(FREE_MAX_HABITS),
            Self::Monthly | Self::Annual => None,
        }
    }

    pub fn is_premium(&self) -> bool {
        !matches!(self, Self::Free)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Monthly => "monthly",
            Self::Annual => "annual",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SubscriptionPlan;

    #[test]
    fn only_free_plan_is_limited() {
        assert_eq!(SubscriptionPlan::Free.max_habits(), Some(5));
        assert_eq!(SubscriptionPlan::Monthly.max_habits(), None);
        assert!(SubscriptionPlan::Annual.is_premium());
    }
}
