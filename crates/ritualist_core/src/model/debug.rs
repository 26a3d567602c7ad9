//! Records surfaced by the debug menu.
//!
//! These are read and displayed, never computed over by business logic.

use serde::{Deserialize, Serialize};

/// One applied schema migration step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationEvent {
    pub from_version: u32,
    pub to_version: u32,
    /// Unix epoch milliseconds.
    pub applied_at: i64,
    pub duration_ms: i64,
}

/// Promotional offer code registered for local testing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferCode {
    pub code: String,
    pub product_id: String,
    /// Unix epoch milliseconds; `None` never expires.
    pub expires_at: Option<i64>,
    pub is_redeemed: bool,
}

impl OfferCode {
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        self.expires_at.is_some_and(|expires_at| now_ms >= expires_at)
    }
}

/// Seed data sets for manual testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestDataScenario {
    /// One category with a single binary habit.
    Minimal,
    /// A realistic mix of binary and numeric habits across categories.
    Typical,
    /// Exactly the free-plan habit allowance.
    PlanLimit,
}

impl TestDataScenario {
    pub fn all() -> [Self; 3] {
        [Self::Minimal, Self::Typical, Self::PlanLimit]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Minimal => "Minimal",
            Self::Typical => "Typical week",
            Self::PlanLimit => "Free plan limit",
        }
    }
}
