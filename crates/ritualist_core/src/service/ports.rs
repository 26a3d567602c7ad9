//! Host-provided platform ports.
//!
//! # Responsibility
//! - Describe platform services (cloud sync, permissions, subscriptions) the
//!   core consumes but does not implement.
//!
//! # Invariants
//! - Ports are `Send + Sync`; services may query independent ports from
//!   scoped worker threads.
//! - Port calls never panic on expected failures; they return `PortError`.

use crate::model::plan::SubscriptionPlan;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type PortResult<T> = Result<T, PortError>;

/// Failure reported by a platform port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortError {
    /// Platform service is unreachable (offline, signed out, ...).
    Unavailable(String),
    /// The user or platform refused the operation.
    Denied(String),
    /// Any other failure.
    Failed(String),
}

impl Display for PortError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(message) => write!(f, "service unavailable: {message}"),
            Self::Denied(message) => write!(f, "operation denied: {message}"),
            Self::Failed(message) => write!(f, "operation failed: {message}"),
        }
    }
}

impl Error for PortError {}

/// Authorization state for a platform permission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionStatus {
    #[default]
    NotDetermined,
    Denied,
    Authorized,
}

/// Result of one cloud sync round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSummary {
    pub uploaded: u32,
    pub downloaded: u32,
    /// Unix epoch milliseconds.
    pub completed_at: i64,
}

impl SyncSummary {
    pub fn total_records(&self) -> u32 {
        self.uploaded.saturating_add(self.downloaded)
    }
}

/// Cloud sync entry point.
pub trait CloudSync: Send + Sync {
    fn sync_now(&self) -> PortResult<SyncSummary>;
    /// Epoch milliseconds of the last successful sync.
    fn last_sync_at(&self) -> Option<i64>;
}

pub trait PermissionStatusProvider: Send + Sync {
    fn notification_status(&self) -> PermissionStatus;
    fn location_status(&self) -> PermissionStatus;
}

pub trait SubscriptionStatusProvider: Send + Sync {
    fn current_plan(&self) -> PortResult<SubscriptionPlan>;
}
