//! Domain model for habits, categories, logs and the user profile.
//!
//! # Responsibility
//! - Define canonical data structures used by validation and services.
//! - Keep storage mappings next to the enums they describe.
//!
//! # Invariants
//! - Every persisted record is identified by a stable UUID.
//! - Archiving is represented by `is_active = false`, not hard delete.

pub mod category;
pub mod debug;
pub mod habit;
pub mod habit_log;
pub mod plan;
pub mod profile;
