//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository and platform-port calls into use-case level APIs.
//! - Hold screen state for hosts (settings) without depending on any UI toolkit.

pub mod debug_service;
pub mod habit_service;
pub mod offer_codes;
pub mod ports;
pub mod settings_service;
