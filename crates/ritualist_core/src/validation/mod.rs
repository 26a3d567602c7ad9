//! Business-rule validation for habits, categories and logs.
//!
//! # Responsibility
//! - Provide pure predicate functions returning [`ValidationResult`].
//! - Keep user-facing failure messages in one place.
//!
//! # Invariants
//! - Validators never panic and never touch storage or global state.
//! - Composite validators short-circuit on the first failure, except
//!   `domain_validation::validate_domain_state` which reports every failure.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod category_validation;
pub mod domain_validation;
pub mod habit_validation;
pub mod log_validation;

/// Two-case outcome of every business-rule check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ValidationResult {
    Valid,
    Invalid { reason: String },
}

impl ValidationResult {
    /// Builds an `Invalid` result from any message.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid {
            reason: reason.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns the failure reason, `None` when valid.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid { reason } => Some(reason.as_str()),
        }
    }

    /// Converts into a `Result` so write paths can use `?`.
    pub fn into_result(self) -> Result<(), ValidationError> {
        match self {
            Self::Valid => Ok(()),
            Self::Invalid { reason } => Err(ValidationError { reason }),
        }
    }

    /// Continues with `next` only when `self` is valid.
    pub(crate) fn and_then(self, next: impl FnOnce() -> Self) -> Self {
        match self {
            Self::Valid => next(),
            invalid => invalid,
        }
    }
}

/// Error form of an `Invalid` validation result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub reason: String,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation failed: {}", self.reason)
    }
}

impl Error for ValidationError {}

/// Shared rule for required, length-limited names.
pub(crate) fn validate_required_text(
    value: &str,
    label: &str,
    max_chars: usize,
) -> ValidationResult {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return ValidationResult::invalid(format!("{label} cannot be empty"));
    }
    if trimmed.chars().count() > max_chars {
        return ValidationResult::invalid(format!(
            "{label} cannot exceed {max_chars} characters"
        ));
    }
    ValidationResult::Valid
}

/// Shared shape rule for emoji fields.
pub(crate) fn validate_emoji_shape(value: &str, label: &str) -> ValidationResult {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return ValidationResult::invalid(format!("{label} emoji cannot be empty"));
    }
    if trimmed.chars().count() > crate::constants::MAX_EMOJI_CHARS {
        return ValidationResult::invalid(format!("{label} emoji must be a single emoji"));
    }
    if trimmed.chars().any(|c| c.is_ascii_alphanumeric()) {
        return ValidationResult::invalid(format!("{label} emoji must be a single emoji"));
    }
    ValidationResult::Valid
}
