//! Business constants shared by validation, services and persistence.
//!
//! # Invariants
//! - Length limits count Unicode scalar values of the trimmed input.
//! - `MIN_DAILY_TARGET <= MAX_DAILY_TARGET`.

/// Maximum habit name length after trimming.
pub const MAX_HABIT_NAME_LENGTH: usize = 30;
/// Maximum category name length after trimming.
pub const MAX_CATEGORY_NAME_LENGTH: usize = 30;
/// Maximum unit label length for numeric habits.
pub const MAX_UNIT_LABEL_LENGTH: usize = 20;
/// Emoji fields allow short ZWJ sequences and skin-tone modifiers.
pub const MAX_EMOJI_CHARS: usize = 8;

/// Lower bound (inclusive) for a numeric habit daily target.
pub const MIN_DAILY_TARGET: f64 = 1.0;
/// Upper bound (inclusive) for a numeric habit daily target and log values.
pub const MAX_DAILY_TARGET: f64 = 10_000.0;

/// Active habit allowance on the free plan.
pub const FREE_MAX_HABITS: usize = 5;

pub const MAX_PROFILE_NAME_LENGTH: usize = 50;
pub const MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;

/// How far back (in calendar years) a habit log may be dated.
pub const LOG_DATE_MAX_PAST_YEARS: u32 = 1;
