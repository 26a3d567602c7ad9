//! Category field and composite validation.

use crate::constants::MAX_CATEGORY_NAME_LENGTH;
use crate::model::category::HabitCategory;
use crate::validation::{validate_emoji_shape, validate_required_text, ValidationResult};

pub fn validate_name(name: &str) -> ValidationResult {
    validate_required_text(name, "Category name", MAX_CATEGORY_NAME_LENGTH)
}

/// Categories always carry an emoji.
pub fn validate_emoji(emoji: &str) -> ValidationResult {
    validate_emoji_shape(emoji, "Category")
}

pub fn validate_order(order: i32) -> ValidationResult {
    if order < 0 {
        ValidationResult::invalid("Category order cannot be negative")
    } else {
        ValidationResult::Valid
    }
}

/// Validates name, emoji and order, stopping at the first failure.
pub fn validate_category(category: &HabitCategory) -> ValidationResult {
    validate_name(&category.name)
        .and_then(|| validate_emoji(&category.emoji))
        .and_then(|| validate_order(category.order))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_name() {
        assert_eq!(validate_name("Health"), ValidationResult::Valid);
    }

    #[test]
    fn rejects_blank_and_overlong_names() {
        assert_eq!(
            validate_name("   "),
            ValidationResult::invalid("Category name cannot be empty")
        );
        assert!(validate_name(&"c".repeat(MAX_CATEGORY_NAME_LENGTH)).is_valid());
        assert!(!validate_name(&"c".repeat(MAX_CATEGORY_NAME_LENGTH + 1)).is_valid());
    }

    #[test]
    fn composite_stops_at_first_failure() {
        let mut category = HabitCategory::new("", "", -1);
        assert_eq!(
            validate_category(&category).error_message(),
            Some("Category name cannot be empty")
        );
        category.name = "Mind".to_string();
        assert_eq!(
            validate_category(&category).error_message(),
            Some("Category emoji cannot be empty")
        );
        category.emoji = "🧠".to_string();
        assert_eq!(
            validate_category(&category).error_message(),
            Some("Category order cannot be negative")
        );
        category.order = 0;
        assert!(validate_category(&category).is_valid());
    }
}
