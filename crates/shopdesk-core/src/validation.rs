//! # Validation Module
//!
//! Input validation for command arguments.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Command parser                                                │
//! │  ├── Shape checks (argument count, numeric parses)                      │
//! │  └── Rejects the line before any domain object exists                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── Domain rules (non-empty names, positive amounts)                   │
//! │  └── Runs before any store access                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Workflow                                                      │
//! │  └── Uniqueness checks that need the store (duplicate client name)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted name or address.
pub const MAX_NAME_LEN: usize = 100;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a client or product name (also used for addresses).
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most [`MAX_NAME_LEN`] characters
pub fn validate_name(field: &'static str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if value.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_NAME_LEN,
        });
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a stock or order quantity: strictly positive.
pub fn validate_quantity(value: i64) -> ValidationResult<()> {
    if value <= 0 {
        return Err(ValidationError::NotPositive {
            field: "quantity",
            value,
        });
    }
    Ok(())
}

/// Validates a unit price: positive and finite.
pub fn validate_price(value: f64) -> ValidationResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::InvalidPrice { value });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_reasonable_input() {
        assert!(validate_name("name", "Alice").is_ok());
        assert!(validate_quantity(1).is_ok());
        assert!(validate_price(0.01).is_ok());
    }

    #[test]
    fn rejects_blank_name() {
        assert!(matches!(
            validate_name("name", "   "),
            Err(ValidationError::Empty { field: "name" })
        ));
    }

    #[test]
    fn rejects_oversized_name() {
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(matches!(
            validate_name("address", &long),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn rejects_non_positive_quantity() {
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
    }

    #[test]
    fn rejects_bad_prices() {
        assert!(validate_price(0.0).is_err());
        assert!(validate_price(-1.5).is_err());
        assert!(validate_price(f64::NAN).is_err());
        assert!(validate_price(f64::INFINITY).is_err());
    }
}
