//! # Error Types
//!
//! Domain-specific error types for shopdesk-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shopdesk-core errors (this file)                                       │
//! │  ├── CoreError        - Domain and field-access errors                  │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  shopdesk-db errors (separate crate)                                    │
//! │  └── DbError          - Store access and mapping failures               │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → workflow log/skip        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (entity, field, expected type)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain-level errors.
///
/// The field-access variants are raised by `Entity::set_field` and by the
/// `Value` conversions; the mapping layer turns them into its own typed
/// failure. The stock variant belongs to the order workflow.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A field name was used that the entity's metadata does not declare.
    ///
    /// ## When This Occurs
    /// - A hydrated column name has no accessor on the entity
    /// - A caller filters on a field outside the metadata
    #[error("Entity {entity} has no field named '{field}'")]
    UnknownField {
        entity: &'static str,
        field: String,
    },

    /// A value could not be converted to the type a field expects.
    ///
    /// ## When This Occurs
    /// - A TEXT column is assigned to an integer field
    /// - A NULL arrives for a non-nullable field
    #[error("Field '{field}' expects {expected}, got {found}")]
    ValueMismatch {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// Insufficient stock to place an order.
    ///
    /// ## User Workflow
    /// ```text
    /// Order: Alice, Widget, 12
    ///      │
    ///      ▼
    /// Check stock: available=7
    ///      │
    ///      ▼
    /// InsufficientStock { product: "Widget", available: 7, requested: 12 }
    ///      │
    ///      ▼
    /// Under-stock notice is written, order row removed
    /// ```
    #[error("Insufficient stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when command arguments don't meet requirements. Used for
/// early validation before any store access happens.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required text field is missing or empty.
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    /// A text field exceeds its maximum length.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// A numeric field must be strictly positive.
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: i64 },

    /// A price is not a positive finite number.
    #[error("price must be a positive amount, got {value}")]
    InvalidPrice { value: f64 },
}
