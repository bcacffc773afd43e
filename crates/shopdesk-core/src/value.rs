//! # Dynamic Values
//!
//! The `Value` type is the currency moved between typed entity fields and
//! untyped storage columns. The parameter binder lowers each entity field to
//! a `Value` before binding it positionally; the hydrator raises each row
//! column to a `Value` before handing it to the entity's field setter.
//!
//! ## Why an Enum?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │            Generic Mapping Without Reflection                           │
//! │                                                                         │
//! │  Entity field (String / i64 / f64)                                      │
//! │       │ Entity::field_values()                                          │
//! │       ▼                                                                 │
//! │  Value::Text / Integer / Real  ← one closed set of storage classes      │
//! │       │ positional bind                                                 │
//! │       ▼                                                                 │
//! │  SQLite column (TEXT / INTEGER / REAL / NULL)                           │
//! │       │ column read                                                     │
//! │       ▼                                                                 │
//! │  Value  ──Entity::set_field()──►  typed entity field                    │
//! │                                                                         │
//! │  The enum mirrors SQLite's storage classes, so every entity field       │
//! │  round-trips losslessly through it.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// =============================================================================
// Value
// =============================================================================

/// A dynamically typed storage value.
///
/// Mirrors the SQLite storage classes this system uses. BLOBs are not part
/// of the domain and are rejected by the hydrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// SQL NULL (an unset key, for example).
    Null,
    /// 64-bit integer (keys, quantities, foreign keys).
    Integer(i64),
    /// 64-bit float (prices, totals).
    Real(f64),
    /// UTF-8 text (names, addresses).
    Text(String),
}

impl Value {
    /// Returns the storage-class name, used in mismatch errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Integer(_) => "INTEGER",
            Value::Real(_) => "REAL",
            Value::Text(_) => "TEXT",
        }
    }

    /// Converts into an integer, naming `field` on mismatch.
    pub fn into_integer(self, field: &'static str) -> Result<i64, CoreError> {
        match self {
            Value::Integer(v) => Ok(v),
            other => Err(CoreError::ValueMismatch {
                field,
                expected: "INTEGER",
                found: other.type_name(),
            }),
        }
    }

    /// Converts into a float, naming `field` on mismatch.
    ///
    /// Integers widen to floats: SQLite stores a whole-number REAL bound
    /// through some paths as INTEGER.
    pub fn into_real(self, field: &'static str) -> Result<f64, CoreError> {
        match self {
            Value::Real(v) => Ok(v),
            Value::Integer(v) => Ok(v as f64),
            other => Err(CoreError::ValueMismatch {
                field,
                expected: "REAL",
                found: other.type_name(),
            }),
        }
    }

    /// Converts into text, naming `field` on mismatch.
    pub fn into_text(self, field: &'static str) -> Result<String, CoreError> {
        match self {
            Value::Text(v) => Ok(v),
            other => Err(CoreError::ValueMismatch {
                field,
                expected: "TEXT",
                found: other.type_name(),
            }),
        }
    }
}

// =============================================================================
// Conversions From Field Types
// =============================================================================

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

// =============================================================================
// Display
// =============================================================================

/// Renders the value the way reports print it: NULL as an empty cell.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Integer(v) => write!(f, "{v}"),
            Value::Real(v) => write!(f, "{v}"),
            Value::Text(v) => write!(f, "{v}"),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_matching_types() {
        assert_eq!(Value::Integer(7).into_integer("q").unwrap(), 7);
        assert_eq!(Value::Real(2.5).into_real("p").unwrap(), 2.5);
        assert_eq!(
            Value::Text("Widget".into()).into_text("n").unwrap(),
            "Widget"
        );
    }

    #[test]
    fn integer_widens_to_real() {
        assert_eq!(Value::Integer(3).into_real("p").unwrap(), 3.0);
    }

    #[test]
    fn mismatch_names_the_field() {
        let err = Value::Text("x".into()).into_integer("quantity").unwrap_err();
        assert!(err.to_string().contains("quantity"));
        assert!(err.to_string().contains("INTEGER"));
    }

    #[test]
    fn option_lowers_to_null() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(4i64)), Value::Integer(4));
    }

    #[test]
    fn display_matches_report_cells() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::Integer(10).to_string(), "10");
        assert_eq!(Value::Real(2.5).to_string(), "2.5");
        assert_eq!(Value::Text("Alice".into()).to_string(), "Alice");
    }
}
