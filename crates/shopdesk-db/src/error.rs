//! # Database Error Types
//!
//! Error taxonomy for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Categorized: Configuration / Connection /      │
//! │       │                  Mapping / NotFound / Query                     │
//! │       ▼                                                                 │
//! │  Workflow treats the failure as "operation did not happen"              │
//! │                                                                         │
//! │  "Nothing found" is NEVER an error: findAll/findByField return an       │
//! │  empty Vec. Only findByKey turns absence into NotFound.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use shopdesk_core::{CoreError, MetaError};
use thiserror::Error;

/// Database operation errors.
///
/// These wrap sqlx errors and mapping failures, categorized so callers can
/// tell configuration bugs from store outages from bad rows.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity metadata is missing or malformed, or a caller-supplied filter
    /// field is not declared by the metadata.
    ///
    /// ## When This Occurs
    /// - `EntityMeta::validate` fails at repository construction
    /// - `find_by_field` is called with an undeclared column name
    /// - The accessor table yields the wrong number of field values
    ///
    /// There is no fallback; the operation that needed the metadata fails.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The store is unreachable or the pool could not hand out a
    /// connection. Reported once; no retry.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// A row or field could not be converted into the entity.
    ///
    /// ## Policy
    /// One bad row aborts the whole read. There is no skip-and-continue,
    /// so a result sequence is never a silent partial success.
    #[error("Mapping failed for {entity}.{column}: {reason}")]
    Mapping {
        entity: &'static str,
        column: String,
        reason: String,
    },

    /// Lookup by primary key found nothing.
    #[error("{entity} not found for key {key}")]
    NotFound { entity: &'static str, key: i64 },

    /// Statement execution failed in the store.
    #[error("Query failed: {0}")]
    Query(String),
}

impl DbError {
    /// Creates a Mapping error for one entity column.
    pub fn mapping(
        entity: &'static str,
        column: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        DbError::Mapping {
            entity,
            column: column.into(),
            reason: reason.to_string(),
        }
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::PoolTimedOut / PoolClosed / Io  → DbError::Connection
/// sqlx::Error::ColumnNotFound / ColumnDecode   → DbError::Mapping
/// sqlx::Error::Database / other                → DbError::Query
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => {
                DbError::Connection("connection pool exhausted".to_string())
            }
            sqlx::Error::PoolClosed => DbError::Connection("pool is closed".to_string()),
            sqlx::Error::Io(e) => DbError::Connection(e.to_string()),
            sqlx::Error::ColumnNotFound(column) => DbError::Mapping {
                entity: "row",
                column,
                reason: "column missing from result row".to_string(),
            },
            sqlx::Error::ColumnDecode { index, source } => DbError::Mapping {
                entity: "row",
                column: index,
                reason: source.to_string(),
            },
            other => DbError::Query(other.to_string()),
        }
    }
}

impl From<MetaError> for DbError {
    fn from(err: MetaError) -> Self {
        DbError::Configuration(err.to_string())
    }
}

/// Field-access failures raised by the entity accessor table during
/// hydration carry their own context; everything else is configuration.
impl From<CoreError> for DbError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnknownField { entity, field } => DbError::Mapping {
                entity,
                column: field,
                reason: "entity declares no such field".to_string(),
            },
            CoreError::ValueMismatch {
                field,
                expected,
                found,
            } => DbError::Mapping {
                entity: "row",
                column: field.to_string(),
                reason: format!("expected {expected}, got {found}"),
            },
            other => DbError::Configuration(other.to_string()),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Unit Tests
// =============================================================================
