//! # Result Hydrator
//!
//! Turns result rows back into typed entities - the binder's inverse.
//!
//! ## Hydration Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SqliteRow                                                              │
//! │       │ read meta().primary_key column                                  │
//! │       ▼                                                                 │
//! │  T::default() ──assign_key()──► keyed zero-value entity                 │
//! │       │ for each field in meta().fields (declared order)                │
//! │       ▼                                                                 │
//! │  column → Value → set_field(field, value)                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  fully hydrated T                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The key goes through [`Entity::assign_key`], the infrastructure-only
//! setter; every other field goes through the public accessor table.
//!
//! ## Failure Policy
//! A row missing an expected column, or carrying a type-incompatible value,
//! aborts the whole read with `DbError::Mapping`. Rows are never skipped,
//! so a hydrated sequence is either complete or an error - no silent
//! partial success.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, TypeInfo, ValueRef};

use shopdesk_core::{Entity, Value};

use crate::error::{DbError, DbResult};

/// Reads one column of a row into a dynamic [`Value`], dispatching on the
/// value's SQLite storage class.
pub fn column_value(row: &SqliteRow, column: &str) -> DbResult<Value> {
    let raw = row.try_get_raw(column)?;
    if raw.is_null() {
        return Ok(Value::Null);
    }
    let info = raw.type_info();
    match info.name() {
        "INTEGER" | "BOOLEAN" => Ok(Value::Integer(row.try_get::<i64, _>(column)?)),
        "REAL" | "NUMERIC" => Ok(Value::Real(row.try_get::<f64, _>(column)?)),
        "TEXT" | "DATE" | "TIME" | "DATETIME" => {
            Ok(Value::Text(row.try_get::<String, _>(column)?))
        }
        other => Err(DbError::mapping(
            "row",
            column,
            format!("unsupported storage class {other}"),
        )),
    }
}

/// Hydrates one row into a new entity instance.
pub fn entity_from_row<T: Entity>(row: &SqliteRow) -> DbResult<T> {
    let meta = T::meta();
    let mut entity = T::default();

    let key = column_value(row, meta.primary_key)?;
    match key {
        Value::Integer(key) => entity.assign_key(key),
        Value::Null => {
            return Err(DbError::mapping(
                meta.table,
                meta.primary_key,
                "primary key column is NULL",
            ))
        }
        other => {
            return Err(DbError::mapping(
                meta.table,
                meta.primary_key,
                format!("primary key must be INTEGER, got {}", other.type_name()),
            ))
        }
    }

    for field in meta.fields {
        let value = column_value(row, field)?;
        entity.set_field(field, value)?;
    }

    Ok(entity)
}

/// Hydrates every row of a result set, preserving row-arrival order.
pub fn entities_from_rows<T: Entity>(rows: &[SqliteRow]) -> DbResult<Vec<T>> {
    rows.iter().map(entity_from_row).collect()
}
