//! # Parameter Binder
//!
//! Lowers an entity to its ordered slot sequence and binds the slots
//! positionally onto a prepared statement.
//!
//! ## Slot Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  insert:  [key] ++ field_slots(entity)      key first (NULL if unset)   │
//! │  update:  field_slots(entity) ++ [key]      selector bound last         │
//! │                                                                         │
//! │  field_slots walks Entity::field_values, which the entity produces in   │
//! │  meta().fields order - the same order the query builder emitted its     │
//! │  placeholders in.                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A slot-extraction problem (the accessor table yielding the wrong number
//! of values) fails the whole statement as a configuration error. Nothing
//! is logged-and-skipped: a statement either binds completely or not at all.

use sqlx::sqlite::SqliteArguments;
use sqlx::Sqlite;

use shopdesk_core::{Entity, Value};

use crate::error::{DbError, DbResult};

/// A runtime-built SQLite statement awaiting positional binds.
pub type SqliteQuery<'q> = sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>;

/// Extracts the non-key slot sequence from an entity, in declared field
/// order, verifying arity against the metadata.
pub fn field_slots<T: Entity>(entity: &T) -> DbResult<Vec<Value>> {
    let meta = T::meta();
    let slots = entity.field_values();
    if slots.len() != meta.fields.len() {
        return Err(DbError::Configuration(format!(
            "entity for table '{}' produced {} field values, metadata declares {}",
            meta.table,
            slots.len(),
            meta.fields.len()
        )));
    }
    Ok(slots)
}

/// Binds one slot to the next free placeholder.
pub fn push(query: SqliteQuery<'_>, value: Value) -> SqliteQuery<'_> {
    match value {
        Value::Null => query.bind(None::<i64>),
        Value::Integer(v) => query.bind(v),
        Value::Real(v) => query.bind(v),
        Value::Text(v) => query.bind(v),
    }
}

/// Binds a slot sequence in order, returning the statement with all
/// placeholders consumed so far.
pub fn push_all(mut query: SqliteQuery<'_>, slots: Vec<Value>) -> SqliteQuery<'_> {
    for slot in slots {
        query = push(query, slot);
    }
    query
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use shopdesk_core::{Entity, Product};

    #[test]
    fn slots_follow_declared_field_order() {
        let product = Product::new("Widget", 10, 2.5);
        let slots = field_slots(&product).unwrap();
        assert_eq!(
            slots,
            vec![
                Value::Text("Widget".to_string()),
                Value::Integer(10),
                Value::Real(2.5),
            ]
        );
    }

    #[test]
    fn arity_matches_metadata() {
        let product = Product::default();
        let slots = field_slots(&product).unwrap();
        assert_eq!(slots.len(), Product::meta().fields.len());
    }
}
