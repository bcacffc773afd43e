//! # Repository Module
//!
//! The generic repository and its per-entity specializations.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Generic Repository                                   │
//! │                                                                         │
//! │  Workflow                                                               │
//! │       │  clients.find_by_name("Alice")                                  │
//! │       ▼                                                                 │
//! │  ClientRepository            ← convenience finders, no mapping logic    │
//! │       │  find_by_field("name", value)                                   │
//! │       ▼                                                                 │
//! │  Repository<Client>          ← ALL SQL synthesis, binding, hydration    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! │                                                                         │
//! │  One generic component serves every entity type; adding an entity       │
//! │  means writing metadata and accessors, never SQL.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`Repository`] - The generic CRUD surface over any [`Entity`]
//! - [`client::ClientRepository`] - Client finders by name
//! - [`product::ProductRepository`] - Product finders by product name
//! - [`order::OrderRepository`] - Orders plus the join-based report query
//! - [`item_order::ItemOrderRepository`] - Order lines

pub mod client;
pub mod item_order;
pub mod order;
pub mod product;

use std::marker::PhantomData;

use sqlx::SqlitePool;
use tracing::debug;

use shopdesk_core::{Entity, Value};

use crate::bind;
use crate::error::{DbError, DbResult};
use crate::hydrate;
use crate::query;

// =============================================================================
// Generic Repository
// =============================================================================

/// Generic CRUD surface over one entity type.
///
/// Stateless apart from the metadata its type parameter carries: no entity
/// is cached or retained between calls, and every operation acquires a
/// pooled connection at its start and releases it on every exit path.
/// Distinct operations may therefore run concurrently against distinct
/// connections; no locking or retrying happens here.
pub struct Repository<T: Entity> {
    pool: SqlitePool,
    _entity: PhantomData<T>,
}

impl<T: Entity> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Repository {
            pool: self.pool.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> Repository<T> {
    /// Creates a repository over the pool, failing fast on malformed
    /// metadata. There is no default table name to fall back to.
    pub fn new(pool: SqlitePool) -> DbResult<Self> {
        T::meta().validate()?;
        Ok(Repository {
            pool,
            _entity: PhantomData,
        })
    }

    /// Rejects filter fields the metadata does not declare, before any SQL
    /// is synthesized from them.
    fn checked_field(field: &str) -> DbResult<()> {
        let meta = T::meta();
        if meta.has_column(field) {
            Ok(())
        } else {
            Err(DbError::Configuration(format!(
                "table '{}' declares no column '{field}'",
                meta.table
            )))
        }
    }

    /// Returns every row of the table, hydrated, in row-arrival order.
    pub async fn find_all(&self) -> DbResult<Vec<T>> {
        let meta = T::meta();
        debug!(table = meta.table, "find_all");

        let sql = query::select_all(meta);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        hydrate::entities_from_rows(&rows)
    }

    /// Returns every row where `field` equals `value`, hydrated.
    ///
    /// An empty result is an empty Vec, never an error; "nothing matched"
    /// and "the read failed" stay distinguishable.
    pub async fn find_by_field(&self, field: &str, value: Value) -> DbResult<Vec<T>> {
        Self::checked_field(field)?;
        let meta = T::meta();
        debug!(table = meta.table, field, "find_by_field");

        let sql = query::select_by(meta, field);
        let stmt = bind::push(sqlx::query(&sql), value);
        let rows = stmt.fetch_all(&self.pool).await?;
        hydrate::entities_from_rows(&rows)
    }

    /// Returns the row with the given primary key.
    ///
    /// Absence is an explicit `DbError::NotFound`; this never indexes into
    /// an empty result.
    pub async fn find_by_key(&self, key: i64) -> DbResult<T> {
        let meta = T::meta();
        let mut matches = self
            .find_by_field(meta.primary_key, Value::Integer(key))
            .await?;
        if matches.is_empty() {
            return Err(DbError::NotFound {
                entity: meta.table,
                key,
            });
        }
        Ok(matches.swap_remove(0))
    }

    /// Inserts the entity and returns it.
    ///
    /// The key slot is bound first (NULL when unset), then the declared
    /// fields in order. For auto-increment types the store-assigned key is
    /// read back and written into the returned entity through the
    /// infrastructure key setter; otherwise the caller-supplied key is
    /// used as-is.
    pub async fn insert(&self, mut entity: T) -> DbResult<T> {
        let meta = T::meta();
        debug!(table = meta.table, "insert");

        let slots = bind::field_slots(&entity)?;
        let sql = query::insert(meta);

        let stmt = bind::push(sqlx::query(&sql), Value::from(entity.key()));
        let stmt = bind::push_all(stmt, slots);
        let result = stmt.execute(&self.pool).await?;

        if meta.auto_increment {
            entity.assign_key(result.last_insert_rowid());
        }
        Ok(entity)
    }

    /// Full-row update keyed by the primary key.
    ///
    /// Fields are bound in declared order, then the key as the selector.
    /// Updating a row that doesn't exist is `NotFound`.
    pub async fn update(&self, entity: &T) -> DbResult<()> {
        let meta = T::meta();
        let key = entity.key().ok_or_else(|| {
            DbError::Configuration(format!(
                "cannot update an unpersisted '{}' entity (no key)",
                meta.table
            ))
        })?;
        debug!(table = meta.table, key, "update");

        let slots = bind::field_slots(entity)?;
        let sql = query::update_by(meta, meta.primary_key);

        let stmt = bind::push_all(sqlx::query(&sql), slots);
        let stmt = bind::push(stmt, Value::Integer(key));
        let result = stmt.execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                entity: meta.table,
                key,
            });
        }
        Ok(())
    }

    /// Removes the entity's row, keyed by the primary key.
    pub async fn delete(&self, entity: &T) -> DbResult<()> {
        let meta = T::meta();
        let key = entity.key().ok_or_else(|| {
            DbError::Configuration(format!(
                "cannot delete an unpersisted '{}' entity (no key)",
                meta.table
            ))
        })?;
        debug!(table = meta.table, key, "delete");

        let sql = query::delete_by(meta, meta.primary_key);
        let result = bind::push(sqlx::query(&sql), Value::Integer(key))
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                entity: meta.table,
                key,
            });
        }
        Ok(())
    }

    /// Removes every row where `field` equals `value`; returns how many
    /// rows went away (zero is not an error).
    pub async fn delete_by_field(&self, field: &str, value: Value) -> DbResult<u64> {
        Self::checked_field(field)?;
        let meta = T::meta();
        debug!(table = meta.table, field, "delete_by_field");

        let sql = query::delete_by(meta, field);
        let result = bind::push(sqlx::query(&sql), value)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Column labels of the backing table, in store-reported order.
    ///
    /// The schema bootstrap declares the key first and then the metadata
    /// fields in order, so store order and metadata order agree here;
    /// key-then-fields is the canonical column order for reports.
    pub async fn columns(&self) -> DbResult<Vec<String>> {
        let meta = T::meta();
        let sql = format!("PRAGMA table_info({})", meta.table);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        use sqlx::Row;
        rows.iter()
            .map(|row| row.try_get::<String, _>("name").map_err(DbError::from))
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use shopdesk_core::{Client, Product};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn insert_assigns_key_and_round_trips() {
        let db = test_db().await;
        let repo = Repository::<Product>::new(db.pool().clone()).unwrap();

        let inserted = repo.insert(Product::new("Widget", 10, 2.5)).await.unwrap();
        let key = inserted.id().expect("auto-increment key populated");

        let loaded = repo.find_by_key(key).await.unwrap();
        assert_eq!(loaded, inserted);
        assert_eq!(loaded.product_name, "Widget");
        assert_eq!(loaded.quantity, 10);
        assert_eq!(loaded.price, 2.5);
    }

    #[tokio::test]
    async fn find_by_field_without_match_is_empty_not_error() {
        let db = test_db().await;
        let repo = Repository::<Client>::new(db.pool().clone()).unwrap();

        let hits = repo
            .find_by_field("name", Value::from("Nobody"))
            .await
            .unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn find_by_key_on_absent_key_is_not_found() {
        let db = test_db().await;
        let repo = Repository::<Client>::new(db.pool().clone()).unwrap();

        let err = repo.find_by_key(4242).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::NotFound {
                entity: "clients",
                key: 4242
            }
        ));
    }

    #[tokio::test]
    async fn undeclared_filter_field_is_a_configuration_error() {
        let db = test_db().await;
        let repo = Repository::<Client>::new(db.pool().clone()).unwrap();

        let err = repo
            .find_by_field("sku", Value::Integer(1))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Configuration(_)));
    }

    #[tokio::test]
    async fn update_changes_only_the_targeted_row() {
        let db = test_db().await;
        let repo = Repository::<Product>::new(db.pool().clone()).unwrap();

        let a = repo.insert(Product::new("Widget", 10, 2.5)).await.unwrap();
        let b = repo.insert(Product::new("Gadget", 4, 9.0)).await.unwrap();

        let mut changed = a.clone();
        changed.quantity = 7;
        repo.update(&changed).await.unwrap();

        let a_after = repo.find_by_key(a.id().unwrap()).await.unwrap();
        let b_after = repo.find_by_key(b.id().unwrap()).await.unwrap();
        assert_eq!(a_after.quantity, 7);
        assert_eq!(b_after, b);
    }

    #[tokio::test]
    async fn update_of_missing_row_is_not_found() {
        let db = test_db().await;
        let repo = Repository::<Product>::new(db.pool().clone()).unwrap();

        let mut ghost = Product::new("Ghost", 1, 1.0);
        shopdesk_core::Entity::assign_key(&mut ghost, 999);
        assert!(matches!(
            repo.update(&ghost).await.unwrap_err(),
            DbError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn delete_by_field_reports_removed_rows() {
        let db = test_db().await;
        let repo = Repository::<Client>::new(db.pool().clone()).unwrap();

        repo.insert(Client::new("Alice", "12 Main St")).await.unwrap();
        repo.insert(Client::new("Alice", "34 Side St")).await.unwrap();

        let removed = repo
            .delete_by_field("name", Value::from("Alice"))
            .await
            .unwrap();
        assert_eq!(removed, 2);

        let removed = repo
            .delete_by_field("name", Value::from("Alice"))
            .await
            .unwrap();
        assert_eq!(removed, 0);
    }

    #[tokio::test]
    async fn columns_report_key_then_fields() {
        let db = test_db().await;
        let repo = Repository::<Product>::new(db.pool().clone()).unwrap();

        let columns = repo.columns().await.unwrap();
        assert_eq!(columns, vec!["id", "productName", "quantity", "price"]);
    }

    #[tokio::test]
    async fn find_all_preserves_insertion_order() {
        let db = test_db().await;
        let repo = Repository::<Client>::new(db.pool().clone()).unwrap();

        repo.insert(Client::new("Alice", "12 Main St")).await.unwrap();
        repo.insert(Client::new("Bob", "98 High St")).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Alice");
        assert_eq!(all[1].name, "Bob");
    }
}
