//! # Item-Order Repository
//!
//! Plain wrapper over `Repository<ItemOrder>`; item orders need no finders
//! beyond their owning order.

use sqlx::SqlitePool;

use shopdesk_core::{ItemOrder, Value};

use crate::error::DbResult;
use crate::repository::Repository;

/// Repository for item-order database operations.
#[derive(Clone)]
pub struct ItemOrderRepository {
    repo: Repository<ItemOrder>,
}

impl ItemOrderRepository {
    /// Creates a new ItemOrderRepository.
    pub fn new(pool: SqlitePool) -> DbResult<Self> {
        Ok(ItemOrderRepository {
            repo: Repository::new(pool)?,
        })
    }

    /// Inserts the item order; the returned copy carries the assigned key.
    pub async fn insert(&self, item: ItemOrder) -> DbResult<ItemOrder> {
        self.repo.insert(item).await
    }

    /// Every line of one order, for bill rendering.
    pub async fn find_by_order(&self, order_id: i64) -> DbResult<Vec<ItemOrder>> {
        self.repo
            .find_by_field("orderId", Value::Integer(order_id))
            .await
    }
}
