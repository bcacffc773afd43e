//! # Order Repository
//!
//! Order CRUD plus the join-based report query. The join is the one query
//! the generic engine cannot synthesize (it spans four tables), so its SQL
//! and hydration live here; everything else delegates.

use sqlx::{Row, SqlitePool};
use tracing::debug;

use shopdesk_core::{Order, OrderLine, Value};

use crate::error::{DbError, DbResult};
use crate::repository::Repository;

/// Rows of the order report: one line per item order, joined with the
/// client and product names it references.
const ORDER_LINES_SQL: &str = "SELECT itemOrders.id AS id, clients.name AS name, \
     products.productName AS productName, itemOrders.quantity AS quantity \
     FROM clients \
     JOIN orders ON clients.id = orders.clientId \
     JOIN itemOrders ON itemOrders.orderId = orders.id \
     JOIN products ON itemOrders.productId = products.id";

/// Repository for order database operations.
#[derive(Clone)]
pub struct OrderRepository {
    repo: Repository<Order>,
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> DbResult<Self> {
        Ok(OrderRepository {
            repo: Repository::new(pool.clone())?,
            pool,
        })
    }

    /// Every order belonging to a client (usually zero or one).
    pub async fn find_by_client(&self, client_id: i64) -> DbResult<Vec<Order>> {
        self.repo
            .find_by_field("clientId", Value::Integer(client_id))
            .await
    }

    /// Inserts the order; the returned copy carries the assigned key.
    pub async fn insert(&self, order: Order) -> DbResult<Order> {
        self.repo.insert(order).await
    }

    /// Full-row update keyed by the primary key (total accumulation).
    pub async fn update(&self, order: &Order) -> DbResult<()> {
        self.repo.update(order).await
    }

    /// Removes the order's row (the under-stock rollback path).
    pub async fn delete(&self, order: &Order) -> DbResult<()> {
        self.repo.delete(order).await
    }

    /// The printable order lines, in row-arrival order.
    pub async fn order_lines(&self) -> DbResult<Vec<OrderLine>> {
        debug!("Fetching order report lines");
        let rows = sqlx::query(ORDER_LINES_SQL).fetch_all(&self.pool).await?;

        rows.iter()
            .map(|row| {
                Ok(OrderLine {
                    id: row.try_get("id").map_err(DbError::from)?,
                    client_name: row.try_get("name").map_err(DbError::from)?,
                    product_name: row.try_get("productName").map_err(DbError::from)?,
                    quantity: row.try_get("quantity").map_err(DbError::from)?,
                })
            })
            .collect()
    }

    /// Column labels of the report query, in select-list order.
    pub fn order_line_columns(&self) -> Vec<String> {
        OrderLine::COLUMNS.iter().map(|c| c.to_string()).collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use shopdesk_core::ItemOrder;

    #[tokio::test]
    async fn order_lines_join_names_to_quantities() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let clients = db.clients().unwrap();
        let products = db.products().unwrap();
        let orders = db.orders().unwrap();
        let item_orders = db.item_orders().unwrap();

        let alice = clients.insert_new("Alice", "12 Main St").await.unwrap();
        let widget = products.insert_new("Widget", 10, 2.5).await.unwrap();

        let order = orders.insert(Order::new(alice.id().unwrap())).await.unwrap();
        let item = item_orders
            .insert(ItemOrder::new(
                order.id().unwrap(),
                widget.id().unwrap(),
                4,
            ))
            .await
            .unwrap();

        let lines = orders.order_lines().await.unwrap();
        assert_eq!(
            lines,
            vec![OrderLine {
                id: item.id().unwrap(),
                client_name: "Alice".to_string(),
                product_name: "Widget".to_string(),
                quantity: 4,
            }]
        );
        assert_eq!(
            orders.order_line_columns(),
            vec!["id", "name", "productName", "quantity"]
        );
    }

    #[tokio::test]
    async fn find_by_client_is_empty_for_unknown_client() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let orders = db.orders().unwrap();
        assert!(orders.find_by_client(31).await.unwrap().is_empty());
    }
}
