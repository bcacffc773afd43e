//! # Schema Bootstrap
//!
//! Embedded DDL for the four Shopdesk tables, executed at startup.
//!
//! This is a fixed bootstrap, not a migration framework: every statement is
//! `CREATE TABLE IF NOT EXISTS` and the schema never evolves at runtime.
//!
//! ## Column Order Contract
//! Each table declares its primary key first and then its entity's fields
//! in metadata order. `Repository::columns()` reports columns in this
//! store order (via `PRAGMA table_info`), so the store-reported order and
//! the metadata order agree; key-then-fields is the canonical order.
//!
//! Column names keep the original camelCase storage names (`productName`,
//! `clientId`) that the entity metadata declares.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// DDL for every table, in dependency order.
const TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS clients (
        id      INTEGER PRIMARY KEY AUTOINCREMENT,
        name    TEXT NOT NULL,
        address TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS products (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        productName TEXT NOT NULL,
        quantity    INTEGER NOT NULL,
        price       REAL NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS orders (
        id       INTEGER PRIMARY KEY AUTOINCREMENT,
        clientId INTEGER NOT NULL,
        total    REAL NOT NULL DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS itemOrders (
        id        INTEGER PRIMARY KEY AUTOINCREMENT,
        orderId   INTEGER NOT NULL,
        productId INTEGER NOT NULL,
        quantity  INTEGER NOT NULL
    )
    "#,
];

/// Creates every table that doesn't exist yet.
pub async fn create_all(pool: &SqlitePool) -> DbResult<()> {
    for ddl in TABLES {
        debug!("Applying DDL statement");
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn creates_all_four_tables() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let names: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
        )
        .fetch_all(db.pool())
        .await
        .unwrap();

        for table in ["clients", "products", "orders", "itemOrders"] {
            assert!(names.iter().any(|n| n == table), "missing table {table}");
        }
    }
}
