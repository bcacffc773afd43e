//! # Command Executor
//!
//! The workflow layer: each parsed [`Command`] becomes one method here,
//! validation first, then repository calls, then document rendering.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  script line ──▶ parse_line ──▶ Command ──▶ Executor::execute           │
//! │                                                │                        │
//! │                       ┌────────────────────────┼──────────────────┐     │
//! │                       ▼                        ▼                  ▼     │
//! │                 repositories             validation         renderer    │
//! │                 (shopdesk-db)          (shopdesk-core)     (report.rs)  │
//! │                                                                         │
//! │  A failing line is logged and skipped; the run continues. Document      │
//! │  files are numbered per kind: client0, product0, order0, bill0,         │
//! │  understock0, ...                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::Path;

use tokio::fs;
use tracing::{debug, info, warn};

use shopdesk_core::{validation, Entity, ItemOrder, Order};
use shopdesk_db::{
    ClientRepository, Database, ItemOrderRepository, OrderRepository, ProductRepository,
};

use crate::command::{parse_line, Command, ReportKind};
use crate::error::{AppError, AppResult};
use crate::report::{Bill, ReportRenderer, UnderStockNotice};

// =============================================================================
// Run Summary
// =============================================================================

/// Outcome of one script run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Commands that completed.
    pub executed: usize,
    /// Lines skipped over a parse or execution failure.
    pub skipped: usize,
}

/// Per-kind document counters, used to number output file stems.
#[derive(Debug, Clone, Copy, Default)]
struct Counters {
    clients: usize,
    products: usize,
    orders: usize,
    bills: usize,
    under_stock: usize,
}

// =============================================================================
// Executor
// =============================================================================

/// Drives commands against the repositories and the report renderer.
pub struct Executor {
    clients: ClientRepository,
    products: ProductRepository,
    orders: OrderRepository,
    item_orders: ItemOrderRepository,
    renderer: Box<dyn ReportRenderer>,
    counters: Counters,
}

impl Executor {
    /// Creates an executor over an opened database.
    pub fn new(db: &Database, renderer: Box<dyn ReportRenderer>) -> AppResult<Self> {
        Ok(Executor {
            clients: db.clients()?,
            products: db.products()?,
            orders: db.orders()?,
            item_orders: db.item_orders()?,
            renderer,
            counters: Counters::default(),
        })
    }

    /// Runs every line of a script file. Bad lines are logged and skipped,
    /// never fatal; the summary says how many of each.
    pub async fn run_script(&mut self, path: &Path) -> AppResult<RunSummary> {
        let script = fs::read_to_string(path).await?;
        let mut summary = RunSummary::default();

        for (number, line) in script.lines().enumerate() {
            let command = match parse_line(line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(err) => {
                    warn!(line = number + 1, %err, "Skipping unparseable line");
                    summary.skipped += 1;
                    continue;
                }
            };

            match self.execute(command).await {
                Ok(()) => summary.executed += 1,
                Err(err) => {
                    warn!(line = number + 1, %err, "Command failed, continuing");
                    summary.skipped += 1;
                }
            }
        }

        info!(
            executed = summary.executed,
            skipped = summary.skipped,
            "Script run finished"
        );
        Ok(summary)
    }

    /// Dispatches one command.
    pub async fn execute(&mut self, command: Command) -> AppResult<()> {
        debug!(?command, "Executing command");
        match command {
            Command::AddClient { name, address } => self.add_client(&name, &address).await,
            Command::DeleteClient { name } => self.delete_client(&name).await,
            Command::AddProduct {
                name,
                quantity,
                price,
            } => self.add_product(&name, quantity, price).await,
            Command::DeleteProduct { name } => self.delete_product(&name).await,
            Command::CreateOrder {
                client,
                product,
                quantity,
            } => self.create_order(&client, &product, quantity).await,
            Command::Report { kind } => self.generate_report(kind).await,
        }
    }

    // =========================================================================
    // Client Commands
    // =========================================================================

    /// Inserts a client. Names are unique by workflow rule, so a second
    /// client with the same name is rejected.
    async fn add_client(&mut self, name: &str, address: &str) -> AppResult<()> {
        validation::validate_name("name", name)?;
        validation::validate_name("address", address)?;

        if self.clients.find_by_name(name).await?.is_some() {
            return Err(AppError::DuplicateClient(name.to_string()));
        }

        let client = self.clients.insert_new(name, address).await?;
        info!(name, id = client.id(), "Client added");
        Ok(())
    }

    async fn delete_client(&mut self, name: &str) -> AppResult<()> {
        let removed = self.clients.delete_by_name(name).await?;
        info!(name, removed, "Client delete");
        Ok(())
    }

    // =========================================================================
    // Product Commands
    // =========================================================================

    /// Inserts a product, or merges stock into an existing product with the
    /// same name and the same unit price. A same-name product at a different
    /// price is a fresh row.
    async fn add_product(&mut self, name: &str, quantity: i64, price: f64) -> AppResult<()> {
        validation::validate_name("productName", name)?;
        validation::validate_quantity(quantity)?;
        validation::validate_price(price)?;

        if let Some(mut existing) = self.products.find_by_product_name(name).await? {
            if existing.price == price {
                existing.quantity += quantity;
                self.products.update(&existing).await?;
                info!(name, stock = existing.quantity, "Product stock merged");
                return Ok(());
            }
        }

        let product = self.products.insert_new(name, quantity, price).await?;
        info!(name, id = product.id(), "Product added");
        Ok(())
    }

    async fn delete_product(&mut self, name: &str) -> AppResult<()> {
        let removed = self.products.delete_by_product_name(name).await?;
        info!(name, removed, "Product delete");
        Ok(())
    }

    // =========================================================================
    // Order Command
    // =========================================================================

    /// Places one order line: finds or creates the client's order, then
    /// either books the line (bill document, stock decrement, total
    /// accumulation) or rejects it (under-stock document, order row removed).
    async fn create_order(
        &mut self,
        client_name: &str,
        product_name: &str,
        quantity: i64,
    ) -> AppResult<()> {
        validation::validate_quantity(quantity)?;

        let client = self
            .clients
            .find_by_name(client_name)
            .await?
            .ok_or_else(|| AppError::UnknownClient(client_name.to_string()))?;
        let client_id = client.id().ok_or(AppError::UnknownClient(
            client_name.to_string(),
        ))?;

        let mut order = match self.orders.find_by_client(client_id).await?.into_iter().next() {
            Some(order) => order,
            None => self.orders.insert(Order::new(client_id)).await?,
        };

        let mut product = self
            .products
            .find_by_product_name(product_name)
            .await?
            .ok_or_else(|| AppError::UnknownProduct(product_name.to_string()))?;

        if quantity > product.quantity {
            let stem = format!("understock{}", self.counters.under_stock);
            self.counters.under_stock += 1;
            let path = self.renderer.under_stock(
                &stem,
                &UnderStockNotice {
                    product_name: product.product_name.clone(),
                    available: product.quantity,
                    requested: quantity,
                },
            )?;
            self.orders.delete(&order).await?;
            warn!(
                product = product_name,
                available = product.quantity,
                requested = quantity,
                notice = %path.display(),
                "Order rejected: insufficient stock"
            );
            return Ok(());
        }

        let line_total = quantity as f64 * product.price;
        order.total += line_total;
        self.orders.update(&order).await?;

        let order_id = match order.id() {
            Some(id) => id,
            None => return Err(AppError::UnknownClient(client_name.to_string())),
        };
        let product_id = match product.id() {
            Some(id) => id,
            None => return Err(AppError::UnknownProduct(product_name.to_string())),
        };
        self.item_orders
            .insert(ItemOrder::new(order_id, product_id, quantity))
            .await?;

        let stem = format!("bill{}", self.counters.bills);
        self.counters.bills += 1;
        let path = self.renderer.bill(
            &stem,
            &Bill {
                order_id,
                client_name: client.name.clone(),
                product_name: product.product_name.clone(),
                quantity,
                unit_price: product.price,
                line_total,
                order_total: order.total,
            },
        )?;

        // Stock is decremented after the line is booked; the two writes are
        // separate statements, so a crash in between can leave them apart.
        product.quantity -= quantity;
        self.products.update(&product).await?;

        info!(
            client = client_name,
            product = product_name,
            quantity,
            total = order.total,
            bill = %path.display(),
            "Order line placed"
        );
        Ok(())
    }

    // =========================================================================
    // Reports
    // =========================================================================

    /// Renders one tabular report document for the requested table.
    async fn generate_report(&mut self, kind: ReportKind) -> AppResult<()> {
        let (columns, rows): (Vec<String>, Vec<Vec<String>>) = match kind {
            ReportKind::Client => {
                let columns = self.clients.columns().await?;
                let rows = self
                    .clients
                    .find_all()
                    .await?
                    .iter()
                    .map(entity_row)
                    .collect();
                (columns, rows)
            }
            ReportKind::Product => {
                let columns = self.products.columns().await?;
                let rows = self
                    .products
                    .find_all()
                    .await?
                    .iter()
                    .map(entity_row)
                    .collect();
                (columns, rows)
            }
            ReportKind::Order => {
                let columns = self.orders.order_line_columns();
                let rows = self
                    .orders
                    .order_lines()
                    .await?
                    .iter()
                    .map(|line| {
                        vec![
                            line.id.to_string(),
                            line.client_name.clone(),
                            line.product_name.clone(),
                            line.quantity.to_string(),
                        ]
                    })
                    .collect();
                (columns, rows)
            }
        };

        let counter = match kind {
            ReportKind::Client => {
                let n = self.counters.clients;
                self.counters.clients += 1;
                n
            }
            ReportKind::Product => {
                let n = self.counters.products;
                self.counters.products += 1;
                n
            }
            ReportKind::Order => {
                let n = self.counters.orders;
                self.counters.orders += 1;
                n
            }
        };

        let stem = format!("{}{counter}", kind.stem());
        let path = self.renderer.table_report(&stem, &columns, &rows)?;
        info!(report = %path.display(), rows = rows.len(), "Report written");
        Ok(())
    }
}

/// One table row for an entity: key first, then every declared field, in
/// metadata order (matching the table's column order).
fn entity_row<T: Entity>(entity: &T) -> Vec<String> {
    let mut row = Vec::with_capacity(T::meta().fields.len() + 1);
    row.push(
        entity
            .key()
            .map(|k| k.to_string())
            .unwrap_or_default(),
    );
    row.extend(entity.field_values().into_iter().map(|v| v.to_string()));
    row
}

// =============================================================================
// Workflow Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{exists, TextReports};
    use shopdesk_db::DbConfig;

    async fn test_executor(dir: &Path) -> (Database, Executor) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let renderer = Box::new(TextReports::new(dir).unwrap());
        let executor = Executor::new(&db, renderer).unwrap();
        (db, executor)
    }

    #[tokio::test]
    async fn duplicate_client_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let (_db, mut exec) = test_executor(dir.path()).await;

        exec.add_client("Alice", "12 Main St").await.unwrap();
        let err = exec.add_client("Alice", "98 High St").await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateClient(_)));

        assert_eq!(exec.clients.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn same_name_same_price_products_merge_stock() {
        let dir = tempfile::tempdir().unwrap();
        let (_db, mut exec) = test_executor(dir.path()).await;

        exec.add_product("Widget", 10, 2.5).await.unwrap();
        exec.add_product("Widget", 5, 2.5).await.unwrap();

        let widget = exec
            .products
            .find_by_product_name("Widget")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(widget.quantity, 15);
        assert_eq!(exec.products.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn same_name_different_price_is_a_new_product() {
        let dir = tempfile::tempdir().unwrap();
        let (_db, mut exec) = test_executor(dir.path()).await;

        exec.add_product("Widget", 10, 2.5).await.unwrap();
        exec.add_product("Widget", 5, 3.0).await.unwrap();

        assert_eq!(exec.products.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn placing_an_order_bills_and_decrements_stock() {
        let dir = tempfile::tempdir().unwrap();
        let (_db, mut exec) = test_executor(dir.path()).await;

        exec.add_client("Alice", "12 Main St").await.unwrap();
        exec.add_product("Widget", 10, 2.5).await.unwrap();
        exec.create_order("Alice", "Widget", 3).await.unwrap();

        assert!(exists(dir.path(), "bill0"));

        let widget = exec
            .products
            .find_by_product_name("Widget")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(widget.quantity, 7);

        let alice = exec.clients.find_by_name("Alice").await.unwrap().unwrap();
        let orders = exec.orders.find_by_client(alice.id().unwrap()).await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].total, 7.5);
    }

    #[tokio::test]
    async fn repeat_orders_accumulate_the_total() {
        let dir = tempfile::tempdir().unwrap();
        let (_db, mut exec) = test_executor(dir.path()).await;

        exec.add_client("Alice", "12 Main St").await.unwrap();
        exec.add_product("Widget", 10, 2.0).await.unwrap();
        exec.create_order("Alice", "Widget", 2).await.unwrap();
        exec.create_order("Alice", "Widget", 3).await.unwrap();

        let alice = exec.clients.find_by_name("Alice").await.unwrap().unwrap();
        let orders = exec.orders.find_by_client(alice.id().unwrap()).await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].total, 10.0);
        assert!(exists(dir.path(), "bill0"));
        assert!(exists(dir.path(), "bill1"));
    }

    #[tokio::test]
    async fn under_stock_order_writes_a_notice_and_drops_the_order() {
        let dir = tempfile::tempdir().unwrap();
        let (_db, mut exec) = test_executor(dir.path()).await;

        exec.add_client("Alice", "12 Main St").await.unwrap();
        exec.add_product("Widget", 2, 2.5).await.unwrap();
        exec.create_order("Alice", "Widget", 5).await.unwrap();

        assert!(exists(dir.path(), "understock0"));
        assert!(!exists(dir.path(), "bill0"));

        // The rejected order's row is gone and stock is untouched.
        let alice = exec.clients.find_by_name("Alice").await.unwrap().unwrap();
        assert!(exec
            .orders
            .find_by_client(alice.id().unwrap())
            .await
            .unwrap()
            .is_empty());
        let widget = exec
            .products
            .find_by_product_name("Widget")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(widget.quantity, 2);
    }

    #[tokio::test]
    async fn order_against_unknown_names_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let (_db, mut exec) = test_executor(dir.path()).await;

        assert!(matches!(
            exec.create_order("Nobody", "Widget", 1).await.unwrap_err(),
            AppError::UnknownClient(_)
        ));

        exec.add_client("Alice", "12 Main St").await.unwrap();
        assert!(matches!(
            exec.create_order("Alice", "Nothing", 1).await.unwrap_err(),
            AppError::UnknownProduct(_)
        ));
    }

    #[tokio::test]
    async fn reports_are_written_and_numbered_per_kind() {
        let dir = tempfile::tempdir().unwrap();
        let (_db, mut exec) = test_executor(dir.path()).await;

        exec.add_client("Alice", "12 Main St").await.unwrap();
        exec.add_product("Widget", 10, 2.5).await.unwrap();
        exec.create_order("Alice", "Widget", 4).await.unwrap();

        exec.generate_report(ReportKind::Client).await.unwrap();
        exec.generate_report(ReportKind::Client).await.unwrap();
        exec.generate_report(ReportKind::Product).await.unwrap();
        exec.generate_report(ReportKind::Order).await.unwrap();

        assert!(exists(dir.path(), "client0"));
        assert!(exists(dir.path(), "client1"));
        assert!(exists(dir.path(), "product0"));
        assert!(exists(dir.path(), "order0"));

        let order_report = std::fs::read_to_string(dir.path().join("order0.txt")).unwrap();
        assert!(order_report.contains("Alice"));
        assert!(order_report.contains("Widget"));
    }

    #[tokio::test]
    async fn run_script_skips_bad_lines_and_keeps_going() {
        let dir = tempfile::tempdir().unwrap();
        let (_db, mut exec) = test_executor(dir.path()).await;

        let script = dir.path().join("script.txt");
        std::fs::write(
            &script,
            "Insert client: Alice, 12 Main St\n\
             Frobnicate: everything\n\
             Insert product: Widget, 10, 2.5\n\
             \n\
             Order: Alice, Widget, 3\n",
        )
        .unwrap();

        let summary = exec.run_script(&script).await.unwrap();
        assert_eq!(summary.executed, 3);
        assert_eq!(summary.skipped, 1);
        assert!(exists(dir.path(), "bill0"));
    }
}
