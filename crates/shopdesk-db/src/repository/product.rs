//! # Product Repository
//!
//! Convenience finders over `Repository<Product>`: lookups by product name
//! and the build-then-insert helper the add-product workflow uses.

use sqlx::SqlitePool;
use tracing::debug;

use shopdesk_core::{Product, Value};

use crate::error::DbResult;
use crate::repository::Repository;

/// Repository for product database operations.
#[derive(Clone)]
pub struct ProductRepository {
    repo: Repository<Product>,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> DbResult<Self> {
        Ok(ProductRepository {
            repo: Repository::new(pool)?,
        })
    }

    /// First product with the given name, if any.
    pub async fn find_by_product_name(&self, name: &str) -> DbResult<Option<Product>> {
        debug!(name, "Finding product by name");
        let mut matches = self
            .repo
            .find_by_field("productName", Value::from(name))
            .await?;
        if matches.is_empty() {
            Ok(None)
        } else {
            Ok(Some(matches.swap_remove(0)))
        }
    }

    /// Removes every product with the given name; returns how many.
    pub async fn delete_by_product_name(&self, name: &str) -> DbResult<u64> {
        debug!(name, "Deleting product by name");
        self.repo
            .delete_by_field("productName", Value::from(name))
            .await
    }

    /// Builds a product from its parts and inserts it.
    pub async fn insert_new(&self, name: &str, quantity: i64, price: f64) -> DbResult<Product> {
        self.repo.insert(Product::new(name, quantity, price)).await
    }

    /// Product with the given key; `NotFound` when absent.
    pub async fn find_by_key(&self, key: i64) -> DbResult<Product> {
        self.repo.find_by_key(key).await
    }

    /// Full-row update keyed by the primary key (stock decrements, merges).
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        self.repo.update(product).await
    }

    /// Full scan, for reports.
    pub async fn find_all(&self) -> DbResult<Vec<Product>> {
        self.repo.find_all().await
    }

    /// Column labels of the products table, for report headers.
    pub async fn columns(&self) -> DbResult<Vec<String>> {
        self.repo.columns().await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
