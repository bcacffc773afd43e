//! # shopdesk-db: Database Layer for Shopdesk
//!
//! This crate provides database access for Shopdesk. It uses SQLite for
//! local storage with sqlx for async operations, and maps entities through
//! one generic engine instead of per-entity SQL.
//!
//! ## The Mapping Engine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Generic Entity Mapping                              │
//! │                                                                         │
//! │  EntityMeta (table, key, auto-increment, ordered fields)                │
//! │       │                                                                 │
//! │       ├──► query.rs    synthesizes SELECT/INSERT/UPDATE/DELETE text     │
//! │       │                                                                 │
//! │       ├──► bind.rs     lowers entity fields to Values, binds            │
//! │       │                positionally in declared order                   │
//! │       │                                                                 │
//! │       └──► hydrate.rs  raises row columns to Values, assigns them       │
//! │                        through the entity's accessor table              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  repository::Repository<T>   findAll / findByField / findByKey /        │
//! │                              insert / update / delete /                 │
//! │                              deleteByField / columns                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Per-entity repositories     convenience finders only, no SQL           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and the [`Database`] handle
//! - [`schema`] - Idempotent schema bootstrap
//! - [`error`] - Database error taxonomy
//! - [`query`] - SQL synthesis from entity metadata
//! - [`bind`] - Positional parameter binding
//! - [`hydrate`] - Row-to-entity hydration
//! - [`repository`] - The generic repository and its thin specializations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shopdesk_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("shop.db")).await?;
//! let products = db.products()?;
//! let widget = products.find_by_product_name("Widget").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bind;
pub mod error;
pub mod hydrate;
pub mod pool;
pub mod query;
pub mod repository;
pub mod schema;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::Repository;

// Repository re-exports for convenience
pub use repository::client::ClientRepository;
pub use repository::item_order::ItemOrderRepository;
pub use repository::order::OrderRepository;
pub use repository::product::ProductRepository;
