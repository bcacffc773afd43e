//! # Domain Types
//!
//! Entity types for Shopdesk, each equivalent to one row of its table.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Client      │   │     Product     │   │      Order      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (rowid)     │   │  id (rowid)     │   │  id (rowid)     │       │
//! │  │  name           │   │  productName    │   │  clientId (FK)  │       │
//! │  │  address        │   │  quantity       │   │  total          │       │
//! │  └─────────────────┘   │  price          │   └─────────────────┘       │
//! │                        └─────────────────┘                             │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    ItemOrder    │   │    OrderLine    │  (report-only join row,     │
//! │  │  ─────────────  │   │  ─────────────  │   not an entity)            │
//! │  │  id (rowid)     │   │  id             │                             │
//! │  │  orderId (FK)   │   │  client_name    │                             │
//! │  │  productId (FK) │   │  product_name   │                             │
//! │  │  quantity       │   │  quantity       │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every entity is keyed by an integer auto-increment rowid. Keys are
//! store-assigned: `id` is private, read through `id()`, and written only by
//! the mapping layer. Storage column names keep the original camelCase
//! (`productName`, `clientId`), while struct fields are snake_case.
//!
//! The `field_values`/`set_field` bodies below must stay aligned with each
//! type's `fields` declaration; the unit tests pin that down.

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityMeta};
use crate::error::CoreError;
use crate::value::Value;

// =============================================================================
// Client
// =============================================================================

/// A client able to place orders. One row of `clients`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Client {
    id: Option<i64>,
    /// Client name, unique by workflow convention.
    pub name: String,
    /// Postal address, free text.
    pub address: String,
}

impl Client {
    /// Creates an unpersisted client; the key is assigned on insert.
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Client {
            id: None,
            name: name.into(),
            address: address.into(),
        }
    }

    /// Store-assigned key, `None` until persisted.
    pub fn id(&self) -> Option<i64> {
        self.id
    }
}

impl Entity for Client {
    fn meta() -> &'static EntityMeta {
        static META: EntityMeta = EntityMeta {
            table: "clients",
            primary_key: "id",
            auto_increment: true,
            fields: &["name", "address"],
        };
        &META
    }

    fn key(&self) -> Option<i64> {
        self.id
    }

    fn assign_key(&mut self, key: i64) {
        self.id = Some(key);
    }

    fn field_values(&self) -> Vec<Value> {
        vec![self.name.clone().into(), self.address.clone().into()]
    }

    fn set_field(&mut self, field: &str, value: Value) -> Result<(), CoreError> {
        match field {
            "name" => self.name = value.into_text("name")?,
            "address" => self.address = value.into_text("address")?,
            _ => {
                return Err(CoreError::UnknownField {
                    entity: "clients",
                    field: field.to_string(),
                })
            }
        }
        Ok(())
    }
}

// =============================================================================
// Product
// =============================================================================

/// A stocked product. One row of `products`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: Option<i64>,
    /// Product name, unique by workflow convention (column `productName`).
    pub product_name: String,
    /// Units currently in stock.
    pub quantity: i64,
    /// Unit price.
    pub price: f64,
}

impl Product {
    /// Creates an unpersisted product; the key is assigned on insert.
    pub fn new(product_name: impl Into<String>, quantity: i64, price: f64) -> Self {
        Product {
            id: None,
            product_name: product_name.into(),
            quantity,
            price,
        }
    }

    /// Store-assigned key, `None` until persisted.
    pub fn id(&self) -> Option<i64> {
        self.id
    }
}

impl Entity for Product {
    fn meta() -> &'static EntityMeta {
        static META: EntityMeta = EntityMeta {
            table: "products",
            primary_key: "id",
            auto_increment: true,
            fields: &["productName", "quantity", "price"],
        };
        &META
    }

    fn key(&self) -> Option<i64> {
        self.id
    }

    fn assign_key(&mut self, key: i64) {
        self.id = Some(key);
    }

    fn field_values(&self) -> Vec<Value> {
        vec![
            self.product_name.clone().into(),
            self.quantity.into(),
            self.price.into(),
        ]
    }

    fn set_field(&mut self, field: &str, value: Value) -> Result<(), CoreError> {
        match field {
            "productName" => self.product_name = value.into_text("productName")?,
            "quantity" => self.quantity = value.into_integer("quantity")?,
            "price" => self.price = value.into_real("price")?,
            _ => {
                return Err(CoreError::UnknownField {
                    entity: "products",
                    field: field.to_string(),
                })
            }
        }
        Ok(())
    }
}

// =============================================================================
// Order
// =============================================================================

/// One client's running order. One row of `orders`.
///
/// The total starts at zero and accumulates as item orders are added.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    id: Option<i64>,
    /// Key of the owning client (column `clientId`).
    pub client_id: i64,
    /// Accumulated order total.
    pub total: f64,
}

impl Order {
    /// Creates an empty order for a client.
    pub fn new(client_id: i64) -> Self {
        Order {
            id: None,
            client_id,
            total: 0.0,
        }
    }

    /// Store-assigned key, `None` until persisted.
    pub fn id(&self) -> Option<i64> {
        self.id
    }
}

impl Entity for Order {
    fn meta() -> &'static EntityMeta {
        static META: EntityMeta = EntityMeta {
            table: "orders",
            primary_key: "id",
            auto_increment: true,
            fields: &["clientId", "total"],
        };
        &META
    }

    fn key(&self) -> Option<i64> {
        self.id
    }

    fn assign_key(&mut self, key: i64) {
        self.id = Some(key);
    }

    fn field_values(&self) -> Vec<Value> {
        vec![self.client_id.into(), self.total.into()]
    }

    fn set_field(&mut self, field: &str, value: Value) -> Result<(), CoreError> {
        match field {
            "clientId" => self.client_id = value.into_integer("clientId")?,
            "total" => self.total = value.into_real("total")?,
            _ => {
                return Err(CoreError::UnknownField {
                    entity: "orders",
                    field: field.to_string(),
                })
            }
        }
        Ok(())
    }
}

// =============================================================================
// ItemOrder
// =============================================================================

/// One product line within an order. One row of `itemOrders`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemOrder {
    id: Option<i64>,
    /// Key of the owning order (column `orderId`).
    pub order_id: i64,
    /// Key of the ordered product (column `productId`).
    pub product_id: i64,
    /// Units ordered.
    pub quantity: i64,
}

impl ItemOrder {
    /// Creates an unpersisted item order.
    pub fn new(order_id: i64, product_id: i64, quantity: i64) -> Self {
        ItemOrder {
            id: None,
            order_id,
            product_id,
            quantity,
        }
    }

    /// Store-assigned key, `None` until persisted.
    pub fn id(&self) -> Option<i64> {
        self.id
    }
}

impl Entity for ItemOrder {
    fn meta() -> &'static EntityMeta {
        static META: EntityMeta = EntityMeta {
            table: "itemOrders",
            primary_key: "id",
            auto_increment: true,
            fields: &["orderId", "productId", "quantity"],
        };
        &META
    }

    fn key(&self) -> Option<i64> {
        self.id
    }

    fn assign_key(&mut self, key: i64) {
        self.id = Some(key);
    }

    fn field_values(&self) -> Vec<Value> {
        vec![
            self.order_id.into(),
            self.product_id.into(),
            self.quantity.into(),
        ]
    }

    fn set_field(&mut self, field: &str, value: Value) -> Result<(), CoreError> {
        match field {
            "orderId" => self.order_id = value.into_integer("orderId")?,
            "productId" => self.product_id = value.into_integer("productId")?,
            "quantity" => self.quantity = value.into_integer("quantity")?,
            _ => {
                return Err(CoreError::UnknownField {
                    entity: "itemOrders",
                    field: field.to_string(),
                })
            }
        }
        Ok(())
    }
}

// =============================================================================
// OrderLine
// =============================================================================

/// A printable order line: the join of clients, orders, item orders and
/// products that order reports display. Not backed by a table of its own,
/// so it is not an [`Entity`]; the order repository hydrates it from its
/// join query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Item-order key.
    pub id: i64,
    /// Ordering client's name.
    pub client_name: String,
    /// Ordered product's name.
    pub product_name: String,
    /// Units ordered.
    pub quantity: i64,
}

impl OrderLine {
    /// Column labels of the report query, in select-list order.
    pub const COLUMNS: &'static [&'static str] = &["id", "name", "productName", "quantity"];
}

// =============================================================================
// Unit Tests
// =============================================================================
