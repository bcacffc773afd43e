//! # shopdesk-core: Pure Domain Layer for Shopdesk
//!
//! This crate is the foundation of Shopdesk. It contains the entity types
//! and the metadata contract that drives the generic mapping engine, with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shopdesk Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/cli (Application)                       │   │
//! │  │    command parsing ──► workflow execution ──► report files      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  shopdesk-db (Database Layer)                   │   │
//! │  │    query builder ── parameter binder ── hydrator ── repos       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ reads metadata, moves Values           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shopdesk-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │  entity   │  │   value   │  │   types   │  │ validation│   │   │
//! │  │   │EntityMeta │  │   Value   │  │  Client   │  │   rules   │   │   │
//! │  │   │  Entity   │  │ Null/Int/ │  │  Product  │  │  checks   │   │   │
//! │  │   │  trait    │  │ Real/Text │  │  Order    │  │           │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`entity`] - The `EntityMeta` description and the `Entity` trait
//! - [`value`] - Dynamic `Value` type moved between entities and rows
//! - [`types`] - Domain entities (Client, Product, Order, ItemOrder)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **One ordered metadata source**: the field order declared in an
//!    entity's metadata is the single canonical positional order. Query
//!    synthesis, parameter binding and row hydration all derive from it;
//!    nothing recomputes field order independently.
//! 2. **Store-assigned keys**: primary keys are written only by the mapping
//!    layer. The public key setter is a no-op for auto-increment entities.
//! 3. **Explicit errors**: all failures are typed enums, never strings or
//!    panics.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod entity;
pub mod error;
pub mod types;
pub mod validation;
pub mod value;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use entity::{Entity, EntityMeta, MetaError};
pub use error::{CoreError, ValidationError};
pub use types::{Client, ItemOrder, Order, OrderLine, Product};
pub use value::Value;
