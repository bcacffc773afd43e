//! # Entity Metadata Contract
//!
//! The static per-type description that drives all generic mapping, and the
//! `Entity` trait that exposes it together with a compile-time accessor
//! table.
//!
//! ## One Ordered Source of Truth
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 EntityMeta.fields (declared order)                      │
//! │                                                                         │
//! │            ┌──────────────────┼──────────────────┐                      │
//! │            ▼                  ▼                  ▼                      │
//! │      Query Builder     Parameter Binder    Result Hydrator              │
//! │      placeholders      Value slots         column reads                 │
//! │      (?, ?, ?)         [v1, v2, v3]        f1, f2, f3                   │
//! │                                                                         │
//! │  All three walk the SAME static slice. A builder/binder order mismatch  │
//! │  is impossible by construction; nothing recomputes field order.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Capabilities
//! Primary keys are assigned by the store, not by callers. Each entity
//! therefore carries two distinct key mutations:
//! - [`Entity::assign_key`] - reserved for the mapping layer (hydration and
//!   the insert read-back path);
//! - [`Entity::set_key`] - the public setter, a no-op whenever the metadata
//!   says the store auto-assigns keys.

use crate::error::CoreError;
use crate::value::Value;
use thiserror::Error;

// =============================================================================
// Entity Metadata
// =============================================================================

/// Static description of how an entity type maps to its table.
///
/// Built once per type as a `'static` and treated as immutable. `fields`
/// excludes the primary key; its order is the canonical positional order for
/// every generated statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityMeta {
    /// Backing table name.
    pub table: &'static str,
    /// Name of the primary-key column.
    pub primary_key: &'static str,
    /// Whether the store assigns the key on insert.
    pub auto_increment: bool,
    /// All persisted columns excluding the key, in declaration order.
    pub fields: &'static [&'static str],
}

/// Malformed-metadata diagnoses raised by [`EntityMeta::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetaError {
    #[error("entity metadata has an empty table name")]
    EmptyTable,
    #[error("entity metadata for table '{table}' has an empty primary-key name")]
    EmptyPrimaryKey { table: &'static str },
    #[error("entity metadata for table '{table}' declares no fields")]
    NoFields { table: &'static str },
    #[error("entity metadata for table '{table}' lists the primary key '{key}' among its fields")]
    KeyInFields {
        table: &'static str,
        key: &'static str,
    },
    #[error("entity metadata for table '{table}' declares field '{field}' twice")]
    DuplicateField {
        table: &'static str,
        field: &'static str,
    },
}

impl EntityMeta {
    /// Checks the declaration for the malformations that would silently
    /// corrupt generated statements. There is no fallback: a repository
    /// refuses to construct over bad metadata.
    pub fn validate(&self) -> Result<(), MetaError> {
        if self.table.is_empty() {
            return Err(MetaError::EmptyTable);
        }
        if self.primary_key.is_empty() {
            return Err(MetaError::EmptyPrimaryKey { table: self.table });
        }
        if self.fields.is_empty() {
            return Err(MetaError::NoFields { table: self.table });
        }
        for (i, field) in self.fields.iter().enumerate() {
            if *field == self.primary_key {
                return Err(MetaError::KeyInFields {
                    table: self.table,
                    key: self.primary_key,
                });
            }
            if self.fields[..i].contains(field) {
                return Err(MetaError::DuplicateField {
                    table: self.table,
                    field,
                });
            }
        }
        Ok(())
    }

    /// Whether `name` is a column this metadata knows: the key or a
    /// declared field. Filter fields supplied by callers are checked
    /// against this before any SQL is synthesized.
    pub fn has_column(&self, name: &str) -> bool {
        name == self.primary_key || self.fields.contains(&name)
    }
}

// =============================================================================
// Entity Trait
// =============================================================================

/// An in-memory record corresponding to one storage row.
///
/// Implementations supply the metadata plus a compile-time accessor table:
/// ordered extraction of field values and named assignment of them. The
/// match arms in `field_values` and `set_field` must cover exactly
/// `meta().fields`, in the same order.
///
/// ## Example
/// ```rust
/// use shopdesk_core::{Entity, EntityMeta, Value, CoreError};
///
/// #[derive(Debug, Clone, Default, PartialEq)]
/// struct Tag {
///     id: Option<i64>,
///     label: String,
/// }
///
/// impl Entity for Tag {
///     fn meta() -> &'static EntityMeta {
///         static META: EntityMeta = EntityMeta {
///             table: "tags",
///             primary_key: "id",
///             auto_increment: true,
///             fields: &["label"],
///         };
///         &META
///     }
///     fn key(&self) -> Option<i64> {
///         self.id
///     }
///     fn assign_key(&mut self, key: i64) {
///         self.id = Some(key);
///     }
///     fn field_values(&self) -> Vec<Value> {
///         vec![self.label.clone().into()]
///     }
///     fn set_field(&mut self, field: &str, value: Value) -> Result<(), CoreError> {
///         match field {
///             "label" => self.label = value.into_text("label")?,
///             _ => {
///                 return Err(CoreError::UnknownField {
///                     entity: "tags",
///                     field: field.to_string(),
///                 })
///             }
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Entity: Clone + Default + Send + Sync + Unpin + 'static {
    /// The static metadata for this type.
    fn meta() -> &'static EntityMeta;

    /// Current primary key; `None` until the record is persisted.
    fn key(&self) -> Option<i64>;

    /// Writes the primary key unconditionally.
    ///
    /// Reserved for the mapping layer: row hydration and the insert
    /// read-back of a store-assigned key. Application code should go
    /// through [`Entity::set_key`].
    fn assign_key(&mut self, key: i64);

    /// Public key setter. Ignored when the metadata says the store assigns
    /// keys on insert; keys are not caller-assigned for such types.
    fn set_key(&mut self, key: i64) {
        if !Self::meta().auto_increment {
            self.assign_key(key);
        }
    }

    /// Extracts all non-key field values, in `meta().fields` order.
    fn field_values(&self) -> Vec<Value>;

    /// Assigns one field by its column name.
    ///
    /// Unknown names and type-incompatible values surface as typed errors;
    /// they are never swallowed.
    fn set_field(&mut self, field: &str, value: Value) -> Result<(), CoreError>;
}

// =============================================================================
// Unit Tests
// =============================================================================
