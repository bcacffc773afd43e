//! # Query Builder
//!
//! Pure functions turning entity metadata into SQL text for the query
//! shapes the generic repository needs. Nothing here touches a connection.
//!
//! ## Placeholder Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  insert:  INSERT INTO t (id, f1, .., fn) VALUES (?, ?, .., ?)           │
//! │           key first, then fields in declared order → n+1 placeholders   │
//! │                                                                         │
//! │  update:  UPDATE t SET f1 = ?, .., fn = ? WHERE sel = ?                 │
//! │           fields in declared order, then one selector placeholder       │
//! │                                                                         │
//! │  The binder walks the same metadata slice in the same order, so the     │
//! │  placeholder sequence and the bound-slot sequence cannot diverge.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No identifier quoting is performed: table and field names come only from
//! trusted static metadata (the repository rejects caller-supplied filter
//! fields that the metadata does not declare). Values never appear in the
//! text; they always go through parameter binding.

use shopdesk_core::EntityMeta;

/// `SELECT * FROM <table>` - the full-scan shape.
pub fn select_all(meta: &EntityMeta) -> String {
    format!("SELECT * FROM {}", meta.table)
}

/// `SELECT * FROM <table> WHERE <field> = ?` - the equality-filter shape.
pub fn select_by(meta: &EntityMeta, field: &str) -> String {
    format!("SELECT * FROM {} WHERE {} = ?", meta.table, field)
}

/// `INSERT INTO <table> (<pk>, f1, ..) VALUES (?, ..)`.
///
/// One placeholder per column including the primary key; the key column
/// comes first so that insert binding can start with the key slot.
pub fn insert(meta: &EntityMeta) -> String {
    let mut columns = Vec::with_capacity(meta.fields.len() + 1);
    columns.push(meta.primary_key);
    columns.extend_from_slice(meta.fields);

    let placeholders = vec!["?"; columns.len()];
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        meta.table,
        columns.join(", "),
        placeholders.join(", ")
    )
}

/// `UPDATE <table> SET f1 = ?, .. WHERE <select_field> = ?`.
///
/// Placeholders for the declared fields in order, then one trailing
/// placeholder for the selector.
pub fn update_by(meta: &EntityMeta, select_field: &str) -> String {
    let assignments: Vec<String> = meta
        .fields
        .iter()
        .map(|field| format!("{field} = ?"))
        .collect();
    format!(
        "UPDATE {} SET {} WHERE {} = ?",
        meta.table,
        assignments.join(", "),
        select_field
    )
}

/// `DELETE FROM <table> WHERE <field> = ?`.
pub fn delete_by(meta: &EntityMeta, field: &str) -> String {
    format!("DELETE FROM {} WHERE {} = ?", meta.table, field)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const PRODUCT_META: EntityMeta = EntityMeta {
        table: "products",
        primary_key: "id",
        auto_increment: true,
        fields: &["productName", "quantity", "price"],
    };

    fn placeholders(sql: &str) -> usize {
        sql.matches('?').count()
    }

    #[test]
    fn select_shapes() {
        assert_eq!(select_all(&PRODUCT_META), "SELECT * FROM products");
        assert_eq!(
            select_by(&PRODUCT_META, "productName"),
            "SELECT * FROM products WHERE productName = ?"
        );
    }

    #[test]
    fn insert_lists_key_first_with_n_plus_one_placeholders() {
        let sql = insert(&PRODUCT_META);
        assert_eq!(
            sql,
            "INSERT INTO products (id, productName, quantity, price) VALUES (?, ?, ?, ?)"
        );
        assert_eq!(placeholders(&sql), PRODUCT_META.fields.len() + 1);
        // Key column strictly before the first declared field.
        assert!(sql.find("id").unwrap() < sql.find("productName").unwrap());
    }

    #[test]
    fn update_places_selector_last() {
        let sql = update_by(&PRODUCT_META, "id");
        assert_eq!(
            sql,
            "UPDATE products SET productName = ?, quantity = ?, price = ? WHERE id = ?"
        );
        assert_eq!(placeholders(&sql), PRODUCT_META.fields.len() + 1);
    }

    #[test]
    fn delete_shape() {
        assert_eq!(
            delete_by(&PRODUCT_META, "productName"),
            "DELETE FROM products WHERE productName = ?"
        );
    }
}
