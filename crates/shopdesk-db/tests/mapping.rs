//! Integration tests for the mapping engine: binder/hydrator symmetry,
//! round-trips through a real store, and the whole-read failure policy.

use shopdesk_core::{Client, Entity, ItemOrder, Order, Product, Value};
use shopdesk_db::{Database, DbConfig, DbError, Repository};

async fn test_db() -> Database {
    Database::new(DbConfig::in_memory()).await.unwrap()
}

/// Bind followed by hydrate reconstructs an entity equal to the original
/// for every declared field, for every entity type.
#[tokio::test]
async fn binder_hydrator_symmetry() {
    let db = test_db().await;

    async fn round_trip<T>(db: &Database, entity: T)
    where
        T: Entity + PartialEq + std::fmt::Debug,
    {
        let repo = Repository::<T>::new(db.pool().clone()).unwrap();
        let inserted = repo.insert(entity).await.unwrap();
        let loaded = repo.find_by_key(inserted.key().unwrap()).await.unwrap();
        assert_eq!(loaded, inserted);
        assert_eq!(loaded.field_values(), inserted.field_values());
    }

    round_trip(&db, Client::new("Alice", "12 Main St")).await;
    round_trip(&db, Product::new("Widget", 10, 2.5)).await;
    round_trip(&db, Order::new(1)).await;
    round_trip(&db, ItemOrder::new(1, 1, 4)).await;
}

/// The auto-increment key is populated post-insert and differs from the
/// pre-insert default.
#[tokio::test]
async fn auto_increment_key_is_populated() {
    let db = test_db().await;
    let repo = Repository::<Client>::new(db.pool().clone()).unwrap();

    let fresh = Client::new("Alice", "12 Main St");
    assert_eq!(fresh.key(), None);

    let first = repo.insert(fresh.clone()).await.unwrap();
    let second = repo.insert(fresh).await.unwrap();
    assert!(first.key().is_some());
    assert!(second.key().is_some());
    assert_ne!(first.key(), second.key());
}

/// A type-incompatible cell aborts the whole read; no partial sequence is
/// returned. SQLite's flexible typing lets us plant a TEXT into an INTEGER
/// column directly.
#[tokio::test]
async fn incompatible_cell_fails_the_whole_read() {
    let db = test_db().await;
    let repo = Repository::<Product>::new(db.pool().clone()).unwrap();

    repo.insert(Product::new("Widget", 10, 2.5)).await.unwrap();
    sqlx::query("INSERT INTO products (productName, quantity, price) VALUES (?, ?, ?)")
        .bind("Broken")
        .bind("not-a-number")
        .bind(1.0)
        .execute(db.pool())
        .await
        .unwrap();

    let err = repo.find_all().await.unwrap_err();
    assert!(matches!(err, DbError::Mapping { .. }), "got {err:?}");
}

/// Repository calls hold no shared state: two repositories over the same
/// pool observe each other's writes but never interfere.
#[tokio::test]
async fn repositories_are_stateless_views() {
    let db = test_db().await;
    let a = Repository::<Client>::new(db.pool().clone()).unwrap();
    let b = Repository::<Client>::new(db.pool().clone()).unwrap();

    let alice = a.insert(Client::new("Alice", "12 Main St")).await.unwrap();
    let seen = b.find_by_key(alice.key().unwrap()).await.unwrap();
    assert_eq!(seen, alice);

    b.delete(&seen).await.unwrap();
    assert!(matches!(
        a.find_by_key(alice.key().unwrap()).await.unwrap_err(),
        DbError::NotFound { .. }
    ));
}

/// NULL slots bind and keys read back: an unpersisted entity binds its key
/// slot as NULL, which is what lets AUTOINCREMENT assign the rowid.
#[tokio::test]
async fn null_key_slot_defers_to_the_store() {
    let db = test_db().await;
    let repo = Repository::<Order>::new(db.pool().clone()).unwrap();

    let order = repo.insert(Order::new(5)).await.unwrap();
    assert!(order.key().unwrap() >= 1);

    // A second insert gets the next rowid.
    let next = repo.insert(Order::new(5)).await.unwrap();
    assert_eq!(next.key().unwrap(), order.key().unwrap() + 1);

    let both = repo
        .find_by_field("clientId", Value::Integer(5))
        .await
        .unwrap();
    assert_eq!(both.len(), 2);
}
