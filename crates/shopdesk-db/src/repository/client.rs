//! # Client Repository
//!
//! Convenience finders over `Repository<Client>`. No mapping logic lives
//! here; everything is delegation plus name-based lookups.

use sqlx::SqlitePool;
use tracing::debug;

use shopdesk_core::{Client, Value};

use crate::error::DbResult;
use crate::repository::Repository;

/// Repository for client database operations.
#[derive(Clone)]
pub struct ClientRepository {
    repo: Repository<Client>,
}

impl ClientRepository {
    /// Creates a new ClientRepository.
    pub fn new(pool: SqlitePool) -> DbResult<Self> {
        Ok(ClientRepository {
            repo: Repository::new(pool)?,
        })
    }

    /// First client with the given name, if any.
    pub async fn find_by_name(&self, name: &str) -> DbResult<Option<Client>> {
        debug!(name, "Finding client by name");
        let mut matches = self.repo.find_by_field("name", Value::from(name)).await?;
        if matches.is_empty() {
            Ok(None)
        } else {
            Ok(Some(matches.swap_remove(0)))
        }
    }

    /// Removes every client with the given name; returns how many.
    pub async fn delete_by_name(&self, name: &str) -> DbResult<u64> {
        debug!(name, "Deleting client by name");
        self.repo.delete_by_field("name", Value::from(name)).await
    }

    /// Builds a client from its parts and inserts it.
    pub async fn insert_new(&self, name: &str, address: &str) -> DbResult<Client> {
        self.repo.insert(Client::new(name, address)).await
    }

    /// Full scan, for reports.
    pub async fn find_all(&self) -> DbResult<Vec<Client>> {
        self.repo.find_all().await
    }

    /// Column labels of the clients table, for report headers.
    pub async fn columns(&self) -> DbResult<Vec<String>> {
        self.repo.columns().await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn finds_and_deletes_by_name() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let clients = db.clients().unwrap();

        let alice = clients.insert_new("Alice", "12 Main St").await.unwrap();
        assert!(alice.id().is_some());

        let found = clients.find_by_name("Alice").await.unwrap().unwrap();
        assert_eq!(found, alice);
        assert!(clients.find_by_name("Bob").await.unwrap().is_none());

        assert_eq!(clients.delete_by_name("Alice").await.unwrap(), 1);
        assert!(clients.find_by_name("Alice").await.unwrap().is_none());
    }
}
