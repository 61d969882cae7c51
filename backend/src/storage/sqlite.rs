//! Sqlite-backed persistence: the collection is one JSON array stored
//! under a single key in the key-value table.

use anyhow::{Context, Result};
use shared::Expense;
use tracing::info;

use super::traits::ExpenseStorage;
use crate::db::DbConnection;

/// Key the serialized collection is stored under.
const EXPENSES_KEY: &str = "expenses";

/// Persists the expense collection through [`DbConnection`].
#[derive(Clone)]
pub struct SqliteExpenseStorage {
    db: DbConnection,
}

impl SqliteExpenseStorage {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

impl ExpenseStorage for SqliteExpenseStorage {
    async fn save(&self, expenses: &[Expense]) -> Result<()> {
        let blob = serde_json::to_string(expenses).context("serializing expense collection")?;
        self.db.put_value(EXPENSES_KEY, &blob).await
    }

    async fn load(&self) -> Result<Vec<Expense>> {
        match self.db.get_value(EXPENSES_KEY).await? {
            Some(blob) => {
                serde_json::from_str(&blob).context("decoding persisted expense collection")
            }
            None => Ok(Vec::new()),
        }
    }

    async fn clear(&self) -> Result<()> {
        let removed = self.db.delete_value(EXPENSES_KEY).await?;
        if !removed {
            info!("No persisted expenses to clear");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_storage() -> SqliteExpenseStorage {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        SqliteExpenseStorage::new(db)
    }

    fn sample_expenses() -> Vec<Expense> {
        vec![
            Expense {
                id: 1,
                amount: 12.5,
                date: "2024-09-01".to_string(),
                category: "food".to_string(),
                note: "lunch".to_string(),
            },
            Expense {
                id: 2,
                amount: 30.0,
                date: "2024-09-03".to_string(),
                category: "transport".to_string(),
                note: String::new(),
            },
        ]
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let storage = setup_storage().await;
        let expenses = sample_expenses();

        storage.save(&expenses).await.expect("Failed to save");
        let loaded = storage.load().await.expect("Failed to load");

        assert_eq!(loaded, expenses);
    }

    #[tokio::test]
    async fn load_without_saved_data_is_empty() {
        let storage = setup_storage().await;

        let loaded = storage.load().await.expect("Failed to load");
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn save_replaces_previous_blob() {
        let storage = setup_storage().await;
        let expenses = sample_expenses();

        storage.save(&expenses).await.expect("Failed to save");
        storage
            .save(&expenses[..1])
            .await
            .expect("Failed to re-save");

        let loaded = storage.load().await.expect("Failed to load");
        assert_eq!(loaded, expenses[..1]);
    }

    #[tokio::test]
    async fn clear_removes_persisted_collection() {
        let storage = setup_storage().await;

        storage
            .save(&sample_expenses())
            .await
            .expect("Failed to save");
        storage.clear().await.expect("Failed to clear");

        let loaded = storage.load().await.expect("Failed to load");
        assert!(loaded.is_empty());

        // Clearing an already-empty store is fine
        storage.clear().await.expect("Failed to re-clear");
    }

    #[tokio::test]
    async fn load_rejects_corrupt_blob() {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        db.put_value("expenses", "not json")
            .await
            .expect("Failed to put value");

        let storage = SqliteExpenseStorage::new(db);
        assert!(storage.load().await.is_err());
    }
}
