use anyhow::Result;
use sqlx::{migrate::MigrateDatabase, Row, Sqlite, SqlitePool};
use std::sync::Arc;

// The database URL for the production database
const DATABASE_URL: &str = "sqlite:expenses.db";

/// DbConnection manages the key-value table the expense blobs live in
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection
    pub async fn new(url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?
        }

        // Connect to the database
        let pool = SqlitePool::connect(url).await?;

        // Setup database schema
        Self::setup_schema(&pool).await?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Initialize the standard database
    pub async fn init() -> Result<Self> {
        Self::new(DATABASE_URL).await
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        // Generate a unique database name so parallel tests stay isolated
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS key_values (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Store a value under a key, overwriting any existing value.
    pub async fn put_value(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query("INSERT OR REPLACE INTO key_values (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(value)
            .execute(&*self.pool)
            .await?;
        Ok(())
    }

    /// Retrieve a value by its key
    pub async fn get_value(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM key_values WHERE key = ?")
            .bind(key)
            .fetch_optional(&*self.pool)
            .await?;

        match row {
            Some(r) => {
                let value: String = r.get("value");
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Delete a value by its key; returns whether a value was there.
    pub async fn delete_value(&self, key: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM key_values WHERE key = ?")
            .bind(key)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test gets its own in-memory database
    async fn setup_test() -> DbConnection {
        DbConnection::init_test()
            .await
            .expect("Failed to create test database")
    }

    #[tokio::test]
    async fn test_put_and_get_value() {
        let db = setup_test().await;

        db.put_value("expenses", r#"[{"id":1}]"#)
            .await
            .expect("Failed to put value");

        let result = db.get_value("expenses").await.expect("Failed to get value");
        assert_eq!(result.as_deref(), Some(r#"[{"id":1}]"#));
    }

    #[tokio::test]
    async fn test_get_nonexistent_value() {
        let db = setup_test().await;

        let result = db.get_value("nonexistent_key").await.expect("Query failed");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_put_replace_value() {
        let db = setup_test().await;

        db.put_value("expenses", "[]")
            .await
            .expect("Failed to put initial value");

        // Same key, new blob
        db.put_value("expenses", r#"[{"id":2}]"#)
            .await
            .expect("Failed to update value");

        let result = db.get_value("expenses").await.expect("Failed to get value");
        assert_eq!(result.as_deref(), Some(r#"[{"id":2}]"#));
    }

    #[tokio::test]
    async fn test_delete_value() {
        let db = setup_test().await;

        db.put_value("expenses", "[]")
            .await
            .expect("Failed to put value");

        let deleted = db
            .delete_value("expenses")
            .await
            .expect("Failed to delete value");
        assert!(deleted, "Value should have been deleted");

        let after = db
            .get_value("expenses")
            .await
            .expect("Failed to check after deletion");
        assert!(after.is_none());

        // Deleting again reports that nothing was there
        let deleted_again = db
            .delete_value("expenses")
            .await
            .expect("Failed to re-delete value");
        assert!(!deleted_again);
    }
}
