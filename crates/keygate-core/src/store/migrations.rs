use super::SqliteRowStore;
use crate::error::{RegistryError, Result};

impl SqliteRowStore {
    /// Run database migrations
    pub(super) async fn migrate(&self) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RegistryError::Unavailable(e.to_string()))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS auth_keys (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                auth_key TEXT NOT NULL UNIQUE,
                auth_value TEXT NOT NULL,
                is_disabled BOOLEAN NOT NULL DEFAULT FALSE,
                created_at TIMESTAMP NOT NULL,
                updated_at TIMESTAMP NOT NULL
            )
            "#,
        )
        .execute(&mut *tx)
        .await
        .map_err(|e| RegistryError::Internal(format!("Migration failed (auth_keys): {}", e)))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_auth_keys_disabled ON auth_keys(is_disabled)")
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                RegistryError::Internal(format!("Migration failed (idx_auth_keys_disabled): {}", e))
            })?;

        tx.commit()
            .await
            .map_err(|e| RegistryError::Internal(e.to_string()))?;

        Ok(())
    }
}
