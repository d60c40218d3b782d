use super::{RowStore, SqliteRowStore};
use crate::credential::CredentialEntry;
use crate::error::{RegistryError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(FromRow)]
struct CredentialRow {
    auth_key: String,
    auth_value: String,
    is_disabled: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CredentialRow> for CredentialEntry {
    fn from(row: CredentialRow) -> Self {
        CredentialEntry {
            key: row.auth_key,
            value: row.auth_value,
            disabled: row.is_disabled,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl RowStore for SqliteRowStore {
    async fn find_row(&self, key: &str) -> Result<Option<CredentialEntry>> {
        let row: Option<CredentialRow> = sqlx::query_as(
            r#"
            SELECT auth_key, auth_value, is_disabled, created_at, updated_at
            FROM auth_keys
            WHERE auth_key = ?
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list_rows(&self) -> Result<Vec<CredentialEntry>> {
        let rows: Vec<CredentialRow> = sqlx::query_as(
            r#"
            SELECT auth_key, auth_value, is_disabled, created_at, updated_at
            FROM auth_keys
            ORDER BY auth_key ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert_row(&self, key: &str, value: &str) -> Result<()> {
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO auth_keys (auth_key, auth_value, is_disabled, created_at, updated_at)
            VALUES (?, ?, FALSE, ?, ?)
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| RegistryError::from_insert(e, key))?;

        Ok(())
    }

    async fn update_value(&self, key: &str, value: &str) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE auth_keys SET
                auth_value = ?,
                is_disabled = FALSE,
                updated_at = ?
            WHERE auth_key = ?
            "#,
        )
        .bind(value)
        .bind(Utc::now())
        .bind(key)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn set_disabled(&self, key: &str, disabled: bool) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE auth_keys SET
                is_disabled = ?,
                updated_at = ?
            WHERE auth_key = ?
            "#,
        )
        .bind(disabled)
        .bind(Utc::now())
        .bind(key)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
