//! Durable credential storage
//!
//! `RowStore` is the minimal row-level contract the service needs from the
//! `auth_keys` table. `SqliteRowStore` implements it on a pooled SQLite
//! connection; every call checks a connection out of the pool for its own
//! duration only.

mod migrations;
mod queries;


use async_trait::async_trait;
use sqlx::{sqlite::SqlitePoolOptions, Pool, Sqlite};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::credential::CredentialEntry;
use crate::error::{RegistryError, Result};

/// Default pool size
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default time to wait for a pooled connection
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Row-level access to the `auth_keys` table.
///
/// Keys passed in are already trimmed and non-empty; policy (validation,
/// trimming, error absorption) lives in [`crate::service::KeyService`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RowStore: Send + Sync {
    /// Fetch one row by key. `Ok(None)` is the no-rows condition.
    async fn find_row(&self, key: &str) -> Result<Option<CredentialEntry>>;

    /// Fetch every row, disabled ones included, ordered by key
    async fn list_rows(&self) -> Result<Vec<CredentialEntry>>;

    /// Insert a new enabled row
    async fn insert_row(&self, key: &str, value: &str) -> Result<()>;

    /// Set a new value and re-enable the row. Returns rows affected.
    async fn update_value(&self, key: &str, value: &str) -> Result<u64>;

    /// Set the soft-delete flag. Returns rows affected.
    async fn set_disabled(&self, key: &str, disabled: bool) -> Result<u64>;
}

/// Connection settings for [`SqliteRowStore`]
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// sqlx connection string, e.g. `sqlite:data/keygate.db?mode=rwc`
    pub url: String,
    /// Maximum pooled connections
    pub max_connections: u32,
    /// How long a checkout may wait for a free connection
    pub acquire_timeout: Duration,
}

impl StoreOptions {
    /// Options with default pool settings
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }

    /// Set the pool size
    #[must_use]
    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max.max(1);
        self
    }

    /// Set the checkout timeout
    #[must_use]
    pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }
}

/// SQLite-backed `auth_keys` table
#[derive(Debug, Clone)]
pub struct SqliteRowStore {
    pub(super) pool: Pool<Sqlite>,
}

impl SqliteRowStore {
    /// Open the pool described by `options` and run migrations
    pub async fn connect(options: &StoreOptions) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(options.max_connections)
            .acquire_timeout(options.acquire_timeout)
            .connect(&options.url)
            .await
            .map_err(|e| RegistryError::Unavailable(format!("Failed to connect: {}", e)))?;

        let store = Self::new(pool).await?;
        info!(max_connections = options.max_connections, "Credential store connected");
        Ok(store)
    }

    /// Create (or open) a database file at `path`
    pub async fn from_path(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                RegistryError::Unavailable(format!("Failed to create directory: {}", e))
            })?;
        }

        let url = format!("sqlite:{}?mode=rwc", path.display());
        Self::connect(&StoreOptions::new(url)).await
    }

    /// Wrap an existing pool and run migrations
    pub async fn new(pool: Pool<Sqlite>) -> Result<Self> {
        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Underlying pool
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }
}
