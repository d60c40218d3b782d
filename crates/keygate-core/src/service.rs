//! Key service
//!
//! Ties the in-memory [`CredentialRegistry`] to an optional [`RowStore`] and
//! owns the error policy between them:
//!
//! - `upsert` reports every failure to its caller
//! - `disable` and `hydrate` absorb failures and log them
//! - `authenticate` and `lookup` never touch storage
//!
//! Durable writes do not update the live registry. Callers that want the
//! registry to follow storage call [`KeyService::refresh`].


use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::credential::CredentialEntry;
use crate::error::{RegistryError, Result};
use crate::registry::CredentialRegistry;
use crate::store::RowStore;

/// Credential registry plus its durable backing store
pub struct KeyService {
    registry: Arc<CredentialRegistry>,
    store: Option<Arc<dyn RowStore>>,
    /// Serializes refreshes so an older snapshot never replaces a newer one
    refresh_lock: Mutex<()>,
}

impl KeyService {
    /// Build a service and hydrate the registry once.
    ///
    /// `None` means storage is unavailable; the registry then starts empty.
    pub async fn create(store: Option<Arc<dyn RowStore>>) -> Self {
        let service = Self::with_registry(Arc::new(CredentialRegistry::new()), store);

        let keys = service.hydrate().await;
        if keys.is_empty() {
            warn!("Credential registry starts empty; every credential will be denied");
        } else {
            info!(count = keys.len(), "Credential registry hydrated");
        }
        service.registry.replace(keys);

        service
    }

    /// Service over an already-populated registry, without hydrating
    pub fn with_registry(
        registry: Arc<CredentialRegistry>,
        store: Option<Arc<dyn RowStore>>,
    ) -> Self {
        Self {
            registry,
            store,
            refresh_lock: Mutex::new(()),
        }
    }

    /// Shared handle to the in-memory registry
    pub fn registry(&self) -> &Arc<CredentialRegistry> {
        &self.registry
    }

    /// Whether a durable store is attached
    pub fn has_store(&self) -> bool {
        self.store.is_some()
    }

    fn store(&self) -> Result<&Arc<dyn RowStore>> {
        self.store
            .as_ref()
            .ok_or_else(|| RegistryError::Unavailable("no credential store configured".to_string()))
    }

    // ------------------------------------------------------------------
    // Hot path (memory only)
    // ------------------------------------------------------------------

    /// See [`CredentialRegistry::authenticate`]
    pub fn authenticate(&self, key: &str, value: &str) -> Option<String> {
        self.registry.authenticate(key, value)
    }

    /// See [`CredentialRegistry::lookup`]
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.registry.lookup(key)
    }

    /// See [`CredentialRegistry::set_local`]
    pub fn set_local(&self, key: &str, value: &str) {
        self.registry.set_local(key, value);
    }

    /// See [`CredentialRegistry::delete_local`]
    pub fn delete_local(&self, key: &str) {
        self.registry.delete_local(key);
    }

    // ------------------------------------------------------------------
    // Durable path
    // ------------------------------------------------------------------

    /// Create, update or re-enable the durable row for `key`.
    ///
    /// Surrounding whitespace is trimmed from `key` before anything else. An
    /// existing row gets the new value and is re-enabled; otherwise a new
    /// enabled row is inserted. A failed lookup aborts before any insert.
    pub async fn upsert(&self, key: &str, value: &str) -> Result<()> {
        if key.is_empty() {
            return Err(RegistryError::InvalidArgument(
                "auth key must not be empty".to_string(),
            ));
        }
        if value.is_empty() {
            return Err(RegistryError::InvalidArgument(
                "auth value must not be empty".to_string(),
            ));
        }

        let key = key.trim();
        if key.is_empty() {
            return Err(RegistryError::InvalidArgument(
                "auth key must not be blank".to_string(),
            ));
        }

        let store = self.store()?;

        match store.find_row(key).await? {
            Some(existing) => {
                let affected = store.update_value(key, value).await?;
                if affected == 0 {
                    warn!(key = %key, "Upsert update matched no row");
                }
                info!(key = %key, was_disabled = existing.disabled, "Auth key updated");
            }
            None => {
                store.insert_row(key, value).await?;
                info!(key = %key, "Auth key created");
            }
        }

        Ok(())
    }

    /// Soft-delete the durable row for `key`.
    ///
    /// Failures are logged, never returned. The result only says whether a
    /// row was actually disabled.
    pub async fn disable(&self, key: &str) -> bool {
        if key.is_empty() {
            return false;
        }
        let key = key.trim();
        if key.is_empty() {
            return false;
        }

        let store = match self.store() {
            Ok(store) => store,
            Err(e) => {
                warn!(key = %key, error = %e, "Cannot disable auth key");
                return false;
            }
        };

        match store.set_disabled(key, true).await {
            Ok(0) => {
                debug!(key = %key, "Disable matched no auth key");
                false
            }
            Ok(_) => {
                info!(key = %key, "Auth key disabled");
                true
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to disable auth key");
                false
            }
        }
    }

    /// Active key → value pairs from storage.
    ///
    /// Any failure yields an empty mapping.
    pub async fn hydrate(&self) -> HashMap<String, String> {
        match self.try_hydrate().await {
            Ok(keys) => keys,
            Err(e) => {
                warn!(error = %e, "Credential hydration failed; no keys available");
                HashMap::new()
            }
        }
    }

    async fn try_hydrate(&self) -> Result<HashMap<String, String>> {
        let rows = self.store()?.list_rows().await?;

        Ok(rows
            .into_iter()
            .filter(CredentialEntry::is_active)
            .map(|row| (row.key, row.value))
            .collect())
    }

    /// Re-hydrate and swap the live registry.
    ///
    /// On failure the current registry is left untouched and the error is
    /// returned. Returns the number of active keys after the swap.
    ///
    /// Overlapping calls run one at a time, so the registry always ends up
    /// holding the snapshot read last. The map lock itself is only taken for
    /// the swap.
    pub async fn refresh(&self) -> Result<usize> {
        let _guard = self.refresh_lock.lock().await;
        let keys = self.try_hydrate().await?;
        let count = keys.len();
        self.registry.replace(keys);
        debug!(count, "Credential registry refreshed");
        Ok(count)
    }

    /// Durable row for `key` (trimmed), disabled or not
    pub async fn get(&self, key: &str) -> Result<Option<CredentialEntry>> {
        let key = key.trim();
        if key.is_empty() {
            return Ok(None);
        }
        self.store()?.find_row(key).await
    }

    /// Every durable row, disabled ones included
    pub async fn list(&self) -> Result<Vec<CredentialEntry>> {
        self.store()?.list_rows().await
    }
}
