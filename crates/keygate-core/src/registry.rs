//! In-memory credential registry
//!
//! Holds the key → value mapping consulted on every authentication check.
//! Reads take a shared lock; local mutations take the exclusive lock. Nothing
//! in this module performs I/O, so the lock is never held across an await.

#![forbid(unsafe_code)]

#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use subtle::ConstantTimeEq;
use tracing::debug;

/// Lock-guarded mapping of active credentials
#[derive(Debug, Default)]
pub struct CredentialRegistry {
    /// key → value
    keys: RwLock<HashMap<String, String>>,
}

impl CredentialRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry from a hydrated mapping
    #[must_use]
    pub fn from_map(map: HashMap<String, String>) -> Self {
        let registry = Self::new();
        registry.replace(map);
        registry
    }

    // The map only holds owned strings, so a writer that panicked cannot
    // leave it half-updated; keep serving instead of failing every request.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, String>> {
        self.keys.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, String>> {
        self.keys.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Insert or overwrite the entry for `key`.
    ///
    /// An empty `value` is ignored.
    pub fn set_local(&self, key: &str, value: &str) {
        if value.is_empty() {
            return;
        }
        self.write().insert(key.to_string(), value.to_string());
        debug!(key = %key, "Credential set locally");
    }

    /// Remove `key` if present
    pub fn delete_local(&self, key: &str) {
        if self.write().remove(key).is_some() {
            debug!(key = %key, "Credential removed locally");
        }
    }

    /// Check a presented credential pair.
    ///
    /// Returns the stored value only when both inputs are non-empty, the key
    /// is present and the stored value equals `value` byte for byte. The
    /// value comparison runs in constant time.
    #[must_use]
    pub fn authenticate(&self, key: &str, value: &str) -> Option<String> {
        if key.is_empty() || value.is_empty() {
            return None;
        }
        match self.read().get(key) {
            Some(stored) if bool::from(stored.as_bytes().ct_eq(value.as_bytes())) => {
                Some(stored.clone())
            }
            _ => None,
        }
    }

    /// Stored value for `key`, without checking a presented value
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<String> {
        if key.is_empty() {
            return None;
        }
        self.read().get(key).cloned()
    }

    /// Swap the whole mapping in one step.
    ///
    /// Entries with an empty key or value never make it into the registry.
    pub fn replace(&self, mut map: HashMap<String, String>) {
        map.retain(|k, v| !k.is_empty() && !v.is_empty());
        *self.write() = map;
    }

    /// Number of keys currently trusted
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether no key is currently trusted
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Sorted snapshot of the key names (values are not exposed)
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.read().keys().cloned().collect();
        keys.sort();
        keys
    }
}
