//! Durable credential row

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the `auth_keys` table.
///
/// A key appears at most once regardless of `disabled`; disabling is a soft
/// delete and the row keeps its `created_at`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialEntry {
    /// Unique, trimmed key identifier
    pub key: String,
    /// Secret value compared byte-exactly on authentication
    pub value: String,
    /// Soft-delete flag
    pub disabled: bool,
    /// When the row was first inserted
    pub created_at: DateTime<Utc>,
    /// When the row was last written
    pub updated_at: DateTime<Utc>,
}

impl CredentialEntry {
    /// Whether this row participates in hydration
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.disabled
    }
}

impl std::fmt::Debug for CredentialEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialEntry")
            .field("key", &self.key)
            .field("value", &"[REDACTED]")
            .field("disabled", &self.disabled)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_value() {
        let now = Utc::now();
        let entry = CredentialEntry {
            key: "team-a".to_string(),
            value: "s3cr3t-value".to_string(),
            disabled: false,
            created_at: now,
            updated_at: now,
        };

        let debug = format!("{:?}", entry);
        assert!(debug.contains("team-a"));
        assert!(!debug.contains("s3cr3t-value"));
        assert!(entry.is_active());
    }
}
