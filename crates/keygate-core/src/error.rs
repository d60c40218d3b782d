//! Error types for keygate-core

use thiserror::Error;

/// Registry error type
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Empty or otherwise unusable key/value, rejected before any I/O
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Durable storage is not configured or cannot be reached
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The `auth_key` uniqueness constraint rejected a write
    #[error("conflict: {0}")]
    Conflict(String),

    /// Query or execute failure reported by the database
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, RegistryError>;

impl RegistryError {
    /// Classify a failed insert, turning unique-constraint violations into
    /// [`RegistryError::Conflict`].
    pub fn from_insert(err: sqlx::Error, key: &str) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RegistryError::Conflict(format!("auth key '{}' already exists", key))
            }
            _ => RegistryError::Database(err),
        }
    }

    /// Whether the error means the storage collaborator could not be reached
    pub fn is_unavailable(&self) -> bool {
        match self {
            RegistryError::Unavailable(_) => true,
            RegistryError::Database(e) => matches!(
                e,
                sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
            ),
            _ => false,
        }
    }
}
