//! Keygate Core - Credential Registry
//!
//! This crate decides whether a presented (key, value) credential pair is
//! currently trusted. It provides:
//! - Registry: the lock-guarded in-memory mapping consulted on the hot path
//! - Store: the `auth_keys` table of record behind the `RowStore` trait
//! - Service: hydration, write-through upsert/disable and refresh policy
//! - Error: the error taxonomy shared by all of the above

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod credential;
pub mod error;
pub mod registry;
pub mod service;
pub mod store;

pub use credential::CredentialEntry;
pub use error::{RegistryError, Result};
pub use registry::CredentialRegistry;
pub use service::KeyService;
pub use store::{RowStore, SqliteRowStore, StoreOptions};
