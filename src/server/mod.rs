//! Server module for Keygate
//!
//! # Module Structure
//!
//! - `config`: Configuration structures
//! - `loader`: Configuration loading from files and environment
//! - `validation`: Production configuration validation
//! - `init_stores`: Credential store connection and registry hydration
//! - `background_tasks`: Periodic registry refresh
//! - `init`: Main server initialization and run loop

mod background_tasks;
pub mod config;
mod init;
mod init_stores;
mod loader;
mod validation;

// Re-export public API
pub use init::run;
pub use init_stores::init_store;
pub use loader::load_config;
