//! `keygate keys` subcommands
//!
//! Each command connects to the configured store, performs one durable
//! operation and exits. Values are never printed.

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use keygate_core::KeyService;

use crate::server::{init_store, load_config};

#[derive(Subcommand, Debug)]
pub enum KeysCommand {
    /// Create a key, or update and re-enable an existing one
    Upsert {
        /// Key name (surrounding whitespace is trimmed)
        key: String,
        /// Secret value
        value: String,
    },
    /// Soft-delete a key
    Disable {
        /// Key name
        key: String,
    },
    /// List stored keys (metadata only)
    List,
    /// Check a key/value pair against the active keys
    Check {
        /// Key name
        key: String,
        /// Secret value
        value: String,
    },
}

/// Run a keys subcommand
pub async fn run(command: KeysCommand) -> Result<()> {
    let config = load_config().context("Failed to load configuration")?;
    let store = init_store(&config).await;

    match command {
        KeysCommand::Upsert { key, value } => {
            let service = KeyService::with_registry(Default::default(), store);
            service
                .upsert(&key, &value)
                .await
                .with_context(|| format!("Failed to upsert key '{}'", key.trim()))?;
            println!("✓ Key '{}' stored and enabled", key.trim());
        }
        KeysCommand::Disable { key } => {
            let service = KeyService::with_registry(Default::default(), store);
            if service.disable(&key).await {
                println!("✓ Key '{}' disabled", key.trim());
            } else {
                println!("No key disabled for '{}' (absent, empty or storage unavailable)", key.trim());
            }
        }
        KeysCommand::List => {
            let service = KeyService::with_registry(Default::default(), store);
            let rows = service.list().await.context("Failed to list keys")?;

            if rows.is_empty() {
                println!("No keys stored yet.");
                println!("Add one with: keygate keys upsert <KEY> <VALUE>");
                return Ok(());
            }

            println!("Stored keys ({}):\n", rows.len());
            for row in &rows {
                println!(
                    "  {:24} │ {:8} │ updated {}",
                    row.key,
                    if row.disabled { "disabled" } else { "active" },
                    row.updated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                );
            }
        }
        KeysCommand::Check { key, value } => {
            let service = KeyService::create(store).await;
            if service.authenticate(&key, &value).is_some() {
                println!("✓ Credential accepted for key '{}'", key);
            } else {
                bail!("Credential rejected for key '{}'", key);
            }
        }
    }

    Ok(())
}
