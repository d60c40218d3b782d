//! Production configuration validation
//!
//! Security checks for production deployments.

use super::config::AppConfig;
use anyhow::{bail, Result};
use tracing::warn;

/// Shortest admin token accepted outside development
const MIN_ADMIN_TOKEN_LEN: usize = 16;

/// Validate configuration for production security
pub fn validate_production_config(config: &AppConfig) -> Result<()> {
    let is_production = std::env::var("KEYGATE_ENV")
        .map(|v| v.to_lowercase() == "production")
        .unwrap_or(false);

    validate(config, is_production)
}

fn validate(config: &AppConfig, is_production: bool) -> Result<()> {
    if config.database.url().is_none() {
        warn!(
            "No database URL configured (database.url / DATABASE_URL). \
             Every credential will be denied."
        );
    }

    if !is_production {
        return Ok(());
    }

    if config.server.host == "0.0.0.0" {
        warn!(
            "SECURITY WARNING: Server is binding to all interfaces (0.0.0.0) in production. \
             Consider binding to 127.0.0.1 and using a reverse proxy."
        );
    }

    if let Some(token) = config.server.admin_token() {
        if token.len() < MIN_ADMIN_TOKEN_LEN {
            bail!(
                "server.admin_token must be at least {} characters in production",
                MIN_ADMIN_TOKEN_LEN
            );
        }
    }

    Ok(())
}
