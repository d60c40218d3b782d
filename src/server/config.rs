//! Server configuration types

use keygate_core::StoreOptions;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Enables the /admin routes when set
    #[serde(default)]
    pub admin_token: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8099,
            admin_token: None,
        }
    }
}

impl ServerConfig {
    /// Admin token, ignoring an empty string
    pub fn admin_token(&self) -> Option<&str> {
        self.admin_token.as_deref().filter(|t| !t.is_empty())
    }
}

/// Durable store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout() -> u64 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout(),
        }
    }
}

impl DatabaseConfig {
    /// Configured connection string, ignoring a blank one
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.trim().is_empty())
    }

    /// Pool options, or `None` when no connection string is configured
    pub fn store_options(&self) -> Option<StoreOptions> {
        self.url().map(|url| {
            StoreOptions::new(url)
                .with_max_connections(self.max_connections)
                .with_acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
        })
    }
}

/// Registry refresh configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub refresh_interval_secs: u64,
    #[serde(default = "default_true")]
    pub refresh_on_write: bool,
}

fn default_true() -> bool {
    true
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 0,
            refresh_on_write: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8099);
        assert!(config.server.admin_token().is_none());
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.registry.refresh_interval_secs, 0);
        assert!(config.registry.refresh_on_write);
    }

    #[test]
    fn test_empty_admin_token_is_ignored() {
        let server = ServerConfig {
            admin_token: Some(String::new()),
            ..ServerConfig::default()
        };
        assert!(server.admin_token().is_none());

        let server = ServerConfig {
            admin_token: Some("t0ken".to_string()),
            ..ServerConfig::default()
        };
        assert_eq!(server.admin_token(), Some("t0ken"));
    }

    #[test]
    fn test_configured_url_wins() {
        let db = DatabaseConfig {
            url: Some("sqlite::memory:".to_string()),
            max_connections: 2,
            acquire_timeout_secs: 3,
        };
        let options = db.store_options().unwrap();
        assert_eq!(options.url, "sqlite::memory:");
        assert_eq!(options.max_connections, 2);
        assert_eq!(options.acquire_timeout, Duration::from_secs(3));
    }
}
