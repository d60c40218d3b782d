//! Configuration loading
//!
//! Handles loading configuration from embedded defaults, files, and environment.

use super::config::AppConfig;
use anyhow::{Context, Result};
use config::{builder::DefaultState, Config, ConfigBuilder, Environment, File, FileFormat};

/// Embedded default configuration (compiled into binary)
pub const DEFAULT_CONFIG: &str = include_str!("../../config/default.toml");

/// Load configuration from files and environment
pub fn load_config() -> Result<AppConfig> {
    let builder = with_database_url_fallback(
        Config::builder(),
        std::env::var("DATABASE_URL").ok(),
    )?;

    let config = builder
        // 1. Embedded defaults (always available)
        .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
        // 2. External overrides (optional)
        .add_source(File::with_name("config/default").required(false))
        .add_source(
            File::with_name(&format!(
                "config/{}",
                std::env::var("KEYGATE_ENV").unwrap_or_else(|_| "development".to_string())
            ))
            .required(false),
        )
        .add_source(File::with_name("config/local").required(false))
        // 3. Environment variables (highest priority), e.g. KEYGATE_DATABASE__URL
        .add_source(
            Environment::with_prefix("KEYGATE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    config
        .try_deserialize()
        .context("Failed to deserialize configuration")
}

/// Use `url` for `database.url` when no file or `KEYGATE_*` variable sets it.
/// Blank values are ignored.
fn with_database_url_fallback(
    builder: ConfigBuilder<DefaultState>,
    url: Option<String>,
) -> Result<ConfigBuilder<DefaultState>> {
    match url.filter(|u| !u.trim().is_empty()) {
        Some(url) => builder
            .set_default("database.url", url)
            .context("Invalid DATABASE_URL"),
        None => Ok(builder),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_defaults_deserialize() {
        let config: AppConfig = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8099);
        assert!(config.server.admin_token.is_none());
        assert!(config.database.url.is_none());
        assert_eq!(config.database.acquire_timeout_secs, 5);
        assert!(config.registry.refresh_on_write);
    }

    fn load_with(extra: Option<&str>, database_url: Option<&str>) -> AppConfig {
        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));
        if let Some(extra) = extra {
            builder = builder.add_source(File::from_str(extra, FileFormat::Toml));
        }
        with_database_url_fallback(builder, database_url.map(str::to_string))
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_database_url_fallback() {
        let config = load_with(None, Some("sqlite:env.db"));
        assert_eq!(config.database.url(), Some("sqlite:env.db"));

        let config = load_with(Some("[database]\nurl = \"sqlite:file.db\""), Some("sqlite:env.db"));
        assert_eq!(config.database.url(), Some("sqlite:file.db"));
        assert_eq!(config.database.max_connections, 5);

        let config = load_with(None, Some("   "));
        assert!(config.database.url().is_none());

        let config = load_with(None, None);
        assert!(config.database.store_options().is_none());
    }
}
