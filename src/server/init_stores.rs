//! Credential store initialization

use super::config::AppConfig;
use keygate_core::{KeyService, RowStore, SqliteRowStore};
use std::sync::Arc;
use tracing::{info, warn};

/// Connect the durable store; `None` when unconfigured or unreachable
pub async fn init_store(config: &AppConfig) -> Option<Arc<dyn RowStore>> {
    let Some(options) = config.database.store_options() else {
        warn!("Credential store unavailable: no database URL configured");
        return None;
    };

    match SqliteRowStore::connect(&options).await {
        Ok(store) => {
            info!("Credential store initialized");
            Some(Arc::new(store))
        }
        Err(e) => {
            warn!(error = %e, "Credential store unavailable");
            None
        }
    }
}

/// Connect the store and hydrate a [`KeyService`] from it
pub async fn init_key_service(config: &AppConfig) -> Arc<KeyService> {
    let store = init_store(config).await;
    Arc::new(KeyService::create(store).await)
}
