//! Background task startup functions

use keygate_core::KeyService;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Start the periodic registry refresh task.
///
/// Returns `None` when `interval_secs` is 0 or no store is attached.
pub fn start_refresh_task(
    service: &Arc<KeyService>,
    interval_secs: u64,
    shutdown: CancellationToken,
) -> Option<JoinHandle<()>> {
    if interval_secs == 0 {
        info!("Periodic registry refresh disabled by configuration");
        return None;
    }
    if !service.has_store() {
        warn!("Periodic registry refresh skipped: no credential store");
        return None;
    }

    let refresh_service = service.clone();
    let handle = tokio::spawn(async move {
        let interval = tokio::time::Duration::from_secs(interval_secs);
        loop {
            tokio::select! {
                _ = tokio::time::sleep(interval) => {
                    match refresh_service.refresh().await {
                        Ok(count) => debug!(count, "Registry refreshed"),
                        Err(e) => warn!(error = %e, "Registry refresh failed; keeping current keys"),
                    }
                }
                _ = shutdown.cancelled() => {
                    info!("Registry refresh task shutting down");
                    break;
                }
            }
        }
    });
    info!("Registry refresh task started ({}s interval)", interval_secs);

    Some(handle)
}
