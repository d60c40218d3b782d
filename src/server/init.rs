//! Server initialization and main run loop

use super::background_tasks::start_refresh_task;
use super::init_stores::init_key_service;
use super::loader::load_config;
use super::validation::validate_production_config;
use anyhow::{Context, Result};
use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Run the server
pub async fn run() -> Result<()> {
    info!("Starting Keygate v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config().context("Failed to load configuration")?;
    info!("Configuration loaded");

    validate_production_config(&config)?;

    let service = init_key_service(&config).await;
    info!(
        active_keys = service.registry().len(),
        storage = service.has_store(),
        "Credential registry ready"
    );

    let shutdown = CancellationToken::new();
    let refresh_handle = start_refresh_task(
        &service,
        config.registry.refresh_interval_secs,
        shutdown.child_token(),
    );

    let admin_token = config.server.admin_token();
    if admin_token.is_some() {
        info!("Admin API ENABLED at /admin");
    } else {
        info!("Admin API DISABLED (no server.admin_token)");
    }

    let app = crate::api::api_router(
        service.clone(),
        admin_token,
        config.registry.refresh_on_write,
    )
    .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("HTTP server listening on http://{}", addr);

    let server_shutdown = shutdown.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            wait_for_shutdown_signal().await;
            server_shutdown.cancel();
        })
        .await
        .context("HTTP server error")?;

    shutdown.cancel();
    if let Some(handle) = refresh_handle {
        let timeout = tokio::time::Duration::from_secs(5);
        match tokio::time::timeout(timeout, handle).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!("Refresh task error: {}", e),
            Err(_) => warn!("Refresh task shutdown timeout"),
        }
    }

    info!("Keygate shutdown complete");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
async fn wait_for_shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            info!("Received SIGTERM signal");
        }
    }
}
