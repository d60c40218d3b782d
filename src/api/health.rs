//! Health check endpoint

use axum::extract::Extension;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use keygate_core::KeyService;
use serde::Serialize;
use std::sync::Arc;

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub active_keys: usize,
    pub storage: &'static str,
}

/// `GET /health`, public
async fn health(Extension(service): Extension<Arc<KeyService>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        active_keys: service.registry().len(),
        storage: if service.has_store() {
            "connected"
        } else {
            "unavailable"
        },
    })
}

/// Health routes
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health))
}
