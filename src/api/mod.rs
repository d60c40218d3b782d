//! Web API module for Keygate
//!
//! Provides REST API endpoints for:
//! - Health checks
//! - Credential verification (the gate itself)
//! - Key administration (only when an admin token is configured)

pub mod admin;
pub mod health;
pub mod verify;


use axum::{Extension, Router};
use keygate_core::KeyService;
use serde::Serialize;
use std::sync::Arc;

pub use admin::{admin_routes, AdminSettings};
pub use health::health_routes;
pub use verify::verify_routes;

use crate::middleware::auth::AdminToken;

/// API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> ApiResponse<T> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Build the full router.
///
/// Admin routes are mounted only when `admin_token` is `Some`.
pub fn api_router(
    service: Arc<KeyService>,
    admin_token: Option<&str>,
    refresh_on_write: bool,
) -> Router {
    let router = Router::new().merge(health_routes()).merge(verify_routes());

    let router = match admin_token {
        Some(token) => router
            .merge(admin_routes())
            .layer(Extension(AdminToken(Arc::from(token))))
            .layer(Extension(AdminSettings { refresh_on_write })),
        None => router,
    };

    router.layer(Extension(service))
}
