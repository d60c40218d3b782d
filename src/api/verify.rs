//! Credential verification endpoint
//!
//! A reverse proxy can call `GET /v1/verify?<key>=<value>` as its
//! auth subrequest: 200 means trusted, 401 means deny.

use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use tracing::debug;

use super::ApiResponse;
use crate::middleware::auth::RequireCredential;

/// Successful verification
#[derive(Debug, Serialize)]
pub struct VerifyView {
    pub authorized: bool,
    pub key: String,
}

async fn verify(RequireCredential(matched): RequireCredential) -> Json<ApiResponse<VerifyView>> {
    debug!(key = %matched.key, value_len = matched.value.len(), "Verified");
    Json(ApiResponse::success(VerifyView {
        authorized: true,
        key: matched.key,
    }))
}

/// Verification routes
pub fn verify_routes() -> Router {
    Router::new().route("/v1/verify", get(verify))
}
