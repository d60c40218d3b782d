//! Key administration endpoints
//!
//! Durable writes go straight to the credential store. When
//! `refresh_on_write` is set, a successful write is followed by a registry
//! refresh so the gate sees the change without waiting for the periodic task.

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post, put},
    Router,
};
use chrono::{DateTime, Utc};
use keygate_core::{CredentialEntry, KeyService, RegistryError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use super::ApiResponse;
use crate::middleware::auth::RequireAdmin;

/// Admin behaviour toggles
#[derive(Debug, Clone, Copy)]
pub struct AdminSettings {
    pub refresh_on_write: bool,
}

/// Upsert request body
#[derive(Debug, Deserialize)]
pub struct UpsertKeyRequest {
    pub value: String,
}

/// Key metadata view (never carries the value)
#[derive(Debug, Serialize)]
pub struct KeyView {
    pub key: String,
    pub disabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CredentialEntry> for KeyView {
    fn from(entry: CredentialEntry) -> Self {
        Self {
            key: entry.key,
            disabled: entry.disabled,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}

/// Outcome of a write
#[derive(Debug, Serialize)]
pub struct WriteView {
    pub key: String,
    pub changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_keys: Option<usize>,
}

/// Refresh outcome
#[derive(Debug, Serialize)]
pub struct RefreshView {
    pub active_keys: usize,
}

/// Registry error rendered as an HTTP response
pub struct ApiError(RegistryError);

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            RegistryError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            RegistryError::Conflict(_) => StatusCode::CONFLICT,
            // Also covers a closed or exhausted pool
            err if err.is_unavailable() => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(ApiResponse::<()>::error(self.0.to_string()))).into_response()
    }
}

/// Refresh after a write when configured; a failed refresh is only logged
async fn refresh_after_write(service: &KeyService, settings: AdminSettings) -> Option<usize> {
    if !settings.refresh_on_write {
        return None;
    }
    match service.refresh().await {
        Ok(count) => Some(count),
        Err(e) => {
            warn!(error = %e, "Registry refresh after write failed");
            None
        }
    }
}

/// `GET /admin/keys`
async fn list_keys(
    _admin: RequireAdmin,
    Extension(service): Extension<Arc<KeyService>>,
) -> Result<Json<ApiResponse<Vec<KeyView>>>, ApiError> {
    let rows = service.list().await?;
    Ok(Json(ApiResponse::success(
        rows.into_iter().map(KeyView::from).collect(),
    )))
}

/// `PUT /admin/keys/:key`
async fn upsert_key(
    _admin: RequireAdmin,
    Extension(service): Extension<Arc<KeyService>>,
    Extension(settings): Extension<AdminSettings>,
    Path(key): Path<String>,
    Json(request): Json<UpsertKeyRequest>,
) -> Result<Json<ApiResponse<WriteView>>, ApiError> {
    service.upsert(&key, &request.value).await?;
    let active_keys = refresh_after_write(&service, settings).await;

    Ok(Json(ApiResponse::success(WriteView {
        key: key.trim().to_string(),
        changed: true,
        active_keys,
    })))
}

/// `DELETE /admin/keys/:key`
async fn disable_key(
    _admin: RequireAdmin,
    Extension(service): Extension<Arc<KeyService>>,
    Extension(settings): Extension<AdminSettings>,
    Path(key): Path<String>,
) -> Json<ApiResponse<WriteView>> {
    let changed = service.disable(&key).await;
    let active_keys = if changed {
        refresh_after_write(&service, settings).await
    } else {
        None
    };

    Json(ApiResponse::success(WriteView {
        key: key.trim().to_string(),
        changed,
        active_keys,
    }))
}

/// `POST /admin/refresh`
async fn refresh(
    _admin: RequireAdmin,
    Extension(service): Extension<Arc<KeyService>>,
) -> Result<Json<ApiResponse<RefreshView>>, ApiError> {
    let active_keys = service.refresh().await?;
    Ok(Json(ApiResponse::success(RefreshView { active_keys })))
}

/// Admin routes
pub fn admin_routes() -> Router {
    Router::new()
        .route("/admin/keys", get(list_keys))
        .route("/admin/keys/:key", put(upsert_key).delete(disable_key))
        .route("/admin/refresh", post(refresh))
}
