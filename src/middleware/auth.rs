//! Authentication extractors for Axum
//!
//! `RequireCredential` pulls (key, value) pairs from the query string
//! (`/path?key=value`) and checks them against the in-memory registry.
//! `RequireAdmin` guards the admin routes with a bearer token.

use axum::{
    extract::{FromRequestParts, Query},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use keygate_core::KeyService;
use serde::Serialize;
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

/// JSON error response for auth failures
#[derive(Debug, Serialize)]
struct AuthErrorResponse {
    success: bool,
    error: String,
    code: String,
}

impl AuthErrorResponse {
    fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            code: code.into(),
        }
    }
}

/// Why a request was turned away
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateError {
    /// No query parameters to check
    MissingCredentials,
    /// Parameters present but none is a trusted pair
    InvalidCredentials,
    /// Missing or wrong admin bearer token
    AdminUnauthorized,
    /// Server wiring problem
    Internal(String),
}

/// Auth rejection type
pub struct AuthRejection {
    status: StatusCode,
    body: AuthErrorResponse,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<GateError> for AuthRejection {
    fn from(err: GateError) -> Self {
        match err {
            GateError::MissingCredentials => AuthRejection {
                status: StatusCode::UNAUTHORIZED,
                body: AuthErrorResponse::new(
                    "Authentication required. Provide ?<key>=<value> in the query string.",
                    "MISSING_CREDENTIALS",
                ),
            },
            GateError::InvalidCredentials => AuthRejection {
                status: StatusCode::UNAUTHORIZED,
                body: AuthErrorResponse::new("Invalid credentials", "INVALID_CREDENTIALS"),
            },
            GateError::AdminUnauthorized => AuthRejection {
                status: StatusCode::UNAUTHORIZED,
                body: AuthErrorResponse::new(
                    "Admin authentication required. Provide Authorization: Bearer <admin_token>.",
                    "UNAUTHORIZED",
                ),
            },
            GateError::Internal(msg) => AuthRejection {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: AuthErrorResponse::new(msg, "INTERNAL_ERROR"),
            },
        }
    }
}

// ============================================================================
// RequireCredential Extractor
// ============================================================================

/// The trusted pair that let a request through
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialMatch {
    /// Query parameter name, i.e. the auth key
    pub key: String,
    /// Matched stored value, usable for downstream bucketing
    pub value: String,
}

/// Axum extractor that requires a trusted query-string credential.
///
/// Pairs are checked in the order they appear; the first trusted one wins.
pub struct RequireCredential(pub CredentialMatch);

#[async_trait::async_trait]
impl<S> FromRequestParts<S> for RequireCredential
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let service = parts
            .extensions
            .get::<Arc<KeyService>>()
            .ok_or_else(|| GateError::Internal("KeyService not configured".to_string()))?;

        let pairs = query_pairs(parts);
        let matched = authenticate_pairs(service, &pairs)?;
        Ok(RequireCredential(matched))
    }
}

/// Decoded query pairs; an absent or malformed query yields none
fn query_pairs(parts: &Parts) -> Vec<(String, String)> {
    Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
        .map(|Query(pairs)| pairs)
        .unwrap_or_default()
}

/// First pair the registry trusts
pub fn authenticate_pairs(
    service: &KeyService,
    pairs: &[(String, String)],
) -> std::result::Result<CredentialMatch, GateError> {
    if pairs.is_empty() {
        return Err(GateError::MissingCredentials);
    }

    for (key, value) in pairs {
        if let Some(matched) = service.authenticate(key, value) {
            debug!(key = %key, "Credential accepted");
            return Ok(CredentialMatch {
                key: key.clone(),
                value: matched,
            });
        }
    }

    warn!(params = pairs.len(), "Invalid credential attempt");
    Err(GateError::InvalidCredentials)
}

// ============================================================================
// RequireAdmin Extractor
// ============================================================================

/// Admin bearer token, installed as an Extension when admin routes are mounted
#[derive(Clone)]
pub struct AdminToken(pub Arc<str>);

/// Axum extractor for the admin routes (`Authorization: Bearer <token>`)
pub struct RequireAdmin;

#[async_trait::async_trait]
impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let expected = parts
            .extensions
            .get::<AdminToken>()
            .ok_or_else(|| GateError::Internal("Admin token not configured".to_string()))?;

        let presented = parts
            .headers
            .get("authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .ok_or(GateError::AdminUnauthorized)?;

        if tokens_match(presented, &expected.0) {
            Ok(RequireAdmin)
        } else {
            warn!("Invalid admin token attempt");
            Err(GateError::AdminUnauthorized.into())
        }
    }
}

/// Constant-time token comparison
fn tokens_match(presented: &str, expected: &str) -> bool {
    presented.as_bytes().ct_eq(expected.as_bytes()).into()
}
