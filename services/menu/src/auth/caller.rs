//! Bearer-token caller context.
//!
//! # Key invariants and assumptions
//! - Signatures are not checked here; the gateway in front of the service
//!   rejects unverified tokens before they arrive.
//! - Roles are kept in bare form (`ROLE_` removed) so they can be handed to
//!   the tile resolver and banner gate directly.
//!
//! # Security considerations
//! - The raw token is only forwarded upstream; it is never logged.
use crate::api::error::{ApiError, api_unauthorized};
use axum::http::HeaderMap;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use menu_tiles::roles::strip_role_prefix;
use serde::Deserialize;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CallerError {
    #[error("missing bearer token")]
    MissingToken,
    #[error("malformed token: {0}")]
    Malformed(&'static str),
}

/// Identity of the signed-in user for the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerContext {
    pub token: String,
    pub username: Option<String>,
    pub auth_source: Option<String>,
    pub roles: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TokenClaims {
    #[serde(default)]
    user_name: Option<String>,
    #[serde(default)]
    auth_source: Option<String>,
    #[serde(default)]
    authorities: Vec<String>,
}

impl CallerContext {
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, CallerError> {
        let token = extract_bearer(headers).ok_or(CallerError::MissingToken)?;
        Self::from_token(token)
    }

    pub fn from_token(token: &str) -> Result<Self, CallerError> {
        let claims = decode_unverified_claims(token)?;
        let roles = claims
            .authorities
            .iter()
            .map(|authority| strip_role_prefix(authority).to_string())
            .collect();
        Ok(Self {
            token: token.to_string(),
            username: claims.user_name,
            auth_source: claims.auth_source,
            roles,
        })
    }
}

/// Resolve the caller for a handler, mapping failures to 401.
pub fn require_caller(headers: &HeaderMap) -> Result<CallerContext, ApiError> {
    CallerContext::from_headers(headers).map_err(|err| {
        tracing::debug!(error = %err, "rejecting menu request");
        api_unauthorized("a valid bearer token is required")
    })
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(axum::http::header::AUTHORIZATION)?;
    let value = value.to_str().ok()?;
    value.strip_prefix("Bearer ").filter(|token| !token.is_empty())
}

fn decode_unverified_claims(token: &str) -> Result<TokenClaims, CallerError> {
    let mut parts = token.split('.');
    let _header = parts.next();
    let payload = parts
        .next()
        .ok_or(CallerError::Malformed("token format"))?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|_| CallerError::Malformed("token payload encoding"))?;
    serde_json::from_slice(&bytes).map_err(|_| CallerError::Malformed("token payload json"))
}
