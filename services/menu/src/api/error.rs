//! API error types and helpers.
//!
//! # Purpose and responsibility
//! Centralizes HTTP error response construction so every menu endpoint
//! returns the same error shape.
//!
//! # Key invariants and assumptions
//! - Error responses carry a stable `code` and a human-readable `message`.
//! - Status codes align with the error category.
//!
//! # Security considerations
//! - Upstream failures are logged server-side; clients get a generic message.
use crate::api::types::ErrorResponse;
use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use manage_users_client::ClientError;

/// Structured API error returned by handlers.
///
/// # Example
/// ```rust
/// use axum::http::StatusCode;
/// use menu::api::error::ApiError;
/// use menu::api::types::ErrorResponse;
///
/// let err = ApiError {
///     status: StatusCode::UNAUTHORIZED,
///     body: ErrorResponse {
///         code: "unauthorized".to_string(),
///         message: "missing token".to_string(),
///         request_id: None,
///     },
/// };
/// assert_eq!(err.body.code, "unauthorized");
/// ```
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.body)).into_response()
    }
}

fn api_error(status: StatusCode, code: &str, message: &str) -> ApiError {
    ApiError {
        status,
        body: ErrorResponse {
            code: code.to_string(),
            message: message.to_string(),
            request_id: None,
        },
    }
}

/// Build a 401 Unauthorized error.
pub fn api_unauthorized(message: &str) -> ApiError {
    api_error(StatusCode::UNAUTHORIZED, "unauthorized", message)
}

/// Build a 502 Bad Gateway error from a failed upstream call.
///
/// # What it does
/// Logs the client error with its upstream status and returns a generic
/// `upstream_error` body.
pub fn api_upstream(message: &str, err: &ClientError) -> ApiError {
    tracing::error!(error = %err, upstream_status = ?err.status(), "manage users api call failed");
    api_error(StatusCode::BAD_GATEWAY, "upstream_error", message)
}
