//! Liveness, health, and info handlers.
//!
//! # Key invariants and assumptions
//! - `/ping` never touches the network.
//! - `/health` makes exactly one upstream call and reports its outcome.
use crate::api::types::{
    ComponentHealth, HealthComponents, HealthStatus, PingStatus, ServiceInfo,
};
use crate::app::AppState;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

#[utoipa::path(
    get,
    path = "/ping",
    tag = "system",
    responses(
        (status = 200, description = "Process is alive", body = PingStatus)
    )
)]
pub(crate) async fn ping() -> Json<PingStatus> {
    Json(PingStatus {
        status: "UP".to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses(
        (status = 200, description = "Service and upstream are healthy", body = HealthStatus),
        (status = 503, description = "Upstream dependency is down", body = HealthStatus)
    )
)]
/// Report health including the Manage Users API.
///
/// # Errors
/// - Returns 503 with a `DOWN` body when the upstream ping fails.
pub(crate) async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    let (status, component) = match state.upstream_health.ping().await {
        Ok(_) => (
            StatusCode::OK,
            ComponentHealth {
                status: "UP".to_string(),
                detail: None,
            },
        ),
        Err(err) => {
            tracing::warn!(error = %err, "manage users api health check failed");
            let detail = match err.status() {
                Some(code) => format!("upstream returned {}", code.as_u16()),
                None => "upstream unreachable".to_string(),
            };
            (
                StatusCode::SERVICE_UNAVAILABLE,
                ComponentHealth {
                    status: "DOWN".to_string(),
                    detail: Some(detail),
                },
            )
        }
    };
    let overall = component.status.clone();
    (
        status,
        Json(HealthStatus {
            status: overall,
            components: HealthComponents {
                manage_users_api: component,
            },
        }),
    )
}

#[utoipa::path(
    get,
    path = "/info",
    tag = "system",
    responses(
        (status = 200, description = "Service identity and feature switches", body = ServiceInfo)
    )
)]
pub(crate) async fn info(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: state.service_name.clone(),
        version: state.version.clone(),
        features: state.features.clone(),
    })
}
