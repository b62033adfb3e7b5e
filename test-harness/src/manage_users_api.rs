//! In-process stand-in for the Manage Users API.
//!
//! Only the endpoints the menu service calls at request time are routed:
//! `GET /health/ping` and `GET /notification/banner/:type`. Everything else
//! falls through to a 404 so unexpected calls show up in assertions.
use crate::http::TestServer;
use anyhow::Result;
use axum::Json;
use axum::Router;
use axum::extract::{Path, Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
}

#[derive(Debug, Default)]
struct StubState {
    ping_status: Option<StatusCode>,
    banners: HashMap<String, String>,
    banner_failures: HashMap<String, StatusCode>,
    requests: Vec<RecordedRequest>,
}

#[derive(Debug, Clone, Default)]
pub struct ManageUsersApiStub {
    state: Arc<Mutex<StubState>>,
}

impl ManageUsersApiStub {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StubState> {
        // A panicking test must not poison the stub for the next one.
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Status returned by `/health/ping`; 200 until stubbed.
    pub fn stub_ping(&self, status: StatusCode) {
        self.lock().ping_status = Some(status);
    }

    pub fn stub_notification_banner_message(&self, notification_type: &str, message: &str) {
        let mut state = self.lock();
        state.banner_failures.remove(notification_type);
        state
            .banners
            .insert(notification_type.to_string(), message.to_string());
    }

    pub fn stub_notification_banner_failure(&self, notification_type: &str, status: StatusCode) {
        let mut state = self.lock();
        state.banners.remove(notification_type);
        state
            .banner_failures
            .insert(notification_type.to_string(), status);
    }

    pub fn reset(&self) {
        *self.lock() = StubState::default();
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    pub fn request_count(&self, path: &str) -> usize {
        self.lock()
            .requests
            .iter()
            .filter(|request| request.path == path)
            .count()
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/health/ping", get(ping))
            .route("/notification/banner/:notification_type", get(banner))
            .fallback(unmatched)
            .layer(middleware::from_fn_with_state(self.clone(), record))
            .with_state(self.clone())
    }

    pub async fn start(&self) -> Result<TestServer> {
        TestServer::start(self.router()).await
    }
}

async fn record(State(stub): State<ManageUsersApiStub>, request: Request, next: Next) -> Response {
    let recorded = RecordedRequest {
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        authorization: request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
    };
    stub.lock().requests.push(recorded);
    next.run(request).await
}

async fn ping(State(stub): State<ManageUsersApiStub>) -> Response {
    let status = stub.lock().ping_status.unwrap_or(StatusCode::OK);
    let body = if status.is_success() { "UP" } else { "DOWN" };
    (status, Json(json!({ "status": body }))).into_response()
}

async fn banner(
    State(stub): State<ManageUsersApiStub>,
    Path(notification_type): Path<String>,
) -> Response {
    let state = stub.lock();
    if let Some(status) = state.banner_failures.get(&notification_type) {
        return (*status, Json(json!({ "status": status.as_u16() }))).into_response();
    }
    match state.banners.get(&notification_type) {
        Some(message) => Json(json!({ "message": message })).into_response(),
        None => not_stubbed(),
    }
}

async fn unmatched() -> Response {
    not_stubbed()
}

fn not_stubbed() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "status": 404, "userMessage": "No stub matched" })),
    )
        .into_response()
}
