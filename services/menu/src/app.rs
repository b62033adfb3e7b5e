//! Menu HTTP application wiring.
//!
//! # Purpose
//! Builds the Axum router, configures middleware, and defines the shared
//! state injected into handlers.
//!
//! # Notes
//! The catalogue inside [`AppState`] is built once and shared read-only by
//! every request.
use crate::api;
use crate::api::openapi::ApiDoc;
use crate::api::types::FeatureFlags;
use crate::banner::BannerFetcher;
use crate::observability;
use crate::upstream::UpstreamHealth;
use axum::Router;
use manage_users_client::ManageUsersClient;
use menu_tiles::{AllowListFeature, TileCatalogue};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_opentelemetry::OpenTelemetrySpanExt;
use utoipa::OpenApi;

#[derive(Clone)]
pub struct AppState {
    pub service_name: String,
    pub version: String,
    pub features: FeatureFlags,
    pub catalogue: Arc<TileCatalogue>,
    pub banner: BannerFetcher,
    pub upstream_health: Arc<dyn UpstreamHealth + Send + Sync>,
}

impl AppState {
    /// State backed by a real Manage Users API client.
    pub fn new(allow_list: &AllowListFeature, client: ManageUsersClient) -> Self {
        let client = Arc::new(client);
        Self {
            service_name: observability::SERVICE_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            features: FeatureFlags {
                manage_user_allow_list: allow_list.enabled,
                environment_label: allow_list.environment_label.clone(),
            },
            catalogue: Arc::new(TileCatalogue::new(allow_list)),
            banner: BannerFetcher::new(client.clone()),
            upstream_health: client,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let trace_layer =
        TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
            let parent = observability::trace_context_from_headers(request.headers());
            let span = tracing::info_span!(
                "http.request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version()
            );
            span.set_parent(parent);
            span
        });

    Router::new()
        .route("/", axum::routing::get(api::menu::menu_page))
        .route("/ping", axum::routing::get(api::system::ping))
        .route("/health", axum::routing::get(api::system::health))
        .route("/info", axum::routing::get(api::system::info))
        .merge(
            utoipa_swagger_ui::SwaggerUi::new("/docs").url("/v1/openapi.json", ApiDoc::openapi()),
        )
        .layer(trace_layer)
        .with_state(state)
}
