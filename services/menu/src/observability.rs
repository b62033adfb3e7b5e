//! Observability wiring for the menu service.
//!
//! # Purpose
//! One call at startup installs log output, optional OTLP span export, W3C
//! trace-context propagation and the Prometheus recorder behind the separate
//! `/metrics` listener.
//!
//! # Notes
//! - Each install step runs at most once per process, so tests may call
//!   [`init_observability`] freely.
//! - Span export is optional; without an OTLP endpoint the menu only logs.
//! - The metrics listener never takes the menu down. Its failures are logged.
use axum::Router;
use axum::http::HeaderMap;
use axum::http::header::HeaderName;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use opentelemetry::propagation::Extractor;
use opentelemetry::trace::TracerProvider;
use opentelemetry::{KeyValue, global};
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::trace::SdkTracerProvider;
use std::net::SocketAddr;
use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const SERVICE_NAME: &str = "dps-menu";

/// Counters recorded by the menu, with their `# HELP` text.
const MENU_COUNTERS: [(&str, &str); 3] = [
    ("menu_page_requests_total", "Menu pages served"),
    (
        "menu_tiles_resolved_total",
        "Tiles returned across all menu pages",
    ),
    (
        "banner_fetch_total",
        "Banner lookups by outcome: ok, error or skipped",
    ),
];

static SUBSCRIBER: OnceLock<()> = OnceLock::new();
static PROPAGATOR: OnceLock<()> = OnceLock::new();
static RECORDER: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install logging, tracing and metrics; returns the handle `/metrics` renders.
pub fn init_observability() -> PrometheusHandle {
    SUBSCRIBER.get_or_init(|| {
        install_propagator();
        let otel_layer = otlp_tracer_provider().map(|provider| {
            tracing_opentelemetry::layer().with_tracer(provider.tracer(SERVICE_NAME))
        });
        let _ = tracing_subscriber::registry()
            .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
            .with(tracing_subscriber::fmt::layer())
            .with(otel_layer)
            .try_init();
    });
    metrics_handle()
}

fn otlp_tracer_provider() -> Option<SdkTracerProvider> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()
        .ok()?;
    let resource = Resource::builder_empty()
        .with_attributes(resource_attributes())
        .build();
    Some(
        SdkTracerProvider::builder()
            .with_batch_exporter(exporter)
            .with_resource(resource)
            .build(),
    )
}

fn resource_attributes() -> Vec<KeyValue> {
    let instance = env_value("MENU_SERVICE_INSTANCE_ID").or_else(|| env_value("HOSTNAME"));
    // The allow list tiles are labelled with the same environment name.
    let environment =
        env_value("MANAGE_USER_ALLOW_LIST_ENVIRONMENT_LABEL").map(|label| label.to_lowercase());
    [
        Some(KeyValue::new("service.name", SERVICE_NAME)),
        Some(KeyValue::new("service.namespace", "hmpps")),
        Some(KeyValue::new("service.version", env!("CARGO_PKG_VERSION"))),
        instance.map(|id| KeyValue::new("service.instance.id", id)),
        environment.map(|name| KeyValue::new("deployment.environment", name)),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

fn install_propagator() {
    PROPAGATOR.get_or_init(|| global::set_text_map_propagator(TraceContextPropagator::new()));
}

/// Parent context carried by inbound `traceparent` / `tracestate` headers.
pub fn trace_context_from_headers(headers: &HeaderMap) -> opentelemetry::Context {
    install_propagator();
    global::get_text_map_propagator(|propagator| propagator.extract(&InboundHeaders(headers)))
}

struct InboundHeaders<'a>(&'a HeaderMap);

impl Extractor for InboundHeaders<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key)?.to_str().ok()
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}

fn metrics_handle() -> PrometheusHandle {
    RECORDER
        .get_or_init(|| {
            let recorder = PrometheusBuilder::new().build_recorder();
            let handle = recorder.handle();
            match metrics::set_global_recorder(recorder) {
                Ok(()) => {
                    for (name, help) in MENU_COUNTERS {
                        metrics::describe_counter!(name, help);
                    }
                }
                Err(_) => {
                    tracing::warn!("metrics recorder already installed; /metrics will be empty")
                }
            }
            handle
        })
        .clone()
}

/// Router exposing the Prometheus text format at `/metrics`.
pub fn metrics_router(handle: PrometheusHandle) -> Router {
    Router::new().route(
        "/metrics",
        axum::routing::get(move || async move { handle.render() }),
    )
}

/// Serve `/metrics` until the task is dropped; a failure is logged, not returned.
pub async fn run_metrics_server(handle: PrometheusHandle, addr: SocketAddr) {
    if let Err(err) = serve_metrics(handle, addr).await {
        tracing::warn!(%addr, error = %err, "metrics server failed");
    }
}

pub async fn serve_metrics(handle: PrometheusHandle, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "metrics listening");
    axum::serve(listener, metrics_router(handle)).await
}
