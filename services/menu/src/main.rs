//! DPS menu HTTP service entry point.
//!
//! # Purpose
//! Loads configuration, builds the upstream client and tile catalogue, then
//! serves the menu API and the metrics endpoint until Ctrl-C.
//!
//! # Notes
//! `build_state` keeps wiring testable and `main` small.
use anyhow::Context;
use manage_users_client::ManageUsersClient;
use menu::app::{AppState, build_router};
use menu::config::MenuConfig;
use menu::observability;
use std::future::Future;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = MenuConfig::from_env_or_yaml().context("menu config")?;
    run_with_shutdown(config, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
}

async fn run_with_shutdown<F>(config: MenuConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let metrics_handle = observability::init_observability();
    let state = build_state(&config)?;
    let metrics_task = tokio::spawn(observability::run_metrics_server(
        metrics_handle,
        config.metrics_bind,
    ));

    let app = build_router(state);
    let addr = config.bind_addr;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    tracing::info!(
        %addr,
        manage_users_api = %config.manage_users_api_url,
        allow_list_enabled = config.allow_list_enabled,
        "menu listening"
    );
    tokio::pin!(shutdown);
    tokio::select! {
        result = axum::serve(listener, app.into_make_service()) => {
            result?;
        }
        _ = &mut shutdown => {
            tracing::info!("shutdown signal received");
        }
    }

    // A metrics failure was already logged by the task itself.
    metrics_task.abort();
    let _ = metrics_task.await;
    Ok(())
}

fn build_state(config: &MenuConfig) -> anyhow::Result<AppState> {
    let client = ManageUsersClient::new(&config.client_config())
        .context("build manage users api client")?;
    Ok(AppState::new(&config.allow_list_feature(), client))
}
