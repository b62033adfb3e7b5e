// Test HTTP helpers to avoid hangs:
// - strict client timeouts and no_proxy to prevent localhost hijacking
// - readiness polling instead of sleep
// - graceful shutdown so servers don't linger between tests
use anyhow::{Context, Result};
use reqwest::{Client, redirect::Policy};
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

pub fn build_test_client() -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(2))
        .no_proxy()
        .redirect(Policy::none())
        .build()
        .context("build test http client")
}

pub async fn wait_for_listen(addr: SocketAddr) -> Result<()> {
    let deadline = Instant::now() + Duration::from_secs(1);
    loop {
        match tokio::net::TcpStream::connect(addr).await {
            Ok(_) => return Ok(()),
            Err(err) => {
                if Instant::now() >= deadline {
                    return Err(anyhow::anyhow!("server not ready at {addr}: {err}"));
                }
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        }
    }
}

pub fn spawn_axum_with_shutdown(
    listener: TcpListener,
    router: axum::Router,
) -> (oneshot::Sender<()>, JoinHandle<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(async move {
        let serve = axum::serve(listener, router.into_make_service());
        let _ = serve
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            })
            .await;
    });
    (shutdown_tx, handle)
}

/// Router served on `127.0.0.1:<ephemeral>` until [`TestServer::shutdown`].
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown_tx: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start(router: axum::Router) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("bind test listener")?;
        let addr = listener.local_addr().context("test listener addr")?;
        let (shutdown_tx, handle) = spawn_axum_with_shutdown(listener, router);
        wait_for_listen(addr).await?;
        Ok(Self {
            addr,
            shutdown_tx,
            handle,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        let _ = tokio::time::timeout(Duration::from_secs(1), self.handle).await;
    }
}
