//! Liveness shim - health endpoint and periodic self-ping.
//!
//! Some hosts suspend processes that receive no HTTP traffic. The bot serves
//! `GET /` and `GET /health` with a 200 and, on a fixed interval, requests a
//! configured URL (normally its own public address) to keep itself awake.
//! None of this touches the economy.

use crate::errors::{Error, Result};
use axum::{Json, Router, extract::State, routing::get};
use serde::{Deserialize, Serialize};
use std::{
    future::Future,
    net::SocketAddr,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};
use tokio::{net::TcpListener, task::JoinHandle};
use tracing::{error, info, warn};

/// Timeout for a single self-ping request.
const SELF_PING_TIMEOUT: Duration = Duration::from_secs(5);

/// Shared flag flipped once the Discord client is logged in.
#[derive(Debug, Clone, Default)]
pub struct Readiness(Arc<AtomicBool>);

impl Readiness {
    /// A flag that starts out "not ready".
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the bot as ready.
    pub fn mark_ready(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether the bot has finished logging in.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Body of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Human-readable status line
    pub message: String,
    /// `Ready` or `Starting`
    pub status: String,
}

/// Builds the health router.
///
/// - `GET /` -- JSON status, always 200
/// - `GET /health` -- plain `OK`
pub fn build_router(readiness: Readiness) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .with_state(readiness)
}

async fn root(State(readiness): State<Readiness>) -> Json<HealthStatus> {
    let status = if readiness.is_ready() {
        HealthStatus {
            message: "Discord bot and health server are running!".to_string(),
            status: "Ready".to_string(),
        }
    } else {
        HealthStatus {
            message: "Health server is running, bot is starting up...".to_string(),
            status: "Starting".to_string(),
        }
    };
    Json(status)
}

async fn health() -> &'static str {
    "OK"
}

/// Binds `host:port` and serves the health router until `shutdown` resolves.
///
/// # Errors
/// Returns `Error::Server` if the address is invalid, binding fails, or the
/// server hits a fatal I/O error.
pub async fn serve<F>(host: &str, port: u16, readiness: Readiness, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr: SocketAddr = format!("{host}:{port}").parse().map_err(|e| Error::Server {
        message: format!("invalid address {host}:{port}: {e}"),
    })?;

    let listener = TcpListener::bind(addr).await.map_err(|e| Error::Server {
        message: format!("bind failed on {addr}: {e}"),
    })?;
    info!(%addr, "Health server listening");

    axum::serve(listener, build_router(readiness))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| Error::Server {
            message: format!("serve error: {e}"),
        })
}

/// Issues one GET to `url` and returns the response status code.
///
/// # Errors
/// Returns `Error::Http` if the request fails or times out.
pub async fn ping_once(client: &reqwest::Client, url: &str) -> Result<u16> {
    let response = client.get(url).timeout(SELF_PING_TIMEOUT).send().await?;
    Ok(response.status().as_u16())
}

/// Spawns a task that GETs `url` every `period`, logging each result.
///
/// The first request goes out one full `period` after startup.
pub fn spawn_self_ping(client: reqwest::Client, url: String, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;
        info!(%url, ?period, "Anti-sleep self-ping task started");

        loop {
            ticker.tick().await;
            match ping_once(&client, &url).await {
                Ok(200) => info!(%url, "Self-ping successful"),
                Ok(status) => warn!(%url, status, "Self-ping returned non-200 status"),
                Err(e) => error!(%url, "Self-ping error: {}", e),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_readiness_flag() {
        let readiness = Readiness::new();
        let shared = readiness.clone();
        assert!(!shared.is_ready());
        readiness.mark_ready();
        assert!(shared.is_ready());
    }

    #[tokio::test]
    async fn test_ping_once_against_live_server() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            axum::serve(listener, build_router(Readiness::new()))
                .await
                .unwrap();
        });

        let client = reqwest::Client::new();
        let status = ping_once(&client, &format!("http://{addr}/health"))
            .await
            .unwrap();
        assert_eq!(status, 200);

        server.abort();
    }

    #[tokio::test]
    async fn test_ping_once_reports_connection_errors() {
        // Bind then drop to get a port nothing listens on.
        let addr = TcpListener::bind("127.0.0.1:0")
            .await
            .unwrap()
            .local_addr()
            .unwrap();

        let client = reqwest::Client::new();
        let result = ping_once(&client, &format!("http://{addr}/")).await;
        assert!(matches!(result, Err(Error::Http(_))));
    }

    #[tokio::test]
    async fn test_serve_rejects_bad_address() {
        let result = serve("not a host", 80, Readiness::new(), async {}).await;
        assert!(matches!(result, Err(Error::Server { .. })));
    }
}
