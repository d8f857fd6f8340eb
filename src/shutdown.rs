//! Process shutdown flag shared by the bot and the liveness server.

use std::future::Future;
use tokio::sync::watch;
use tracing::{error, info};

/// Flips `tx` to `true` once `signal` completes successfully.
///
/// If the signal handler cannot be installed the flag is never set and the
/// sender is held forever, so receivers keep running.
pub async fn forward_signal<F>(signal: F, tx: watch::Sender<bool>)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => {
            info!("Shutdown signal received");
            tx.send_replace(true);
        }
        Err(e) => {
            error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

/// Resolves once the shutdown flag flips or its sender is dropped.
pub async fn wait_for_shutdown(mut rx: watch::Receiver<bool>) {
    // Err means the sender is gone, which only happens on exit.
    let _ = rx.wait_for(|stop| *stop).await;
}
