#![allow(clippy::result_large_err)]

use dotenvy::dotenv;
use std::{env, sync::Arc};
use tokio::sync::watch;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use work_buddy::{
    bot::{self, BotData},
    config::{economy, settings::Settings},
    core::PlayerStore,
    errors::{Error, Result},
    liveness::{self, Readiness},
    shutdown::{self, wait_for_shutdown},
};

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, non-fatal since env vars can be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Settings and economy tables
    let settings = Settings::from_env()
        .inspect_err(|e| error!("Invalid settings: {}", e))?;
    let economy = economy::load_or_default(&settings.economy_config_path)
        .inspect_err(|e| error!("Failed to load economy config: {}", e))?;
    info!(
        jobs = economy.jobs.len(),
        cooldown_seconds = economy.cooldown_seconds,
        "Economy configuration loaded"
    );

    // 4. Player store
    let store = PlayerStore::connect(&settings)
        .await
        .inspect(|store| info!("Player store ready ({})", store.backend_name()))
        .inspect_err(|e| error!("Failed to open player store: {}", e))?;

    // 5. Shutdown signal shared by the bot and the liveness server
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(shutdown::forward_signal(tokio::signal::ctrl_c(), shutdown_tx));

    // 6. Liveness server and optional self-ping
    let readiness = Readiness::new();
    let server = tokio::spawn({
        let host = settings.health_host.clone();
        let port = settings.port;
        let readiness = readiness.clone();
        let shutdown = wait_for_shutdown(shutdown_rx.clone());
        async move {
            if let Err(e) = liveness::serve(&host, port, readiness, shutdown).await {
                error!("Liveness server stopped: {}", e);
            }
        }
    });

    match settings.self_ping_interval {
        Some(period) => {
            let url = settings.self_ping_url.clone();
            liveness::spawn_self_ping(reqwest::Client::new(), url, period);
        }
        None => info!("Self-ping disabled"),
    }

    // 7. Run the bot
    // DISCORD_BOT_TOKEN is loaded here, directly before use, not stored in Settings
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {}", e))
        .map_err(Error::EnvVar)?;

    let data = BotData::new(store, Arc::new(economy), readiness);
    let result = bot::run_bot(
        token,
        data,
        settings.dev_guild_id,
        wait_for_shutdown(shutdown_rx),
    )
    .await;

    if server.is_finished() {
        warn!("Liveness server exited before the bot");
    } else {
        server.abort();
    }

    info!("WorkBuddy stopped");
    result
}
