//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for `WorkBuddy`: the slash
//! commands, autocomplete handlers, reply formatting and the shared context
//! every command receives.

/// Discord command implementations (economy, admin, lottery, general)
pub mod commands;
/// Reply text builders
pub mod format;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::{
    config::economy::EconomyConfig,
    core::{PlayerStore, locks::UserLocks},
    errors::{Error, Result},
    liveness::Readiness,
};
use poise::serenity_prelude as serenity;
use std::{future::Future, sync::Arc};
use tracing::{error, info, instrument};

/// Shared data available to all bot commands.
///
/// Built once at startup and owned by the framework until the process exits.
/// Replaces any notion of global client handles: every command reaches the
/// store, the economy tables and the lock table through here.
pub struct BotData {
    /// Player record persistence
    pub store: PlayerStore,
    /// Static economy configuration
    pub economy: Arc<EconomyConfig>,
    /// Per-user locks around record updates
    pub locks: UserLocks,
    /// Flipped once logged in, reported by the health endpoint
    pub readiness: Readiness,
}

impl BotData {
    /// Creates the command context from its startup-time parts.
    #[must_use]
    pub fn new(store: PlayerStore, economy: Arc<EconomyConfig>, readiness: Readiness) -> Self {
        Self {
            store,
            economy,
            locks: UserLocks::new(),
            readiness,
        }
    }
}

/// Poise context used by every command.
pub type Context<'a> = poise::Context<'a, BotData, Error>;

/// Sends `text` visible only to the invoking user.
pub async fn reply_ephemeral(ctx: Context<'_>, text: impl Into<String>) -> Result<()> {
    ctx.send(
        poise::CreateReply::default()
            .content(text.into())
            .ephemeral(true),
    )
    .await?;
    Ok(())
}

/// Replies to a player-facing engine error, or passes anything else on to `on_error`.
pub async fn reply_error(ctx: Context<'_>, error: Error) -> Result<()> {
    if error.is_user_facing() {
        reply_ephemeral(ctx, format::user_error_message(&error, &ctx.data().economy)).await
    } else {
        Err(error)
    }
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup {
            error, framework, ..
        } => {
            error!("Failed to start bot: {:?}", error);
            framework.shard_manager().shutdown_all().await;
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
            let text = format::user_error_message(&error, &ctx.data().economy);
            if let Err(e) = reply_ephemeral(ctx, text).await {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Connects to Discord and runs until the gateway closes or `shutdown` resolves.
///
/// Commands are registered in `dev_guild_id` when given (instant updates while
/// developing), otherwise globally.
#[instrument(skip(token, data, shutdown))]
pub async fn run_bot<F>(
    token: String,
    data: BotData,
    dev_guild_id: Option<u64>,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                let commands = &framework.options().commands;
                if let Some(guild_id) = dev_guild_id {
                    let guild_id = serenity::GuildId::new(guild_id);
                    poise::builtins::register_in_guild(ctx, commands, guild_id).await?;
                    info!("Registered {} commands in guild {}", commands.len(), guild_id);
                } else {
                    poise::builtins::register_globally(ctx, commands).await?;
                    info!("Registered {} commands globally", commands.len());
                }
                data.readiness.mark_ready();
                Ok(data)
            })
        })
        .build();

    // Slash commands only, no privileged intents needed
    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::Client::builder(&token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {:?}", e))?;

    let shard_manager = Arc::clone(&client.shard_manager);
    tokio::spawn(async move {
        shutdown.await;
        info!("Shutting down Discord shards...");
        shard_manager.shutdown_all().await;
    });

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {:?}", e))?;

    Ok(())
}
