//! Economy Discord commands - `work`, `balance` and `leaderboard`.
//!
//! These commands go through `core::economy` for every read and write, then
//! format the result as an embed. Expected failures (cooldown, store outage)
//! become ephemeral replies instead of errors.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, format, reply_ephemeral, reply_error},
        core::{
            economy,
            leaderboard::{self, LEADERBOARD_SIZE},
        },
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use rand::{SeedableRng, rngs::StdRng};

    /// Nickname in the current guild, falling back to the account's display name.
    async fn invoker_display_name(ctx: Context<'_>) -> String {
        match ctx.author_member().await {
            Some(member) => member.display_name().to_string(),
            None => ctx.author().display_name().to_string(),
        }
    }

    /// Looks up a stored user ID on Discord.
    async fn resolve_user_name(ctx: &serenity::Context, user_id: &str) -> Result<String> {
        let unresolved = || Error::UnresolvedUser {
            user_id: user_id.to_string(),
        };
        let id = user_id
            .parse::<u64>()
            .ok()
            .filter(|id| *id != 0)
            .ok_or_else(unresolved)?;

        serenity::UserId::new(id)
            .to_user(ctx)
            .await
            .map(|user| user.display_name().to_string())
            .map_err(|_| unresolved())
    }

    /// Works a shift at your current job to earn currency.
    ///
    /// Earnings are drawn from your job's pay range and may be reduced (late)
    /// or boosted (bonus). Enough shifts promote you to the next job.
    #[poise::command(slash_command)]
    pub async fn work(ctx: Context<'_>) -> Result<()> {
        let data = ctx.data();
        let user_id = ctx.author().id.to_string();
        let now = chrono::Utc::now().timestamp();
        let mut rng = StdRng::from_entropy();

        let outcome = match economy::perform_work(
            &data.store,
            &data.locks,
            &data.economy,
            &user_id,
            now,
            &mut rng,
        )
        .await
        {
            Ok(outcome) => outcome,
            Err(e) => return reply_error(ctx, e).await,
        };

        let config = &data.economy;
        let job = &config.jobs[outcome.job_index];
        let mut description = format::render_work_message(
            &config.variations[outcome.variation],
            job,
            &outcome.earnings,
            &config.currency_emoji,
        );
        if let Some(next) = outcome.promoted_to {
            description.push_str(&format::promotion_message(&config.jobs[next]));
        }

        let embed = serenity::CreateEmbed::default()
            .title(format!("{} - Shift Complete", job.label()))
            .description(description)
            .color(format::COLOR_WORK)
            .field(
                "Current Balance",
                format!(
                    "{} {} {}",
                    config.currency_emoji,
                    format::format_number(outcome.record.balance),
                    config.currency_name
                ),
                false,
            );

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Shows your balance, job and promotion progress.
    #[poise::command(slash_command)]
    pub async fn balance(ctx: Context<'_>) -> Result<()> {
        let data = ctx.data();
        let user_id = ctx.author().id.to_string();

        let summary = match economy::player_status(&data.store, &data.economy, &user_id).await {
            Ok(summary) => summary,
            Err(e) => return reply_error(ctx, e).await,
        };

        let config = &data.economy;
        let display_name = invoker_display_name(ctx).await;
        let embed = serenity::CreateEmbed::default()
            .title(format!(
                "{} {display_name}'s Economy Status",
                config.currency_emoji
            ))
            .color(format::COLOR_GOLD)
            .field(
                format!("{} Balance", config.currency_name),
                format!(
                    "**{} {}**",
                    config.currency_emoji,
                    format::format_number(summary.balance)
                ),
                false,
            )
            .field("Current Job", format!("**{}**", summary.job.label()), true)
            .field("Total Works", format!("**{}**", summary.work_count), true)
            .field("Promotion", format::progress_message(&summary), false);

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Shows the top 10 players by balance.
    #[poise::command(slash_command)]
    pub async fn leaderboard(ctx: Context<'_>) -> Result<()> {
        let data = ctx.data();

        let ranked = match economy::ranked_players(&data.store).await {
            Ok(ranked) => ranked,
            Err(e) => return reply_error(ctx, e).await,
        };
        if ranked.is_empty() {
            reply_ephemeral(ctx, "No ranking data yet. Someone use `/work`!").await?;
            return Ok(());
        }

        // Resolving users can take a while on a cold cache.
        ctx.defer().await?;

        let serenity_ctx = ctx.serenity_context();
        let entries =
            leaderboard::collect_leaderboard(ranked, LEADERBOARD_SIZE, |user_id| async move {
                resolve_user_name(serenity_ctx, &user_id).await
            })
            .await;

        let config = &data.economy;
        let description = if entries.is_empty() {
            "No ranked players could be found on Discord.".to_string()
        } else {
            entries
                .iter()
                .map(|entry| {
                    format::leaderboard_line(
                        entry.rank,
                        &config.job_at(entry.player.record.job_index).emoji,
                        &entry.resolved,
                        entry.player.record.balance,
                        &config.currency_emoji,
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")
        };

        let embed = serenity::CreateEmbed::default()
            .title(format!(
                "🏆 {} Leaderboard - Top {LEADERBOARD_SIZE}",
                config.currency_name
            ))
            .description(description)
            .color(format::COLOR_GOLD)
            .timestamp(serenity::Timestamp::now())
            .footer(serenity::CreateEmbedFooter::new("Ranked by current balance"));

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
