//! General Discord commands - ping and help.
//! Simple commands that don't touch player records.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, format},
        errors::Result,
    };
    use poise::serenity_prelude as serenity;

    /// Shows the bot's gateway latency.
    #[poise::command(slash_command)]
    pub async fn ping(ctx: Context<'_>) -> Result<()> {
        let latency_ms = ctx.ping().await.as_secs_f64() * 1000.0;

        let embed = serenity::CreateEmbed::default()
            .title("🏓 Pong!")
            .description(format!("Current latency: **{latency_ms:.2}ms**"))
            .color(format::COLOR_GREEN);

        ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
            .await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command)]
    pub async fn help(ctx: Context<'_>) -> Result<()> {
        let economy = &ctx.data().economy;
        let help_text = format!(
            "**WorkBuddy Help**\n\
            Work shifts to earn {emoji} {currency}, climb the job ladder \
            and top the leaderboard.\n\n\
            **Economy Commands**\n\
            • `/work` - Work a shift (once every {cooldown}).\n\
            • `/balance` - Shows your balance, job and promotion progress.\n\
            • `/leaderboard` - Shows the top 10 richest players.\n\
            • `/lottery buy <amount>` - Buys lottery tickets ({price}{emoji} each).\n\n\
            **Admin Commands**\n\
            • `/setjob <user> <job_index>` - Sets a user's job directly.\n\n\
            **Utility Commands**\n\
            • `/ping` - Checks if the bot is responsive.\n\
            • `/help` - Shows this help message.",
            emoji = economy.currency_emoji,
            currency = economy.currency_name,
            cooldown = format::format_duration(economy.cooldown_seconds),
            price = format::format_number(economy.lottery.ticket_price),
        );

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
