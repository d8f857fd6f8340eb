//! Lottery Discord commands - `lottery buy`.
//!
//! Tickets cost a fixed price and each one is drawn independently against the
//! configured prize table.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, format, reply_error},
        core::economy,
        errors::Result,
    };
    use poise::serenity_prelude as serenity;
    use rand::{SeedableRng, rngs::StdRng};

    /// Parent command for the lottery.
    #[poise::command(slash_command, subcommands("lottery_buy"))]
    pub async fn lottery(ctx: Context<'_>) -> Result<()> {
        let lottery = &ctx.data().economy.lottery;
        ctx.say(format!(
            "Lottery command. Available subcommands:\n\
            `/lottery buy <amount>` - Buy 1 to {} tickets at {}{} each",
            lottery.max_tickets,
            format::format_number(lottery.ticket_price),
            ctx.data().economy.currency_emoji
        ))
        .await?;
        Ok(())
    }

    /// Buys lottery tickets and draws them all at once.
    #[poise::command(slash_command, rename = "buy")]
    pub async fn lottery_buy(
        ctx: Context<'_>,
        #[description = "Number of tickets to buy"] amount: i64,
    ) -> Result<()> {
        let data = ctx.data();
        let user_id = ctx.author().id.to_string();
        let mut rng = StdRng::from_entropy();

        let outcome = match economy::play_lottery(
            &data.store,
            &data.locks,
            &data.economy,
            &user_id,
            amount,
            &mut rng,
        )
        .await
        {
            Ok(outcome) => outcome,
            Err(e) => return reply_error(ctx, e).await,
        };

        let config = &data.economy;
        let description =
            format::lottery_summary(&outcome, &config.lottery, &config.currency_emoji)?;
        let color = if outcome.net_change() >= 0 {
            format::COLOR_GREEN
        } else {
            format::COLOR_RED
        };

        let embed = serenity::CreateEmbed::default()
            .title(format!("🎰 Lottery Results ({} tickets)", outcome.tickets))
            .description(description)
            .color(color)
            .field(
                "Current Balance",
                format!(
                    "{} {}",
                    config.currency_emoji,
                    format::format_number(outcome.record.balance)
                ),
                false,
            );

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
