//! Text formatting for command replies.
//!
//! Pure string builders, kept apart from the command handlers so the wording
//! can be tested without a Discord connection.

use crate::{
    config::economy::{EconomyConfig, JobLevel, LotteryConfig, Variation},
    core::{
        job::{Progress, StatusSummary},
        lottery::LotteryOutcome,
        reward::Earnings,
    },
    errors::Error,
};
use std::fmt::Write;

/// Embed colour for work results
pub const COLOR_WORK: u32 = 0x0034_98DB;
/// Embed colour for status and leaderboard
pub const COLOR_GOLD: u32 = 0x00F1_C40F;
/// Embed colour for ping
pub const COLOR_GREEN: u32 = 0x0057_F287;
/// Embed colour for a lottery loss
pub const COLOR_RED: u32 = 0x00FF_0000;

/// Formats an integer with thousands separators, e.g. `1,234,567`.
#[must_use]
pub fn format_number(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Formats a signed amount with an explicit `+` for gains.
#[must_use]
pub fn format_signed(value: i64) -> String {
    if value >= 0 {
        format!("+{}", format_number(value))
    } else {
        format_number(value)
    }
}

/// Renders seconds as `1h 5m 3s`, `12m 30s` or `45s`.
#[must_use]
pub fn format_duration(total_secs: i64) -> String {
    let secs = total_secs.max(0);
    let (hours, minutes, seconds) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

/// Reply for a player still on cooldown.
#[must_use]
pub fn cooldown_message(remaining_secs: i64) -> String {
    format!(
        "You're still on break. Wait **{}** before working again.",
        format_duration(remaining_secs)
    )
}

/// Fills a variation's message template.
///
/// `{earnings}` is the amount before any bonus, `{bonus_amount}` the bonus and
/// `{total_earnings}` their sum.
#[must_use]
pub fn render_work_message(
    variation: &Variation,
    job: &JobLevel,
    earnings: &Earnings,
    currency_emoji: &str,
) -> String {
    let bonus = earnings.bonus.unwrap_or(0);
    variation
        .message
        .replace("{job_name}", &job.name)
        .replace("{earnings}", &format_number(earnings.total - bonus))
        .replace("{bonus_amount}", &format_number(bonus))
        .replace("{total_earnings}", &format_number(earnings.total))
        .replace("{emoji}", currency_emoji)
}

/// Appended to a work reply when the player was promoted.
#[must_use]
pub fn promotion_message(job: &JobLevel) -> String {
    format!(
        "\n\n**🎉 Congratulations on your promotion!**\nYou are now a **{}**!",
        job.label()
    )
}

/// The "Promotion" field of the status embed.
#[must_use]
pub fn progress_message(summary: &StatusSummary) -> String {
    match &summary.progress {
        Progress::Next {
            job,
            remaining_works,
            ..
        } => format!(
            "Next promotion ({}): **{remaining_works}** more work{} needed!",
            job.label(),
            if *remaining_works == 1 { "" } else { "s" }
        ),
        Progress::TopOfLadder => "You already hold the highest job!".to_string(),
    }
}

/// Medal for a leaderboard position.
#[must_use]
pub const fn rank_medal(rank: usize) -> &'static str {
    match rank {
        1 => "👑",
        2 => "🥈",
        3 => "🥉",
        _ => "🏅",
    }
}

/// One leaderboard line.
#[must_use]
pub fn leaderboard_line(
    rank: usize,
    job_emoji: &str,
    name: &str,
    balance: i64,
    currency_emoji: &str,
) -> String {
    format!(
        "{} **#{rank}** {job_emoji} **{name}** : {currency_emoji} {}",
        rank_medal(rank),
        format_number(balance)
    )
}

/// Description of the lottery result embed.
pub fn lottery_summary(
    outcome: &LotteryOutcome,
    config: &LotteryConfig,
    currency_emoji: &str,
) -> Result<String, std::fmt::Error> {
    let mut text = String::new();
    writeln!(
        text,
        "**Cost**: {}{currency_emoji}",
        format_number(outcome.cost)
    )?;
    writeln!(
        text,
        "**Winnings**: {}{currency_emoji}\n",
        format_number(outcome.winnings)
    )?;
    writeln!(
        text,
        "**Net**: **{}{currency_emoji}**\n",
        format_signed(outcome.net_change())
    )?;
    write!(text, "--- Results ---")?;
    for tally in &outcome.tallies {
        let prize = &config.prizes[tally.prize];
        write!(
            text,
            "\n• {} **{}**: {} ticket{}",
            prize.emoji,
            prize.name,
            tally.count,
            if tally.count == 1 { "" } else { "s" }
        )?;
    }
    Ok(text)
}

/// Reply text for an error a player can act on.
#[must_use]
pub fn user_error_message(error: &Error, economy: &EconomyConfig) -> String {
    let currency = &economy.currency_emoji;
    match error {
        Error::OnCooldown { remaining_secs } => cooldown_message(*remaining_secs),
        Error::InvalidJobIndex { max, .. } => {
            format!("Invalid job index. Choose a value between 0 and {max}.")
        }
        Error::PersistenceUnavailable { .. } => {
            "Sorry, the player database is unavailable right now. Please try again later."
                .to_string()
        }
        Error::InsufficientFunds { current, required } => format!(
            "Not enough funds! You need {}{currency} but only have {}{currency}.",
            format_number(*required),
            format_number(*current)
        ),
        Error::InvalidTicketCount { max, .. } => {
            format!("You can buy between 1 and {max} tickets at a time.")
        }
        _ => "Sorry, something went wrong while running that command.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{job::describe_status, lottery::PrizeTally},
        test_utils::{record, test_economy},
    };

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_000), "1,000");
        assert_eq!(format_number(1_234_567), "1,234,567");
        assert_eq!(format_number(-45_000), "-45,000");
        assert_eq!(format_signed(250), "+250");
        assert_eq!(format_signed(-1_250), "-1,250");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(45), "45s");
        assert_eq!(format_duration(1800), "30m 0s");
        assert_eq!(format_duration(750), "12m 30s");
        assert_eq!(format_duration(3723), "1h 2m 3s");
        assert_eq!(format_duration(-3), "0s");
        assert!(cooldown_message(1800).contains("30m 0s"));
    }

    #[test]
    fn test_render_bonus_message() {
        let economy = crate::config::economy::EconomyConfig::default();
        let bonus = economy
            .variations
            .iter()
            .find(|v| v.is_bonus())
            .unwrap_or(&economy.variations[0]);
        let earnings = Earnings {
            base: 1_200,
            bonus: Some(600),
            total: 1_800,
        };

        let text = render_work_message(bonus, &economy.jobs[3], &earnings, "💎");
        assert!(text.contains("Tech CEO"));
        assert!(text.contains("1,200💎"));
        assert!(text.contains("600💎"));
        assert!(text.contains("**1,800💎**"));
        assert!(!text.contains('{'));
    }

    #[test]
    fn test_render_plain_message_uses_total() {
        let economy = test_economy();
        let earnings = Earnings {
            base: 15,
            bonus: None,
            total: 7,
        };
        let text = render_work_message(&economy.variations[1], &economy.jobs[0], &earnings, "💎");
        assert_eq!(text, "Apprentice earned 7💎");
    }

    #[test]
    fn test_progress_message() {
        let economy = test_economy();
        let next = describe_status(&record(0, 4, 0, 0), &economy);
        assert!(progress_message(&next).contains("**1** more work needed"));

        let top = describe_status(&record(0, 100, 0, 3), &economy);
        assert_eq!(progress_message(&top), "You already hold the highest job!");
    }

    #[test]
    fn test_leaderboard_line() {
        assert_eq!(
            leaderboard_line(1, "⛏️", "alice", 12_345, "💎"),
            "👑 **#1** ⛏️ **alice** : 💎 12,345"
        );
        assert!(leaderboard_line(7, "🏫", "bob", 5, "💎").starts_with("🏅 **#7**"));
    }

    #[test]
    fn test_lottery_summary() {
        let config = LotteryConfig::default();
        let outcome = LotteryOutcome {
            record: record(900, 0, 0, 0),
            tickets: 3,
            cost: 300,
            winnings: 200,
            tallies: vec![
                PrizeTally { prize: 5, count: 2 },
                PrizeTally { prize: 3, count: 1 },
            ],
        };

        let text = lottery_summary(&outcome, &config, "💎").unwrap_or_default();
        assert!(text.contains("**Cost**: 300💎"));
        assert!(text.contains("**Net**: **-100💎**"));
        assert!(text.contains("**Miss**: 2 tickets"));
        assert!(text.contains("**Third Prize**: 1 ticket"));
    }

    #[test]
    fn test_user_error_messages() {
        let economy = test_economy();
        let text = user_error_message(&Error::OnCooldown { remaining_secs: 90 }, &economy);
        assert!(text.contains("1m 30s"));

        let text = user_error_message(&Error::InvalidJobIndex { index: 7, max: 3 }, &economy);
        assert!(text.contains("between 0 and 3"));

        let text = user_error_message(
            &Error::PersistenceUnavailable {
                message: "down".to_string(),
            },
            &economy,
        );
        assert!(text.starts_with("Sorry"));
    }
}
