//! Economy configuration loading from economy.toml
//!
//! The job ladder, earnings variations, lottery prize table, currency glyph and
//! work cooldown are static for the lifetime of the process. They are read once
//! at startup from a TOML file, or taken from the built-in defaults when no file
//! is present, and then validated before the bot starts.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Default cooldown between two work actions, in seconds.
pub const DEFAULT_COOLDOWN_SECONDS: i64 = 3600;

/// Complete economy configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EconomyConfig {
    /// Glyph shown next to every currency amount
    #[serde(default = "default_currency_emoji")]
    pub currency_emoji: String,
    /// Human-readable currency name
    #[serde(default = "default_currency_name")]
    pub currency_name: String,
    /// Seconds a player must wait between two work actions
    #[serde(default = "default_cooldown_seconds")]
    pub cooldown_seconds: i64,
    /// Ordered job ladder, index 0 is entry level
    pub jobs: Vec<JobLevel>,
    /// Earnings variations, one is picked uniformly per work action
    pub variations: Vec<Variation>,
    /// Lottery ticket price and prize table
    #[serde(default)]
    pub lottery: LotteryConfig,
}

/// A single rung of the job ladder.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JobLevel {
    /// Job title
    pub name: String,
    /// Icon shown next to the title
    pub emoji: String,
    /// Inclusive `[min, max]` base pay range
    pub pay: [i64; 2],
    /// Cumulative work count needed to be promoted into this level
    pub required_works: i64,
}

impl JobLevel {
    /// Lowest base pay
    #[must_use]
    pub const fn min_pay(&self) -> i64 {
        self.pay[0]
    }

    /// Highest base pay
    #[must_use]
    pub const fn max_pay(&self) -> i64 {
        self.pay[1]
    }

    /// Title followed by icon, e.g. `Miner ⛏️`
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.name, self.emoji)
    }
}

/// Earnings multiplier profile.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Variation {
    /// Profile key (`normal`, `late`, `bonus`, ...)
    pub key: String,
    /// Applied to the base pay, result is floored
    pub multiplier: f64,
    /// Present only on bonus profiles: extra `floor(base * bonus_multiplier)`
    #[serde(default)]
    pub bonus_multiplier: Option<f64>,
    /// Message template with `{job_name}`, `{earnings}`, `{bonus_amount}`,
    /// `{total_earnings}` and `{emoji}` placeholders
    pub message: String,
}

impl Variation {
    /// Whether this profile pays a bonus on top of the base earnings.
    #[must_use]
    pub const fn is_bonus(&self) -> bool {
        self.bonus_multiplier.is_some()
    }
}

/// Lottery settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LotteryConfig {
    /// Cost of a single ticket
    pub ticket_price: i64,
    /// Maximum tickets per purchase
    pub max_tickets: u32,
    /// Prize tiers, drawn by cumulative probability; the last tier is the fallback
    pub prizes: Vec<Prize>,
}

/// One lottery prize tier.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Prize {
    /// Tier name
    pub name: String,
    /// Icon for the tier
    pub emoji: String,
    /// Chance in percent (0-100)
    pub probability: f64,
    /// Payout as a multiple of the ticket price
    pub multiplier: i64,
}

fn default_currency_emoji() -> String {
    "💎".to_string()
}

fn default_currency_name() -> String {
    "Gem".to_string()
}

const fn default_cooldown_seconds() -> i64 {
    DEFAULT_COOLDOWN_SECONDS
}

fn job(name: &str, emoji: &str, pay: [i64; 2], required_works: i64) -> JobLevel {
    JobLevel {
        name: name.to_string(),
        emoji: emoji.to_string(),
        pay,
        required_works,
    }
}

fn prize(name: &str, emoji: &str, probability: f64, multiplier: i64) -> Prize {
    Prize {
        name: name.to_string(),
        emoji: emoji.to_string(),
        probability,
        multiplier,
    }
}

impl Default for LotteryConfig {
    fn default() -> Self {
        Self {
            ticket_price: 100,
            max_tickets: 1000,
            prizes: vec![
                prize("Jackpot", "👑", 0.01, 1000),
                prize("First Prize", "🥇", 0.1, 100),
                prize("Second Prize", "🥈", 1.0, 10),
                prize("Third Prize", "🥉", 10.0, 2),
                prize("Refund", "🎟️", 20.0, 1),
                prize("Miss", "💨", 68.89, 0),
            ],
        }
    }
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            currency_emoji: default_currency_emoji(),
            currency_name: default_currency_name(),
            cooldown_seconds: DEFAULT_COOLDOWN_SECONDS,
            jobs: vec![
                job("Dropout", "🏫", [10, 30], 0),
                job("Miner", "⛏️", [30, 70], 10),
                job("Confectioner", "🍡", [60, 90], 30),
                job("Tech CEO", "💻", [180, 250], 50),
            ],
            variations: vec![
                Variation {
                    key: "normal".to_string(),
                    multiplier: 1.0,
                    bonus_multiplier: None,
                    message: "You worked as a {job_name} and earned {earnings}{emoji}!"
                        .to_string(),
                },
                Variation {
                    key: "late".to_string(),
                    multiplier: 0.5,
                    bonus_multiplier: None,
                    message: "You worked as a {job_name} but showed up late, \
                        so you only earned {earnings}{emoji}..."
                        .to_string(),
                },
                Variation {
                    key: "bonus".to_string(),
                    multiplier: 1.0,
                    bonus_multiplier: Some(0.5),
                    message: "You worked as a {job_name} and earned {earnings}{emoji}! \
                        You also got a {bonus_amount}{emoji} bonus!\n\
                        Total: **{total_earnings}{emoji}**"
                        .to_string(),
                },
            ],
            lottery: LotteryConfig::default(),
        }
    }
}

impl EconomyConfig {
    /// Returns the job at `index`, clamped to the top of the ladder.
    ///
    /// Stored indices are validated on write, but records edited by hand or
    /// written under a longer ladder must still render.
    #[must_use]
    pub fn job_at(&self, index: usize) -> &JobLevel {
        let last = self.jobs.len().saturating_sub(1);
        &self.jobs[index.min(last)]
    }

    /// Next level after `index`, if any.
    #[must_use]
    pub fn next_job(&self, index: usize) -> Option<(usize, &JobLevel)> {
        let next = index.checked_add(1)?;
        self.jobs.get(next).map(|job| (next, job))
    }

    /// Checks the invariants the reward engine relies on.
    ///
    /// # Errors
    /// Returns `Error::Config` describing the first violated rule.
    pub fn validate(&self) -> Result<()> {
        let fail = |message: String| Err(Error::Config { message });

        if self.cooldown_seconds < 0 {
            return fail(format!(
                "cooldown_seconds must not be negative (got {})",
                self.cooldown_seconds
            ));
        }
        if self.jobs.is_empty() {
            return fail("at least one job level is required".to_string());
        }
        if self.jobs[0].required_works != 0 {
            return fail(format!(
                "entry job '{}' must require 0 works",
                self.jobs[0].name
            ));
        }
        for (index, level) in self.jobs.iter().enumerate() {
            if level.min_pay() < 0 || level.min_pay() > level.max_pay() {
                return fail(format!(
                    "job {index} ('{}') has invalid pay range {:?}",
                    level.name, level.pay
                ));
            }
            if level.required_works < 0 {
                return fail(format!(
                    "job {index} ('{}') has negative required_works",
                    level.name
                ));
            }
        }
        if self.variations.is_empty() {
            return fail("at least one earnings variation is required".to_string());
        }
        for variation in &self.variations {
            let multipliers =
                std::iter::once(variation.multiplier).chain(variation.bonus_multiplier);
            for value in multipliers {
                if !value.is_finite() || value < 0.0 {
                    return fail(format!(
                        "variation '{}' has invalid multiplier {value}",
                        variation.key
                    ));
                }
            }
        }
        self.lottery.validate()
    }
}

impl LotteryConfig {
    /// Checks ticket price, ticket limit and the prize table.
    ///
    /// # Errors
    /// Returns `Error::Config` describing the first violated rule.
    pub fn validate(&self) -> Result<()> {
        let fail = |message: String| Err(Error::Config { message });

        if self.ticket_price <= 0 {
            return fail("lottery ticket_price must be positive".to_string());
        }
        if self.max_tickets == 0 {
            return fail("lottery max_tickets must be at least 1".to_string());
        }
        if self.prizes.is_empty() {
            return fail("lottery needs at least one prize tier".to_string());
        }
        let mut total = 0.0;
        for tier in &self.prizes {
            if !tier.probability.is_finite() || tier.probability < 0.0 || tier.multiplier < 0 {
                return fail(format!("lottery prize '{}' is invalid", tier.name));
            }
            total += tier.probability;
        }
        // Allow for float drift in hand-written tables.
        if total > 100.0 + 1e-6 {
            return fail(format!(
                "lottery probabilities sum to {total}, which exceeds 100"
            ));
        }
        Ok(())
    }
}

/// Parses and validates an economy configuration from TOML text.
///
/// # Errors
/// Returns `Error::Config` if the TOML is malformed or fails validation.
pub fn parse_config(contents: &str) -> Result<EconomyConfig> {
    let config: EconomyConfig = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse economy config: {e}"),
    })?;
    config.validate()?;
    Ok(config)
}

/// Loads the economy configuration from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read, is not valid TOML, or fails
/// validation.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<EconomyConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Loading economy configuration from {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read economy config {}: {e}", path_ref.display()),
    })?;
    parse_config(&contents)
}

/// Loads `path` if it exists, otherwise falls back to the built-in defaults.
///
/// # Errors
/// Returns an error if the file exists but cannot be loaded.
pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<EconomyConfig> {
    let path_ref = path.as_ref();
    if path_ref.exists() {
        let config = load_config(path_ref)?;
        tracing::info!(
            "Loaded economy config from {} ({} jobs, {} variations)",
            path_ref.display(),
            config.jobs.len(),
            config.variations.len()
        );
        Ok(config)
    } else {
        tracing::info!(
            "No economy config at {}, using built-in defaults",
            path_ref.display()
        );
        let config = EconomyConfig::default();
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EconomyConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cooldown_seconds, 3600);
        assert_eq!(config.jobs.len(), 4);
        assert_eq!(config.variations.iter().filter(|v| v.is_bonus()).count(), 1);
    }

    #[test]
    fn test_bundled_economy_toml_matches_defaults() {
        let bundled = parse_config(include_str!("../../economy.toml")).unwrap();
        let defaults = EconomyConfig::default();
        assert_eq!(bundled.jobs, defaults.jobs);
        assert_eq!(bundled.variations, defaults.variations);
        assert_eq!(bundled.lottery, defaults.lottery);
        assert_eq!(bundled.currency_emoji, defaults.currency_emoji);
    }

    #[test]
    fn test_parse_economy_config() {
        let toml_str = r#"
            currency_emoji = "🪙"
            cooldown_seconds = 60

            [[jobs]]
            name = "Intern"
            emoji = "📎"
            pay = [10, 20]
            required_works = 0

            [[jobs]]
            name = "Manager"
            emoji = "📈"
            pay = [40, 80]
            required_works = 5

            [[variations]]
            key = "normal"
            multiplier = 1.0
            message = "{job_name}: {earnings}{emoji}"

            [[variations]]
            key = "bonus"
            multiplier = 1.0
            bonus_multiplier = 0.25
            message = "{job_name}: {earnings}+{bonus_amount}={total_earnings}{emoji}"
        "#;

        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.currency_emoji, "🪙");
        assert_eq!(config.currency_name, "Gem");
        assert_eq!(config.cooldown_seconds, 60);
        assert_eq!(config.jobs[1].name, "Manager");
        assert_eq!(config.jobs[1].min_pay(), 40);
        assert_eq!(config.jobs[1].max_pay(), 80);
        assert_eq!(config.variations[1].bonus_multiplier, Some(0.25));
        assert_eq!(config.lottery, LotteryConfig::default());
    }

    #[test]
    fn test_validate_rejects_inverted_pay_range() {
        let mut config = EconomyConfig::default();
        config.jobs[2].pay = [90, 60];
        assert!(matches!(config.validate(), Err(Error::Config { .. })));
    }

    #[test]
    fn test_validate_rejects_empty_ladder_and_variations() {
        let mut config = EconomyConfig::default();
        config.jobs.clear();
        assert!(config.validate().is_err());

        let mut config = EconomyConfig::default();
        config.variations.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_multiplier() {
        let mut config = EconomyConfig::default();
        config.variations[0].multiplier = -1.0;
        assert!(config.validate().is_err());

        let mut config = EconomyConfig::default();
        config.variations[2].bonus_multiplier = Some(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_overfull_prize_table() {
        let mut config = EconomyConfig::default();
        config.lottery.prizes[0].probability = 50.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_job_lookup_helpers() {
        let config = EconomyConfig::default();
        assert_eq!(config.job_at(1).name, "Miner");
        assert_eq!(config.job_at(99).name, "Tech CEO");
        assert_eq!(config.next_job(0).map(|(i, _)| i), Some(1));
        assert!(config.next_job(3).is_none());
        assert_eq!(config.job_at(1).label(), "Miner ⛏️");
    }

    #[test]
    fn test_load_or_default_without_file() {
        let config = load_or_default("definitely/not/here/economy.toml").unwrap();
        assert_eq!(config.jobs, EconomyConfig::default().jobs);
    }
}
