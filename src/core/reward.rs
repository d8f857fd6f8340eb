//! Reward engine - cooldown gate, earnings calculation and promotion.
//!
//! Everything here is pure: the caller supplies the current time and a random
//! number generator, and receives an updated copy of the record. Persisting the
//! result is the caller's job.
//!
//! A work action is split into [`roll_work`] (the random draw) and
//! [`apply_work`] (the deterministic update) so the arithmetic can be tested
//! with fixed rolls.

use crate::{
    config::economy::{EconomyConfig, JobLevel},
    core::record::PlayerRecord,
    errors::{Error, Result},
};
use rand::Rng;

/// The random part of a work action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkRoll {
    /// Base pay drawn from the job's inclusive pay range
    pub base: i64,
    /// Index into `EconomyConfig::variations`
    pub variation: usize,
}

/// Earnings breakdown of one work action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Earnings {
    /// Base pay before the multiplier
    pub base: i64,
    /// Bonus added by a bonus variation
    pub bonus: Option<i64>,
    /// Amount credited to the balance
    pub total: i64,
}

/// Result of a successful work action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkOutcome {
    /// Record after the action
    pub record: PlayerRecord,
    /// Job the player worked as (before any promotion)
    pub job_index: usize,
    /// Variation that was applied
    pub variation: usize,
    /// Earnings breakdown
    pub earnings: Earnings,
    /// New job index if the action triggered a promotion
    pub promoted_to: Option<usize>,
}

/// Seconds left before `record` may work again, `None` if it may work now.
#[must_use]
pub fn cooldown_remaining(record: &PlayerRecord, now: i64, cooldown_seconds: i64) -> Option<i64> {
    let ready_at = record.last_work_time.saturating_add(cooldown_seconds);
    (now < ready_at).then(|| ready_at - now)
}

/// Draws base pay uniformly from `job`'s pay range and picks a variation uniformly.
pub fn roll_work<R: Rng + ?Sized>(
    job: &JobLevel,
    economy: &EconomyConfig,
    rng: &mut R,
) -> WorkRoll {
    WorkRoll {
        base: rng.gen_range(job.min_pay()..=job.max_pay()),
        variation: rng.gen_range(0..economy.variations.len()),
    }
}

/// `floor(base * multiplier)`
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn scale(base: i64, multiplier: f64) -> i64 {
    // Pay ranges are small, so the f64 round trip is exact.
    (base as f64 * multiplier).floor() as i64
}

/// Applies a rolled work action to `record` without checking the cooldown.
#[must_use]
pub fn apply_work(
    record: &PlayerRecord,
    now: i64,
    roll: WorkRoll,
    economy: &EconomyConfig,
) -> WorkOutcome {
    let job_index = record.job_index.min(economy.jobs.len().saturating_sub(1));
    let variation_index = roll.variation.min(economy.variations.len().saturating_sub(1));
    let variation = &economy.variations[variation_index];

    let mut total = scale(roll.base, variation.multiplier);
    let bonus = variation.bonus_multiplier.map(|m| scale(roll.base, m));
    if let Some(amount) = bonus {
        total += amount;
    }

    let mut updated = *record;
    updated.job_index = job_index;
    updated.balance = updated.balance.saturating_add(total);
    updated.last_work_time = now;
    updated.work_count = updated.work_count.saturating_add(1);

    let promoted_to = economy
        .next_job(job_index)
        .filter(|(_, next)| updated.work_count >= next.required_works)
        .map(|(next_index, _)| next_index);
    if let Some(next_index) = promoted_to {
        updated.job_index = next_index;
    }

    WorkOutcome {
        record: updated,
        job_index,
        variation: variation_index,
        earnings: Earnings {
            base: roll.base,
            bonus,
            total,
        },
        promoted_to,
    }
}

/// Performs a work action at time `now`.
///
/// # Errors
/// Returns `Error::OnCooldown` with the seconds remaining if the player worked
/// less than `cooldown_seconds` ago; `record` is not touched in that case.
pub fn attempt_work<R: Rng + ?Sized>(
    record: &PlayerRecord,
    now: i64,
    economy: &EconomyConfig,
    rng: &mut R,
) -> Result<WorkOutcome> {
    if let Some(remaining_secs) = cooldown_remaining(record, now, economy.cooldown_seconds) {
        return Err(Error::OnCooldown { remaining_secs });
    }

    let roll = roll_work(economy.job_at(record.job_index), economy, rng);
    Ok(apply_work(record, now, roll, economy))
}
