//! Economy actions - the read, compute, write cycles behind each command.
//!
//! Each mutating action takes the user's lock, loads the record, runs the pure
//! engine and persists the result. If the engine rejects the action nothing is
//! written; if loading fails the engine never runs.

use crate::{
    config::economy::EconomyConfig,
    core::{
        job::{self, StatusSummary},
        leaderboard,
        locks::UserLocks,
        lottery::{self, LotteryOutcome},
        record::{PlayerRecord, StoredPlayer},
        reward::{self, WorkOutcome},
        store::PlayerStore,
    },
    errors::Result,
};
use rand::Rng;
use tracing::info;

/// Result of an administrative job change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobChange {
    /// Job index before the change
    pub old_index: usize,
    /// Job index after the change
    pub new_index: usize,
    /// Updated record
    pub record: PlayerRecord,
}

/// Runs a work action for `user_id` at time `now` and persists the result.
pub async fn perform_work<R: Rng + ?Sized>(
    store: &PlayerStore,
    locks: &UserLocks,
    economy: &EconomyConfig,
    user_id: &str,
    now: i64,
    rng: &mut R,
) -> Result<WorkOutcome> {
    let _guard = locks.lock(user_id).await;

    let record = store.get_record(user_id).await?;
    let outcome = reward::attempt_work(&record, now, economy, rng)?;
    store.put_record(user_id, &outcome.record).await?;

    info!(
        user_id,
        earned = outcome.earnings.total,
        balance = outcome.record.balance,
        promoted_to = ?outcome.promoted_to,
        "Work completed"
    );
    Ok(outcome)
}

/// Loads `user_id`'s record and summarizes it.
pub async fn player_status(
    store: &PlayerStore,
    economy: &EconomyConfig,
    user_id: &str,
) -> Result<StatusSummary> {
    let record = store.get_record(user_id).await?;
    Ok(job::describe_status(&record, economy))
}

/// Sets `user_id`'s job index, bypassing promotion thresholds.
///
/// The index is validated before anything is read from the store.
pub async fn assign_job(
    store: &PlayerStore,
    locks: &UserLocks,
    economy: &EconomyConfig,
    user_id: &str,
    target_index: i64,
) -> Result<JobChange> {
    // Validate against an empty record first so a bad index never touches the store.
    job::set_job(&PlayerRecord::default(), target_index, economy)?;

    let _guard = locks.lock(user_id).await;
    let record = store.get_record(user_id).await?;
    let updated = job::set_job(&record, target_index, economy)?;
    store.put_record(user_id, &updated).await?;

    info!(
        user_id,
        old_index = record.job_index,
        new_index = updated.job_index,
        "Job overridden"
    );
    Ok(JobChange {
        old_index: record.job_index,
        new_index: updated.job_index,
        record: updated,
    })
}

/// All players ranked by balance, richest first.
pub async fn ranked_players(store: &PlayerStore) -> Result<Vec<StoredPlayer>> {
    Ok(leaderboard::rank_players(store.all_records().await?))
}

/// Buys `count` lottery tickets for `user_id` and persists the result.
pub async fn play_lottery<R: Rng + ?Sized>(
    store: &PlayerStore,
    locks: &UserLocks,
    economy: &EconomyConfig,
    user_id: &str,
    count: i64,
    rng: &mut R,
) -> Result<LotteryOutcome> {
    let _guard = locks.lock(user_id).await;

    let record = store.get_record(user_id).await?;
    let outcome = lottery::buy_tickets(&record, count, &economy.lottery, rng)?;
    store.put_record(user_id, &outcome.record).await?;

    info!(
        user_id,
        tickets = outcome.tickets,
        net = outcome.net_change(),
        "Lottery played"
    );
    Ok(outcome)
}
