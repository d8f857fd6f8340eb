//! Leaderboard ranking.
//!
//! Players are ranked by balance, highest first. Ties keep the order the store
//! returned them in (first-seen order), so the ranking of a fixed data set is
//! fully deterministic.

use crate::{core::record::StoredPlayer, errors::Result};
use std::future::Future;

/// Number of entries shown by the leaderboard command.
pub const LEADERBOARD_SIZE: usize = 10;

/// One displayed leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry<T> {
    /// 1-based position among the displayed rows
    pub rank: usize,
    /// The ranked player
    pub player: StoredPlayer,
    /// Whatever the resolver produced for this player (usually a display name)
    pub resolved: T,
}

/// Sorts players by balance descending; equal balances keep their input order.
#[must_use]
pub fn rank_players(mut players: Vec<StoredPlayer>) -> Vec<StoredPlayer> {
    // `sort_by` is stable.
    players.sort_by(|a, b| b.record.balance.cmp(&a.record.balance));
    players
}

/// Walks `ranked` in order, resolving each user until `limit` rows are collected.
///
/// Users the resolver fails on (typically `Error::UnresolvedUser`, e.g. an
/// account that was deleted) are skipped and do not consume a rank.
pub async fn collect_leaderboard<T, F, Fut>(
    ranked: Vec<StoredPlayer>,
    limit: usize,
    mut resolve: F,
) -> Vec<LeaderboardEntry<T>>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut entries = Vec::with_capacity(limit.min(ranked.len()));

    for player in ranked {
        if entries.len() >= limit {
            break;
        }
        match resolve(player.user_id.clone()).await {
            Ok(resolved) => entries.push(LeaderboardEntry {
                rank: entries.len() + 1,
                player,
                resolved,
            }),
            Err(e) => tracing::debug!("Skipping leaderboard entry {}: {}", player.user_id, e),
        }
    }

    entries
}
