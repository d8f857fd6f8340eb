//! Player record - the per-user state every economy command reads and writes.

use serde::{Deserialize, Serialize};

/// Economy state of a single player.
///
/// A record springs into existence with all fields at their defaults the first
/// time a user is looked up, and is never deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Currency held, never negative
    pub balance: i64,
    /// Completed work actions, only increases
    pub work_count: i64,
    /// Epoch seconds of the last successful work action, 0 if never
    pub last_work_time: i64,
    /// Index into the job ladder
    pub job_index: usize,
}

/// A record paired with the user it belongs to, in store iteration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPlayer {
    /// Discord user ID
    pub user_id: String,
    /// The player's state
    #[serde(flatten)]
    pub record: PlayerRecord,
}

impl StoredPlayer {
    /// Pairs `record` with `user_id`.
    #[must_use]
    pub fn new(user_id: impl Into<String>, record: PlayerRecord) -> Self {
        Self {
            user_id: user_id.into(),
            record,
        }
    }
}
