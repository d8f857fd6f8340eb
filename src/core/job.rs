//! Job ladder queries and the administrative job override.

use crate::{
    config::economy::{EconomyConfig, JobLevel},
    core::record::PlayerRecord,
    errors::{Error, Result},
};

/// Progress towards the next job level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// Another level exists
    Next {
        /// Index of the next level
        index: usize,
        /// The next level
        job: JobLevel,
        /// Work actions still needed, never negative
        remaining_works: i64,
    },
    /// Already at the last level
    TopOfLadder,
}

/// Read-only view of a player's standing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSummary {
    /// Currency held
    pub balance: i64,
    /// Completed work actions
    pub work_count: i64,
    /// Current job index
    pub job_index: usize,
    /// Current job
    pub job: JobLevel,
    /// Promotion progress
    pub progress: Progress,
}

/// Projects `record` onto the job ladder without changing it.
#[must_use]
pub fn describe_status(record: &PlayerRecord, economy: &EconomyConfig) -> StatusSummary {
    let job_index = record.job_index.min(economy.jobs.len().saturating_sub(1));
    let progress = match economy.next_job(job_index) {
        Some((index, next)) => Progress::Next {
            index,
            job: next.clone(),
            remaining_works: (next.required_works - record.work_count).max(0),
        },
        None => Progress::TopOfLadder,
    };

    StatusSummary {
        balance: record.balance,
        work_count: record.work_count,
        job_index,
        job: economy.job_at(job_index).clone(),
        progress,
    }
}

/// Overwrites the player's job, bypassing the promotion threshold.
///
/// Restricting who may call this is up to the command layer.
///
/// # Errors
/// Returns `Error::InvalidJobIndex` if `target_index` is outside the ladder;
/// `record` is unchanged in that case.
pub fn set_job(
    record: &PlayerRecord,
    target_index: i64,
    economy: &EconomyConfig,
) -> Result<PlayerRecord> {
    let invalid = || Error::InvalidJobIndex {
        index: target_index,
        max: economy.jobs.len().saturating_sub(1),
    };

    let index = usize::try_from(target_index).map_err(|_| invalid())?;
    if index >= economy.jobs.len() {
        return Err(invalid());
    }

    Ok(PlayerRecord {
        job_index: index,
        ..*record
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{record, test_economy};

    #[test]
    fn test_status_counts_remaining_works() {
        let economy = test_economy();
        let summary = describe_status(&record(120, 3, 0, 0), &economy);

        assert_eq!(summary.balance, 120);
        assert_eq!(summary.job.name, economy.jobs[0].name);
        match summary.progress {
            Progress::Next {
                index,
                remaining_works,
                ..
            } => {
                assert_eq!(index, 1);
                assert_eq!(remaining_works, 2);
            }
            Progress::TopOfLadder => panic!("expected a next level"),
        }
    }

    #[test]
    fn test_status_remaining_never_negative() {
        // Admin demotion can leave work_count above the next threshold.
        let economy = test_economy();
        let summary = describe_status(&record(0, 40, 0, 0), &economy);
        assert!(matches!(
            summary.progress,
            Progress::Next {
                remaining_works: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_status_at_top_of_ladder() {
        let economy = test_economy();
        let top = economy.jobs.len() - 1;
        let summary = describe_status(&record(0, 100, 0, top), &economy);
        assert_eq!(summary.progress, Progress::TopOfLadder);
        assert_eq!(summary.job_index, top);
    }

    #[test]
    fn test_set_job_overwrites_index() {
        let economy = test_economy();
        let player = record(10, 1, 5, 0);

        let updated = set_job(&player, 3, &economy).unwrap();
        assert_eq!(updated.job_index, 3);
        assert_eq!(updated.balance, 10);
        assert_eq!(updated.work_count, 1);

        let demoted = set_job(&updated, 0, &economy).unwrap();
        assert_eq!(demoted.job_index, 0);
    }

    #[test]
    fn test_set_job_rejects_out_of_range() {
        let economy = test_economy();
        let player = record(10, 1, 5, 2);
        let len = i64::try_from(economy.jobs.len()).unwrap();

        for bad in [-1, len, len + 10] {
            let result = set_job(&player, bad, &economy);
            assert!(matches!(result, Err(Error::InvalidJobIndex { index, .. }) if index == bad));
        }
        assert_eq!(player.job_index, 2);
    }
}
