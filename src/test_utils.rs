//! Shared test utilities for `WorkBuddy`.
//!
//! Helpers for setting up test databases and building economy fixtures with
//! small, predictable numbers.

use crate::{
    config::economy::{EconomyConfig, JobLevel, LotteryConfig, Variation},
    core::record::PlayerRecord,
    errors::Result,
};
use sea_orm::DatabaseConnection;
use std::{
    path::PathBuf,
    sync::atomic::{AtomicUsize, Ordering},
};

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Builds a record from its four fields.
#[must_use]
pub const fn record(
    balance: i64,
    work_count: i64,
    last_work_time: i64,
    job_index: usize,
) -> PlayerRecord {
    PlayerRecord {
        balance,
        work_count,
        last_work_time,
        job_index,
    }
}

/// A four-level economy with a one hour cooldown.
///
/// | level | pay | required works |
/// |---|---|---|
/// | 0 | 10-20 | 0 |
/// | 1 | 30-50 | 5 |
/// | 2 | 60-90 | 10 |
/// | 3 | 150-200 | 20 |
///
/// Variations: `normal` (x1), `late` (x0.5), `bonus` (x1 plus 50% bonus).
#[must_use]
pub fn test_economy() -> EconomyConfig {
    let job = |name: &str, pay: [i64; 2], required_works: i64| JobLevel {
        name: name.to_string(),
        emoji: "🔧".to_string(),
        pay,
        required_works,
    };
    let variation = |key: &str, multiplier: f64, bonus_multiplier: Option<f64>| Variation {
        key: key.to_string(),
        multiplier,
        bonus_multiplier,
        message: "{job_name} earned {earnings}{emoji}".to_string(),
    };

    EconomyConfig {
        currency_emoji: "💎".to_string(),
        currency_name: "Gem".to_string(),
        cooldown_seconds: 3600,
        jobs: vec![
            job("Apprentice", [10, 20], 0),
            job("Clerk", [30, 50], 5),
            job("Manager", [60, 90], 10),
            job("Director", [150, 200], 20),
        ],
        variations: vec![
            variation("normal", 1.0, None),
            variation("late", 0.5, None),
            variation("bonus", 1.0, Some(0.5)),
        ],
        lottery: LotteryConfig::default(),
    }
}

/// A unique path under the system temp directory for file-store tests.
#[must_use]
pub fn temp_path(name: &str) -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("work-buddy-{}-{n}-{name}", std::process::id()))
}
