//! Player entity - one row per Discord user taking part in the economy.
//!
//! The auto-increment `id` preserves first-seen order, which the leaderboard
//! uses to break balance ties.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Player database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "players")]
pub struct Model {
    /// Row identifier, increases with insertion order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Discord user ID
    #[sea_orm(unique)]
    pub user_id: String,
    /// Currency held
    pub balance: i64,
    /// Completed work actions
    pub work_count: i64,
    /// Epoch seconds of the last successful work action, 0 if never
    pub last_work_time: i64,
    /// Index into the job ladder
    pub job_index: i32,
    /// When this row was last written
    pub updated_at: DateTimeUtc,
}

/// `Player` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
