//! Player persistence - one record per user, database or file backed.
//!
//! Every public method on [`PlayerStore`] reports backend failures as
//! `Error::PersistenceUnavailable`, so commands can apologise without caring
//! which backend is configured. Unknown users read as the default record.

use crate::{
    config::{
        database,
        settings::{Settings, StoreBackend},
    },
    core::{
        file_store::FileStore,
        record::{PlayerRecord, StoredPlayer},
    },
    entities::{Player, player},
    errors::{Error, Result},
};
use sea_orm::{IntoActiveModel, QueryOrder, Set, prelude::*};

/// The configured player store.
#[derive(Debug)]
pub enum PlayerStore {
    /// `SeaORM` database
    Database(DatabaseConnection),
    /// JSON file or process memory
    File(FileStore),
}

impl PlayerStore {
    /// Opens the backend selected by `settings`, creating tables or files as needed.
    ///
    /// # Errors
    /// Returns an error if the backend cannot be opened.
    pub async fn connect(settings: &Settings) -> Result<Self> {
        match settings.store_backend {
            StoreBackend::Database => {
                let db = database::create_connection(&settings.database_url).await?;
                database::create_tables(&db).await?;
                Ok(Self::Database(db))
            }
            StoreBackend::File => Ok(Self::File(
                FileStore::open(&settings.player_data_file).await?,
            )),
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory player store; data is lost on restart");
                Ok(Self::File(FileStore::in_memory()))
            }
        }
    }

    /// Short backend name for logs.
    #[must_use]
    pub const fn backend_name(&self) -> &'static str {
        match self {
            Self::Database(_) => "database",
            Self::File(_) => "file",
        }
    }

    /// Returns the record for `user_id`, or the default record if none exists.
    ///
    /// # Errors
    /// Returns `Error::PersistenceUnavailable` if the backend fails.
    pub async fn get_record(&self, user_id: &str) -> Result<PlayerRecord> {
        let found = match self {
            Self::Database(db) => find_player(db, user_id)
                .await
                .map_err(Error::into_persistence)?,
            Self::File(store) => store.get(user_id).await,
        };
        Ok(found.unwrap_or_default())
    }

    /// Creates or replaces the record for `user_id`.
    ///
    /// # Errors
    /// Returns `Error::PersistenceUnavailable` if the backend fails; the
    /// stored record is then unchanged.
    pub async fn put_record(&self, user_id: &str, record: &PlayerRecord) -> Result<()> {
        match self {
            Self::Database(db) => upsert_player(db, user_id, record).await,
            Self::File(store) => store.put(user_id, *record).await,
        }
        .map_err(|e| {
            tracing::error!("Failed to save player {user_id}: {e}");
            e.into_persistence()
        })
    }

    /// All stored players in first-seen order.
    ///
    /// # Errors
    /// Returns `Error::PersistenceUnavailable` if the backend fails.
    pub async fn all_records(&self) -> Result<Vec<StoredPlayer>> {
        match self {
            Self::Database(db) => list_players(db).await.map_err(Error::into_persistence),
            Self::File(store) => Ok(store.all().await),
        }
    }
}

fn model_to_record(model: &player::Model) -> Result<PlayerRecord> {
    Ok(PlayerRecord {
        balance: model.balance,
        work_count: model.work_count,
        last_work_time: model.last_work_time,
        job_index: usize::try_from(model.job_index)?,
    })
}

/// Looks up a player row by Discord user ID.
pub async fn find_player(db: &DatabaseConnection, user_id: &str) -> Result<Option<PlayerRecord>> {
    Player::find()
        .filter(player::Column::UserId.eq(user_id))
        .one(db)
        .await?
        .as_ref()
        .map(model_to_record)
        .transpose()
}

/// Inserts a new player row or updates the existing one.
pub async fn upsert_player(
    db: &DatabaseConnection,
    user_id: &str,
    record: &PlayerRecord,
) -> Result<()> {
    let job_index = i32::try_from(record.job_index)?;
    let now = chrono::Utc::now();

    let existing = Player::find()
        .filter(player::Column::UserId.eq(user_id))
        .one(db)
        .await?;

    if let Some(model) = existing {
        let mut active = model.into_active_model();
        active.balance = Set(record.balance);
        active.work_count = Set(record.work_count);
        active.last_work_time = Set(record.last_work_time);
        active.job_index = Set(job_index);
        active.updated_at = Set(now);
        active.update(db).await?;
    } else {
        let active = player::ActiveModel {
            user_id: Set(user_id.to_string()),
            balance: Set(record.balance),
            work_count: Set(record.work_count),
            last_work_time: Set(record.last_work_time),
            job_index: Set(job_index),
            updated_at: Set(now),
            ..Default::default()
        };
        active.insert(db).await?;
    }

    Ok(())
}

/// Lists all players ordered by row ID, i.e. first-seen order.
pub async fn list_players(db: &DatabaseConnection) -> Result<Vec<StoredPlayer>> {
    Player::find()
        .order_by_asc(player::Column::Id)
        .all(db)
        .await?
        .iter()
        .map(|model| Ok(StoredPlayer::new(model.user_id.clone(), model_to_record(model)?)))
        .collect()
}
