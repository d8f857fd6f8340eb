//! File-backed player store.
//!
//! Records are kept in memory in first-seen order and, when a path is given,
//! the whole table is rewritten to a JSON file after every change. Without a
//! path the store is purely in-memory and starts empty on every launch.

use crate::{
    core::record::{PlayerRecord, StoredPlayer},
    errors::Result,
};
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};
use tokio::sync::RwLock;

/// On-disk layout of the player file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PlayerFile {
    players: Vec<StoredPlayer>,
}

/// Records in insertion order plus a user ID index into them.
#[derive(Debug, Default)]
struct Players {
    entries: Vec<StoredPlayer>,
    index: HashMap<String, usize>,
}

impl Players {
    fn from_entries(entries: Vec<StoredPlayer>) -> Self {
        let mut players = Self::default();
        for entry in entries {
            // Later duplicates win, but keep the first position.
            players.upsert(&entry.user_id, entry.record);
        }
        players
    }

    fn get(&self, user_id: &str) -> Option<PlayerRecord> {
        self.index.get(user_id).map(|&i| self.entries[i].record)
    }

    /// Inserts or replaces, returning the previous record if there was one.
    fn upsert(&mut self, user_id: &str, record: PlayerRecord) -> Option<PlayerRecord> {
        if let Some(&i) = self.index.get(user_id) {
            Some(std::mem::replace(&mut self.entries[i].record, record))
        } else {
            self.index.insert(user_id.to_string(), self.entries.len());
            self.entries.push(StoredPlayer::new(user_id, record));
            None
        }
    }

    /// Undoes an `upsert` given what it returned.
    fn revert(&mut self, user_id: &str, previous: Option<PlayerRecord>) {
        match previous {
            Some(record) => {
                self.upsert(user_id, record);
            }
            None => {
                if self.index.remove(user_id).is_some() {
                    self.entries.pop();
                }
            }
        }
    }
}

/// JSON-file (or memory-only) player store.
#[derive(Debug)]
pub struct FileStore {
    path: Option<PathBuf>,
    players: RwLock<Players>,
}

impl FileStore {
    /// A store that never touches the filesystem.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            path: None,
            players: RwLock::new(Players::default()),
        }
    }

    /// Opens the store at `path`, loading existing records if the file exists.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let players = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => {
                let file: PlayerFile = serde_json::from_str(&contents)?;
                tracing::info!(
                    "Loaded {} player records from {}",
                    file.players.len(),
                    path.display()
                );
                Players::from_entries(file.players)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No player file at {}, starting empty", path.display());
                Players::default()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path: Some(path),
            players: RwLock::new(players),
        })
    }

    /// Returns the record for `user_id`, if one has been stored.
    pub async fn get(&self, user_id: &str) -> Option<PlayerRecord> {
        self.players.read().await.get(user_id)
    }

    /// Stores `record` and flushes the table to disk.
    ///
    /// If the flush fails the in-memory table is restored, so memory never
    /// holds a write the file does not.
    pub async fn put(&self, user_id: &str, record: PlayerRecord) -> Result<()> {
        let mut players = self.players.write().await;
        let previous = players.upsert(user_id, record);

        if let Some(path) = &self.path {
            if let Err(e) = write_file(path, &players.entries).await {
                players.revert(user_id, previous);
                return Err(e);
            }
        }
        Ok(())
    }

    /// All stored records in first-seen order.
    pub async fn all(&self) -> Vec<StoredPlayer> {
        self.players.read().await.entries.clone()
    }
}

/// Writes to a sibling temp file and renames it over `path`.
async fn write_file(path: &Path, entries: &[StoredPlayer]) -> Result<()> {
    #[derive(Serialize)]
    struct PlayerFileRef<'a> {
        players: &'a [StoredPlayer],
    }

    let contents = serde_json::to_vec_pretty(&PlayerFileRef { players: entries })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, contents).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{record, temp_path};

    #[tokio::test]
    async fn test_in_memory_get_put() -> Result<()> {
        let store = FileStore::in_memory();
        assert!(store.get("1").await.is_none());

        store.put("1", record(50, 2, 100, 0)).await?;
        assert_eq!(store.get("1").await, Some(record(50, 2, 100, 0)));

        store.put("1", record(70, 3, 200, 1)).await?;
        assert_eq!(store.get("1").await, Some(record(70, 3, 200, 1)));
        assert_eq!(store.all().await.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_all_keeps_first_seen_order() -> Result<()> {
        let store = FileStore::in_memory();
        store.put("b", record(1, 0, 0, 0)).await?;
        store.put("a", record(2, 0, 0, 0)).await?;
        store.put("b", record(3, 0, 0, 0)).await?;

        let ids: Vec<String> = store.all().await.into_iter().map(|p| p.user_id).collect();
        assert_eq!(ids, vec!["b".to_string(), "a".to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn test_file_round_trip_across_reopen() -> Result<()> {
        let path = temp_path("players.json");

        let store = FileStore::open(&path).await?;
        store.put("42", record(120, 4, 999, 1)).await?;
        store.put("7", record(5, 1, 10, 0)).await?;
        drop(store);

        let reopened = FileStore::open(&path).await?;
        assert_eq!(reopened.get("42").await, Some(record(120, 4, 999, 1)));
        let ids: Vec<String> = reopened.all().await.into_iter().map(|p| p.user_id).collect();
        assert_eq!(ids, vec!["42".to_string(), "7".to_string()]);

        let _ = std::fs::remove_file(&path);
        Ok(())
    }

    #[tokio::test]
    async fn test_open_rejects_corrupt_file() {
        let path = temp_path("corrupt.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(FileStore::open(&path).await.is_err());
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_failed_flush_leaves_memory_untouched() {
        // A directory where the file should be makes the rename fail.
        let path = temp_path("blocked.json");
        std::fs::create_dir_all(&path).unwrap();
        let store = FileStore {
            path: Some(path.clone()),
            players: RwLock::new(Players::default()),
        };

        assert!(store.put("1", record(10, 1, 1, 0)).await.is_err());
        assert!(store.get("1").await.is_none());
        assert!(store.all().await.is_empty());

        let _ = std::fs::remove_dir_all(&path);
        let _ = std::fs::remove_file(path.with_extension("json.tmp"));
    }
}
