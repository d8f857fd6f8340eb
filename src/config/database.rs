//! Database connection and table creation using `SeaORM`.
//!
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust
//! structs without hand-written SQL.

use crate::entities::Player;
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use std::path::Path;

/// Connects to `database_url`, creating the parent directory of a file-backed
/// `SQLite` database first.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    let parent = sqlite_file_path(database_url).and_then(|path| Path::new(path).parent());
    if let Some(dir) = parent.filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }

    Database::connect(database_url).await.map_err(Into::into)
}

/// Extracts the file path from a `sqlite://path?options` URL, `None` for
/// in-memory or non-`SQLite` URLs.
fn sqlite_file_path(database_url: &str) -> Option<&str> {
    let rest = database_url.strip_prefix("sqlite://")?;
    let path = rest.split('?').next().unwrap_or(rest);
    (!path.is_empty() && !path.contains(":memory:")).then_some(path)
}

/// Creates the players table if it does not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut player_table = schema.create_table_from_entity(Player);
    player_table.if_not_exists();

    db.execute(builder.build(&player_table)).await?;

    Ok(())
}
