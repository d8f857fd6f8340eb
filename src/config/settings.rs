//! Runtime settings read from environment variables.
//!
//! Everything deployment-specific lives here: which player store backend to
//! use, where its data lives, the liveness port and the self-ping target.
//! The Discord token is read separately, directly before use.

use crate::errors::{Error, Result};
use std::time::Duration;

const DEFAULT_DATABASE_URL: &str = "sqlite://data/work_buddy.sqlite?mode=rwc";
const DEFAULT_PLAYER_DATA_FILE: &str = "data/players.json";
const DEFAULT_ECONOMY_CONFIG: &str = "economy.toml";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_SELF_PING_INTERVAL_SECS: u64 = 600;

/// Which backend persists player records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// `SeaORM` database at `DATABASE_URL`
    Database,
    /// JSON file at `PLAYER_DATA_FILE`
    File,
    /// Process memory only, lost on restart
    Memory,
}

impl StoreBackend {
    /// Parses the `PLAYER_STORE` value (case-insensitive).
    ///
    /// # Errors
    /// Returns `Error::Config` for unknown backend names.
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "database" | "db" | "sqlite" => Ok(Self::Database),
            "file" | "json" => Ok(Self::File),
            "memory" | "mem" => Ok(Self::Memory),
            other => Err(Error::Config {
                message: format!(
                    "Unknown PLAYER_STORE '{other}', expected database, file or memory"
                ),
            }),
        }
    }
}

/// Process-wide settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Player store backend
    pub store_backend: StoreBackend,
    /// Database URL for [`StoreBackend::Database`]
    pub database_url: String,
    /// File path for [`StoreBackend::File`]
    pub player_data_file: String,
    /// Path of the economy TOML file
    pub economy_config_path: String,
    /// Host the liveness server binds to
    pub health_host: String,
    /// Port the liveness server binds to
    pub port: u16,
    /// URL requested periodically to keep the host awake
    pub self_ping_url: String,
    /// Interval between self-pings, `None` disables them
    pub self_ping_interval: Option<Duration>,
    /// Register commands in this guild only (faster updates during development)
    pub dev_guild_id: Option<u64>,
}

impl Settings {
    /// Reads settings from the process environment.
    ///
    /// # Errors
    /// Returns `Error::Config` if a variable is present but malformed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup, used by `from_env` and tests.
    ///
    /// # Errors
    /// Returns `Error::Config` if a value is present but malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store_backend = lookup("PLAYER_STORE")
            .map_or(Ok(StoreBackend::Database), |v| StoreBackend::parse(&v))?;

        let port = match lookup("PORT") {
            Some(v) => v.trim().parse::<u16>().map_err(|e| Error::Config {
                message: format!("Invalid PORT '{v}': {e}"),
            })?,
            None => DEFAULT_PORT,
        };

        let interval_secs = match lookup("SELF_PING_INTERVAL_SECS") {
            Some(v) => v.trim().parse::<u64>().map_err(|e| Error::Config {
                message: format!("Invalid SELF_PING_INTERVAL_SECS '{v}': {e}"),
            })?,
            None => DEFAULT_SELF_PING_INTERVAL_SECS,
        };

        let dev_guild_id = match lookup("DEV_GUILD_ID") {
            Some(v) if !v.trim().is_empty() => {
                Some(v.trim().parse::<u64>().map_err(|e| Error::Config {
                    message: format!("Invalid DEV_GUILD_ID '{v}': {e}"),
                })?)
            }
            _ => None,
        };

        let self_ping_url = lookup("SELF_PING_URL")
            .or_else(|| lookup("K_SERVICE_URL"))
            .unwrap_or_else(|| format!("http://127.0.0.1:{port}"));

        Ok(Self {
            store_backend,
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            player_data_file: lookup("PLAYER_DATA_FILE")
                .unwrap_or_else(|| DEFAULT_PLAYER_DATA_FILE.to_string()),
            economy_config_path: lookup("ECONOMY_CONFIG")
                .unwrap_or_else(|| DEFAULT_ECONOMY_CONFIG.to_string()),
            health_host: lookup("HEALTH_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            self_ping_url,
            self_ping_interval: (interval_secs > 0).then(|| Duration::from_secs(interval_secs)),
            dev_guild_id,
        })
    }
}
