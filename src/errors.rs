//! Unified error type for the bot.
//!
//! Engine failures (`OnCooldown`, `InvalidJobIndex`, `InsufficientFunds`, ...)
//! are recoverable and always turned into a user-facing reply by the command
//! layer. Infrastructure failures from the player store are collapsed into
//! [`Error::PersistenceUnavailable`] before they reach a command.

use poise::serenity_prelude as serenity;
use thiserror::Error;

/// All errors produced by `WorkBuddy`.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or unreadable configuration
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Database error from `SeaORM`
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error in the file-backed player store
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Missing or malformed environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Outbound HTTP error (self-ping)
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Liveness server failed to bind or serve
    #[error("HTTP server error: {message}")]
    Server {
        /// What went wrong
        message: String,
    },

    /// The player tried to work before the cooldown elapsed
    #[error("Still on cooldown for {remaining_secs} more seconds")]
    OnCooldown {
        /// Seconds until the next work action is allowed
        remaining_secs: i64,
    },

    /// Job index outside the configured ladder
    #[error("Invalid job index {index}: must be between 0 and {max}")]
    InvalidJobIndex {
        /// The rejected index
        index: i64,
        /// Highest valid index
        max: usize,
    },

    /// The player store could not be reached; nothing was written
    #[error("Player storage unavailable: {message}")]
    PersistenceUnavailable {
        /// Underlying cause
        message: String,
    },

    /// A stored user ID no longer resolves to a Discord user
    #[error("Could not resolve user {user_id}")]
    UnresolvedUser {
        /// The stored user ID
        user_id: String,
    },

    /// Balance too low for a purchase
    #[error("Insufficient funds: have {current}, need {required}")]
    InsufficientFunds {
        /// Current balance
        current: i64,
        /// Amount needed
        required: i64,
    },

    /// Lottery ticket count outside the allowed range
    #[error("Invalid ticket count {count}: must be between 1 and {max}")]
    InvalidTicketCount {
        /// The rejected count
        count: i64,
        /// Maximum tickets per purchase
        max: u32,
    },

    /// Integer conversion failure
    #[error("Integer conversion error: {0}")]
    TryFromInt(#[from] std::num::TryFromIntError),

    /// String formatting failure
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Serenity/Poise framework error
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<serenity::Error>),
}

impl From<serenity::Error> for Error {
    fn from(value: serenity::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

impl Error {
    /// Wraps a storage backend failure so callers see a single
    /// `PersistenceUnavailable` variant regardless of backend.
    #[must_use]
    pub fn into_persistence(self) -> Self {
        match self {
            Self::PersistenceUnavailable { .. } => self,
            other => Self::PersistenceUnavailable {
                message: other.to_string(),
            },
        }
    }

    /// Whether this error is expected gameplay feedback rather than a fault.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::OnCooldown { .. }
                | Self::InvalidJobIndex { .. }
                | Self::PersistenceUnavailable { .. }
                | Self::InsufficientFunds { .. }
                | Self::InvalidTicketCount { .. }
        )
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
