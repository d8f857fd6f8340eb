//! Core economy logic - framework-agnostic engine, persistence and actions.
//!
//! Nothing in here knows about Discord. The bot layer calls into [`economy`]
//! and formats whatever comes back.

/// Read-modify-write cycles behind each command
pub mod economy;
/// JSON-file and in-memory player storage
pub mod file_store;
/// Job ladder status and administrative override
pub mod job;
/// Balance ranking
pub mod leaderboard;
/// Per-user locks around record updates
pub mod locks;
/// Ticket purchases and prize draws
pub mod lottery;
/// The per-player record
pub mod record;
/// Cooldown, earnings and promotion
pub mod reward;
/// Player store facade over the database and file backends
pub mod store;

pub use record::{PlayerRecord, StoredPlayer};
pub use store::PlayerStore;
