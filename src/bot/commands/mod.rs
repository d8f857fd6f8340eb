//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Administrative commands
pub mod admin;

/// Work, balance and leaderboard
pub mod economy;

/// General utility commands
pub mod general;

/// Lottery commands
pub mod lottery;

use crate::{bot::BotData, errors::Error};

// Export commands
pub use admin::*;
pub use economy::*;
pub use general::*;
pub use lottery::*;

/// Every command the bot registers, in the order shown by Discord clients.
#[must_use]
pub fn all() -> Vec<poise::Command<BotData, Error>> {
    vec![
        work(),
        balance(),
        leaderboard(),
        lottery(),
        setjob(),
        ping(),
        help(),
    ]
}
