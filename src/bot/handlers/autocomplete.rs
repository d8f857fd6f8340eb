//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggests valid job indices by name so admins don't need to memorize the
//! ladder when using `/setjob`.

use crate::{bot::BotData, config::economy::EconomyConfig, errors::Error};
use poise::serenity_prelude as serenity;

/// Discord's cap on autocomplete suggestions
const MAX_CHOICES: usize = 25;

/// Jobs whose name or index matches `partial`, as `(index, label)` pairs.
#[must_use]
pub fn matching_jobs(economy: &EconomyConfig, partial: &str) -> Vec<(usize, String)> {
    let partial_lower = partial.trim().to_lowercase();

    economy
        .jobs
        .iter()
        .enumerate()
        .filter(|(index, job)| {
            partial_lower.is_empty()
                || job.name.to_lowercase().contains(&partial_lower)
                || index.to_string().starts_with(&partial_lower)
        })
        .map(|(index, job)| (index, format!("{index}: {}", job.label())))
        .take(MAX_CHOICES)
        .collect()
}

/// Provides autocomplete suggestions for the `job_index` parameter.
pub async fn autocomplete_job_index(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<serenity::AutocompleteChoice> {
    matching_jobs(&ctx.data().economy, partial)
        .into_iter()
        .map(|(index, label)| serenity::AutocompleteChoice::new(label, index))
        .collect()
}
