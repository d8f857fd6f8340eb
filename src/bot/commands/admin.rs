//! Admin Discord commands - `setjob`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, handlers::autocomplete, reply_error},
        core::economy,
        errors::Result,
    };
    use poise::serenity_prelude as serenity;

    /// Sets a user's job directly, ignoring promotion requirements.
    ///
    /// Only the job changes; balance, work count and cooldown are kept.
    #[poise::command(
        slash_command,
        guild_only,
        default_member_permissions = "ADMINISTRATOR",
        required_permissions = "ADMINISTRATOR"
    )]
    pub async fn setjob(
        ctx: Context<'_>,
        #[description = "User whose job to change"] target_user: serenity::User,
        #[description = "Job index (0 is the first job)"]
        #[autocomplete = "autocomplete::autocomplete_job_index"]
        job_index: i64,
    ) -> Result<()> {
        let data = ctx.data();
        let user_id = target_user.id.to_string();

        let change = match economy::assign_job(
            &data.store,
            &data.locks,
            &data.economy,
            &user_id,
            job_index,
        )
        .await
        {
            Ok(change) => change,
            Err(e) => return reply_error(ctx, e).await,
        };

        let old_job = data.economy.job_at(change.old_index);
        let new_job = data.economy.job_at(change.new_index);
        ctx.say(format!(
            "✅ Changed {}'s job from **{}** to **{}**.",
            target_user.display_name(),
            old_job.name,
            new_job.label()
        ))
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
