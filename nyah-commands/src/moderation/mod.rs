pub mod ban;
pub(crate) mod embeds;
pub mod kick;
pub mod timeout;

use poise::serenity_prelude as serenity;
use tracing::{error, info};

use nyah_core::{Context, Data, Error};

pub use embeds::{ModerationAction, moderation_notice, reason_or_default, target_dm_text};

pub(crate) const GUILD_ONLY_MESSAGE: &str =
    "Cette commande ne peut être utilisée que sur un serveur.";

pub(crate) async fn reply_ephemeral(ctx: Context<'_>, text: &str) -> Result<(), Error> {
    ctx.send(
        poise::CreateReply::default()
            .content(text)
            .ephemeral(true),
    )
    .await?;
    Ok(())
}

/// Push the slash command set to Discord. Safe to call again after a failure.
pub async fn sync_commands(ctx: &serenity::Context, commands: &[poise::Command<Data, Error>]) {
    match poise::builtins::register_globally(ctx, commands).await {
        Ok(()) => info!(count = commands.len(), "slash commands synced"),
        Err(source) => error!(?source, "slash command sync failed"),
    }
}
