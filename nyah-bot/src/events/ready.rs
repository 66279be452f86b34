use poise::serenity_prelude as serenity;
use tracing::info;

use nyah_core::{Data, Error};

/// Fires on every (re)connect, so a failed command sync gets another try next session.
pub async fn handle_ready(
    ctx: &serenity::Context,
    ready: &serenity::Ready,
    framework: poise::FrameworkContext<'_, Data, Error>,
) {
    info!(
        user = %ready.user.tag(),
        user_id = ready.user.id.get(),
        guilds = ready.guilds.len(),
        "connected to discord"
    );

    nyah_commands::moderation::sync_commands(ctx, &framework.options().commands).await;
}
