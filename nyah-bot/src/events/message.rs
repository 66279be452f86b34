use poise::serenity_prelude as serenity;

use nyah_core::{Data, IncomingMessage};

use crate::platform::SerenityPlatform;

pub async fn handle_message(ctx: &serenity::Context, data: &Data, message: &serenity::Message) {
    let incoming = IncomingMessage::from_serenity(message);
    let platform = SerenityPlatform::from_context(ctx);

    data.registry.dispatch(&platform, &incoming).await;
}
