use tracing::{error, info};

use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::moderation::embeds::{
    ModerationAction, moderation_notice, reason_or_default, send_target_dm, user_label,
};
use crate::moderation::reply_ephemeral;
use nyah_core::{Context, Error};

pub const META: CommandMeta = CommandMeta {
    name: "kick",
    desc: "Expulser un membre avec une raison",
    category: "Modération",
    usage: "/kick <membre> [raison]",
};

/// Expulser un membre avec une raison
#[poise::command(
    slash_command,
    guild_only,
    category = "Modération",
    required_permissions = "KICK_MEMBERS",
    default_member_permissions = "KICK_MEMBERS"
)]
pub async fn kick(
    ctx: Context<'_>,
    #[description = "Membre à expulser"] member: serenity::Member,
    #[description = "Raison de l'expulsion"] reason: Option<String>,
) -> Result<(), Error> {
    let action = ModerationAction::Kick;
    let Some(guild_id) = ctx.guild_id() else {
        return reply_ephemeral(ctx, super::GUILD_ONLY_MESSAGE).await;
    };

    let target = &member.user;
    if target.id == ctx.author().id {
        return reply_ephemeral(ctx, action.self_target_message()).await;
    }

    let reason_text = reason_or_default(reason.as_deref());
    send_target_dm(ctx.http(), target, guild_id, action, &reason_text).await;

    if let Err(source) = guild_id
        .kick_with_reason(ctx.http(), target.id, &reason_text)
        .await
    {
        error!(?source, "kick request failed");
        return reply_ephemeral(ctx, action.failure_message()).await;
    }
    info!(
        guild_id = guild_id.get(),
        target_id = target.id.get(),
        moderator_id = ctx.author().id.get(),
        "member kicked"
    );

    let embed = moderation_notice(
        action,
        target.id,
        &user_label(&target.tag(), target.id),
        &user_label(&ctx.author().tag(), ctx.author().id),
        &reason_text,
    );
    ctx.send(poise::CreateReply::default().embed(embed.to_create_embed()))
        .await?;

    Ok(())
}
