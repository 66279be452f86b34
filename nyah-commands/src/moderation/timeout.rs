use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing::{error, info};

use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::moderation::embeds::{
    ModerationAction, moderation_notice, reason_or_default, send_target_dm, user_label,
};
use crate::moderation::reply_ephemeral;
use nyah_core::{Context, Error};

pub const META: CommandMeta = CommandMeta {
    name: "timeout",
    desc: "Mettre un membre en timeout pendant un certain nombre de minutes",
    category: "Modération",
    usage: "/timeout <membre> <minutes> [raison]",
};

/// Discord caps communication timeouts at 30 days.
pub const MAX_TIMEOUT_MINUTES: u32 = 43_200;

/// Mettre un membre en timeout pendant un certain nombre de minutes
#[poise::command(
    slash_command,
    guild_only,
    category = "Modération",
    required_permissions = "MODERATE_MEMBERS",
    default_member_permissions = "MODERATE_MEMBERS"
)]
pub async fn timeout(
    ctx: Context<'_>,
    #[description = "Membre à mettre en timeout"] member: serenity::Member,
    #[description = "Durée en minutes (1 à 43200)"]
    #[min = 1]
    #[max = 43200]
    minutes: u32,
    #[description = "Raison du timeout"] reason: Option<String>,
) -> Result<(), Error> {
    let action = ModerationAction::Timeout {
        minutes: minutes.clamp(1, MAX_TIMEOUT_MINUTES),
    };
    let Some(guild_id) = ctx.guild_id() else {
        return reply_ephemeral(ctx, super::GUILD_ONLY_MESSAGE).await;
    };

    let target = &member.user;
    if target.id == ctx.author().id {
        return reply_ephemeral(ctx, action.self_target_message()).await;
    }

    let reason_text = reason_or_default(reason.as_deref());
    let until = timeout_until(SystemTime::now(), action)?;

    send_target_dm(ctx.http(), target, guild_id, action, &reason_text).await;

    let edit = serenity::EditMember::new()
        .disable_communication_until_datetime(until)
        .audit_log_reason(&reason_text);
    if let Err(source) = guild_id.edit_member(ctx.http(), target.id, edit).await {
        error!(?source, "timeout request failed");
        return reply_ephemeral(ctx, action.failure_message()).await;
    }
    info!(
        guild_id = guild_id.get(),
        target_id = target.id.get(),
        moderator_id = ctx.author().id.get(),
        minutes,
        "member timed out"
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

fn timeout_until(now: SystemTime, action: ModerationAction) -> Result<serenity::Timestamp, Error> {
    let minutes = match action {
        ModerationAction::Timeout { minutes } => minutes,
        ModerationAction::Ban | ModerationAction::Kick => 0,
    };
    let until = now
        .checked_add(Duration::from_secs(u64::from(minutes) * 60))
        .unwrap_or(now);
    let until_unix = until
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_secs()) as i64;

    Ok(serenity::Timestamp::from_unix_timestamp(until_unix)?)
}
