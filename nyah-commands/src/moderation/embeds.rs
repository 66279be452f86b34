use poise::serenity_prelude as serenity;
use tracing::debug;

use nyah_utils::embed::{COLOR_BLURPLE, COLOR_ORANGE, COLOR_RED, EmbedSpec};

pub const DEFAULT_REASON: &str = "Aucune raison spécifiée.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModerationAction {
    Ban,
    Kick,
    Timeout { minutes: u32 },
}

impl ModerationAction {
    fn title(self) -> &'static str {
        match self {
            Self::Ban => "🚫 Bannissement",
            Self::Kick => "🚪 Expulsion",
            Self::Timeout { .. } => "⏱ Timeout",
        }
    }

    fn color(self) -> u32 {
        match self {
            Self::Ban => COLOR_RED,
            Self::Kick => COLOR_ORANGE,
            Self::Timeout { .. } => COLOR_BLURPLE,
        }
    }

    pub fn self_target_message(self) -> &'static str {
        match self {
            Self::Ban => "Tu ne peux pas te bannir toi-même.",
            Self::Kick => "Tu ne peux pas te kick toi-même.",
            Self::Timeout { .. } => "Tu ne peux pas te mettre en timeout toi-même.",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            Self::Ban => "Impossible de bannir ce membre. Vérifie la hiérarchie des rôles et mes permissions.",
            Self::Kick => "Impossible d'expulser ce membre. Vérifie la hiérarchie des rôles et mes permissions.",
            Self::Timeout { .. } => {
                "Impossible de mettre ce membre en timeout. Vérifie la hiérarchie des rôles et mes permissions."
            }
        }
    }
}

pub fn reason_or_default(reason: Option<&str>) -> String {
    reason
        .map(str::trim)
        .filter(|reason| !reason.is_empty())
        .unwrap_or(DEFAULT_REASON)
        .to_owned()
}

pub fn user_label(name: &str, user_id: serenity::UserId) -> String {
    format!("{name} (`{}`)", user_id.get())
}

fn minutes_label(minutes: u32) -> String {
    format!("{minutes} minute(s)")
}

/// Channel confirmation posted after a successful action.
pub fn moderation_notice(
    action: ModerationAction,
    target_id: serenity::UserId,
    target_label: &str,
    moderator_label: &str,
    reason: &str,
) -> EmbedSpec {
    let description = match action {
        ModerationAction::Ban => format!("<@{}> a été banni.", target_id.get()),
        ModerationAction::Kick => format!("<@{}> a été expulsé.", target_id.get()),
        ModerationAction::Timeout { minutes } => format!(
            "<@{}> est en timeout pour {}.",
            target_id.get(),
            minutes_label(minutes)
        ),
    };

    let mut embed = EmbedSpec::new()
        .title(action.title())
        .description(description)
        .color(action.color())
        .field("Membre", target_label, false)
        .field("Modérateur", moderator_label, false);
    if let ModerationAction::Timeout { minutes } = action {
        embed = embed.field("Durée", minutes_label(minutes), false);
    }
    embed.field("Raison", reason, false)
}

/// Private notice sent to the target before the action lands.
pub fn target_dm_text(action: ModerationAction, guild_name: &str, reason: &str) -> String {
    match action {
        ModerationAction::Ban => {
            format!("Tu as été banni de **{guild_name}**.\nRaison: {reason}")
        }
        ModerationAction::Kick => {
            format!("Tu as été expulsé de **{guild_name}**.\nRaison: {reason}")
        }
        ModerationAction::Timeout { minutes } => format!(
            "Tu as été mis en timeout sur **{guild_name}** pour {}.\nRaison: {reason}",
            minutes_label(minutes)
        ),
    }
}

/// Best effort: closed DMs must not block the action.
pub async fn send_target_dm(
    http: &serenity::Http,
    target: &serenity::User,
    guild_id: serenity::GuildId,
    action: ModerationAction,
    reason: &str,
) {
    let guild_name = match guild_id.to_partial_guild(http).await {
        Ok(guild) => guild.name,
        Err(_) => format!("Serveur {}", guild_id.get()),
    };

    let result = async {
        let channel = target.create_dm_channel(http).await?;
        channel
            .send_message(
                http,
                serenity::CreateMessage::new().content(target_dm_text(action, &guild_name, reason)),
            )
            .await?;
        Ok::<(), serenity::Error>(())
    }
    .await;

    if let Err(source) = result {
        debug!(?source, user_id = target.id.get(), "could not DM moderation target");
    }
}
