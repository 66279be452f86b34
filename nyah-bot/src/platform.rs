use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use poise::serenity_prelude as serenity;

use nyah_core::{BotStanding, ChatPlatform, Error, MemberInfo, RoleInfo};
use nyah_utils::embed::EmbedSpec;
use nyah_utils::permissions::{
    grants, permissions_from_roles, resolve_user_permissions, top_role_position,
};

const NOT_FOUND: u16 = 404;

/// `ChatPlatform` over the Discord REST API. Nothing is cached between calls.
#[derive(Clone)]
pub struct SerenityPlatform {
    http: Arc<serenity::Http>,
    bot_user_id: serenity::UserId,
}

impl SerenityPlatform {
    pub fn new(http: Arc<serenity::Http>, bot_user_id: serenity::UserId) -> Self {
        Self { http, bot_user_id }
    }

    pub fn from_context(ctx: &serenity::Context) -> Self {
        let bot_user_id = ctx.cache.current_user().id;
        Self::new(Arc::clone(&ctx.http), bot_user_id)
    }

    fn http(&self) -> &serenity::Http {
        &self.http
    }
}

fn role_info(role: &serenity::Role) -> RoleInfo {
    RoleInfo {
        id: role.id,
        name: role.name.clone(),
        position: role.position,
    }
}

fn is_not_found(error: &serenity::Error) -> bool {
    matches!(
        error,
        serenity::Error::Http(http_error)
            if http_error.status_code().map(|code| code.as_u16()) == Some(NOT_FOUND)
    )
}

#[async_trait]
impl ChatPlatform for SerenityPlatform {
    fn bot_user_id(&self) -> serenity::UserId {
        self.bot_user_id
    }

    async fn send_text(&self, channel_id: serenity::ChannelId, text: &str) -> Result<(), Error> {
        channel_id.say(self.http(), text).await?;
        Ok(())
    }

    async fn send_embed(
        &self,
        channel_id: serenity::ChannelId,
        embed: &EmbedSpec,
    ) -> Result<(), Error> {
        channel_id
            .send_message(
                self.http(),
                serenity::CreateMessage::new().embed(embed.to_create_embed()),
            )
            .await?;
        Ok(())
    }

    async fn send_file(&self, channel_id: serenity::ChannelId, path: &Path) -> Result<(), Error> {
        let attachment = serenity::CreateAttachment::path(path).await?;
        channel_id
            .send_message(self.http(), serenity::CreateMessage::new().add_file(attachment))
            .await?;
        Ok(())
    }

    async fn add_reaction(
        &self,
        channel_id: serenity::ChannelId,
        message_id: serenity::MessageId,
        emoji: &str,
    ) -> Result<(), Error> {
        channel_id
            .create_reaction(
                self.http(),
                message_id,
                serenity::ReactionType::Unicode(emoji.to_owned()),
            )
            .await?;
        Ok(())
    }

    async fn guild_roles(&self, guild_id: serenity::GuildId) -> Result<Vec<RoleInfo>, Error> {
        let roles = guild_id.roles(self.http()).await?;
        Ok(roles.values().map(role_info).collect())
    }

    async fn create_role(
        &self,
        guild_id: serenity::GuildId,
        name: &str,
        reason: &str,
    ) -> Result<RoleInfo, Error> {
        let builder = serenity::EditRole::new()
            .name(name)
            .mentionable(true)
            .audit_log_reason(reason);
        let role = guild_id.create_role(self.http(), builder).await?;
        Ok(role_info(&role))
    }

    async fn move_role(
        &self,
        guild_id: serenity::GuildId,
        role_id: serenity::RoleId,
        position: u16,
    ) -> Result<(), Error> {
        guild_id
            .edit_role_position(self.http(), role_id, position)
            .await?;
        Ok(())
    }

    async fn bot_standing(&self, guild_id: serenity::GuildId) -> Result<BotStanding, Error> {
        let guild = guild_id.to_partial_guild(self.http()).await?;
        let member = guild_id.member(self.http(), self.bot_user_id).await?;

        let permissions = if guild.owner_id == self.bot_user_id {
            serenity::Permissions::all()
        } else {
            permissions_from_roles(guild_id, &member.roles, guild.roles.values())
        };

        Ok(BotStanding {
            top_role_position: top_role_position(&member.roles, guild.roles.values()),
            can_manage_roles: grants(permissions, serenity::Permissions::MANAGE_ROLES),
        })
    }

    async fn member(
        &self,
        guild_id: serenity::GuildId,
        user_id: serenity::UserId,
    ) -> Result<Option<MemberInfo>, Error> {
        match guild_id.member(self.http(), user_id).await {
            Ok(member) => Ok(Some(MemberInfo {
                user_id,
                display_name: member.display_name().to_owned(),
                role_ids: member.roles.clone(),
            })),
            Err(source) if is_not_found(&source) => Ok(None),
            Err(source) => Err(source.into()),
        }
    }

    async fn add_member_role(
        &self,
        guild_id: serenity::GuildId,
        user_id: serenity::UserId,
        role_id: serenity::RoleId,
        reason: &str,
    ) -> Result<(), Error> {
        self.http
            .add_member_role(guild_id, user_id, role_id, Some(reason))
            .await?;
        Ok(())
    }

    async fn remove_member_role(
        &self,
        guild_id: serenity::GuildId,
        user_id: serenity::UserId,
        role_id: serenity::RoleId,
        reason: &str,
    ) -> Result<(), Error> {
        self.http
            .remove_member_role(guild_id, user_id, role_id, Some(reason))
            .await?;
        Ok(())
    }

    async fn member_permissions(
        &self,
        guild_id: serenity::GuildId,
        user_id: serenity::UserId,
    ) -> Result<serenity::Permissions, Error> {
        resolve_user_permissions(self.http(), guild_id, user_id).await
    }
}
