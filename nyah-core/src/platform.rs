use std::path::Path;

use async_trait::async_trait;
use poise::serenity_prelude as serenity;

use nyah_utils::embed::EmbedSpec;

use crate::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleInfo {
    pub id: serenity::RoleId,
    pub name: String,
    pub position: u16,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberInfo {
    pub user_id: serenity::UserId,
    pub display_name: String,
    pub role_ids: Vec<serenity::RoleId>,
}

impl MemberInfo {
    pub fn has_role(&self, role_id: serenity::RoleId) -> bool {
        self.role_ids.contains(&role_id)
    }
}

/// What the bot itself may do in a guild.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BotStanding {
    pub top_role_position: u16,
    pub can_manage_roles: bool,
}

impl BotStanding {
    /// A role is manageable only when it sits strictly below the bot's highest role.
    pub fn can_manage(&self, role: &RoleInfo) -> bool {
        role.position < self.top_role_position
    }
}

/// Outbound chat-platform calls the message features rely on.
///
/// Role lookups are live: implementations must not cache guild roles across calls.
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    fn bot_user_id(&self) -> serenity::UserId;

    async fn send_text(&self, channel_id: serenity::ChannelId, text: &str) -> Result<(), Error>;

    async fn send_embed(
        &self,
        channel_id: serenity::ChannelId,
        embed: &EmbedSpec,
    ) -> Result<(), Error>;

    async fn send_file(&self, channel_id: serenity::ChannelId, path: &Path) -> Result<(), Error>;

    async fn add_reaction(
        &self,
        channel_id: serenity::ChannelId,
        message_id: serenity::MessageId,
        emoji: &str,
    ) -> Result<(), Error>;

    async fn guild_roles(&self, guild_id: serenity::GuildId) -> Result<Vec<RoleInfo>, Error>;

    async fn create_role(
        &self,
        guild_id: serenity::GuildId,
        name: &str,
        reason: &str,
    ) -> Result<RoleInfo, Error>;

    async fn move_role(
        &self,
        guild_id: serenity::GuildId,
        role_id: serenity::RoleId,
        position: u16,
    ) -> Result<(), Error>;

    async fn bot_standing(&self, guild_id: serenity::GuildId) -> Result<BotStanding, Error>;

    /// `Ok(None)` when the user is not a member of the guild.
    async fn member(
        &self,
        guild_id: serenity::GuildId,
        user_id: serenity::UserId,
    ) -> Result<Option<MemberInfo>, Error>;

    async fn add_member_role(
        &self,
        guild_id: serenity::GuildId,
        user_id: serenity::UserId,
        role_id: serenity::RoleId,
        reason: &str,
    ) -> Result<(), Error>;

    async fn remove_member_role(
        &self,
        guild_id: serenity::GuildId,
        user_id: serenity::UserId,
        role_id: serenity::RoleId,
        reason: &str,
    ) -> Result<(), Error>;

    async fn member_permissions(
        &self,
        guild_id: serenity::GuildId,
        user_id: serenity::UserId,
    ) -> Result<serenity::Permissions, Error>;
}
