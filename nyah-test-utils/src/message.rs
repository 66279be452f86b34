use poise::serenity_prelude as serenity;

use nyah_core::IncomingMessage;

pub const BOT_ID: u64 = 4242;
pub const AUTHOR_ID: u64 = 500;
pub const GUILD_ID: u64 = 1;
pub const CHANNEL_ID: u64 = 10;
pub const MESSAGE_ID: u64 = 100;

/// Builds an `IncomingMessage` from a guild member by default.
#[derive(Clone, Debug)]
pub struct MessageBuilder {
    message: IncomingMessage,
}

impl MessageBuilder {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            message: IncomingMessage {
                id: serenity::MessageId::new(MESSAGE_ID),
                channel_id: serenity::ChannelId::new(CHANNEL_ID),
                guild_id: Some(serenity::GuildId::new(GUILD_ID)),
                author_id: serenity::UserId::new(AUTHOR_ID),
                author_name: "someone".to_owned(),
                author_is_bot: false,
                content: content.into(),
                mention_ids: Vec::new(),
                author_roles: None,
            },
        }
    }

    pub fn author(mut self, user_id: u64) -> Self {
        self.message.author_id = serenity::UserId::new(user_id);
        self
    }

    pub fn from_bot(mut self) -> Self {
        self.message.author_is_bot = true;
        self
    }

    pub fn direct(mut self) -> Self {
        self.message.guild_id = None;
        self
    }

    pub fn mention(mut self, user_id: u64) -> Self {
        self.message.mention_ids.push(serenity::UserId::new(user_id));
        self
    }

    pub fn author_roles(mut self, role_ids: &[u64]) -> Self {
        self.message.author_roles = Some(
            role_ids
                .iter()
                .map(|id| serenity::RoleId::new(*id))
                .collect(),
        );
        self
    }

    pub fn build(self) -> IncomingMessage {
        self.message
    }
}
