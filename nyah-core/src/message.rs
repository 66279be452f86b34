use poise::serenity_prelude as serenity;

/// The parts of a gateway message the features look at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IncomingMessage {
    pub id: serenity::MessageId,
    pub channel_id: serenity::ChannelId,
    pub guild_id: Option<serenity::GuildId>,
    pub author_id: serenity::UserId,
    pub author_name: String,
    pub author_is_bot: bool,
    pub content: String,
    pub mention_ids: Vec<serenity::UserId>,
    /// Author's roles when the gateway already attached the guild member.
    pub author_roles: Option<Vec<serenity::RoleId>>,
}

impl IncomingMessage {
    pub fn from_serenity(message: &serenity::Message) -> Self {
        Self {
            id: message.id,
            channel_id: message.channel_id,
            guild_id: message.guild_id,
            author_id: message.author.id,
            author_name: message.author.name.clone(),
            author_is_bot: message.author.bot || message.webhook_id.is_some(),
            content: message.content.clone(),
            mention_ids: message.mentions.iter().map(|user| user.id).collect(),
            author_roles: message.member.as_ref().map(|member| member.roles.clone()),
        }
    }

    pub fn content_lower(&self) -> String {
        self.content.to_lowercase()
    }

    pub fn mentions(&self, user_id: serenity::UserId) -> bool {
        self.mention_ids.contains(&user_id)
    }

    pub fn first_mention(&self) -> Option<serenity::UserId> {
        self.mention_ids.first().copied()
    }
}
