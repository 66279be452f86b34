use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use poise::serenity_prelude as serenity;

use nyah_core::{BotStanding, ChatPlatform, Error, MemberInfo, RoleInfo};
use nyah_utils::embed::EmbedSpec;

use crate::message::BOT_ID;

/// First id handed out to roles created through the mock.
const CREATED_ROLE_ID_BASE: u64 = 9000;

/// Outbound call recorded by [`MockPlatform`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Text { channel_id: u64, text: String },
    Embed { channel_id: u64, embed: EmbedSpec },
    File { channel_id: u64, path: PathBuf },
    Reaction { message_id: u64, emoji: String },
    CreateRole { name: String },
    MoveRole { role_id: u64, position: u16 },
    AddRole { user_id: u64, role_id: u64 },
    RemoveRole { user_id: u64, role_id: u64 },
}

/// Operations that can be told to fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    SendText,
    SendEmbed,
    SendFile,
    AddReaction,
    CreateRole,
    MoveRole,
    FetchMember,
    AddRole,
    RemoveRole,
}

#[derive(Debug)]
struct State {
    roles: Vec<RoleInfo>,
    members: HashMap<u64, MemberInfo>,
    permissions: HashMap<u64, serenity::Permissions>,
    calls: Vec<Call>,
    next_role_id: u64,
}

/// In-memory guild: seeded roles, members and permissions, every outbound call recorded.
#[derive(Debug)]
pub struct MockPlatform {
    bot_user_id: serenity::UserId,
    standing: BotStanding,
    failing: HashSet<Op>,
    state: Mutex<State>,
}

impl Default for MockPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPlatform {
    /// Bot with `manage_roles` whose top role sits at position 10.
    pub fn new() -> Self {
        Self {
            bot_user_id: serenity::UserId::new(BOT_ID),
            standing: BotStanding {
                top_role_position: 10,
                can_manage_roles: true,
            },
            failing: HashSet::new(),
            state: Mutex::new(State {
                roles: Vec::new(),
                members: HashMap::new(),
                permissions: HashMap::new(),
                calls: Vec::new(),
                next_role_id: CREATED_ROLE_ID_BASE,
            }),
        }
    }

    pub fn with_standing(mut self, top_role_position: u16, can_manage_roles: bool) -> Self {
        self.standing = BotStanding {
            top_role_position,
            can_manage_roles,
        };
        self
    }

    pub fn with_role(self, id: u64, name: &str, position: u16) -> Self {
        self.with_state(|state| {
            state.roles.push(RoleInfo {
                id: serenity::RoleId::new(id),
                name: name.to_owned(),
                position,
            });
        })
    }

    pub fn with_member(self, user_id: u64, display_name: &str, role_ids: &[u64]) -> Self {
        self.with_state(|state| {
            state.members.insert(
                user_id,
                MemberInfo {
                    user_id: serenity::UserId::new(user_id),
                    display_name: display_name.to_owned(),
                    role_ids: role_ids.iter().map(|id| serenity::RoleId::new(*id)).collect(),
                },
            );
        })
    }

    pub fn with_permissions(self, user_id: u64, permissions: serenity::Permissions) -> Self {
        self.with_state(|state| {
            state.permissions.insert(user_id, permissions);
        })
    }

    pub fn failing(mut self, op: Op) -> Self {
        self.failing.insert(op);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Text { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn role_named(&self, name: &str) -> Option<RoleInfo> {
        self.lock().roles.iter().find(|role| role.name == name).cloned()
    }

    pub fn member_roles(&self, user_id: u64) -> Vec<u64> {
        self.lock()
            .members
            .get(&user_id)
            .map(|member| member.role_ids.iter().map(|id| id.get()).collect())
            .unwrap_or_default()
    }

    fn with_state(self, apply: impl FnOnce(&mut State)) -> Self {
        apply(&mut self.lock());
        self
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn check(&self, op: Op) -> Result<(), Error> {
        if self.failing.contains(&op) {
            anyhow::bail!("mock platform refused {op:?}");
        }
        Ok(())
    }

    fn record(&self, call: Call) {
        self.lock().calls.push(call);
    }
}

#[async_trait]
impl ChatPlatform for MockPlatform {
    fn bot_user_id(&self) -> serenity::UserId {
        self.bot_user_id
    }

    async fn send_text(&self, channel_id: serenity::ChannelId, text: &str) -> Result<(), Error> {
        self.check(Op::SendText)?;
        self.record(Call::Text {
            channel_id: channel_id.get(),
            text: text.to_owned(),
        });
        Ok(())
    }

    async fn send_embed(
        &self,
        channel_id: serenity::ChannelId,
        embed: &EmbedSpec,
    ) -> Result<(), Error> {
        self.check(Op::SendEmbed)?;
        self.record(Call::Embed {
            channel_id: channel_id.get(),
            embed: embed.clone(),
        });
        Ok(())
    }

    async fn send_file(&self, channel_id: serenity::ChannelId, path: &Path) -> Result<(), Error> {
        self.check(Op::SendFile)?;
        self.record(Call::File {
            channel_id: channel_id.get(),
            path: path.to_path_buf(),
        });
        Ok(())
    }

    async fn add_reaction(
        &self,
        _channel_id: serenity::ChannelId,
        message_id: serenity::MessageId,
        emoji: &str,
    ) -> Result<(), Error> {
        self.check(Op::AddReaction)?;
        self.record(Call::Reaction {
            message_id: message_id.get(),
            emoji: emoji.to_owned(),
        });
        Ok(())
    }

    async fn guild_roles(&self, _guild_id: serenity::GuildId) -> Result<Vec<RoleInfo>, Error> {
        Ok(self.lock().roles.clone())
    }

    async fn create_role(
        &self,
        _guild_id: serenity::GuildId,
        name: &str,
        _reason: &str,
    ) -> Result<RoleInfo, Error> {
        self.check(Op::CreateRole)?;
        let mut state = self.lock();
        let role = RoleInfo {
            id: serenity::RoleId::new(state.next_role_id),
            name: name.to_owned(),
            position: 1,
        };
        state.next_role_id += 1;
        state.roles.push(role.clone());
        state.calls.push(Call::CreateRole {
            name: name.to_owned(),
        });
        Ok(role)
    }

    async fn move_role(
        &self,
        _guild_id: serenity::GuildId,
        role_id: serenity::RoleId,
        position: u16,
    ) -> Result<(), Error> {
        self.check(Op::MoveRole)?;
        let mut state = self.lock();
        if let Some(role) = state.roles.iter_mut().find(|role| role.id == role_id) {
            role.position = position;
        }
        state.calls.push(Call::MoveRole {
            role_id: role_id.get(),
            position,
        });
        Ok(())
    }

    async fn bot_standing(&self, _guild_id: serenity::GuildId) -> Result<BotStanding, Error> {
        Ok(self.standing)
    }

    async fn member(
        &self,
        _guild_id: serenity::GuildId,
        user_id: serenity::UserId,
    ) -> Result<Option<MemberInfo>, Error> {
        self.check(Op::FetchMember)?;
        Ok(self.lock().members.get(&user_id.get()).cloned())
    }

    async fn add_member_role(
        &self,
        _guild_id: serenity::GuildId,
        user_id: serenity::UserId,
        role_id: serenity::RoleId,
        _reason: &str,
    ) -> Result<(), Error> {
        self.check(Op::AddRole)?;
        let mut state = self.lock();
        if let Some(member) = state.members.get_mut(&user_id.get())
            && !member.role_ids.contains(&role_id)
        {
            member.role_ids.push(role_id);
        }
        state.calls.push(Call::AddRole {
            user_id: user_id.get(),
            role_id: role_id.get(),
        });
        Ok(())
    }

    async fn remove_member_role(
        &self,
        _guild_id: serenity::GuildId,
        user_id: serenity::UserId,
        role_id: serenity::RoleId,
        _reason: &str,
    ) -> Result<(), Error> {
        self.check(Op::RemoveRole)?;
        let mut state = self.lock();
        if let Some(member) = state.members.get_mut(&user_id.get()) {
            member.role_ids.retain(|id| *id != role_id);
        }
        state.calls.push(Call::RemoveRole {
            user_id: user_id.get(),
            role_id: role_id.get(),
        });
        Ok(())
    }

    async fn member_permissions(
        &self,
        _guild_id: serenity::GuildId,
        user_id: serenity::UserId,
    ) -> Result<serenity::Permissions, Error> {
        Ok(self
            .lock()
            .permissions
            .get(&user_id.get())
            .copied()
            .unwrap_or_else(serenity::Permissions::empty))
    }
}
