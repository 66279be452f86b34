use std::path::Path;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use nyah_config::model::{GrantCommand, parse_grant_commands};
use nyah_config::{ConfigStore, Env, GrantCommandsDoc};
use nyah_core::config::command_prefix;
use nyah_core::{ChatPlatform, Error, Feature, IncomingMessage, Reloadable, Snapshot};
use nyah_utils::parse::{command_name, parse_user_token};
use poise::serenity_prelude as serenity;

use crate::roles::{ensure_role, fetch_member};

const CREATE_REASON: &str = "Création auto via grant command";

/// Prefix commands that hand a fixed role to a target, restricted to listed users.
#[derive(Debug, Default)]
pub struct GrantCommands {
    env: Snapshot<Env>,
    prefix: Snapshot<String>,
    commands: Snapshot<Vec<GrantCommand>>,
}

impl GrantCommands {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> Vec<GrantCommand> {
        self.commands.load().as_ref().clone()
    }

    fn load_commands(env: &Env) -> Vec<GrantCommand> {
        let store = ConfigStore::<GrantCommandsDoc>::from_env(env);
        let commands = parse_grant_commands(&store.entries());
        if !commands.is_empty() {
            info!(count = commands.len(), path = %store.path().display(), "grant commands loaded");
            return commands;
        }

        match GrantCommand::from_env_fallback(env) {
            Some(command) => {
                info!(name = %command.name, role = %command.role_name, "grant command loaded from environment");
                vec![command]
            }
            None => {
                info!("no grant commands configured");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl Feature for GrantCommands {
    fn name(&self) -> &'static str {
        "grant_commands"
    }

    fn setup(&self, env: &Env) {
        self.env.store(env.clone());
        self.prefix.store(command_prefix(env));
        self.commands.store(Self::load_commands(env));
    }

    async fn on_message(
        &self,
        platform: &dyn ChatPlatform,
        message: &IncomingMessage,
    ) -> Result<(), Error> {
        let Some(guild_id) = message.guild_id else {
            return Ok(());
        };

        let prefix = self.prefix.load();
        let Some(name) = command_name(&message.content, &prefix) else {
            return Ok(());
        };

        let commands = self.commands.load();
        let Some(command) = commands.iter().find(|command| command.name == name) else {
            return Ok(());
        };

        if !command.allows(message.author_id.get()) {
            debug!(command = %command.name, user_id = message.author_id.get(), "grant command refused");
            return Ok(());
        }

        let standing = platform.bot_standing(guild_id).await?;
        if !standing.can_manage_roles {
            return Ok(());
        }

        let target_id = match message.first_mention() {
            Some(user_id) => Some(user_id),
            None => message
                .content
                .split_whitespace()
                .nth(1)
                .and_then(parse_user_token)
                .filter(|id| *id != 0)
                .map(serenity::UserId::new),
        };
        let target = match target_id {
            Some(user_id) => fetch_member(platform, guild_id, user_id).await,
            None => None,
        };
        let Some(target) = target else {
            let usage = format!(
                "Spécifie une cible: ex. {}{} @membre",
                prefix.as_str(),
                command.name
            );
            if let Err(source) = platform.send_text(message.channel_id, &usage).await {
                warn!(?source, command = %command.name, "failed to send usage hint");
            }
            return Ok(());
        };

        let Some(role) =
            ensure_role(platform, guild_id, &command.role_name, &standing, CREATE_REASON).await
        else {
            return Ok(());
        };

        if !standing.can_manage(&role) {
            let text = format!(
                "Je ne peux pas gérer le rôle '{}' (position trop haute). Place mon rôle au-dessus.",
                role.name
            );
            if let Err(source) = platform.send_text(message.channel_id, &text).await {
                warn!(?source, role = %role.name, "failed to send hierarchy warning");
            }
            return Ok(());
        }

        if target.has_role(role.id) {
            return Ok(());
        }

        let reason = format!("Grant command '{}' par {}", command.name, message.author_name);
        if let Err(source) = platform
            .add_member_role(guild_id, target.user_id, role.id, &reason)
            .await
        {
            error!(?source, command = %command.name, user_id = target.user_id.get(), "failed to grant role");
            return Ok(());
        }
        info!(
            command = %command.name,
            role = %role.name,
            target = %target.display_name,
            author = %message.author_name,
            "role granted"
        );

        if let Some(gif_path) = &command.gif_path {
            let path = Path::new(gif_path);
            if !path.exists() {
                debug!(path = %gif_path, "grant gif not found");
            } else if let Err(source) = platform.send_file(message.channel_id, path).await {
                debug!(?source, path = %gif_path, "failed to send grant gif");
            }
        }

        Ok(())
    }

    fn as_reloadable(&self) -> Option<&dyn Reloadable> {
        Some(self)
    }
}

impl Reloadable for GrantCommands {
    fn reload(&self) {
        let env = self.env.load();
        self.commands.store(Self::load_commands(&env));
    }
}
