use async_trait::async_trait;
use poise::serenity_prelude as serenity;
use tracing::debug;

use nyah_config::Env;
use nyah_core::config::command_prefix;
use nyah_core::{ChatPlatform, Error, Feature, IncomingMessage, RoleInfo, Snapshot};
use nyah_utils::parse::strip_prefix;
use nyah_utils::permissions::grants;

use crate::COMMANDS;

const ROLE_LIST_LIMIT: usize = 50;

/// Built-in prefix commands: `ping`, `help`/`aide` and `roles`.
#[derive(Debug, Default)]
pub struct Commands {
    prefix: Snapshot<String>,
}

impl Commands {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Prefix commands first, then the slash commands grouped under their category.
pub fn help_text(prefix: &str) -> String {
    let mut text = format!(
        "Commandes disponibles:\n{prefix}ping - test de réactivité\n{prefix}help - affiche cette aide\nTriggers de rôles: définis dans role_triggers.json ou .env"
    );

    let mut category = None;
    for meta in COMMANDS {
        if category != Some(meta.category) {
            category = Some(meta.category);
            text.push_str(&format!("\n{} (slash):", meta.category));
        }
        text.push_str(&format!("\n{} - {}", meta.usage, meta.desc));
    }
    text
}

/// Highest role first, one `position | name` line each, capped and fenced.
pub fn role_listing(roles: &[RoleInfo]) -> String {
    let mut sorted: Vec<&RoleInfo> = roles.iter().collect();
    sorted.sort_by(|a, b| b.position.cmp(&a.position));

    let lines: Vec<String> = sorted
        .iter()
        .take(ROLE_LIST_LIMIT)
        .map(|role| format!("{:>3} | {}", role.position, role.name))
        .collect();

    format!("```\nListe des rôles (haut -> bas):\n{}\n```", lines.join("\n"))
}

#[async_trait]
impl Feature for Commands {
    fn name(&self) -> &'static str {
        "commands"
    }

    fn setup(&self, env: &Env) {
        self.prefix.store(command_prefix(env));
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
        let Some(body) = strip_prefix(&message.content, &prefix) else {
            return Ok(());
        };

        let reply = match body.trim().to_lowercase().as_str() {
            "ping" => "Pong!".to_owned(),
            "help" | "aide" => help_text(&prefix),
            "roles" => {
                let permissions = platform
                    .member_permissions(guild_id, message.author_id)
                    .await?;
                if grants(permissions, serenity::Permissions::MANAGE_ROLES) {
                    role_listing(&platform.guild_roles(guild_id).await?)
                } else {
                    format!("Permission insuffisante pour {}roles", prefix.as_str())
                }
            }
            _ => return Ok(()),
        };

        if let Err(source) = platform.send_text(message.channel_id, &reply).await {
            debug!(?source, "failed to send command reply");
        }
        Ok(())
    }
}
