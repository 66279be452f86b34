use async_trait::async_trait;
use tracing::{error, info, warn};

use nyah_config::model::{RoleTrigger, parse_role_triggers};
use nyah_config::{ConfigStore, Env, RoleTriggersDoc};
use nyah_core::{ChatPlatform, Error, Feature, IncomingMessage, Reloadable, Snapshot};

use crate::roles::{ensure_role, resolve_author};

const ADDED_REACTION: &str = "✅";
const REMOVED_REACTION: &str = "🗑\u{fe0f}";
const CREATE_REASON: &str = "Création auto pour trigger";

/// Adds or removes a role when a message contains a configured word.
#[derive(Debug, Default)]
pub struct RoleTriggers {
    env: Snapshot<Env>,
    triggers: Snapshot<Vec<RoleTrigger>>,
    reactions_enabled: Snapshot<bool>,
}

impl RoleTriggers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn triggers(&self) -> Vec<RoleTrigger> {
        self.triggers.load().as_ref().clone()
    }

    fn load_triggers(env: &Env) -> Vec<RoleTrigger> {
        let store = ConfigStore::<RoleTriggersDoc>::from_env(env);
        let triggers = parse_role_triggers(&store.entries());
        if !triggers.is_empty() {
            info!(count = triggers.len(), path = %store.path().display(), "role triggers loaded");
            return triggers;
        }

        match RoleTrigger::from_env_fallback(env) {
            Some(trigger) => {
                info!(trigger = %trigger.trigger, role = %trigger.role_name, "role trigger loaded from environment");
                vec![trigger]
            }
            None => {
                info!("no role triggers configured");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl Feature for RoleTriggers {
    fn name(&self) -> &'static str {
        "role_triggers"
    }

    fn setup(&self, env: &Env) {
        self.env.store(env.clone());
        self.reactions_enabled.store(env.flag("REACTIONS_ENABLED", true));
        self.triggers.store(Self::load_triggers(env));
    }

    async fn on_message(
        &self,
        platform: &dyn ChatPlatform,
        message: &IncomingMessage,
    ) -> Result<(), Error> {
        let Some(guild_id) = message.guild_id else {
            return Ok(());
        };

        let triggers = self.triggers.load();
        let content = message.content_lower();
        let hits: Vec<(&RoleTrigger, bool)> = triggers
            .iter()
            .filter_map(|trigger| {
                let removing = trigger
                    .remove_trigger
                    .as_deref()
                    .is_some_and(|word| content.contains(word));
                (removing || content.contains(trigger.trigger.as_str()))
                    .then_some((trigger, removing))
            })
            .collect();
        if hits.is_empty() {
            return Ok(());
        }

        let standing = platform.bot_standing(guild_id).await?;
        if !standing.can_manage_roles {
            return Ok(());
        }

        let reactions = *self.reactions_enabled.load();
        let mut author = None;

        for (trigger, removing) in hits {
            let Some(role) =
                ensure_role(platform, guild_id, &trigger.role_name, &standing, CREATE_REASON).await
            else {
                continue;
            };

            if !standing.can_manage(&role) {
                warn!(
                    role = %role.name,
                    role_position = role.position,
                    bot_position = standing.top_role_position,
                    "role sits above the bot, skipping trigger"
                );
                continue;
            }

            if author.is_none() {
                author = resolve_author(platform, guild_id, message).await;
            }
            let Some(member) = author.as_mut() else {
                continue;
            };

            if removing {
                if !member.has_role(role.id) {
                    continue;
                }
                let word = trigger.remove_trigger.as_deref().unwrap_or_default();
                let reason = format!("Remove trigger '{word}'");
                match platform
                    .remove_member_role(guild_id, member.user_id, role.id, &reason)
                    .await
                {
                    Ok(()) => {
                        member.role_ids.retain(|id| *id != role.id);
                        info!(user = %member.display_name, role = %role.name, "role removed by trigger");
                        if reactions {
                            react(platform, message, REMOVED_REACTION).await;
                        }
                    }
                    Err(source) => {
                        error!(?source, role = %role.name, user_id = member.user_id.get(), "failed to remove role");
                    }
                }
            } else {
                if member.has_role(role.id) {
                    continue;
                }
                let reason = format!("Trigger '{}'", trigger.trigger);
                match platform
                    .add_member_role(guild_id, member.user_id, role.id, &reason)
                    .await
                {
                    Ok(()) => {
                        member.role_ids.push(role.id);
                        info!(user = %member.display_name, role = %role.name, "role added by trigger");
                        if reactions {
                            react(platform, message, ADDED_REACTION).await;
                        }
                    }
                    Err(source) => {
                        error!(?source, role = %role.name, user_id = member.user_id.get(), "failed to add role");
                    }
                }
            }
        }

        Ok(())
    }

    fn as_reloadable(&self) -> Option<&dyn Reloadable> {
        Some(self)
    }
}

impl Reloadable for RoleTriggers {
    fn reload(&self) {
        let env = self.env.load();
        self.triggers.store(Self::load_triggers(&env));
    }
}

async fn react(platform: &dyn ChatPlatform, message: &IncomingMessage, emoji: &str) {
    if let Err(source) = platform
        .add_reaction(message.channel_id, message.id, emoji)
        .await
    {
        warn!(?source, emoji, "failed to add reaction");
    }
}
