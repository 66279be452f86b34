//! Role plumbing shared by the trigger and grant features.

use poise::serenity_prelude as serenity;
use tracing::{debug, info, warn};

use nyah_core::{BotStanding, ChatPlatform, IncomingMessage, MemberInfo, RoleInfo};

/// Find `role_name` in the guild's live role list, creating it when missing.
///
/// A created role is moved just below the bot's top role so the bot can manage it. Failing to
/// move is tolerated; failing to list or create yields `None`.
pub async fn ensure_role(
    platform: &dyn ChatPlatform,
    guild_id: serenity::GuildId,
    role_name: &str,
    standing: &BotStanding,
    reason: &str,
) -> Option<RoleInfo> {
    let roles = match platform.guild_roles(guild_id).await {
        Ok(roles) => roles,
        Err(source) => {
            warn!(?source, guild_id = guild_id.get(), "failed to list guild roles");
            return None;
        }
    };

    if let Some(existing) = roles.into_iter().find(|role| role.name == role_name) {
        return Some(existing);
    }

    let mut role = match platform.create_role(guild_id, role_name, reason).await {
        Ok(role) => role,
        Err(source) => {
            warn!(?source, guild_id = guild_id.get(), role_name, "failed to create role");
            return None;
        }
    };
    info!(guild_id = guild_id.get(), role_name, role_id = role.id.get(), "role created");

    if standing.top_role_position > 1 {
        let target = standing.top_role_position - 1;
        match platform.move_role(guild_id, role.id, target).await {
            Ok(()) => role.position = target,
            Err(source) => {
                debug!(?source, role_id = role.id.get(), target, "could not reposition created role");
            }
        }
    }

    Some(role)
}

/// The message author as a guild member, using the roles the gateway attached when present.
pub async fn resolve_author(
    platform: &dyn ChatPlatform,
    guild_id: serenity::GuildId,
    message: &IncomingMessage,
) -> Option<MemberInfo> {
    if let Some(role_ids) = &message.author_roles {
        return Some(MemberInfo {
            user_id: message.author_id,
            display_name: message.author_name.clone(),
            role_ids: role_ids.clone(),
        });
    }

    fetch_member(platform, guild_id, message.author_id).await
}

/// Member lookup where any failure reads as "not found".
pub async fn fetch_member(
    platform: &dyn ChatPlatform,
    guild_id: serenity::GuildId,
    user_id: serenity::UserId,
) -> Option<MemberInfo> {
    match platform.member(guild_id, user_id).await {
        Ok(member) => member,
        Err(source) => {
            debug!(?source, user_id = user_id.get(), "failed to fetch member");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use poise::serenity_prelude as serenity;

    use nyah_core::{BotStanding, ChatPlatform};
    use nyah_test_utils::{AUTHOR_ID, Call, GUILD_ID, MessageBuilder, MockPlatform, Op};

    use super::{ensure_role, resolve_author};

    fn guild() -> serenity::GuildId {
        serenity::GuildId::new(GUILD_ID)
    }

    fn standing(top: u16) -> BotStanding {
        BotStanding {
            top_role_position: top,
            can_manage_roles: true,
        }
    }

    #[tokio::test]
    async fn existing_role_is_reused() {
        let platform = MockPlatform::new().with_role(7, "Fan", 3);

        let role = ensure_role(&platform, guild(), "Fan", &standing(10), "test").await;

        assert_eq!(role.map(|role| role.id.get()), Some(7));
        assert!(platform.calls().is_empty());
    }

    #[tokio::test]
    async fn role_names_match_exactly() {
        let platform = MockPlatform::new().with_role(7, "fan", 3);

        let role = ensure_role(&platform, guild(), "Fan", &standing(10), "test")
            .await
            .expect("role");

        assert_ne!(role.id.get(), 7);
        assert_eq!(platform.calls()[0], Call::CreateRole { name: "Fan".to_owned() });
    }

    #[tokio::test]
    async fn created_role_moves_below_bot() {
        let platform = MockPlatform::new();

        let role = ensure_role(&platform, guild(), "Fan", &standing(5), "test")
            .await
            .expect("role");

        assert_eq!(role.position, 4);
        assert_eq!(
            platform.calls()[1],
            Call::MoveRole {
                role_id: role.id.get(),
                position: 4
            }
        );
    }

    #[tokio::test]
    async fn no_move_when_bot_sits_at_the_bottom() {
        let platform = MockPlatform::new();

        let role = ensure_role(&platform, guild(), "Fan", &standing(1), "test").await;

        assert!(role.is_some());
        assert_eq!(platform.calls().len(), 1);
    }

    #[tokio::test]
    async fn failed_move_still_returns_role() {
        let platform = MockPlatform::new().failing(Op::MoveRole);

        let role = ensure_role(&platform, guild(), "Fan", &standing(5), "test")
            .await
            .expect("role");

        assert_eq!(role.position, 1);
    }

    #[tokio::test]
    async fn failed_create_yields_none() {
        let platform = MockPlatform::new().failing(Op::CreateRole);

        assert!(ensure_role(&platform, guild(), "Fan", &standing(5), "test").await.is_none());
    }

    #[tokio::test]
    async fn author_roles_skip_the_member_fetch() {
        let platform = MockPlatform::new().failing(Op::FetchMember);
        let message = MessageBuilder::new("hi").author_roles(&[3]).build();

        let member = resolve_author(&platform, guild(), &message).await.expect("member");

        assert_eq!(member.user_id, serenity::UserId::new(AUTHOR_ID));
        assert!(member.has_role(serenity::RoleId::new(3)));
        assert_eq!(platform.bot_user_id().get(), nyah_test_utils::BOT_ID);
    }

    #[tokio::test]
    async fn missing_author_roles_fetch_the_member() {
        let platform = MockPlatform::new().with_member(AUTHOR_ID, "someone", &[4]);
        let message = MessageBuilder::new("hi").build();

        let member = resolve_author(&platform, guild(), &message).await.expect("member");

        assert!(member.has_role(serenity::RoleId::new(4)));
    }
}
