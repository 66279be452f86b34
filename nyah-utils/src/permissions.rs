use poise::serenity_prelude as serenity;

/// Union of the `@everyone` role and every role the member holds.
pub fn permissions_from_roles<'a>(
    guild_id: serenity::GuildId,
    member_roles: &[serenity::RoleId],
    roles: impl IntoIterator<Item = &'a serenity::Role>,
) -> serenity::Permissions {
    let everyone_role_id = serenity::RoleId::new(guild_id.get());

    roles
        .into_iter()
        .filter(|role| role.id == everyone_role_id || member_roles.contains(&role.id))
        .fold(serenity::Permissions::empty(), |resolved, role| {
            resolved | role.permissions
        })
}

/// Highest hierarchy position among the member's roles (`@everyone` sits at 0).
pub fn top_role_position<'a>(
    member_roles: &[serenity::RoleId],
    roles: impl IntoIterator<Item = &'a serenity::Role>,
) -> u16 {
    roles
        .into_iter()
        .filter(|role| member_roles.contains(&role.id))
        .map(|role| role.position)
        .max()
        .unwrap_or(0)
}

/// `ADMINISTRATOR` satisfies every requirement.
pub fn grants(perms: serenity::Permissions, required: serenity::Permissions) -> bool {
    perms.contains(serenity::Permissions::ADMINISTRATOR) || perms.contains(required)
}

/// Resolve a member's effective guild permissions over HTTP.
pub async fn resolve_user_permissions(
    http: &serenity::Http,
    guild_id: serenity::GuildId,
    user_id: serenity::UserId,
) -> anyhow::Result<serenity::Permissions> {
    let guild = guild_id.to_partial_guild(http).await?;
    if guild.owner_id == user_id {
        return Ok(serenity::Permissions::all());
    }

    let member = guild_id.member(http, user_id).await?;
    Ok(permissions_from_roles(
        guild_id,
        &member.roles,
        guild.roles.values(),
    ))
}

#[cfg(test)]
mod tests {
    use poise::serenity_prelude as serenity;

    use super::grants;

    #[test]
    fn administrator_grants_everything() {
        assert!(grants(
            serenity::Permissions::ADMINISTRATOR,
            serenity::Permissions::MANAGE_ROLES
        ));
        assert!(grants(
            serenity::Permissions::MANAGE_ROLES | serenity::Permissions::SEND_MESSAGES,
            serenity::Permissions::MANAGE_ROLES
        ));
        assert!(!grants(
            serenity::Permissions::SEND_MESSAGES,
            serenity::Permissions::MANAGE_ROLES
        ));
    }
}
