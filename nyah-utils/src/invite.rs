use poise::serenity_prelude as serenity;

pub const AUTHORIZE_URL: &str = "https://discord.com/api/oauth2/authorize";

pub const DEFAULT_SCOPES: &[&str] = &["bot", "applications.commands"];

/// Manage Roles, View Channels, Send Messages, Add Reactions, Read Message History and
/// Use Application Commands.
pub fn default_invite_permissions() -> serenity::Permissions {
    serenity::Permissions::MANAGE_ROLES
        | serenity::Permissions::VIEW_CHANNEL
        | serenity::Permissions::SEND_MESSAGES
        | serenity::Permissions::ADD_REACTIONS
        | serenity::Permissions::READ_MESSAGE_HISTORY
        | serenity::Permissions::USE_APPLICATION_COMMANDS
}

pub fn build_invite_url(client_id: &str, permissions: u64, scopes: &[&str]) -> String {
    format!(
        "{}?client_id={}&permissions={}&scope={}",
        AUTHORIZE_URL,
        client_id,
        permissions,
        scopes.join("%20")
    )
}
