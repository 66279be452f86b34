use super::DocumentKind;

#[derive(Clone, Copy, Debug)]
pub struct RoleTriggersDoc;

impl DocumentKind for RoleTriggersDoc {
    const KEY: &'static str = "triggers";
    const PATH_ENV: &'static str = "ROLE_TRIGGERS_CONFIG";
    const DEFAULT_PATH: &'static str = "role_triggers.json";
}

#[derive(Clone, Copy, Debug)]
pub struct KeywordResponsesDoc;

impl DocumentKind for KeywordResponsesDoc {
    const KEY: &'static str = "embeds";
    const PATH_ENV: &'static str = "KEYWORD_RESPONSES_CONFIG";
    const DEFAULT_PATH: &'static str = "keyword_responses.json";
}

#[derive(Clone, Copy, Debug)]
pub struct GrantCommandsDoc;

impl DocumentKind for GrantCommandsDoc {
    const KEY: &'static str = "commands";
    const PATH_ENV: &'static str = "GRANT_COMMANDS_CONFIG";
    const DEFAULT_PATH: &'static str = "grant_commands.json";
}
