pub mod commands;
pub mod grant_commands;
pub mod keyword_responses;
pub mod ollama_qna;
pub mod role_triggers;

use nyah_config::Env;
use nyah_core::FeatureRegistry;

pub use commands::Commands;
pub use grant_commands::GrantCommands;
pub use keyword_responses::KeywordResponses;
pub use ollama_qna::OllamaQna;
pub use role_triggers::RoleTriggers;

/// Every message feature in dispatch order, already set up against `env`.
///
/// Setup happens here rather than on gateway ready so that a reload issued before the bot
/// connects still reads the configured document paths.
pub fn default_registry(env: &Env) -> FeatureRegistry {
    let registry = FeatureRegistry::new()
        .with(Commands::new())
        .with(GrantCommands::new())
        .with(KeywordResponses::new())
        .with(OllamaQna::new())
        .with(RoleTriggers::new());
    registry.setup_all(env);
    registry
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use serde_json::json;
    use tempfile::TempDir;

    use nyah_config::Env;
    use nyah_test_utils::{AUTHOR_ID, Call, MessageBuilder, MockPlatform};

    use super::default_registry;

    fn env_in(dir: &Path) -> Env {
        let path = |name: &str| dir.join(name).to_string_lossy().into_owned();
        Env::from_pairs([
            ("ROLE_TRIGGERS_CONFIG", path("roles.json")),
            ("KEYWORD_RESPONSES_CONFIG", path("keywords.json")),
            ("GRANT_COMMANDS_CONFIG", path("grant.json")),
        ])
    }

    #[test]
    fn registry_order_is_fixed() {
        let dir = TempDir::new().expect("tempdir");

        assert_eq!(
            default_registry(&env_in(dir.path())).names(),
            vec![
                "commands",
                "grant_commands",
                "keyword_responses",
                "ollama_qna",
                "role_triggers"
            ]
        );
    }

    #[test]
    fn documents_are_created_at_configured_paths() {
        let dir = TempDir::new().expect("tempdir");

        default_registry(&env_in(dir.path()));

        for name in ["roles.json", "keywords.json", "grant.json"] {
            assert!(dir.path().join(name).exists(), "{name} missing");
        }
    }

    #[tokio::test]
    async fn reload_picks_up_edits_at_configured_paths() {
        let dir = TempDir::new().expect("tempdir");
        let registry = default_registry(&env_in(dir.path()));
        let platform = MockPlatform::new().with_member(AUTHOR_ID, "someone", &[]);
        let message = MessageBuilder::new("miwa bonjour").build();

        registry.dispatch(&platform, &message).await;
        assert!(platform.calls().is_empty());

        fs::write(
            dir.path().join("roles.json"),
            json!({"triggers": [{"trigger": "miwa", "role_name": "Fan"}]}).to_string(),
        )
        .expect("write roles");
        fs::write(
            dir.path().join("keywords.json"),
            json!({"embeds": [{"triggers": ["bonjour"], "title": "Salut"}]}).to_string(),
        )
        .expect("write keywords");

        assert_eq!(registry.reload_all(), 3);
        registry.dispatch(&platform, &message).await;

        let calls = platform.calls();
        assert!(calls.iter().any(|call| matches!(
            call,
            Call::Embed { embed, .. } if embed.title.as_deref() == Some("Salut")
        )));
        let fan = platform.role_named("Fan").expect("role created");
        assert_eq!(platform.member_roles(AUTHOR_ID), vec![fan.id.get()]);
    }
}
