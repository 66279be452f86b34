use async_trait::async_trait;
use tracing::{debug, info, warn};

use nyah_config::model::{KeywordEmbedConfig, KeywordIndex};
use nyah_config::{ConfigStore, Env, KeywordResponsesDoc};
use nyah_core::{ChatPlatform, Error, Feature, IncomingMessage, Reloadable, Snapshot};
use nyah_utils::embed::EmbedSpec;

/// Replies with a configured embed when a message contains one of its triggers.
#[derive(Debug, Default)]
pub struct KeywordResponses {
    env: Snapshot<Env>,
    index: Snapshot<KeywordIndex>,
}

impl KeywordResponses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> std::sync::Arc<KeywordIndex> {
        self.index.load()
    }

    fn load_index(env: &Env) -> KeywordIndex {
        let store = ConfigStore::<KeywordResponsesDoc>::from_env(env);
        let index = KeywordIndex::from_entries(&store.entries());
        info!(
            configs = index.config_count(),
            triggers = index.trigger_count(),
            path = %store.path().display(),
            "keyword responses loaded"
        );
        index
    }
}

pub fn keyword_embed(config: &KeywordEmbedConfig) -> EmbedSpec {
    let mut embed = EmbedSpec::new()
        .title(config.title.clone())
        .description(config.description.clone())
        .color(config.color);

    for field in &config.fields {
        embed = embed.field(field.name.clone(), field.value.clone(), field.inline);
    }
    if let Some(footer) = &config.footer {
        embed = embed.footer(footer.clone());
    }
    if let Some(url) = &config.image_url {
        embed = embed.image_url(url.clone());
    }
    if let Some(url) = &config.thumbnail_url {
        embed = embed.thumbnail_url(url.clone());
    }

    embed
}

#[async_trait]
impl Feature for KeywordResponses {
    fn name(&self) -> &'static str {
        "keyword_responses"
    }

    fn setup(&self, env: &Env) {
        self.env.store(env.clone());
        self.index.store(Self::load_index(env));
    }

    async fn on_message(
        &self,
        platform: &dyn ChatPlatform,
        message: &IncomingMessage,
    ) -> Result<(), Error> {
        let index = self.index.load();
        if index.is_empty() {
            return Ok(());
        }

        let content = message.content_lower();
        let Some((trigger, config)) = index.first_match(&content) else {
            return Ok(());
        };

        debug!(trigger, title = %config.title, "keyword matched");
        if let Err(source) = platform
            .send_embed(message.channel_id, &keyword_embed(config))
            .await
        {
            warn!(?source, trigger, "failed to send keyword embed");
        }

        Ok(())
    }

    fn as_reloadable(&self) -> Option<&dyn Reloadable> {
        Some(self)
    }
}

impl Reloadable for KeywordResponses {
    fn reload(&self) {
        let env = self.env.load();
        self.index.store(Self::load_index(&env));
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::json;
    use tempfile::TempDir;

    use nyah_config::Env;
    use nyah_core::{Feature, Reloadable};
    use nyah_test_utils::{CHANNEL_ID, Call, MessageBuilder, MockPlatform, Op};

    use super::KeywordResponses;

    fn setup(dir: &TempDir, document: serde_json::Value) -> KeywordResponses {
        let path = dir.path().join("keyword_responses.json");
        fs::write(&path, document.to_string()).expect("write config");

        let feature = KeywordResponses::new();
        feature.setup(&Env::from_pairs([(
            "KEYWORD_RESPONSES_CONFIG",
            path.to_string_lossy().into_owned(),
        )]));
        feature
    }

    fn two_configs() -> serde_json::Value {
        json!({"embeds": [
            {
                "triggers": ["regles", "rules"],
                "title": "Règles",
                "description": "Lis le salon #règles",
                "color": "red",
                "fields": [{"name": "Important", "value": "Sois gentil", "inline": true}],
                "footer": "Nyah"
            },
            {"triggers": ["bonjour"], "title": "Salut", "color": 255}
        ]})
    }

    #[tokio::test]
    async fn first_matching_trigger_sends_one_embed() {
        let dir = TempDir::new().expect("tempdir");
        let feature = setup(&dir, two_configs());
        let platform = MockPlatform::new();

        feature
            .on_message(&platform, &MessageBuilder::new("Bonjour, où sont les RULES ?").build())
            .await
            .expect("handled");

        let calls = platform.calls();
        assert_eq!(calls.len(), 1);
        let Call::Embed { channel_id, embed } = &calls[0] else {
            panic!("expected an embed, got {calls:?}");
        };
        assert_eq!(*channel_id, CHANNEL_ID);
        assert_eq!(embed.title.as_deref(), Some("Règles"));
        assert_eq!(embed.color, Some(0xE7_4C_3C));
        assert_eq!(embed.field_value("Important"), Some("Sois gentil"));
        assert_eq!(embed.footer.as_deref(), Some("Nyah"));
    }

    #[tokio::test]
    async fn unmatched_message_sends_nothing() {
        let dir = TempDir::new().expect("tempdir");
        let feature = setup(&dir, two_configs());
        let platform = MockPlatform::new();

        feature
            .on_message(&platform, &MessageBuilder::new("rien à voir").build())
            .await
            .expect("handled");

        assert!(platform.calls().is_empty());
    }

    #[tokio::test]
    async fn send_failure_is_swallowed() {
        let dir = TempDir::new().expect("tempdir");
        let feature = setup(&dir, two_configs());
        let platform = MockPlatform::new().failing(Op::SendEmbed);

        let result = feature
            .on_message(&platform, &MessageBuilder::new("bonjour").build())
            .await;

        assert!(result.is_ok());
    }

    #[test]
    fn reload_swaps_the_index() {
        let dir = TempDir::new().expect("tempdir");
        let feature = setup(&dir, two_configs());
        assert_eq!(feature.index().config_count(), 2);

        fs::write(dir.path().join("keyword_responses.json"), json!({"embeds": []}).to_string())
            .expect("rewrite");
        feature.reload();

        assert!(feature.index().is_empty());
    }
}
