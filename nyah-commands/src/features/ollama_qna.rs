use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info};

use nyah_config::Env;
use nyah_core::{ChatPlatform, Error, Feature, IncomingMessage, Snapshot};
use nyah_llm::{
    AnswerBackend, MAX_CHUNK_CHARS, OllamaClient, OllamaSettings, chunk_answer, with_part_headers,
};
use nyah_utils::parse::strip_user_mention;

const PROMPT_LOG_CHARS: usize = 120;

/// Answers questions addressed to the bot through an Ollama model.
#[derive(Default)]
pub struct OllamaQna {
    backend: Snapshot<Option<Arc<dyn AnswerBackend>>>,
}

impl std::fmt::Debug for OllamaQna {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OllamaQna")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

impl OllamaQna {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enabled feature answering from `backend`, bypassing environment setup.
    pub fn with_backend(backend: Arc<dyn AnswerBackend>) -> Self {
        Self {
            backend: Snapshot::new(Some(backend)),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.load().is_some()
    }

    fn build_backend(env: &Env) -> Option<Arc<dyn AnswerBackend>> {
        let settings = match OllamaSettings::from_env(env) {
            Ok(Some(settings)) => settings,
            Ok(None) => {
                info!(raw = ?env.get("OLLAMA_ENABLED"), "ollama disabled");
                return None;
            }
            Err(source) => {
                error!(%source, "ollama enabled but misconfigured, disabling");
                return None;
            }
        };

        match OllamaClient::new(&settings) {
            Ok(client) => {
                info!(
                    base_url = %settings.base_url,
                    model = %settings.model,
                    timeout_secs = settings.timeout.as_secs(),
                    max_chunk = MAX_CHUNK_CHARS,
                    "ollama enabled"
                );
                Some(Arc::new(client))
            }
            Err(source) => {
                error!(?source, "failed to build ollama client, disabling");
                None
            }
        }
    }
}

#[async_trait]
impl Feature for OllamaQna {
    fn name(&self) -> &'static str {
        "ollama_qna"
    }

    fn setup(&self, env: &Env) {
        self.backend.store(Self::build_backend(env));
    }

    async fn on_message(
        &self,
        platform: &dyn ChatPlatform,
        message: &IncomingMessage,
    ) -> Result<(), Error> {
        let backend = self.backend.load();
        let Some(backend) = backend.as_ref() else {
            return Ok(());
        };

        let bot_id = platform.bot_user_id();
        if !message.mentions(bot_id) {
            return Ok(());
        }

        let prompt = strip_user_mention(&message.content, bot_id.get());
        if prompt.is_empty() || !prompt.contains('?') {
            return Ok(());
        }

        let preview: String = prompt.chars().take(PROMPT_LOG_CHARS).collect();
        info!(
            user_id = message.author_id.get(),
            guild_id = ?message.guild_id.map(|id| id.get()),
            channel_id = message.channel_id.get(),
            prompt = %preview,
            "ollama question"
        );

        let answer = backend.answer(&prompt).await;
        let parts = with_part_headers(chunk_answer(&answer, MAX_CHUNK_CHARS));
        debug!(parts = parts.len(), "sending ollama answer");

        for (index, part) in parts.iter().enumerate() {
            if let Err(source) = platform.send_text(message.channel_id, part).await {
                debug!(?source, part = index + 1, "failed to send answer part");
                break;
            }
        }

        Ok(())
    }
}
