use std::time::Instant;

use anyhow::Context as _;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::settings::OllamaSettings;

const ERROR_BODY_MAX_CHARS: usize = 500;
const TIMEOUT_MESSAGE: &str = "(Timeout de la requête Ollama)";
const EMPTY_ANSWER: &str = "(Réponse vide)";

/// Anything that can turn a prompt into a channel-ready answer.
///
/// Failures are rendered into the returned text rather than raised, so a caller can always
/// post the result.
#[async_trait]
pub trait AnswerBackend: Send + Sync {
    async fn answer(&self, prompt: &str) -> String;
}

#[derive(Clone, Debug)]
pub struct OllamaClient {
    http: reqwest::Client,
    generate_url: String,
    model: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

impl OllamaClient {
    pub fn new(settings: &OllamaSettings) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .context("failed to build ollama http client")?;

        Ok(Self {
            http,
            generate_url: settings.generate_url(),
            model: settings.model.clone(),
        })
    }

    /// Single non-streaming `POST /api/generate`.
    pub async fn generate(&self, prompt: &str) -> String {
        let started = Instant::now();
        debug!(url = %self.generate_url, model = %self.model, prompt_len = prompt.len(), "ollama request");

        match self.try_generate(prompt).await {
            Ok(answer) => {
                debug!(
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    answer_len = answer.len(),
                    "ollama answered"
                );
                answer
            }
            Err(source) if source.is_timeout() => {
                warn!(
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "ollama request timed out"
                );
                TIMEOUT_MESSAGE.to_owned()
            }
            Err(source) => {
                error!(?source, "ollama request failed");
                format!("(Erreur Ollama: {source})")
            }
        }
    }

    async fn try_generate(&self, prompt: &str) -> Result<String, reqwest::Error> {
        let response = self
            .http
            .post(&self.generate_url)
            .json(&GenerateRequest {
                model: &self.model,
                prompt,
                stream: false,
            })
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await?;
            warn!(status = status.as_u16(), body = %truncate_chars(&body, 200), "ollama returned an error status");
            return Ok(format!(
                "Erreur Ollama ({}): {}",
                status.as_u16(),
                truncate_chars(&body, ERROR_BODY_MAX_CHARS)
            ));
        }

        let payload: Value = response.json().await?;
        Ok(extract_answer(&payload))
    }
}

#[async_trait]
impl AnswerBackend for OllamaClient {
    async fn answer(&self, prompt: &str) -> String {
        self.generate(prompt).await
    }
}

fn extract_answer(payload: &Value) -> String {
    match payload.get("response") {
        Some(Value::String(text)) => text.trim().to_owned(),
        Some(Value::Null) | None => EMPTY_ANSWER.to_owned(),
        Some(other) => other.to_string().trim().to_owned(),
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
