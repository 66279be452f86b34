use std::sync::Mutex;

use async_trait::async_trait;

use nyah_llm::AnswerBackend;

/// Answers every prompt with the same text and remembers what it was asked.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    answer: String,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl AnswerBackend for ScriptedBackend {
    async fn answer(&self, prompt: &str) -> String {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_owned());
        }
        self.answer.clone()
    }
}
