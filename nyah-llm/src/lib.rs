pub mod chunk;
pub mod client;
pub mod settings;

pub use chunk::{MAX_CHUNK_CHARS, chunk_answer, with_part_headers};
pub use client::{AnswerBackend, OllamaClient};
pub use settings::{OllamaConfigError, OllamaSettings};
