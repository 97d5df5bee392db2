//! Narrative summarization collaborator interface

mod ollama;
mod prompt;

use async_trait::async_trait;

use crate::error::Result;
use crate::transcript::Utterance;

pub use ollama::OllamaSummarizer;
pub use prompt::build_prompt;

/// External language-model service turning the consolidated transcript into
/// narrative text.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, transcript: &[Utterance]) -> Result<String>;
}
