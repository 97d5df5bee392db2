use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{build_prompt, Summarizer};
use crate::config::SummarizerConfig;
use crate::error::{ArchivistError, Result};
use crate::transcript::Utterance;

/// Summarization through a local Ollama server's chat API.
pub struct OllamaSummarizer {
    client: Client,
    url: String,
    model: String,
}

impl OllamaSummarizer {
    pub fn new(config: &SummarizerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|error| ArchivistError::Summarization {
                message: format!("failed to build HTTP client: {error}"),
            })?;

        Ok(Self {
            client,
            url: format!("{}/api/chat", config.url.trim_end_matches('/')),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl Summarizer for OllamaSummarizer {
    async fn summarize(&self, transcript: &[Utterance]) -> Result<String> {
        let prompt = build_prompt(transcript)?;
        info!(
            model = %self.model,
            utterances = transcript.len(),
            "Requesting session summary"
        );

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt,
            }],
            stream: false,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|error| ArchivistError::Summarization {
                message: format!("request to {} failed: {error}", self.url),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ArchivistError::Summarization {
                message: format!("Ollama returned {status}: {body}"),
            });
        }

        let reply: ChatResponse =
            response
                .json()
                .await
                .map_err(|error| ArchivistError::Summarization {
                    message: format!("failed to parse Ollama response: {error}"),
                })?;

        let summary = reply.message.content.trim().to_string();
        if summary.is_empty() {
            return Err(ArchivistError::Summarization {
                message: "Ollama returned an empty summary".to_string(),
            });
        }

        Ok(summary)
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}
