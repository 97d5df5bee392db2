use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub nats: NatsConfig,
    pub whisper: WhisperConfig,
    pub summarizer: SummarizerConfig,
    pub note: NoteConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct NatsConfig {
    pub url: String,
    /// Request/reply subject for start/ping/stop commands.
    pub command_subject: String,
    /// One-way subject for progress/finish/error events.
    pub event_subject: String,
}

#[derive(Debug, Deserialize)]
pub struct WhisperConfig {
    /// Path to the whisper-cli binary.
    pub binary: String,
    /// Path to the ggml model file.
    pub model: String,
    #[serde(default = "default_whisper_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct SummarizerConfig {
    /// Base URL of the Ollama server.
    pub url: String,
    pub model: String,
    #[serde(default = "default_summarizer_timeout")]
    pub timeout_secs: u64,
    /// Directory for date-stamped audit copies of generated summaries.
    pub audit_dir: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NoteConfig {
    /// Title written into generated notes and substituted for `{name}`.
    #[serde(default = "default_note_title")]
    pub title: String,
}

fn default_whisper_timeout() -> u64 {
    1800
}

fn default_summarizer_timeout() -> u64 {
    600
}

fn default_note_title() -> String {
    "Название".to_string()
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
