use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::info;

use archivist::nats::{connect, CommandListener, EventPublisher};
use archivist::session::{SessionOptions, SessionRunner, StageTable};
use archivist::stt::WhisperCli;
use archivist::summarize::OllamaSummarizer;
use archivist::Config;

#[derive(Parser)]
#[command(name = "archivist")]
#[command(about = "Tabletop session transcription and note publishing service")]
struct Cli {
    /// Configuration file, without extension
    #[arg(short, long, default_value = "config/archivist")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;

    info!("Archivist v0.1.0");
    info!("Loaded config: {}", cfg.service.name);
    info!("NATS server: {}", cfg.nats.url);
    info!("Whisper binary: {}", cfg.whisper.binary);
    info!("Summarizer model: {}", cfg.summarizer.model);

    let table = Arc::new(StageTable::standard()?);
    let client = connect(&cfg.nats.url).await?;
    let events = Arc::new(EventPublisher::new(
        client.clone(),
        cfg.nats.event_subject.clone(),
    ));

    let engine = Arc::new(WhisperCli::new(&cfg.whisper));
    let summarizer = Arc::new(OllamaSummarizer::new(&cfg.summarizer)?);
    let options = SessionOptions {
        note_title: cfg.note.title.clone(),
        audit_dir: cfg.summarizer.audit_dir.as_ref().map(PathBuf::from),
    };
    let runner = Arc::new(SessionRunner::new(table, engine, summarizer, options));

    let listener = CommandListener::new(
        client,
        cfg.nats.command_subject.clone(),
        runner,
        events,
    );
    let shutdown = CancellationToken::new();
    listener.run(shutdown).await?;

    info!("Server finished; exiting process");
    Ok(())
}
