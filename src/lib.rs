pub mod config;
pub mod error;
pub mod nats;
pub mod session;
pub mod stt;
pub mod summarize;
pub mod transcript;
pub mod vault;

pub use config::Config;
pub use error::{ArchivistError, Result};
pub use nats::{Command, CommandListener, EventPublisher, InputFile, Reply, SessionEvent};
pub use session::{
    EventSink, ProgressReporter, SessionContext, SessionOptions, SessionRequest, SessionRunner,
    StageDescriptor, StageTable,
};
pub use stt::{TranscriptionEngine, WhisperCli};
pub use summarize::{OllamaSummarizer, Summarizer};
pub use transcript::{
    consolidate, merge_adjacent_duplicates, Fragment, SpeakerTranscript, Utterance,
};
pub use vault::{allocate_note_path, create_note, NameTemplate, NOTE_EXTENSION};
