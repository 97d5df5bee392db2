use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArchivistError {
    #[error("a session is already running")]
    SessionBusy,

    #[error("unknown stage: {stage}")]
    UnknownStage { stage: String },

    #[error("invalid stage table: {message}")]
    StageTable { message: String },

    #[error("stage {stage} failed: {message}")]
    StageFailed { stage: String, message: String },

    #[error("invalid filename template: {message}")]
    Template { message: String },

    #[error("transcription failed for {path}: {message}")]
    Transcription { path: String, message: String },

    #[error("summarization failed: {message}")]
    Summarization { message: String },

    #[error("session cancelled")]
    Cancelled,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ArchivistError>;
