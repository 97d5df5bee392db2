use std::path::PathBuf;

use crate::nats::InputFile;
use crate::transcript::{SpeakerTranscript, Utterance};

/// An accepted session job. Immutable for the lifetime of the run.
#[derive(Debug, Clone)]
pub struct SessionRequest {
    pub files: Vec<InputFile>,
    /// Root of the target document vault.
    pub vault: PathBuf,
    /// Subdirectory of the vault receiving the note.
    pub subdirectory: String,
    /// Filename template with `{number}` and `{name}` placeholders.
    pub format: String,
}

/// Mutable state accumulated while one session runs.
///
/// Owned exclusively by the coordinator and dropped when the session ends.
#[derive(Debug)]
pub struct SessionContext {
    pub request: SessionRequest,
    /// Per-speaker merged fragment sequences, in processing order.
    pub speakers: Vec<SpeakerTranscript>,
    pub consolidated: Vec<Utterance>,
    pub summary: String,
    pub output_path: Option<PathBuf>,
    /// Characters whose transcription failed and was skipped.
    pub skipped: Vec<String>,
}

impl SessionContext {
    pub fn new(request: SessionRequest) -> Self {
        Self {
            request,
            speakers: Vec::new(),
            consolidated: Vec::new(),
            summary: String::new(),
            output_path: None,
            skipped: Vec::new(),
        }
    }
}
