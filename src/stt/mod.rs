//! Speech-to-text collaborator interface

mod whisper_cli;

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;
use crate::transcript::Fragment;

pub use whisper_cli::WhisperCli;

/// External transcription engine.
///
/// One call per audio file; the returned fragments are ordered with
/// non-decreasing start times.
#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    async fn transcribe(&self, audio_path: &Path) -> Result<Vec<Fragment>>;
}
