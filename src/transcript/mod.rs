//! Transcript consolidation
//!
//! Two pure phases over per-speaker transcription output:
//! - merge adjacent duplicate fragments within one speaker's sequence
//! - interleave all speakers' fragments into one chronological transcript

mod consolidate;
mod merge;

use serde::{Deserialize, Serialize};

pub use consolidate::consolidate;
pub use merge::{merge_adjacent_duplicates, MERGE_EPSILON_SECS};

/// One timed utterance as produced by the transcription engine.
///
/// Times are seconds from the start of the speaker's recording; `end` is
/// never before `start`.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub start: f64,
    pub end: f64,
    pub phrase: String,
}

/// One speaker's merged fragment sequence, in arrival order.
#[derive(Debug, Clone)]
pub struct SpeakerTranscript {
    pub character: String,
    pub fragments: Vec<Fragment>,
}

/// A fragment attributed to its speaker inside the consolidated transcript.
///
/// The serialized field names are the shape the summarizer prompt embeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    pub character: String,
    #[serde(rename = "startTime")]
    pub start: f64,
    #[serde(rename = "endTime")]
    pub end: f64,
    pub phrase: String,
}
