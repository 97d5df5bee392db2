//! Session processing
//!
//! This module provides the session coordinator and its supporting pieces:
//! - the fixed, weighted stage table
//! - overall-progress computation and event emission
//! - the per-run mutable session context
//! - the stage state machine driving transcription, consolidation,
//!   summarization and note generation

mod context;
mod progress;
mod runner;
mod stages;

pub use context::{SessionContext, SessionRequest};
pub use progress::{EventSink, ProgressReporter};
pub use runner::{SessionOptions, SessionRunner};
pub use stages::{
    StageDescriptor, StageTable, STAGE_INITIALIZATION, STAGE_PAGE_GENERATION, STAGE_SORTING,
    STAGE_SUMMARIZATION, STAGE_TRANSCRIPTION,
};
