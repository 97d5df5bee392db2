use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use super::stages::StageTable;
use crate::error::Result;
use crate::nats::SessionEvent;

/// Outbound side of the one-way event channel.
///
/// Emission is fire-and-forget: implementations log delivery failures and
/// never surface them to the pipeline.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: SessionEvent);
}

/// Maps stage-local progress to the session-wide 0-100 value and emits
/// lifecycle events.
pub struct ProgressReporter {
    table: Arc<StageTable>,
    sink: Arc<dyn EventSink>,
}

impl ProgressReporter {
    pub fn new(table: Arc<StageTable>, sink: Arc<dyn EventSink>) -> Self {
        Self { table, sink }
    }

    /// Overall percentage for `local` percent of progress inside `stage`.
    pub fn overall(&self, stage: &str, local: u8) -> Result<u8> {
        let (offset, weight) = self.table.offset_and_weight(stage)?;
        let normalized = f64::from(local) / 100.0;
        Ok(((offset + normalized * weight) * 100.0).floor() as u8)
    }

    pub async fn progress(
        &self,
        stage: &str,
        local: u8,
        message: impl Into<String>,
    ) -> Result<()> {
        let percentage = self.overall(stage, local)?;
        self.sink
            .emit(SessionEvent::Progress {
                stage: stage.to_string(),
                percentage,
                message: message.into(),
            })
            .await;
        Ok(())
    }

    pub async fn finish(&self, output_path: &Path) {
        self.sink
            .emit(SessionEvent::Finish {
                message: output_path.display().to_string(),
            })
            .await;
    }

    pub async fn error(&self, message: impl Into<String>) {
        self.sink
            .emit(SessionEvent::Error {
                message: message.into(),
            })
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ArchivistError;
    use crate::session::stages::{
        STAGE_INITIALIZATION, STAGE_PAGE_GENERATION, STAGE_SORTING, STAGE_SUMMARIZATION,
        STAGE_TRANSCRIPTION,
    };
    use tokio::sync::mpsc;

    struct ChannelSink(mpsc::UnboundedSender<SessionEvent>);

    #[async_trait]
    impl EventSink for ChannelSink {
        async fn emit(&self, event: SessionEvent) {
            let _ = self.0.send(event);
        }
    }

    fn reporter() -> (ProgressReporter, mpsc::UnboundedReceiver<SessionEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let table = Arc::new(StageTable::standard().unwrap());
        (ProgressReporter::new(table, Arc::new(ChannelSink(tx))), rx)
    }

    #[test]
    fn stage_boundaries_map_to_cumulative_offsets() {
        let (reporter, _rx) = reporter();

        assert_eq!(reporter.overall(STAGE_INITIALIZATION, 0).unwrap(), 0);
        assert_eq!(reporter.overall(STAGE_INITIALIZATION, 100).unwrap(), 1);
        assert_eq!(reporter.overall(STAGE_TRANSCRIPTION, 0).unwrap(), 1);
        assert_eq!(reporter.overall(STAGE_TRANSCRIPTION, 100).unwrap(), 41);
        assert_eq!(reporter.overall(STAGE_SORTING, 0).unwrap(), 41);
        assert_eq!(reporter.overall(STAGE_SORTING, 100).unwrap(), 45);
        assert_eq!(reporter.overall(STAGE_SUMMARIZATION, 0).unwrap(), 45);
        assert_eq!(reporter.overall(STAGE_SUMMARIZATION, 100).unwrap(), 95);
        assert_eq!(reporter.overall(STAGE_PAGE_GENERATION, 0).unwrap(), 95);
        assert_eq!(reporter.overall(STAGE_PAGE_GENERATION, 100).unwrap(), 100);
    }

    #[test]
    fn overall_is_monotonic_within_a_stage() {
        let (reporter, _rx) = reporter();
        let mut previous = 0;
        for local in 0..=100 {
            let overall = reporter.overall(STAGE_TRANSCRIPTION, local).unwrap();
            assert!(overall >= previous);
            previous = overall;
        }
        assert_eq!(previous, 41);
    }

    #[test]
    fn unknown_stage_fails_fast() {
        let (reporter, _rx) = reporter();
        assert!(matches!(
            reporter.overall("Подготовка", 50),
            Err(ArchivistError::UnknownStage { .. })
        ));
    }

    #[tokio::test]
    async fn progress_event_carries_overall_percentage() {
        let (reporter, mut rx) = reporter();
        reporter
            .progress(STAGE_SUMMARIZATION, 50, "Генерация саммари")
            .await
            .unwrap();

        match rx.recv().await.unwrap() {
            SessionEvent::Progress {
                stage,
                percentage,
                message,
            } => {
                assert_eq!(stage, STAGE_SUMMARIZATION);
                assert_eq!(percentage, 70);
                assert_eq!(message, "Генерация саммари");
            }
            other => panic!("expected progress event, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn finish_event_carries_output_path() {
        let (reporter, mut rx) = reporter();
        reporter.finish(Path::new("/vault/notes/Сессия 1.md")).await;

        match rx.recv().await.unwrap() {
            SessionEvent::Finish { message } => {
                assert_eq!(message, "/vault/notes/Сессия 1.md");
            }
            other => panic!("expected finish event, got {other:?}"),
        }
    }
}
