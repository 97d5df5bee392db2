use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::context::{SessionContext, SessionRequest};
use super::progress::{EventSink, ProgressReporter};
use super::stages::{
    StageTable, STAGE_INITIALIZATION, STAGE_PAGE_GENERATION, STAGE_SORTING, STAGE_SUMMARIZATION,
    STAGE_TRANSCRIPTION,
};
use crate::error::{ArchivistError, Result};
use crate::stt::TranscriptionEngine;
use crate::summarize::Summarizer;
use crate::transcript::{consolidate, merge_adjacent_duplicates, SpeakerTranscript};
use crate::vault::{create_note, NameTemplate};

/// Per-deployment tunables for the published note and the summary audit copy.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Title substituted for the `{name}` template placeholder and written
    /// as the note heading.
    pub note_title: String,
    /// Directory receiving a date-stamped copy of each generated summary;
    /// `None` disables the audit copy.
    pub audit_dir: Option<PathBuf>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            note_title: "Название".to_string(),
            audit_dir: None,
        }
    }
}

#[derive(Clone, Copy)]
enum StageKind {
    Transcribe,
    Sort,
    Summarize,
    GeneratePage,
}

impl StageKind {
    fn name(self) -> &'static str {
        match self {
            StageKind::Transcribe => STAGE_TRANSCRIPTION,
            StageKind::Sort => STAGE_SORTING,
            StageKind::Summarize => STAGE_SUMMARIZATION,
            StageKind::GeneratePage => STAGE_PAGE_GENERATION,
        }
    }
}

/// The stages carrying actual work, in execution order. Инициализация has
/// no handler; it only anchors the progress scale.
const OPERATIONAL_STAGES: [StageKind; 4] = [
    StageKind::Transcribe,
    StageKind::Sort,
    StageKind::Summarize,
    StageKind::GeneratePage,
];

/// The session coordinator: runs the stage state machine over one accepted
/// request and reports every outcome on the event channel.
pub struct SessionRunner {
    table: Arc<StageTable>,
    engine: Arc<dyn TranscriptionEngine>,
    summarizer: Arc<dyn Summarizer>,
    options: SessionOptions,
    running: Mutex<()>,
}

impl SessionRunner {
    pub fn new(
        table: Arc<StageTable>,
        engine: Arc<dyn TranscriptionEngine>,
        summarizer: Arc<dyn Summarizer>,
        options: SessionOptions,
    ) -> Self {
        Self {
            table,
            engine,
            summarizer,
            options,
            running: Mutex::new(()),
        }
    }

    /// Run one session to its terminal outcome.
    ///
    /// At most one session runs at a time; a concurrent call fails
    /// immediately with `SessionBusy`. Exactly one terminal event is
    /// emitted: `finish` with the note path, or `error`.
    pub async fn run(
        &self,
        request: SessionRequest,
        sink: Arc<dyn EventSink>,
        cancel: CancellationToken,
    ) -> Result<PathBuf> {
        let _guard = self
            .running
            .try_lock()
            .map_err(|_| ArchivistError::SessionBusy)?;

        let reporter = ProgressReporter::new(Arc::clone(&self.table), sink);
        match self.run_stages(request, &reporter, &cancel).await {
            Ok(output_path) => {
                info!(path = %output_path.display(), "Session finished");
                reporter.finish(&output_path).await;
                Ok(output_path)
            }
            Err(error) => {
                warn!(%error, "Session failed");
                reporter.error(error.to_string()).await;
                Err(error)
            }
        }
    }

    async fn run_stages(
        &self,
        request: SessionRequest,
        reporter: &ProgressReporter,
        cancel: &CancellationToken,
    ) -> Result<PathBuf> {
        info!(files = request.files.len(), "Starting session processing");
        let mut ctx = SessionContext::new(request);

        reporter
            .progress(STAGE_INITIALIZATION, 0, "Запуск обработки сессии")
            .await?;

        for stage in OPERATIONAL_STAGES {
            if cancel.is_cancelled() {
                return Err(ArchivistError::Cancelled);
            }

            let name = stage.name();
            let outcome = match stage {
                StageKind::Transcribe => self.transcribe_stage(&mut ctx, reporter, cancel).await,
                StageKind::Sort => self.sort_stage(&mut ctx, reporter).await,
                StageKind::Summarize => self.summarize_stage(&mut ctx, reporter).await,
                StageKind::GeneratePage => self.generate_page_stage(&mut ctx, reporter).await,
            };
            outcome.map_err(|error| match error {
                wrapped @ (ArchivistError::StageFailed { .. } | ArchivistError::Cancelled) => {
                    wrapped
                }
                other => ArchivistError::StageFailed {
                    stage: name.to_string(),
                    message: other.to_string(),
                },
            })?;

            reporter
                .progress(name, 100, format!("{name} завершена"))
                .await?;
        }

        ctx.output_path.ok_or_else(|| ArchivistError::StageFailed {
            stage: STAGE_PAGE_GENERATION.to_string(),
            message: "выходной файл не был создан".to_string(),
        })
    }

    /// Transcribe every input item sequentially, merging duplicates per
    /// speaker as fragments arrive.
    ///
    /// A failed item is skipped and recorded; the stage itself fails only
    /// when every item failed.
    async fn transcribe_stage(
        &self,
        ctx: &mut SessionContext,
        reporter: &ProgressReporter,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let files = ctx.request.files.clone();
        let total = files.len();
        let mut failures: Vec<String> = Vec::new();

        for (index, file) in files.iter().enumerate() {
            if cancel.is_cancelled() {
                return Err(ArchivistError::Cancelled);
            }

            let local = ((index as f64 / total as f64) * 100.0).floor() as u8;
            reporter
                .progress(
                    STAGE_TRANSCRIPTION,
                    local,
                    format!("Запуск обработки {}", file.character),
                )
                .await?;

            match self.engine.transcribe(Path::new(&file.path)).await {
                Ok(fragments) => {
                    let merged = merge_adjacent_duplicates(fragments);
                    info!(
                        character = %file.character,
                        fragments = merged.len(),
                        "Transcribed input file"
                    );
                    ctx.speakers.push(SpeakerTranscript {
                        character: file.character.clone(),
                        fragments: merged,
                    });
                }
                Err(error) => {
                    warn!(
                        character = %file.character,
                        path = %file.path,
                        %error,
                        "Skipping input file after transcription failure"
                    );
                    failures.push(format!("{}: {}", file.character, error));
                    ctx.skipped.push(file.character.clone());
                }
            }
        }

        if total > 0 && failures.len() == total {
            return Err(ArchivistError::StageFailed {
                stage: STAGE_TRANSCRIPTION.to_string(),
                message: format!(
                    "не удалось транскрибировать ни один файл: {}",
                    failures.join("; ")
                ),
            });
        }

        let message = if ctx.skipped.is_empty() {
            "Завершено".to_string()
        } else {
            format!("Завершено, пропущено: {}", ctx.skipped.join(", "))
        };
        reporter.progress(STAGE_TRANSCRIPTION, 100, message).await?;
        Ok(())
    }

    async fn sort_stage(
        &self,
        ctx: &mut SessionContext,
        reporter: &ProgressReporter,
    ) -> Result<()> {
        reporter
            .progress(STAGE_SORTING, 0, "Собираем сессию в хронологическом порядке")
            .await?;

        ctx.consolidated = consolidate(&ctx.speakers);
        if ctx.consolidated.is_empty() {
            return Err(ArchivistError::StageFailed {
                stage: STAGE_SORTING.to_string(),
                message: "расшифровка пуста".to_string(),
            });
        }

        reporter
            .progress(STAGE_SORTING, 100, "Сессия отсортирована")
            .await?;
        Ok(())
    }

    async fn summarize_stage(
        &self,
        ctx: &mut SessionContext,
        reporter: &ProgressReporter,
    ) -> Result<()> {
        reporter
            .progress(STAGE_SUMMARIZATION, 0, "Генерация саммари")
            .await?;

        ctx.summary = self.summarizer.summarize(&ctx.consolidated).await?;

        if let Some(audit_dir) = &self.options.audit_dir {
            let file_name = format!("Summary-{}.txt", chrono::Local::now().format("%Y-%m-%d"));
            let audit_path = audit_dir.join(file_name);
            tokio::fs::create_dir_all(audit_dir).await?;
            tokio::fs::write(&audit_path, &ctx.summary).await?;
            info!(path = %audit_path.display(), "Saved summary audit copy");
        }

        reporter
            .progress(STAGE_SUMMARIZATION, 100, "Саммари успешно сгенерировано")
            .await?;
        Ok(())
    }

    async fn generate_page_stage(
        &self,
        ctx: &mut SessionContext,
        reporter: &ProgressReporter,
    ) -> Result<()> {
        let template = NameTemplate::parse(&ctx.request.format)?;

        reporter
            .progress(STAGE_PAGE_GENERATION, 0, "Создание документа в Obsidian")
            .await?;

        let output_path = create_note(
            &ctx.request.vault,
            &ctx.request.subdirectory,
            &template,
            &self.options.note_title,
            &ctx.summary,
        )
        .await?;

        info!(path = %output_path.display(), "Created vault note");
        ctx.output_path = Some(output_path);
        Ok(())
    }
}
