//! The fixed stage table
//!
//! Stage names are the user-facing labels shown by the desktop client, so
//! they stay in Russian on the wire.

use crate::error::{ArchivistError, Result};

pub const STAGE_INITIALIZATION: &str = "Инициализация";
pub const STAGE_TRANSCRIPTION: &str = "Транскрибация";
pub const STAGE_SORTING: &str = "Сортировка";
pub const STAGE_SUMMARIZATION: &str = "Суммаризация";
pub const STAGE_PAGE_GENERATION: &str = "Генерация страницы";

const WEIGHT_SUM_TOLERANCE: f64 = 0.001;

/// One named, weighted phase of the session pipeline.
#[derive(Debug, Clone, Copy)]
pub struct StageDescriptor {
    pub name: &'static str,
    /// Share of the overall progress bar, in (0, 1].
    pub weight: f64,
}

/// The ordered stage table with precomputed cumulative start offsets.
///
/// Built once at startup and immutable afterwards. Construction fails when
/// the weights do not sum to 1.0 within tolerance.
#[derive(Debug)]
pub struct StageTable {
    entries: Vec<(StageDescriptor, f64)>,
}

impl StageTable {
    pub fn new(stages: Vec<StageDescriptor>) -> Result<Self> {
        let total: f64 = stages.iter().map(|stage| stage.weight).sum();
        if (total - 1.0).abs() >= WEIGHT_SUM_TOLERANCE {
            return Err(ArchivistError::StageTable {
                message: format!("stage weights sum to {total}, expected 1.0"),
            });
        }

        let mut offset = 0.0;
        let entries = stages
            .into_iter()
            .map(|stage| {
                let entry = (stage, offset);
                offset += stage.weight;
                entry
            })
            .collect();

        Ok(Self { entries })
    }

    /// The pipeline's stage table, in execution order.
    pub fn standard() -> Result<Self> {
        Self::new(vec![
            StageDescriptor {
                name: STAGE_INITIALIZATION,
                weight: 0.01,
            },
            StageDescriptor {
                name: STAGE_TRANSCRIPTION,
                weight: 0.40,
            },
            StageDescriptor {
                name: STAGE_SORTING,
                weight: 0.04,
            },
            StageDescriptor {
                name: STAGE_SUMMARIZATION,
                weight: 0.50,
            },
            StageDescriptor {
                name: STAGE_PAGE_GENERATION,
                weight: 0.05,
            },
        ])
    }

    /// Cumulative start offset and weight for a stage.
    ///
    /// An unknown name is a programmer error and fails fast.
    pub fn offset_and_weight(&self, stage: &str) -> Result<(f64, f64)> {
        self.entries
            .iter()
            .find(|(descriptor, _)| descriptor.name == stage)
            .map(|(descriptor, offset)| (*offset, descriptor.weight))
            .ok_or_else(|| ArchivistError::UnknownStage {
                stage: stage.to_string(),
            })
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &StageDescriptor> {
        self.entries.iter().map(|(descriptor, _)| descriptor)
    }
}
