use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use super::TranscriptionEngine;
use crate::config::WhisperConfig;
use crate::error::{ArchivistError, Result};
use crate::transcript::Fragment;

/// Transcription through an external `whisper-cli` process.
///
/// The binary is invoked once per audio file and its stdout is scanned for
/// segment lines of the form
/// `[00:01:02.345 --> 00:01:04.000]   phrase text`.
pub struct WhisperCli {
    binary: PathBuf,
    model: PathBuf,
    timeout: Duration,
}

impl WhisperCli {
    pub fn new(config: &WhisperConfig) -> Self {
        Self {
            binary: PathBuf::from(&config.binary),
            model: PathBuf::from(&config.model),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    fn failure(&self, audio_path: &Path, message: impl Into<String>) -> ArchivistError {
        ArchivistError::Transcription {
            path: audio_path.display().to_string(),
            message: message.into(),
        }
    }
}

#[async_trait]
impl TranscriptionEngine for WhisperCli {
    async fn transcribe(&self, audio_path: &Path) -> Result<Vec<Fragment>> {
        info!(
            audio = %audio_path.display(),
            binary = %self.binary.display(),
            "Running transcription"
        );

        let mut command = Command::new(&self.binary);
        command
            .arg("-f")
            .arg(audio_path)
            .arg("-m")
            .arg(&self.model)
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| {
                self.failure(
                    audio_path,
                    format!("timed out after {}s", self.timeout.as_secs()),
                )
            })?
            .map_err(|error| self.failure(audio_path, error.to_string()))?;

        if !output.status.success() {
            return Err(self.failure(
                audio_path,
                format!("whisper-cli exited with {}", output.status),
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let fragments: Vec<Fragment> = stdout.lines().filter_map(parse_segment_line).collect();

        debug!(
            audio = %audio_path.display(),
            fragments = fragments.len(),
            "Parsed transcription output"
        );
        Ok(fragments)
    }
}

/// Parse one `[start --> end] phrase` stdout line; returns `None` for
/// anything else whisper-cli prints.
fn parse_segment_line(line: &str) -> Option<Fragment> {
    let rest = line.strip_prefix('[')?;
    let (range, phrase) = rest.split_once(']')?;
    let (start, end) = range.split_once(" --> ")?;

    Some(Fragment {
        start: parse_timestamp(start.trim())?,
        end: parse_timestamp(end.trim())?,
        phrase: phrase.trim().to_string(),
    })
}

/// `HH:MM:SS.mmm` to seconds.
fn parse_timestamp(value: &str) -> Option<f64> {
    let mut parts = value.split(':');
    let hours: u32 = parts.next()?.parse().ok()?;
    let minutes: u32 = parts.next()?.parse().ok()?;
    let seconds: f64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || !seconds.is_finite() || seconds < 0.0 {
        return None;
    }

    Some(f64::from(hours) * 3600.0 + f64::from(minutes) * 60.0 + seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_segment_line() {
        let line = "[00:00:00.000 --> 00:00:13.000]   The terrible bloody war began 100 years ago";
        let fragment = parse_segment_line(line).unwrap();

        assert_eq!(fragment.start, 0.0);
        assert_eq!(fragment.end, 13.0);
        assert_eq!(
            fragment.phrase,
            "The terrible bloody war began 100 years ago"
        );
    }

    #[test]
    fn parses_timestamps_with_hours_and_minutes() {
        let line = "[01:02:03.500 --> 01:02:04.250] ok";
        let fragment = parse_segment_line(line).unwrap();

        assert_eq!(fragment.start, 3723.5);
        assert_eq!(fragment.end, 3724.25);
    }

    #[test]
    fn ignores_log_lines() {
        assert!(parse_segment_line("whisper_init_from_file: loading model").is_none());
        assert!(parse_segment_line("").is_none());
        assert!(parse_segment_line("[unrelated bracket] text").is_none());
    }

    #[test]
    fn rejects_malformed_timestamps() {
        assert!(parse_segment_line("[00:00 --> 00:01] short form").is_none());
        assert!(parse_segment_line("[aa:bb:cc.ddd --> 00:00:01.000] x").is_none());
    }

    #[test]
    fn keeps_empty_phrase() {
        let fragment = parse_segment_line("[00:00:01.000 --> 00:00:02.000]   ").unwrap();
        assert_eq!(fragment.phrase, "");
    }
}
