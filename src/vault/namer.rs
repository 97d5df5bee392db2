use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

use super::NameTemplate;
use crate::error::Result;

/// Extension of every generated vault document.
pub const NOTE_EXTENSION: &str = ".md";

/// Pick the next collision-free note path in `vault/subdirectory`.
///
/// Existing entries whose stem matches the template contribute their
/// captured number; the allocated number is the maximum plus one, or 1 for
/// a directory with no matches. The directory is created when absent. Not
/// safe under concurrent invocation against the same directory; the
/// coordinator guarantees a single session at a time.
pub async fn allocate_note_path(
    vault: &Path,
    subdirectory: &str,
    template: &NameTemplate,
    title: &str,
) -> Result<PathBuf> {
    let dir = vault.join(subdirectory);
    fs::create_dir_all(&dir).await?;

    let mut max_number: u64 = 0;
    let mut entries = fs::read_dir(&dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        let Some(stem) = name.strip_suffix(NOTE_EXTENSION) else {
            continue;
        };
        if let Some(number) = template.match_number(stem) {
            max_number = max_number.max(number);
        }
    }

    let next_number = max_number + 1;
    let file_name = format!("{}{NOTE_EXTENSION}", template.render(next_number, title));
    debug!(dir = %dir.display(), file = %file_name, "Allocated note name");
    Ok(dir.join(file_name))
}

/// Allocate the note path and write the initial document body: the title
/// heading followed by the session summary.
pub async fn create_note(
    vault: &Path,
    subdirectory: &str,
    template: &NameTemplate,
    title: &str,
    summary: &str,
) -> Result<PathBuf> {
    let path = allocate_note_path(vault, subdirectory, template, title).await?;

    let mut body = format!("# {title}\n\n");
    if !summary.is_empty() {
        body.push_str(summary);
        body.push('\n');
    }
    fs::write(&path, body).await?;

    Ok(path)
}
