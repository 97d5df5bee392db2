//! Vault note naming and materialization

mod namer;
mod template;

pub use namer::{allocate_note_path, create_note, NOTE_EXTENSION};
pub use template::NameTemplate;
