//! Corpus loading: one directory of plain-text files, one message each.
//!
//! A malformed or unreadable file excludes only that file; the skip count
//! is carried in the result so callers can report it. An unreadable
//! directory is a hard error. Files are visited in sorted name order so a
//! corpus always loads reproducibly.

use mt_common::{Error, Message, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Result of loading one corpus directory.
#[derive(Debug, Clone)]
pub struct LoadedCorpus {
    pub messages: Vec<Message>,
    /// Files excluded because they could not be read or parsed.
    pub skipped: usize,
}

impl LoadedCorpus {
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Load every message file in `path`.
pub fn load_dir(path: &Path) -> Result<LoadedCorpus> {
    let entries = fs::read_dir(path)
        .map_err(|e| Error::Corpus(format!("cannot read directory '{}': {e}", path.display())))?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file())
        .collect();
    files.sort();

    let mut messages = Vec::with_capacity(files.len());
    let mut skipped = 0usize;

    for file in &files {
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let text = match fs::read_to_string(file) {
            Ok(text) => text,
            Err(e) => {
                warn!(file = %file.display(), error = %e, "skipping unreadable file");
                skipped += 1;
                continue;
            }
        };

        match Message::parse(file_name, &text) {
            Ok(message) => messages.push(message),
            Err(e) => {
                warn!(file = %file.display(), error = %e, "skipping malformed file");
                skipped += 1;
            }
        }
    }

    info!(
        dir = %path.display(),
        loaded = messages.len(),
        skipped,
        "corpus loaded"
    );

    Ok(LoadedCorpus { messages, skipped })
}
