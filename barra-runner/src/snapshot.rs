//! Meet snapshot loading.
//!
//! A snapshot is a JSON array of entries, exactly as the registration desk
//! and the scoring table left them. Loading checks the ledger structure and
//! registration ids; it does not resolve modalities.

use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use barra_core::domain::{Entry, EntryError, EntryId};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse snapshot: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate entry id {0}")]
    DuplicateId(EntryId),
    #[error(transparent)]
    Entry(#[from] EntryError),
}

/// Read and validate a snapshot file.
pub fn load_snapshot(path: &Path, max_attempts: usize) -> Result<Vec<Entry>, SnapshotError> {
    let content = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_snapshot(&content, max_attempts)
}

/// Parse and validate a snapshot from a JSON string.
pub fn parse_snapshot(json: &str, max_attempts: usize) -> Result<Vec<Entry>, SnapshotError> {
    let entries: Vec<Entry> = serde_json::from_str(json)?;
    validate_snapshot(&entries, max_attempts)?;
    debug!(entries = entries.len(), "loaded snapshot");
    Ok(entries)
}

pub fn validate_snapshot(entries: &[Entry], max_attempts: usize) -> Result<(), SnapshotError> {
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        if !seen.insert(entry.id) {
            return Err(SnapshotError::DuplicateId(entry.id));
        }
        entry.validate(max_attempts)?;
    }
    Ok(())
}
