//! Reading snapshot files.

use crate::model::ParsedSnapshot;
use crate::parsers::SnapshotParser;
use anyhow::{Context, Result};
use std::path::Path;

/// Raw snapshot text with the label shown in reports.
#[derive(Debug, Clone)]
pub struct LoadedSnapshot {
    /// File name of the snapshot
    pub label: String,
    pub text: String,
}

impl LoadedSnapshot {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}

/// Label for a snapshot path: its file name, or the whole path.
#[must_use]
pub fn snapshot_label(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

/// Read a snapshot file.
pub fn read_snapshot(path: &Path, quiet: bool) -> Result<LoadedSnapshot> {
    if !quiet {
        tracing::info!("Reading snapshot: {:?}", path);
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot file: {}", path.display()))?;
    Ok(LoadedSnapshot::new(snapshot_label(path), text))
}

/// Read and parse a snapshot file.
pub fn parse_snapshot_file(
    path: &Path,
    parser: &SnapshotParser,
    quiet: bool,
) -> Result<(LoadedSnapshot, ParsedSnapshot)> {
    let loaded = read_snapshot(path, quiet)?;
    let parsed = parser
        .parse(&loaded.text)
        .with_context(|| format!("Failed to parse snapshot: {}", path.display()))?;

    if !quiet {
        tracing::info!(
            "Parsed {} components ({} sections dropped)",
            parsed.component_count(),
            parsed.dropped.len()
        );
    }
    Ok((loaded, parsed))
}
