//! A parsed snapshot and the record of what the parser dropped.

use super::{Component, ComponentType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use xxhash_rust::xxh3::xxh3_64;

/// Why a section produced no component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DropReason {
    /// The section's first line is not in the header table
    UnrecognizedHeader,
    /// No `key: value` line in the section
    NoProperties,
    /// The type resolved but no strategy is registered for it
    MissingStrategy { component_type: ComponentType },
    /// Neither the primary key nor any fallback identifier is present
    NoIdentifier { component_type: ComponentType },
}

impl std::fmt::Display for DropReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnrecognizedHeader => write!(f, "unrecognized header"),
            Self::NoProperties => write!(f, "no properties"),
            Self::MissingStrategy { component_type } => {
                write!(f, "no strategy registered for {component_type}")
            }
            Self::NoIdentifier { component_type } => {
                write!(f, "no identifier for {component_type}")
            }
        }
    }
}

/// A section that the parser skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedSection {
    /// Zero-based position of the section in the snapshot
    pub index: usize,
    /// Trimmed first line of the section
    pub header: String,
    #[serde(flatten)]
    pub reason: DropReason,
}

/// Result of parsing one snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedSnapshot {
    /// Components in order of appearance
    pub components: Vec<Component>,
    /// Sections that yielded no component
    pub dropped: Vec<DroppedSection>,
    /// xxh3 hash of the raw snapshot text
    pub fingerprint: u64,
}

impl ParsedSnapshot {
    /// Compute the fingerprint used to short-circuit identical snapshots.
    #[must_use]
    pub fn fingerprint_of(text: &str) -> u64 {
        xxh3_64(text.as_bytes())
    }

    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Number of components per type, in type order.
    #[must_use]
    pub fn counts_by_type(&self) -> BTreeMap<ComponentType, usize> {
        let mut counts = BTreeMap::new();
        for component in &self.components {
            *counts.entry(component.component_type).or_insert(0) += 1;
        }
        counts
    }

    /// Components of a single type, in order.
    pub fn of_type(&self, component_type: ComponentType) -> impl Iterator<Item = &Component> {
        self.components
            .iter()
            .filter(move |c| c.component_type == component_type)
    }

    /// Condensed description for reports.
    #[must_use]
    pub fn info(&self, label: Option<String>) -> SnapshotInfo {
        SnapshotInfo {
            label,
            component_count: self.components.len(),
            dropped_sections: self.dropped.len(),
            fingerprint: format!("{:016x}", self.fingerprint),
            dropped: self.dropped.clone(),
        }
    }
}

/// Summary of one side of a comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotInfo {
    /// File name or other caller-supplied label
    pub label: Option<String>,
    pub component_count: usize,
    pub dropped_sections: usize,
    /// Hex xxh3 fingerprint of the raw text
    pub fingerprint: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dropped: Vec<DroppedSection>,
}
