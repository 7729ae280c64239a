//! Comparison result structures.

use crate::model::{ComponentType, SnapshotInfo};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Kind of change recorded for one component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeType {
    Added,
    Removed,
    Modified,
    /// Defined for completeness; the detector never emits it
    Unchanged,
}

impl std::fmt::Display for ChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Added => write!(f, "Added"),
            Self::Removed => write!(f, "Removed"),
            Self::Modified => write!(f, "Modified"),
            Self::Unchanged => write!(f, "Unchanged"),
        }
    }
}

/// Old and new value of one comparison property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyChange {
    pub old_value: String,
    pub new_value: String,
}

impl PropertyChange {
    pub fn new(old_value: impl Into<String>, new_value: impl Into<String>) -> Self {
        Self {
            old_value: old_value.into(),
            new_value: new_value.into(),
        }
    }
}

/// Outcome for one added, removed or modified component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub component_type: ComponentType,
    pub change_type: ChangeType,
    /// Unique key of the component involved (base side unless added)
    pub identifier: String,
    /// Property changes in comparison-property order
    pub changes: IndexMap<String, PropertyChange>,
}

impl ComparisonResult {
    /// Look up the change for one property.
    #[must_use]
    pub fn change(&self, property: &str) -> Option<&PropertyChange> {
        self.changes.get(property)
    }
}

/// A pair the detector could not evaluate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedPair {
    pub component_type: ComponentType,
    pub identifier: String,
    /// What the pair would have reported
    pub change_type: ChangeType,
    pub reason: String,
}

/// Added/removed/modified counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeCounts {
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
}

impl ChangeCounts {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.added + self.removed + self.modified
    }

    fn record(&mut self, change_type: ChangeType) {
        match change_type {
            ChangeType::Added => self.added += 1,
            ChangeType::Removed => self.removed += 1,
            ChangeType::Modified => self.modified += 1,
            ChangeType::Unchanged => {}
        }
    }
}

/// Summary statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub total_changes: usize,
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
    /// Counts per component type, only for types with changes
    pub by_type: BTreeMap<ComponentType, ChangeCounts>,
}

impl ComparisonSummary {
    #[must_use]
    pub fn from_results(results: &[ComparisonResult]) -> Self {
        let mut totals = ChangeCounts::default();
        let mut by_type: BTreeMap<ComponentType, ChangeCounts> = BTreeMap::new();
        for result in results {
            totals.record(result.change_type);
            by_type
                .entry(result.component_type)
                .or_default()
                .record(result.change_type);
        }
        Self {
            total_changes: totals.total(),
            added: totals.added,
            removed: totals.removed,
            modified: totals.modified,
            by_type,
        }
    }
}

/// Complete result of comparing two snapshots.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[must_use]
pub struct ComparisonReport {
    pub base: SnapshotInfo,
    pub target: SnapshotInfo,
    /// Matcher that produced the pairs
    pub matcher: String,
    /// True when both snapshots had the same fingerprint
    pub identical: bool,
    pub summary: ComparisonSummary,
    pub results: Vec<ComparisonResult>,
    #[serde(default)]
    pub skipped: Vec<SkippedPair>,
}

impl ComparisonReport {
    /// Build a report and compute its summary.
    pub fn new(
        base: SnapshotInfo,
        target: SnapshotInfo,
        matcher: impl Into<String>,
        results: Vec<ComparisonResult>,
        skipped: Vec<SkippedPair>,
    ) -> Self {
        Self {
            base,
            target,
            matcher: matcher.into(),
            identical: false,
            summary: ComparisonSummary::from_results(&results),
            results,
            skipped,
        }
    }

    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.results.is_empty()
    }

    /// Results for one component type, in report order.
    pub fn results_of_type(
        &self,
        component_type: ComponentType,
    ) -> impl Iterator<Item = &ComparisonResult> {
        self.results
            .iter()
            .filter(move |r| r.component_type == component_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(component_type: ComponentType, change_type: ChangeType) -> ComparisonResult {
        ComparisonResult {
            component_type,
            change_type,
            identifier: String::new(),
            changes: IndexMap::new(),
        }
    }

    #[test]
    fn test_summary_counts() {
        let results = vec![
            result(ComponentType::Ram, ChangeType::Added),
            result(ComponentType::Ram, ChangeType::Removed),
            result(ComponentType::Gpu, ChangeType::Modified),
        ];
        let summary = ComparisonSummary::from_results(&results);
        assert_eq!(summary.total_changes, 3);
        assert_eq!(summary.added, 1);
        assert_eq!(summary.modified, 1);
        assert_eq!(summary.by_type[&ComponentType::Ram].total(), 2);
        assert!(!summary.by_type.contains_key(&ComponentType::Cpu));
    }

    #[test]
    fn test_report_has_changes() {
        let empty = ComparisonReport::default();
        assert!(!empty.has_changes());
        let report = ComparisonReport::new(
            SnapshotInfo::default(),
            SnapshotInfo::default(),
            "positional",
            vec![result(ComponentType::Cpu, ChangeType::Modified)],
            Vec::new(),
        );
        assert!(report.has_changes());
        assert_eq!(report.results_of_type(ComponentType::Cpu).count(), 1);
    }
}
