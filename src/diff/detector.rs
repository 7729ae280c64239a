//! Per-pair property comparison.

use super::{ChangeType, ComparisonResult, PropertyChange, SkippedPair};
use crate::cancel::CancellationToken;
use crate::error::Result;
use crate::matching::ComponentPair;
use crate::model::Component;
use crate::strategy::{IdentifierStrategy, StrategyRegistry};
use indexmap::IndexMap;
use std::sync::Arc;

/// Detector output: emitted results plus the pairs it had to skip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Detection {
    pub results: Vec<ComparisonResult>,
    pub skipped: Vec<SkippedPair>,
}

/// Compares the comparison properties of matched pairs.
#[derive(Debug, Clone, Default)]
pub struct ChangeDetector {
    registry: Arc<StrategyRegistry>,
}

impl ChangeDetector {
    #[must_use]
    pub fn new(registry: Arc<StrategyRegistry>) -> Self {
        Self { registry }
    }

    /// Results for `pairs`, in pair order.
    #[must_use]
    pub fn detect(&self, pairs: &[ComponentPair<'_>]) -> Vec<ComparisonResult> {
        self.detect_detailed(pairs).results
    }

    /// Results plus skipped pairs.
    #[must_use]
    pub fn detect_detailed(&self, pairs: &[ComponentPair<'_>]) -> Detection {
        let mut detection = Detection::default();
        for pair in pairs {
            self.evaluate(pair, &mut detection);
        }
        detection
    }

    /// Like [`detect_detailed`](Self::detect_detailed), checking `token`
    /// before each pair.
    pub fn detect_cancellable(
        &self,
        pairs: &[ComponentPair<'_>],
        token: &CancellationToken,
    ) -> Result<Detection> {
        let mut detection = Detection::default();
        for pair in pairs {
            token.check()?;
            self.evaluate(pair, &mut detection);
        }
        Ok(detection)
    }

    fn evaluate(&self, pair: &ComponentPair<'_>, detection: &mut Detection) {
        let primary = pair.primary();
        let change_type = match pair {
            ComponentPair::Matched { .. } => ChangeType::Modified,
            ComponentPair::Removed(_) => ChangeType::Removed,
            ComponentPair::Added(_) => ChangeType::Added,
        };

        let Some(strategy) = self.registry.get(primary.component_type) else {
            tracing::warn!(
                component_type = %primary.component_type,
                identifier = primary.display_key(),
                "No identifier strategy registered, skipping pair"
            );
            detection.skipped.push(SkippedPair {
                component_type: primary.component_type,
                identifier: primary.unique_key.clone(),
                change_type,
                reason: format!("no strategy registered for {}", primary.component_type),
            });
            return;
        };

        let changes = match *pair {
            ComponentPair::Added(target) => side_changes(strategy, target, |v| ("", v)),
            ComponentPair::Removed(base) => side_changes(strategy, base, |v| (v, "")),
            ComponentPair::Matched { base, target } => modified_changes(strategy, base, target),
        };
        if changes.is_empty() && change_type == ChangeType::Modified {
            return;
        }

        detection.results.push(ComparisonResult {
            component_type: primary.component_type,
            change_type,
            identifier: primary.unique_key.clone(),
            changes,
        });
    }
}

/// Every comparison property of a one-sided pair.
fn side_changes<'c>(
    strategy: &dyn IdentifierStrategy,
    component: &'c Component,
    arrange: impl Fn(&'c str) -> (&'c str, &'c str),
) -> IndexMap<String, PropertyChange> {
    strategy
        .comparison_properties()
        .iter()
        .map(|p| {
            let (old, new) = arrange(component.property(p));
            (p.clone(), PropertyChange::new(old, new))
        })
        .collect()
}

/// Comparison properties whose values differ.
fn modified_changes(
    strategy: &dyn IdentifierStrategy,
    base: &Component,
    target: &Component,
) -> IndexMap<String, PropertyChange> {
    strategy
        .comparison_properties()
        .iter()
        .filter_map(|p| {
            let (old, new) = (base.property(p), target.property(p));
            (old != new).then(|| (p.clone(), PropertyChange::new(old, new)))
        })
        .collect()
}
