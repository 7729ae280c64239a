//! One baseline against many targets.

use super::{Comparator, LoadedSnapshot};
use crate::cancel::CancellationToken;
use crate::diff::ComparisonReport;
use crate::error::{ErrorContext, Result};
use crate::model::SnapshotInfo;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Outcome for one target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetComparison {
    pub label: String,
    /// Present when the comparison succeeded
    pub report: Option<ComparisonReport>,
    /// Present when it failed
    pub error: Option<String>,
}

impl TargetComparison {
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.report.as_ref().is_some_and(ComparisonReport::has_changes)
    }
}

/// Results of comparing a baseline against several targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiComparison {
    pub baseline: SnapshotInfo,
    pub targets: Vec<TargetComparison>,
}

impl MultiComparison {
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.targets.iter().any(TargetComparison::has_changes)
    }

    #[must_use]
    pub fn failures(&self) -> usize {
        self.targets.iter().filter(|t| t.error.is_some()).count()
    }
}

/// Compare `baseline` against every target in parallel.
///
/// The baseline is parsed once; a failing target is recorded and does not
/// stop the others. Baseline failures and cancellation abort the run.
pub fn compare_many(
    comparator: &Comparator,
    baseline: &LoadedSnapshot,
    targets: &[LoadedSnapshot],
    token: &CancellationToken,
) -> Result<MultiComparison> {
    let base = comparator
        .parser()
        .parse_cancellable(&baseline.text, token)
        .with_context(|| format!("baseline {}", baseline.label))?;
    let baseline_info = base.info(Some(baseline.label.clone()));

    let outcomes: Vec<Result<TargetComparison>> = targets
        .par_iter()
        .map(|target| {
            let outcome = comparator
                .parser()
                .parse_cancellable(&target.text, token)
                .and_then(|parsed| {
                    let mut report = comparator.compare_parsed_guarded(&base, &parsed, token)?;
                    report.base.label = Some(baseline.label.clone());
                    report.target.label = Some(target.label.clone());
                    Ok(report)
                });
            match outcome {
                Ok(report) => Ok(TargetComparison {
                    label: target.label.clone(),
                    report: Some(report),
                    error: None,
                }),
                Err(e) if e.is_cancelled() => Err(e),
                Err(e) => {
                    tracing::warn!("Comparison against {} failed: {}", target.label, e);
                    Ok(TargetComparison {
                        label: target.label.clone(),
                        report: None,
                        error: Some(e.to_string()),
                    })
                }
            }
        })
        .collect();

    let targets = outcomes.into_iter().collect::<Result<Vec<_>>>()?;
    Ok(MultiComparison {
        baseline: baseline_info,
        targets,
    })
}
