//! Parse → match → detect orchestration.

use crate::cancel::CancellationToken;
use crate::config::AppConfig;
use crate::diff::{ChangeDetector, ComparisonReport, ComparisonResult};
use crate::error::{ErrorContext, HwidDiffError, Result};
use crate::matching::{matcher_for, ComponentMatcher, PositionalMatcher};
use crate::model::ParsedSnapshot;
use crate::parsers::SnapshotParser;
use crate::model::SnapshotInfo;
use crate::strategy::StrategyRegistry;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinError;

/// Runs the comparison pipeline.
///
/// Parser, matcher and detector are shared behind `Arc`, so a comparator
/// is cheap to clone into worker tasks.
#[derive(Clone)]
pub struct Comparator {
    parser: SnapshotParser,
    detector: ChangeDetector,
    matcher: Arc<dyn ComponentMatcher>,
}

impl std::fmt::Debug for Comparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Comparator")
            .field("matcher", &self.matcher.name())
            .field("strategies", &self.parser.registry().len())
            .finish()
    }
}

impl Default for Comparator {
    fn default() -> Self {
        Self::new()
    }
}

impl Comparator {
    /// Built-in strategies with positional matching.
    #[must_use]
    pub fn new() -> Self {
        let registry = Arc::new(StrategyRegistry::default());
        Self {
            parser: SnapshotParser::new(Arc::clone(&registry)),
            detector: ChangeDetector::new(registry),
            matcher: Arc::new(PositionalMatcher),
        }
    }

    /// Comparator configured from an [`AppConfig`].
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self::new()
            .with_registry(Arc::new(config.strategy_registry()?))
            .with_matcher(matcher_for(config.matching.strategy)))
    }

    /// Use a different strategy registry for parsing and detection.
    #[must_use]
    pub fn with_registry(mut self, registry: Arc<StrategyRegistry>) -> Self {
        self.parser = SnapshotParser::new(Arc::clone(&registry));
        self.detector = ChangeDetector::new(registry);
        self
    }

    #[must_use]
    pub fn with_matcher(mut self, matcher: Arc<dyn ComponentMatcher>) -> Self {
        self.matcher = matcher;
        self
    }

    #[must_use]
    pub fn parser(&self) -> &SnapshotParser {
        &self.parser
    }

    #[must_use]
    pub fn matcher_name(&self) -> &'static str {
        self.matcher.name()
    }

    /// Compare two snapshots and return the detected changes.
    pub async fn compare(
        &self,
        base_text: &str,
        target_text: &str,
        token: &CancellationToken,
    ) -> Result<Vec<ComparisonResult>> {
        Ok(self
            .compare_detailed(base_text, target_text, token)
            .await?
            .results)
    }

    /// Compare two snapshots and return the full report.
    ///
    /// Both snapshots are parsed concurrently on blocking workers; matching
    /// and detection then run as one further blocking unit. Every await
    /// races against `token`.
    pub async fn compare_detailed(
        &self,
        base_text: &str,
        target_text: &str,
        token: &CancellationToken,
    ) -> Result<ComparisonReport> {
        token.check()?;
        let started = Instant::now();

        let base_task = self.spawn_parse(Arc::from(base_text), token.clone());
        let target_task = self.spawn_parse(Arc::from(target_text), token.clone());

        let (base, target) = tokio::select! {
            biased;
            () = token.cancelled() => return Err(HwidDiffError::Cancelled),
            joined = async { tokio::join!(base_task, target_task) } => joined,
        };
        let base = base
            .map_err(|e| worker_failure("snapshot parse worker failed", e))?
            .context("base snapshot")?;
        let target = target
            .map_err(|e| worker_failure("snapshot parse worker failed", e))?
            .context("target snapshot")?;
        tracing::debug!(elapsed = ?started.elapsed(), "Parsed both snapshots");

        let comparator = self.clone();
        let stage_token = token.clone();
        let stage = tokio::task::spawn_blocking(move || {
            comparator.compare_parsed(&base, &target, &stage_token)
        });

        let outcome = tokio::select! {
            biased;
            () = token.cancelled() => return Err(HwidDiffError::Cancelled),
            outcome = stage => outcome,
        };
        let report = outcome
            .map_err(|e| worker_failure("comparison worker failed", e))?
            .map_err(stage_failure)?;

        tracing::debug!(
            elapsed = ?started.elapsed(),
            changes = report.results.len(),
            "Comparison finished"
        );
        Ok(report)
    }

    /// Synchronous form of [`compare_detailed`](Self::compare_detailed).
    ///
    /// Parses both snapshots in parallel on the rayon pool.
    pub fn compare_blocking(
        &self,
        base_text: &str,
        target_text: &str,
        token: &CancellationToken,
    ) -> Result<ComparisonReport> {
        token.check()?;
        let (base, target) = rayon::join(
            || self.parser.parse_cancellable(base_text, token),
            || self.parser.parse_cancellable(target_text, token),
        );
        let base = base.context("base snapshot")?;
        let target = target.context("target snapshot")?;
        self.compare_parsed_guarded(&base, &target, token)
    }

    /// [`compare_parsed`](Self::compare_parsed) on the calling thread with
    /// the failure mapping of the async path.
    ///
    /// A panic or error in matching or detection becomes
    /// [`HwidDiffError::Comparison`]; cancellation passes through.
    pub fn compare_parsed_guarded(
        &self,
        base: &ParsedSnapshot,
        target: &ParsedSnapshot,
        token: &CancellationToken,
    ) -> Result<ComparisonReport> {
        match catch_unwind(AssertUnwindSafe(|| self.compare_parsed(base, target, token))) {
            Ok(outcome) => outcome.map_err(stage_failure),
            Err(payload) => Err(HwidDiffError::comparison_failed(
                "match/detect stage panicked",
                StagePanic(panic_message(payload.as_ref())),
            )),
        }
    }

    /// Match and detect on snapshots that are already parsed.
    ///
    /// Returns an empty, `identical` report when the fingerprints agree.
    pub fn compare_parsed(
        &self,
        base: &ParsedSnapshot,
        target: &ParsedSnapshot,
        token: &CancellationToken,
    ) -> Result<ComparisonReport> {
        token.check()?;
        let (base_info, target_info) = (base.info(None), target.info(None));

        if base.fingerprint == target.fingerprint {
            tracing::debug!("Snapshots are identical, skipping matching");
            let mut report = ComparisonReport::new(
                base_info,
                target_info,
                self.matcher.name(),
                Vec::new(),
                Vec::new(),
            );
            report.identical = true;
            return Ok(report);
        }

        self.match_and_detect(base, target, base_info, target_info, token)
    }

    fn match_and_detect(
        &self,
        base: &ParsedSnapshot,
        target: &ParsedSnapshot,
        base_info: SnapshotInfo,
        target_info: SnapshotInfo,
        token: &CancellationToken,
    ) -> Result<ComparisonReport> {
        let pairs = self
            .matcher
            .match_components(&base.components, &target.components);
        tracing::debug!(pairs = pairs.len(), matcher = self.matcher.name(), "Matched components");

        let detection = self.detector.detect_cancellable(&pairs, token)?;
        Ok(ComparisonReport::new(
            base_info,
            target_info,
            self.matcher.name(),
            detection.results,
            detection.skipped,
        ))
    }

    fn spawn_parse(
        &self,
        text: Arc<str>,
        token: CancellationToken,
    ) -> tokio::task::JoinHandle<Result<ParsedSnapshot>> {
        let parser = self.parser.clone();
        tokio::task::spawn_blocking(move || parser.parse_cancellable(&text, &token))
    }
}

/// Cancellation passes through; anything else becomes a comparison failure.
fn stage_failure(err: HwidDiffError) -> HwidDiffError {
    if err.is_cancelled() {
        err
    } else {
        HwidDiffError::comparison_failed("match/detect stage failed", err)
    }
}

fn worker_failure(context: &str, err: JoinError) -> HwidDiffError {
    HwidDiffError::comparison_failed(context, err)
}

/// A panic caught while matching or detecting on the calling thread.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct StagePanic(String);

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
