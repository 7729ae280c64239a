//! **Parse and compare hardware identifier snapshots.**
//!
//! A hardware snapshot is the plain-text report a hardware enumeration tool
//! writes for one machine: a list of sections such as `DISK DRIVE
//! INFORMATION` or `GPU INFORMATION`, each holding `Label: Value` lines.
//! `hwid-diff` turns two such snapshots into typed component lists, pairs
//! the components of each type and reports what was added, removed or
//! modified.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: [`Component`], [`ComponentType`] and [`ParsedSnapshot`],
//!   including the record of sections the parser dropped.
//! - **[`strategy`]**: which properties identify and describe each component
//!   type, looked up through a [`StrategyRegistry`].
//! - **[`parsers`]**: the section splitter and [`SnapshotParser`].
//! - **[`matching`]**: pairing base and target components, positionally or
//!   by unique key.
//! - **[`diff`]**: the [`ChangeDetector`] and the comparison result types.
//! - **[`pipeline`]**: the [`Comparator`] that runs parse → match → detect,
//!   with cancellation and a fixed failure code.
//! - **[`reports`]**: summary, Markdown and JSON renderers.
//! - **[`config`]**: YAML configuration, validation and strategy overrides.
//!
//! ## Comparing two snapshots
//!
//! ```
//! use hwid_diff::{CancellationToken, ChangeType, Comparator};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> hwid_diff::Result<()> {
//! let base = "DISK DRIVE INFORMATION\nSerialNumber: WD-1\nModel: WDC\n";
//! let target = "DISK DRIVE INFORMATION\nSerialNumber: WD-2\nModel: WDC\n";
//!
//! let results = Comparator::new()
//!     .compare(base, target, &CancellationToken::new())
//!     .await?;
//!
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].change_type, ChangeType::Modified);
//! assert_eq!(results[0].changes["SerialNumber"].new_value, "WD-2");
//! # Ok(())
//! # }
//! ```
//!
//! ## Command-Line Interface (CLI)
//!
//! The `hwid-diff` binary wraps this library with `compare`, `compare-many`
//! and `inspect` subcommands; see the README.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod cancel;
pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod matching;
pub mod model;
pub mod parsers;
pub mod pipeline;
pub mod reports;
pub mod strategy;

// Re-export main types for convenience
pub use cancel::CancellationToken;
pub use config::{AppConfig, AppConfigBuilder, ConfigError, Validatable};
pub use diff::{
    ChangeDetector, ChangeType, ComparisonReport, ComparisonResult, ComparisonSummary,
    PropertyChange,
};
pub use error::{ErrorContext, HwidDiffError, Result, COMPARISON_FAILED_CODE};
pub use matching::{ComponentMatcher, ComponentPair, MatchingStrategyKind};
pub use model::{Component, ComponentType, ParsedSnapshot};
pub use parsers::{parse_snapshot, SnapshotParser};
pub use pipeline::Comparator;
pub use reports::{ReportFormat, ReportGenerator};
pub use strategy::{IdentifierStrategy, StrategyRegistry, TypeStrategy};
