//! Report generation for comparison results.
//!
//! Output formats:
//! - Summary: compact terminal output, optionally colored
//! - Markdown: human-readable documentation
//! - JSON: structured data for programmatic integration
//!
//! Each format renders three kinds of report: a two-snapshot comparison, a
//! single-snapshot inspection and a baseline-versus-many comparison.

pub mod escape;
mod json;
mod markdown;
mod summary;
mod types;

pub use json::JsonReporter;
pub use markdown::MarkdownReporter;
pub use summary::SummaryReporter;
pub use types::{ReportConfig, ReportFormat};

use crate::diff::ComparisonReport;
use crate::model::{ParsedSnapshot, SnapshotInfo};
use crate::pipeline::MultiComparison;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Render a two-snapshot comparison.
    fn generate_comparison_report(
        &self,
        report: &ComparisonReport,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Render the parsed content of one snapshot.
    fn generate_snapshot_report(
        &self,
        snapshot: &ParsedSnapshot,
        info: &SnapshotInfo,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Render a baseline compared against several targets.
    fn generate_multi_report(
        &self,
        multi: &MultiComparison,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Write a comparison report to a writer
    fn write_comparison_report(
        &self,
        report: &ComparisonReport,
        config: &ReportConfig,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let rendered = self.generate_comparison_report(report, config)?;
        writer.write_all(rendered.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    create_reporter_with_options(format, true)
}

/// Create a report generator with color control
#[must_use]
pub fn create_reporter_with_options(
    format: ReportFormat,
    use_color: bool,
) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Auto | ReportFormat::Summary => {
            if use_color {
                Box::new(SummaryReporter::new())
            } else {
                Box::new(SummaryReporter::new().no_color())
            }
        }
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
        ReportFormat::Json => Box::new(JsonReporter::new()),
    }
}

/// Pluralize a noun for a count.
pub(crate) fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}
