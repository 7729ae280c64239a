//! Report type definitions.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Pick from the output file extension, summary otherwise
    #[default]
    Auto,
    /// Compact terminal summary
    Summary,
    /// Human-readable Markdown
    #[value(alias = "md")]
    Markdown,
    /// Structured JSON output
    Json,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Summary => write!(f, "summary"),
            Self::Markdown => write!(f, "markdown"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Options shared by all reporters.
#[derive(Debug, Clone, Default)]
pub struct ReportConfig {
    /// List dropped snapshot sections
    pub show_dropped: bool,
    /// Only print counts, no per-component detail
    pub summary_only: bool,
}

impl ReportConfig {
    #[must_use]
    pub const fn with_dropped(mut self, show: bool) -> Self {
        self.show_dropped = show;
        self
    }
}
