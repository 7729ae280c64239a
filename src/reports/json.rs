//! JSON report generator.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::{ComparisonReport, ComparisonResult, ComparisonSummary, SkippedPair};
use crate::model::{Component, ParsedSnapshot, SnapshotInfo};
use crate::pipeline::MultiComparison;
use chrono::Utc;
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    pretty: bool,
}

impl JsonReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn render<T: Serialize>(&self, value: &T) -> Result<String, ReportError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct ToolInfo {
    name: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct JsonReportMetadata {
    tool: ToolInfo,
    generated_at: String,
}

impl JsonReportMetadata {
    fn now() -> Self {
        Self {
            tool: ToolInfo {
                name: env!("CARGO_PKG_NAME"),
                version: env!("CARGO_PKG_VERSION"),
            },
            generated_at: Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Serialize)]
struct JsonComparisonReport<'a> {
    metadata: JsonReportMetadata,
    base: &'a SnapshotInfo,
    target: &'a SnapshotInfo,
    matcher: &'a str,
    identical: bool,
    summary: &'a ComparisonSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    results: Option<&'a [ComparisonResult]>,
    #[serde(skip_serializing_if = "no_skipped")]
    skipped: &'a [SkippedPair],
}

fn no_skipped(skipped: &&[SkippedPair]) -> bool {
    skipped.is_empty()
}

#[derive(Serialize)]
struct JsonSnapshotReport<'a> {
    metadata: JsonReportMetadata,
    snapshot: &'a SnapshotInfo,
    counts_by_type: std::collections::BTreeMap<crate::model::ComponentType, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    components: Option<&'a [Component]>,
}

#[derive(Serialize)]
struct JsonMultiReport<'a> {
    metadata: JsonReportMetadata,
    #[serde(flatten)]
    multi: &'a MultiComparison,
}

/// Strip the dropped-section lists unless they were asked for.
fn info_for(info: &SnapshotInfo, config: &ReportConfig) -> SnapshotInfo {
    let mut info = info.clone();
    if !config.show_dropped {
        info.dropped.clear();
    }
    info
}

impl ReportGenerator for JsonReporter {
    fn generate_comparison_report(
        &self,
        report: &ComparisonReport,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let (base, target) = (info_for(&report.base, config), info_for(&report.target, config));
        self.render(&JsonComparisonReport {
            metadata: JsonReportMetadata::now(),
            base: &base,
            target: &target,
            matcher: &report.matcher,
            identical: report.identical,
            summary: &report.summary,
            results: (!config.summary_only).then_some(report.results.as_slice()),
            skipped: &report.skipped,
        })
    }

    fn generate_snapshot_report(
        &self,
        snapshot: &ParsedSnapshot,
        info: &SnapshotInfo,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let info = info_for(info, config);
        self.render(&JsonSnapshotReport {
            metadata: JsonReportMetadata::now(),
            snapshot: &info,
            counts_by_type: snapshot.counts_by_type(),
            components: (!config.summary_only).then_some(snapshot.components.as_slice()),
        })
    }

    fn generate_multi_report(
        &self,
        multi: &MultiComparison,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        self.render(&JsonMultiReport {
            metadata: JsonReportMetadata::now(),
            multi,
        })
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::test_support::sample_report;

    #[test]
    fn test_comparison_json_shape() {
        let out = JsonReporter::new()
            .generate_comparison_report(&sample_report(), &ReportConfig::default())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["metadata"]["tool"]["name"], "hwid-diff");
        assert_eq!(value["summary"]["added"], 1);
        assert_eq!(value["results"][0]["component_type"], "DISK DRIVE");
        assert_eq!(value["results"][0]["change_type"], "Modified");
        assert_eq!(
            value["results"][0]["changes"]["SerialNumber"]["old_value"],
            "WD-OLD"
        );
        assert!(value["base"].get("dropped").is_none());
    }

    #[test]
    fn test_show_dropped_includes_sections() {
        let config = ReportConfig::default().with_dropped(true);
        let out = JsonReporter::new()
            .pretty(false)
            .generate_comparison_report(&sample_report(), &config)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["base"]["dropped"][0]["reason"], "unrecognized_header");
    }

    #[test]
    fn test_summary_only_omits_results() {
        let config = ReportConfig {
            summary_only: true,
            ..ReportConfig::default()
        };
        let out = JsonReporter::new()
            .generate_comparison_report(&sample_report(), &config)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(value.get("results").is_none());
    }
}
