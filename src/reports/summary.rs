//! Summary report generator for shell output.
//!
//! Provides a compact, human-readable summary for terminal usage.

use super::{plural, ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::{ChangeType, ComparisonReport, ComparisonResult};
use crate::model::{ParsedSnapshot, SnapshotInfo};
use crate::pipeline::MultiComparison;

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

fn label(info: &SnapshotInfo, fallback: &'static str) -> String {
    info.label.clone().unwrap_or_else(|| fallback.to_string())
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    colored: bool,
}

impl SummaryReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn change_marker(&self, change_type: ChangeType) -> String {
        match change_type {
            ChangeType::Added => self.color("+", "green"),
            ChangeType::Removed => self.color("-", "red"),
            ChangeType::Modified => self.color("~", "yellow"),
            ChangeType::Unchanged => self.color("=", "dim"),
        }
    }

    fn push_counts(&self, lines: &mut Vec<String>, report: &ComparisonReport) {
        let summary = &report.summary;
        if summary.added > 0 {
            lines.push(format!(
                "  {} added",
                self.color(&format!("+{}", plural(summary.added, "component", "components")), "green")
            ));
        }
        if summary.removed > 0 {
            lines.push(format!(
                "  {} removed",
                self.color(&format!("-{}", plural(summary.removed, "component", "components")), "red")
            ));
        }
        if summary.modified > 0 {
            lines.push(format!(
                "  {} modified",
                self.color(
                    &format!("~{}", plural(summary.modified, "component", "components")),
                    "yellow"
                )
            ));
        }
        if summary.total_changes == 0 {
            let text = if report.identical {
                "No changes (snapshots are identical)"
            } else {
                "No changes"
            };
            lines.push(format!("  {}", self.color(text, "dim")));
        }
    }

    fn push_result(&self, lines: &mut Vec<String>, result: &ComparisonResult) {
        let key = if result.identifier.is_empty() {
            self.color("<no primary id>", "dim")
        } else {
            result.identifier.clone()
        };
        lines.push(format!(
            "  {} [{}] {}",
            self.change_marker(result.change_type),
            result.component_type,
            key
        ));
        for (property, change) in &result.changes {
            let line = match result.change_type {
                ChangeType::Added => format!("{property}: {}", change.new_value),
                ChangeType::Removed => format!("{property}: {}", change.old_value),
                _ => format!(
                    "{property}: {} → {}",
                    self.color(&change.old_value, "red"),
                    self.color(&change.new_value, "green")
                ),
            };
            lines.push(format!("      {line}"));
        }
    }

    fn push_dropped(&self, lines: &mut Vec<String>, side: &str, info: &SnapshotInfo) {
        if info.dropped.is_empty() {
            return;
        }
        lines.push(self.color(&format!("Dropped sections ({side}):"), "bold"));
        for dropped in &info.dropped {
            let header = if dropped.header.is_empty() {
                "<blank>"
            } else {
                dropped.header.as_str()
            };
            lines.push(format!(
                "  #{} {} {}",
                dropped.index,
                header,
                self.color(&format!("({})", dropped.reason), "dim")
            ));
        }
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate_comparison_report(
        &self,
        report: &ComparisonReport,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();

        lines.push(self.color("Hardware Snapshot Comparison", "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));
        lines.push(format!(
            "{}   {} → {}",
            self.color("Snapshots:", "cyan"),
            label(&report.base, "base"),
            label(&report.target, "target")
        ));
        lines.push(format!(
            "{}  {} → {}",
            self.color("Components:", "cyan"),
            report.base.component_count,
            report.target.component_count
        ));
        lines.push(format!("{}    {}", self.color("Matching:", "cyan"), report.matcher));
        lines.push(String::new());

        lines.push(self.color("Changes:", "bold"));
        self.push_counts(&mut lines, report);

        if !config.summary_only && !report.results.is_empty() {
            lines.push(String::new());
            lines.push(self.color("Details:", "bold"));
            for result in &report.results {
                self.push_result(&mut lines, result);
            }
        }

        if !report.skipped.is_empty() {
            lines.push(String::new());
            lines.push(self.color(
                &format!(
                    "Skipped {} without a strategy",
                    plural(report.skipped.len(), "pair", "pairs")
                ),
                "yellow",
            ));
        }

        if config.show_dropped {
            lines.push(String::new());
            self.push_dropped(&mut lines, "base", &report.base);
            self.push_dropped(&mut lines, "target", &report.target);
        }

        Ok(lines.join("\n"))
    }

    fn generate_snapshot_report(
        &self,
        snapshot: &ParsedSnapshot,
        info: &SnapshotInfo,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();

        lines.push(self.color("Hardware Snapshot", "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));
        lines.push(format!(
            "{}        {}",
            self.color("File:", "cyan"),
            label(info, "snapshot")
        ));
        lines.push(format!(
            "{}  {} ({} dropped)",
            self.color("Components:", "cyan"),
            snapshot.component_count(),
            plural(snapshot.dropped.len(), "section", "sections")
        ));
        lines.push(format!(
            "{} {}",
            self.color("Fingerprint:", "cyan"),
            info.fingerprint
        ));
        lines.push(String::new());

        lines.push(self.color("By type:", "bold"));
        for (component_type, count) in snapshot.counts_by_type() {
            lines.push(format!("  {component_type:<12} {count}"));
        }

        if !config.summary_only {
            lines.push(String::new());
            lines.push(self.color("Components:", "bold"));
            for component in &snapshot.components {
                lines.push(format!(
                    "  [{}] {}",
                    component.component_type,
                    component.display_key()
                ));
                for (key, value) in &component.properties {
                    lines.push(format!("      {}: {value}", self.color(key, "dim")));
                }
            }
        }

        if config.show_dropped {
            lines.push(String::new());
            self.push_dropped(&mut lines, "snapshot", info);
        }

        Ok(lines.join("\n"))
    }

    fn generate_multi_report(
        &self,
        multi: &MultiComparison,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();

        lines.push(self.color("Hardware Snapshot Multi-Comparison", "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));
        lines.push(format!(
            "{}  {} ({})",
            self.color("Baseline:", "cyan"),
            label(&multi.baseline, "baseline"),
            plural(multi.baseline.component_count, "component", "components")
        ));
        lines.push(String::new());

        for target in &multi.targets {
            match (&target.report, &target.error) {
                (Some(report), _) => {
                    let s = &report.summary;
                    let status = if s.total_changes == 0 {
                        self.color("unchanged", "dim")
                    } else {
                        format!(
                            "{} {} {}",
                            self.color(&format!("+{}", s.added), "green"),
                            self.color(&format!("-{}", s.removed), "red"),
                            self.color(&format!("~{}", s.modified), "yellow")
                        )
                    };
                    lines.push(format!("  {:<30} {status}", target.label));
                }
                (None, Some(error)) => {
                    lines.push(format!(
                        "  {:<30} {}",
                        target.label,
                        self.color(&format!("error: {error}"), "red")
                    ));
                }
                (None, None) => {}
            }
        }

        if multi.failures() > 0 {
            lines.push(String::new());
            lines.push(self.color(
                &format!(
                    "{} could not be compared",
                    plural(multi.failures(), "target", "targets")
                ),
                "red",
            ));
        }

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}
