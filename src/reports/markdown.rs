//! Markdown report generator.

use super::escape::{escape_markdown_inline, escape_markdown_table};
use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::{ChangeType, ComparisonReport, ComparisonResult};
use crate::model::{ParsedSnapshot, SnapshotInfo};
use crate::pipeline::MultiComparison;
use std::fmt::Write;

/// Markdown report generator
pub struct MarkdownReporter {
    /// Heading level of the report title
    heading: usize,
}

impl MarkdownReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self { heading: 1 }
    }

    /// Start headings at `level` (clamped to 1-4), for embedding in larger documents.
    #[must_use]
    pub const fn heading_level(mut self, level: usize) -> Self {
        self.heading = if level < 1 {
            1
        } else if level > 4 {
            4
        } else {
            level
        };
        self
    }

    fn h(&self, depth: usize) -> String {
        "#".repeat(self.heading + depth)
    }

    fn label(info: &SnapshotInfo, fallback: &str) -> String {
        escape_markdown_inline(info.label.as_deref().unwrap_or(fallback))
    }

    fn write_dropped(&self, md: &mut String, side: &str, info: &SnapshotInfo) -> std::fmt::Result {
        if info.dropped.is_empty() {
            return Ok(());
        }
        writeln!(md, "{} Dropped sections ({side})\n", self.h(1))?;
        writeln!(md, "| # | Header | Reason |")?;
        writeln!(md, "|---|--------|--------|")?;
        for dropped in &info.dropped {
            writeln!(
                md,
                "| {} | {} | {} |",
                dropped.index,
                escape_markdown_table(&dropped.header),
                dropped.reason
            )?;
        }
        writeln!(md)
    }

    fn write_result(&self, md: &mut String, result: &ComparisonResult) -> std::fmt::Result {
        let key = if result.identifier.is_empty() {
            "_no primary id_".to_string()
        } else {
            format!("`{}`", result.identifier.replace('`', "'"))
        };
        writeln!(
            md,
            "{} {} {}: {key}\n",
            self.h(2),
            result.change_type,
            result.component_type
        )?;
        match result.change_type {
            ChangeType::Added | ChangeType::Removed => {
                writeln!(md, "| Property | Value |")?;
                writeln!(md, "|----------|-------|")?;
                for (property, change) in &result.changes {
                    let value = if result.change_type == ChangeType::Added {
                        &change.new_value
                    } else {
                        &change.old_value
                    };
                    writeln!(
                        md,
                        "| {} | {} |",
                        escape_markdown_table(property),
                        escape_markdown_table(value)
                    )?;
                }
            }
            _ => {
                writeln!(md, "| Property | Old | New |")?;
                writeln!(md, "|----------|-----|-----|")?;
                for (property, change) in &result.changes {
                    writeln!(
                        md,
                        "| {} | {} | {} |",
                        escape_markdown_table(property),
                        escape_markdown_table(&change.old_value),
                        escape_markdown_table(&change.new_value)
                    )?;
                }
            }
        }
        writeln!(md)
    }

    fn comparison(&self, report: &ComparisonReport, config: &ReportConfig) -> Result<String, std::fmt::Error> {
        let mut md = String::new();
        writeln!(md, "{} Hardware Snapshot Comparison\n", self.h(0))?;
        writeln!(
            md,
            "**Base:** {} ({} components)  ",
            Self::label(&report.base, "base"),
            report.base.component_count
        )?;
        writeln!(
            md,
            "**Target:** {} ({} components)  ",
            Self::label(&report.target, "target"),
            report.target.component_count
        )?;
        writeln!(md, "**Matching:** {}\n", report.matcher)?;

        writeln!(md, "{} Summary\n", self.h(1))?;
        if report.summary.total_changes == 0 {
            writeln!(md, "No changes detected.\n")?;
        } else {
            writeln!(md, "| Type | Added | Removed | Modified |")?;
            writeln!(md, "|------|-------|---------|----------|")?;
            for (component_type, counts) in &report.summary.by_type {
                writeln!(
                    md,
                    "| {component_type} | {} | {} | {} |",
                    counts.added, counts.removed, counts.modified
                )?;
            }
            writeln!(
                md,
                "| **Total** | **{}** | **{}** | **{}** |\n",
                report.summary.added, report.summary.removed, report.summary.modified
            )?;
        }

        if !config.summary_only && !report.results.is_empty() {
            writeln!(md, "{} Changes\n", self.h(1))?;
            for result in &report.results {
                self.write_result(&mut md, result)?;
            }
        }

        if !report.skipped.is_empty() {
            writeln!(md, "{} Skipped pairs\n", self.h(1))?;
            for skipped in &report.skipped {
                writeln!(
                    md,
                    "- {} {}: {}",
                    skipped.component_type,
                    escape_markdown_inline(&skipped.identifier),
                    skipped.reason
                )?;
            }
            writeln!(md)?;
        }

        if config.show_dropped {
            self.write_dropped(&mut md, "base", &report.base)?;
            self.write_dropped(&mut md, "target", &report.target)?;
        }
        Ok(md)
    }

    fn snapshot(
        &self,
        snapshot: &ParsedSnapshot,
        info: &SnapshotInfo,
        config: &ReportConfig,
    ) -> Result<String, std::fmt::Error> {
        let mut md = String::new();
        writeln!(md, "{} Hardware Snapshot: {}\n", self.h(0), Self::label(info, "snapshot"))?;
        writeln!(md, "| Type | Components |")?;
        writeln!(md, "|------|------------|")?;
        for (component_type, count) in snapshot.counts_by_type() {
            writeln!(md, "| {component_type} | {count} |")?;
        }
        writeln!(md)?;

        if !config.summary_only {
            for component in &snapshot.components {
                writeln!(
                    md,
                    "{} {}: {}\n",
                    self.h(1),
                    component.component_type,
                    escape_markdown_inline(component.display_key())
                )?;
                writeln!(md, "| Property | Value |")?;
                writeln!(md, "|----------|-------|")?;
                for (key, value) in &component.properties {
                    writeln!(
                        md,
                        "| {} | {} |",
                        escape_markdown_table(key),
                        escape_markdown_table(value)
                    )?;
                }
                writeln!(md)?;
            }
        }

        if config.show_dropped {
            self.write_dropped(&mut md, "snapshot", info)?;
        }
        Ok(md)
    }

    fn multi(&self, multi: &MultiComparison) -> Result<String, std::fmt::Error> {
        let mut md = String::new();
        writeln!(md, "{} Hardware Snapshot Multi-Comparison\n", self.h(0))?;
        writeln!(
            md,
            "**Baseline:** {} ({} components)\n",
            Self::label(&multi.baseline, "baseline"),
            multi.baseline.component_count
        )?;
        writeln!(md, "| Target | Added | Removed | Modified | Status |")?;
        writeln!(md, "|--------|-------|---------|----------|--------|")?;
        for target in &multi.targets {
            let name = escape_markdown_table(&target.label);
            match (&target.report, &target.error) {
                (Some(report), _) => {
                    let s = &report.summary;
                    let status = if s.total_changes == 0 { "unchanged" } else { "changed" };
                    writeln!(
                        md,
                        "| {name} | {} | {} | {} | {status} |",
                        s.added, s.removed, s.modified
                    )?;
                }
                (None, error) => {
                    writeln!(
                        md,
                        "| {name} | - | - | - | error: {} |",
                        escape_markdown_table(error.as_deref().unwrap_or("unknown"))
                    )?;
                }
            }
        }
        Ok(md)
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate_comparison_report(
        &self,
        report: &ComparisonReport,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        Ok(self.comparison(report, config)?)
    }

    fn generate_snapshot_report(
        &self,
        snapshot: &ParsedSnapshot,
        info: &SnapshotInfo,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        Ok(self.snapshot(snapshot, info, config)?)
    }

    fn generate_multi_report(
        &self,
        multi: &MultiComparison,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        Ok(self.multi(multi)?)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Markdown
    }
}
