//! Compare command handler.
//!
//! Implements the `compare` subcommand for comparing two snapshot files.

use super::ensure_valid;
use crate::cancel::CancellationToken;
use crate::config::AppConfig;
use crate::diff::ComparisonReport;
use crate::pipeline::{
    auto_detect_format, exit_codes, read_snapshot, should_use_color, write_output, Comparator,
    OutputTarget,
};
use crate::reports::{create_reporter_with_options, ReportConfig};
use anyhow::{Context, Result};
use std::path::Path;

/// Run the compare command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
pub async fn run_compare(
    config: &AppConfig,
    base_path: &Path,
    target_path: &Path,
    token: &CancellationToken,
) -> Result<i32> {
    ensure_valid(config)?;
    let quiet = config.behavior.quiet;
    let comparator = Comparator::from_config(config)?;

    let base = read_snapshot(base_path, quiet)?;
    let target = read_snapshot(target_path, quiet)?;

    let mut report = comparator
        .compare_detailed(&base.text, &target.text, token)
        .await
        .with_context(|| {
            format!(
                "Failed to compare {} against {}",
                base_path.display(),
                target_path.display()
            )
        })?;
    report.base.label = Some(base.label);
    report.target.label = Some(target.label);

    if !quiet {
        tracing::info!(
            "Compared {} base and {} target components: {} changes",
            report.base.component_count,
            report.target.component_count,
            report.summary.total_changes
        );
    }

    let output_target = OutputTarget::from_option(config.output.file.clone());
    let format = auto_detect_format(config.output.format, &output_target);
    let reporter = create_reporter_with_options(
        format,
        should_use_color(config.output.no_color) && output_target.is_terminal(),
    );
    let rendered = reporter
        .generate_comparison_report(
            &report,
            &ReportConfig::default().with_dropped(config.behavior.show_dropped),
        )
        .context("Failed to render comparison report")?;
    write_output(&rendered, &output_target, quiet)?;

    Ok(determine_exit_code(config, &report))
}

/// Determine the exit code from the report and the `fail_on_change` flag.
const fn determine_exit_code(config: &AppConfig, report: &ComparisonReport) -> i32 {
    if config.behavior.fail_on_change && report.summary.total_changes > 0 {
        return exit_codes::CHANGES_DETECTED;
    }
    exit_codes::SUCCESS
}
