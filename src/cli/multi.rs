//! Compare-many command handler.
//!
//! Implements the `compare-many` subcommand: one baseline snapshot against
//! several targets.

use super::ensure_valid;
use crate::cancel::CancellationToken;
use crate::config::AppConfig;
use crate::pipeline::{
    auto_detect_format, compare_many, exit_codes, read_snapshot, should_use_color, write_output,
    Comparator, OutputTarget,
};
use crate::reports::{create_reporter_with_options, ReportConfig};
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

/// Run the compare-many command (1:N comparison).
///
/// Targets are compared on the rayon pool from a blocking task so the
/// Ctrl-C handler keeps running. A target that fails to compare is
/// reported and makes the command exit with [`exit_codes::ERROR`].
pub async fn run_compare_many(
    config: &AppConfig,
    baseline_path: &Path,
    target_paths: &[PathBuf],
    token: &CancellationToken,
) -> Result<i32> {
    ensure_valid(config)?;
    if target_paths.is_empty() {
        bail!("compare-many needs at least one target snapshot");
    }
    let quiet = config.behavior.quiet;
    let comparator = Comparator::from_config(config)?;

    let baseline = read_snapshot(baseline_path, quiet)?;
    let targets = target_paths
        .iter()
        .map(|path| read_snapshot(path, quiet))
        .collect::<Result<Vec<_>>>()?;

    if !quiet {
        tracing::info!(
            "Comparing baseline {} against {} targets",
            baseline.label,
            targets.len()
        );
    }

    let worker_token = token.clone();
    let multi = tokio::task::spawn_blocking(move || {
        compare_many(&comparator, &baseline, &targets, &worker_token)
    })
    .await
    .context("Comparison worker failed")?
    .with_context(|| format!("Failed to compare against {}", baseline_path.display()))?;

    let output_target = OutputTarget::from_option(config.output.file.clone());
    let format = auto_detect_format(config.output.format, &output_target);
    let reporter = create_reporter_with_options(
        format,
        should_use_color(config.output.no_color) && output_target.is_terminal(),
    );
    let rendered = reporter
        .generate_multi_report(
            &multi,
            &ReportConfig::default().with_dropped(config.behavior.show_dropped),
        )
        .context("Failed to render multi-comparison report")?;
    write_output(&rendered, &output_target, quiet)?;

    let code = if multi.failures() > 0 {
        exit_codes::ERROR
    } else if config.behavior.fail_on_change && multi.has_changes() {
        exit_codes::CHANGES_DETECTED
    } else {
        exit_codes::SUCCESS
    };
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::ReportFormat;

    #[tokio::test]
    async fn test_compare_many_writes_every_target() {
        let dir = tempfile::tempdir().unwrap();
        let write = |name: &str, text: &str| {
            let path = dir.path().join(name);
            std::fs::write(&path, text).unwrap();
            path
        };
        let baseline = write("base.txt", "TPM INFORMATION\nManufacturerId: 1\n");
        let same = write("same.txt", "TPM INFORMATION\nManufacturerId: 1\n");
        let changed = write("changed.txt", "TPM INFORMATION\nManufacturerId: 2\n");
        let out = dir.path().join("multi.json");

        let config = AppConfig::builder()
            .quiet(true)
            .fail_on_change(true)
            .output_format(ReportFormat::Json)
            .output_file(Some(out.clone()))
            .build();
        let code = run_compare_many(&config, &baseline, &[same, changed], &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(code, exit_codes::CHANGES_DETECTED);

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(json["targets"].as_array().unwrap().len(), 2);
        assert_eq!(json["targets"][1]["label"], "changed.txt");
    }

    #[tokio::test]
    async fn test_no_targets_is_error() {
        let result = run_compare_many(
            &AppConfig::default(),
            Path::new("base.txt"),
            &[],
            &CancellationToken::new(),
        )
        .await;
        assert!(result.is_err());
    }
}
