//! hwid-diff: hardware identifier snapshot comparison tool
//!
//! Parses the plain-text snapshots written by a hardware enumeration tool
//! and reports which components were added, removed or modified.

#![allow(clippy::struct_excessive_bools)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use hwid_diff::{
    cli,
    config::{self, AppConfig},
    matching::MatchingStrategyKind,
    pipeline::exit_codes,
    reports::ReportFormat,
    CancellationToken, HwidDiffError,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "hwid-diff")]
#[command(version)]
#[command(about = "Compare hardware identifier snapshots", long_about = None)]
#[command(after_help = "EXIT CODES:
    0    No changes detected (or changes without --fail-on-change)
    1    Changes detected with --fail-on-change
    2    Error occurred
    130  Interrupted

EXAMPLES:
    # Summary of what changed between two snapshots
    hwid-diff compare before.txt after.txt

    # CI check with a JSON report
    hwid-diff compare before.txt after.txt -O report.json --fail-on-change

    # Compare a baseline against a fleet of machines
    hwid-diff compare-many baseline.txt machines/*.txt

    # See what the parser recognized in a snapshot
    hwid-diff inspect snapshot.txt --show-dropped")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "HWID_DIFF_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Output and matching flags shared by the comparison commands
#[derive(clap::Args)]
struct ReportArgs {
    /// Output format (auto picks from the output file extension)
    #[arg(short, long, value_enum)]
    output: Option<ReportFormat>,

    /// Write the report to a file instead of stdout
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// How base and target components are paired
    #[arg(long, value_enum)]
    matching: Option<MatchingStrategyKind>,

    /// Exit with code 1 if any changes are detected
    #[arg(long)]
    fail_on_change: bool,

    /// List sections the parser dropped
    #[arg(long)]
    show_dropped: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two snapshots
    Compare {
        /// Path to the base (older) snapshot
        base: PathBuf,

        /// Path to the target (newer) snapshot
        target: PathBuf,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Compare a baseline snapshot against several targets
    CompareMany {
        /// Path to the baseline snapshot
        baseline: PathBuf,

        /// Target snapshots
        #[arg(required = true)]
        targets: Vec<PathBuf>,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Show the components parsed from one snapshot
    Inspect {
        /// Path to the snapshot
        snapshot: PathBuf,

        /// Output format (auto picks from the output file extension)
        #[arg(short, long, value_enum)]
        output: Option<ReportFormat>,

        /// Write the report to a file instead of stdout
        #[arg(short = 'O', long)]
        output_file: Option<PathBuf>,

        /// List sections the parser dropped
        #[arg(long)]
        show_dropped: bool,
    },

    /// List component types, their section headers and comparison properties
    Types,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .hwid-diff.yaml
    Init {
        /// Write to the user config directory instead of the current directory
        #[arg(long)]
        global: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let token = CancellationToken::new();
    let signal_token = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, cancelling");
            signal_token.cancel();
        }
    });

    let code = match run(cli, &token).await {
        Ok(code) => code,
        Err(err) if is_cancelled(&err) => {
            eprintln!("Cancelled");
            exit_codes::CANCELLED
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            exit_codes::ERROR
        }
    };
    std::process::exit(code);
}

fn is_cancelled(err: &anyhow::Error) -> bool {
    err.downcast_ref::<HwidDiffError>()
        .is_some_and(HwidDiffError::is_cancelled)
}

/// Load the config file and layer the global and per-command flags on top.
fn effective_config(cli: &Cli, report: Option<&ReportArgs>) -> AppConfig {
    let overrides = AppConfig::builder()
        .no_color(cli.no_color)
        .quiet(cli.quiet)
        .fail_on_change(report.is_some_and(|r| r.fail_on_change))
        .show_dropped(report.is_some_and(|r| r.show_dropped))
        .output_file(report.and_then(|r| r.output_file.clone()))
        .build();
    let (mut config, loaded_from) =
        AppConfig::from_file_with_overrides(cli.config.as_deref(), &overrides);
    if let Some(path) = loaded_from {
        tracing::debug!("Loaded config from {}", path.display());
    }

    if let Some(report) = report {
        config.apply_explicit(report.matching, report.output);
    }
    config
}

async fn run(cli: Cli, token: &CancellationToken) -> Result<i32> {
    match &cli.command {
        Commands::Compare {
            base,
            target,
            report,
        } => {
            let config = effective_config(&cli, Some(report));
            cli::run_compare(&config, base, target, token).await
        }

        Commands::CompareMany {
            baseline,
            targets,
            report,
        } => {
            let config = effective_config(&cli, Some(report));
            cli::run_compare_many(&config, baseline, targets, token).await
        }

        Commands::Inspect {
            snapshot,
            output,
            output_file,
            show_dropped,
        } => {
            let mut config = effective_config(&cli, None);
            config.apply_explicit(None, *output);
            if output_file.is_some() {
                config.output.file.clone_from(output_file);
            }
            config.behavior.show_dropped |= *show_dropped;
            cli::run_inspect(&config, snapshot)
        }

        Commands::Types => cli::run_types(&effective_config(&cli, None)),

        Commands::Completions { shell } => {
            generate(*shell, &mut Cli::command(), "hwid-diff", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigSchema { output } => {
            let schema = config::generate_json_schema();
            match output {
                Some(path) => {
                    std::fs::write(path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) = config::load_or_default(cli.config.as_deref());
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Path => {
                let search_paths: [Option<String>; 3] = [
                    std::env::current_dir()
                        .ok()
                        .map(|p| p.display().to_string()),
                    config::file::user_config_dir().map(|p| p.display().to_string()),
                    dirs::home_dir().map(|p| p.display().to_string()),
                ];
                eprintln!("Config file search paths (in order):");
                for path in search_paths.into_iter().flatten() {
                    eprintln!("  {path}");
                }
                eprintln!();
                eprintln!("Recognized file names:");
                for name in &[
                    ".hwid-diff.yaml",
                    ".hwid-diff.yml",
                    "hwid-diff.yaml",
                    "hwid-diff.yml",
                ] {
                    eprintln!("  {name}");
                }
                eprintln!();
                match config::discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Init { global } => {
                let target = if *global {
                    config::default_config_path()
                        .context("cannot determine the user config directory")?
                } else {
                    std::env::current_dir()
                        .context("cannot determine current directory")?
                        .join(".hwid-diff.yaml")
                };
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                if let Some(parent) = target.parent() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("failed to create {}", parent.display()))?;
                }
                std::fs::write(&target, config::generate_full_example_config())
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(exit_codes::SUCCESS)
            }
        },
    }
}
