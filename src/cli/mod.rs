//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand
//! and returns the process exit code.

mod compare;
mod inspect;
mod multi;

pub use compare::run_compare;
pub use inspect::{run_inspect, run_types};
pub use multi::run_compare_many;

use crate::config::{AppConfig, Validatable};
use anyhow::{bail, Result};

/// Reject configurations that fail validation, listing every problem.
pub(crate) fn ensure_valid(config: &AppConfig) -> Result<()> {
    let errors = config.validate();
    if errors.is_empty() {
        return Ok(());
    }
    let listed: Vec<String> = errors.iter().map(|e| format!("  - {e}")).collect();
    bail!("Invalid configuration:\n{}", listed.join("\n"))
}
