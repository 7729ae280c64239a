//! Comparison pipeline: read → parse → match → detect → output.
//!
//! [`Comparator`] is the orchestrator. The remaining items are the thin
//! file-reading and output helpers shared by the CLI handlers.

mod compare;
mod multi;
mod output;
mod parse;

pub use compare::Comparator;
pub use multi::{compare_many, MultiComparison, TargetComparison};
pub use output::{auto_detect_format, should_use_color, write_output, OutputTarget};
pub use parse::{parse_snapshot_file, read_snapshot, snapshot_label, LoadedSnapshot};

/// Exit codes for scripting and CI use
pub mod exit_codes {
    /// No changes detected (or changes without `--fail-on-change`)
    pub const SUCCESS: i32 = 0;
    /// Changes were detected and `--fail-on-change` was set
    pub const CHANGES_DETECTED: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 2;
    /// Interrupted by Ctrl-C
    pub const CANCELLED: i32 = 130;
}
