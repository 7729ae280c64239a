//! Configuration for hwid-diff.
//!
//! - type-safe configuration structures
//! - validation of strategy overrides and output settings
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Configuration File
//!
//! Place a `.hwid-diff.yaml` file in the working directory or
//! `~/.config/hwid-diff/`:
//!
//! ```yaml
//! matching:
//!   strategy: identity
//! behavior:
//!   fail_on_change: true
//! strategies:
//!   DISK DRIVE: [SerialNumber, Model, Size]
//! ```

pub mod file;
mod types;
mod validation;

pub use types::{AppConfig, AppConfigBuilder, BehaviorConfig, MatchingConfig, OutputConfig};
pub use validation::{ConfigError, Validatable};

pub use file::{
    default_config_path, discover_config_file, generate_example_config,
    generate_full_example_config, load_config_file, load_or_default, ConfigFileError,
};

/// JSON Schema of the config file format, for editor validation.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_lists_sections() {
        let schema = generate_json_schema();
        let value: serde_json::Value = serde_json::from_str(&schema).unwrap();
        let properties = &value["properties"];
        for section in ["matching", "output", "behavior", "strategies"] {
            assert!(properties.get(section).is_some(), "{section}");
        }
    }
}
