//! Configuration file loading and discovery.

use super::types::AppConfig;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".hwid-diff.yaml",
    ".hwid-diff.yml",
    "hwid-diff.yaml",
    "hwid-diff.yml",
];

/// Directory under the user config dir holding the global config.
const CONFIG_DIR_NAME: &str = "hwid-diff";

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. User config directory (~/.config/hwid-diff/)
/// 4. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_in_dir(&cwd))
        .or_else(|| user_config_dir().and_then(|dir| find_config_in_dir(&dir)))
        .or_else(|| dirs::home_dir().and_then(|home| find_config_in_dir(&home)))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// `~/.config/hwid-diff` or the platform equivalent.
#[must_use]
pub fn user_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME))
}

/// Where `config init` writes the global config file.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    user_config_dir().map(|dir| dir.join(CONFIG_FILE_NAMES[2]))
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Only values that differ from the defaults override; used to layer
    /// CLI flags over file settings. An override equal to the default
    /// (`positional` matching, `auto` format) therefore cannot replace a
    /// file value; apply those with [`apply_explicit`](Self::apply_explicit).
    pub fn merge(&mut self, other: &Self) {
        if other.matching.strategy != crate::matching::MatchingStrategyKind::default() {
            self.matching.strategy = other.matching.strategy;
        }

        if other.output.format != crate::reports::ReportFormat::Auto {
            self.output.format = other.output.format;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        if other.output.no_color {
            self.output.no_color = true;
        }

        if other.behavior.fail_on_change {
            self.behavior.fail_on_change = true;
        }
        if other.behavior.quiet {
            self.behavior.quiet = true;
        }
        if other.behavior.show_dropped {
            self.behavior.show_dropped = true;
        }

        for (key, properties) in &other.strategies {
            self.strategies.insert(key.clone(), properties.clone());
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }

    /// Set values the caller named explicitly, including default ones.
    pub fn apply_explicit(
        &mut self,
        matching: Option<crate::matching::MatchingStrategyKind>,
        format: Option<crate::reports::ReportFormat>,
    ) {
        if let Some(matching) = matching {
            self.matching.strategy = matching;
        }
        if let Some(format) = format {
            self.output.format = format;
        }
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Serialized default config with a short header.
#[must_use]
pub fn generate_example_config() -> String {
    format!(
        "# hwid-diff configuration\n# Place this file at .hwid-diff.yaml or ~/.config/hwid-diff/hwid-diff.yaml\n\n{}",
        serde_yaml::to_string(&AppConfig::default()).unwrap_or_default()
    )
}

/// Commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# hwid-diff configuration file
# =============================
#
# Place it at:
#   - .hwid-diff.yaml in the working directory
#   - ~/.config/hwid-diff/hwid-diff.yaml for global config
#
# CLI arguments always override file settings.

# Component matching
matching:
  # positional: first unclaimed component of the same type, in list order
  # identity:   components with equal unique keys first, then positional
  strategy: positional

# Output configuration
output:
  # Format: auto, summary, markdown, json
  format: auto
  # Output file path (omit for stdout)
  # file: report.json
  # Disable colored output
  no_color: false

# Behavior flags
behavior:
  # Exit with code 1 if any changes are detected
  fail_on_change: false
  # Suppress informational logging
  quiet: false
  # List snapshot sections that produced no component
  show_dropped: false

# Comparison-property overrides per component type.
# The first property is the unique key. An empty list disables the type.
# strategies:
#   DISK DRIVE: [SerialNumber, Model, Size]
#   USB: []
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================
