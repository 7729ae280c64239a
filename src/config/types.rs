//! Configuration types for hwid-diff.

use crate::error::{HwidDiffError, Result};
use crate::matching::MatchingStrategyKind;
use crate::model::ComponentType;
use crate::reports::ReportFormat;
use crate::strategy::{StrategyRegistry, TypeStrategy};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Application configuration, loaded from a config file and/or CLI flags.
///
/// CLI flags are layered over file values with [`AppConfig::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// How base and target components are paired
    pub matching: MatchingConfig,
    /// Output configuration (format, file, colors)
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
    /// Comparison-property overrides keyed by component type tag.
    ///
    /// An empty list removes the strategy, so that type is never compared.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub strategies: BTreeMap<String, Vec<String>>,
}

impl AppConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Built-in strategies with the `strategies` overrides applied.
    pub fn strategy_registry(&self) -> Result<StrategyRegistry> {
        let mut registry = StrategyRegistry::default();
        for (key, properties) in &self.strategies {
            let component_type: ComponentType = key
                .parse()
                .map_err(|e| HwidDiffError::config(format!("strategies: {e}")))?;
            registry = if properties.is_empty() {
                registry.without(component_type)
            } else {
                registry.with_strategy(component_type, TypeStrategy::new(properties.iter().cloned()))
            };
        }
        Ok(registry)
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    pub const fn matching(mut self, strategy: MatchingStrategyKind) -> Self {
        self.config.matching.strategy = strategy;
        self
    }

    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    pub const fn fail_on_change(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_change = fail;
        self
    }

    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    pub const fn show_dropped(mut self, show: bool) -> Self {
        self.config.behavior.show_dropped = show;
        self
    }

    /// Override the comparison properties of one type.
    pub fn strategy<I, S>(mut self, component_type: ComponentType, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.strategies.insert(
            component_type.tag().to_string(),
            properties.into_iter().map(Into::into).collect(),
        );
        self
    }

    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Sections
// ============================================================================

/// Matching configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MatchingConfig {
    /// `positional` (first unclaimed same-type component) or `identity`
    pub strategy: MatchingStrategyKind,
}

/// Output configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Report format: auto, summary, markdown, json
    pub format: ReportFormat,
    /// Output file path (stdout when absent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
}

/// Behavior flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Exit with code 1 when changes are detected
    pub fail_on_change: bool,
    /// Suppress informational logging
    pub quiet: bool,
    /// Include dropped snapshot sections in reports
    pub show_dropped: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::IdentifierStrategy;

    #[test]
    fn test_default_registry_without_overrides() {
        let registry = AppConfig::default().strategy_registry().unwrap();
        assert_eq!(registry.len(), ComponentType::ALL.len());
    }

    #[test]
    fn test_strategy_override_and_removal() {
        let config = AppConfig::builder()
            .strategy(ComponentType::Gpu, ["Name"])
            .strategy(ComponentType::Usb, Vec::<String>::new())
            .build();
        let registry = config.strategy_registry().unwrap();
        assert_eq!(
            registry
                .get(ComponentType::Gpu)
                .unwrap()
                .comparison_properties(),
            &["Name"]
        );
        assert!(registry.get(ComponentType::Usb).is_none());
    }

    #[test]
    fn test_unknown_type_key_is_config_error() {
        let mut config = AppConfig::default();
        config
            .strategies
            .insert("SOUND".to_string(), vec!["Name".to_string()]);
        assert!(matches!(
            config.strategy_registry(),
            Err(HwidDiffError::Config(_))
        ));
    }

    #[test]
    fn test_yaml_roundtrip_of_sections() {
        let yaml = "matching:\n  strategy: identity\nstrategies:\n  disk-drive: [SerialNumber]\n";
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.matching.strategy, MatchingStrategyKind::Identity);
        assert_eq!(config.output, OutputConfig::default());
        assert_eq!(config.strategies["disk-drive"], vec!["SerialNumber"]);
    }
}
