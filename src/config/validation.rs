//! Configuration validation.

use super::types::{AppConfig, OutputConfig};
use crate::model::ComponentType;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Allowed characters in a comparison property name.
static PROPERTY_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 _.()'/-]*$").expect("static regex"));

// ============================================================================
// Configuration Error
// ============================================================================

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = self.output.validate();

        for (key, properties) in &self.strategies {
            let field = format!("strategies.{key}");
            if let Err(e) = key.parse::<ComponentType>() {
                let valid: Vec<_> = ComponentType::ALL.iter().map(ComponentType::tag).collect();
                errors.push(ConfigError::new(
                    field,
                    format!("{e}. Valid options: {}", valid.join(", ")),
                ));
                continue;
            }

            let mut seen = HashSet::new();
            for property in properties {
                if !PROPERTY_NAME.is_match(property) {
                    errors.push(ConfigError::new(
                        field.clone(),
                        format!("Invalid property name '{property}'"),
                    ));
                } else if !seen.insert(property.as_str()) {
                    errors.push(ConfigError::new(
                        field.clone(),
                        format!("Duplicate property '{property}'"),
                    ));
                }
            }
        }

        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(parent) = self.file.as_ref().and_then(|f| f.parent()) {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                errors.push(ConfigError::new(
                    "output.file",
                    format!("Parent directory does not exist: {}", parent.display()),
                ));
            }
        }
        errors
    }
}
