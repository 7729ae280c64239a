//! Parsed hardware components and their closed set of types.

use crate::strategy::IdentifierStrategy;
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Property name → value map of one component.
pub type Properties = IndexMap<String, String>;

/// Hardware component category.
///
/// The set is closed: a section whose header does not map to one of these
/// types never becomes a [`Component`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum ComponentType {
    #[serde(rename = "DISK DRIVE")]
    DiskDrive,
    #[serde(rename = "RAM")]
    Ram,
    #[serde(rename = "CPU")]
    Cpu,
    #[serde(rename = "MOTHERBOARD")]
    Motherboard,
    #[serde(rename = "BIOS")]
    Bios,
    #[serde(rename = "GPU")]
    Gpu,
    #[serde(rename = "TPM")]
    Tpm,
    #[serde(rename = "USB")]
    Usb,
    #[serde(rename = "MONITOR")]
    Monitor,
    #[serde(rename = "NETWORK")]
    Network,
}

impl ComponentType {
    /// Every component type, in report order.
    pub const ALL: [Self; 10] = [
        Self::DiskDrive,
        Self::Ram,
        Self::Cpu,
        Self::Motherboard,
        Self::Bios,
        Self::Gpu,
        Self::Tpm,
        Self::Usb,
        Self::Monitor,
        Self::Network,
    ];

    /// Canonical tag, e.g. `"DISK DRIVE"`.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::DiskDrive => "DISK DRIVE",
            Self::Ram => "RAM",
            Self::Cpu => "CPU",
            Self::Motherboard => "MOTHERBOARD",
            Self::Bios => "BIOS",
            Self::Gpu => "GPU",
            Self::Tpm => "TPM",
            Self::Usb => "USB",
            Self::Monitor => "MONITOR",
            Self::Network => "NETWORK",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Error returned when a string names no known component type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown component type '{0}'")]
pub struct UnknownComponentType(pub String);

impl FromStr for ComponentType {
    type Err = UnknownComponentType;

    /// Accepts the tag case-insensitively; `-` and `_` may stand in for spaces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace(['-', '_'], " ").to_uppercase();
        Self::ALL
            .into_iter()
            .find(|t| t.tag() == normalized)
            .ok_or_else(|| UnknownComponentType(s.to_string()))
    }
}

/// One parsed hardware component instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    /// Which strategy applies to this component
    pub component_type: ComponentType,
    /// Value of the first comparison property; empty when absent
    pub unique_key: String,
    /// Every `key: value` line of the component's section
    pub properties: Properties,
}

impl Component {
    /// Create a component with no properties.
    pub fn new(component_type: ComponentType, unique_key: impl Into<String>) -> Self {
        Self {
            component_type,
            unique_key: unique_key.into(),
            properties: Properties::new(),
        }
    }

    /// Add a property, replacing any earlier value for the same key.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Value of `key`, or `""` when the component lacks it.
    #[must_use]
    pub fn property(&self, key: &str) -> &str {
        self.properties.get(key).map_or("", String::as_str)
    }

    /// Secondary identifiers under `strategy`, in comparison-property order.
    #[must_use]
    pub fn fallback_identifiers<'a>(&'a self, strategy: &dyn IdentifierStrategy) -> Vec<&'a str> {
        strategy.fallback_identifiers(&self.properties)
    }

    /// Key shown in reports: the unique key, or a placeholder when empty.
    #[must_use]
    pub fn display_key(&self) -> &str {
        if self.unique_key.is_empty() {
            "<no primary id>"
        } else {
            &self.unique_key
        }
    }
}
