//! Identifier strategies: which properties identify and describe each
//! component type.
//!
//! Every [`ComponentType`] has one [`TypeStrategy`], an ordered list of
//! comparison properties. The first property is the primary identity key;
//! the rest serve as fallback identifiers and as the tracked attributes the
//! change detector compares.
//!
//! Strategies are looked up through a [`StrategyRegistry`], built once and
//! shared read-only.

mod defaults;

pub use defaults::builtin_properties;

use crate::model::{ComponentType, Properties};
use std::collections::BTreeMap;

/// Policy for identifying and comparing one component type.
pub trait IdentifierStrategy: Send + Sync {
    /// Ordered comparison properties; the first is the primary key.
    fn comparison_properties(&self) -> &[String];

    /// Value of the first comparison property, or `""` when not present.
    fn identifier<'a>(&self, properties: &'a Properties) -> &'a str {
        self.comparison_properties()
            .first()
            .and_then(|key| present_value(properties, key))
            .unwrap_or("")
    }

    /// Values of the remaining comparison properties that are present.
    fn fallback_identifiers<'a>(&self, properties: &'a Properties) -> Vec<&'a str> {
        self.comparison_properties()
            .iter()
            .skip(1)
            .filter_map(|key| present_value(properties, key))
            .collect()
    }
}

/// A property is present when its key exists and its value is not blank.
fn present_value<'a>(properties: &'a Properties, key: &str) -> Option<&'a str> {
    properties
        .get(key)
        .map(String::as_str)
        .filter(|v| !v.trim().is_empty())
}

/// Ordered-property-list strategy used for every component type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeStrategy {
    properties: Vec<String>,
}

impl TypeStrategy {
    pub fn new<I, S>(properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            properties: properties.into_iter().map(Into::into).collect(),
        }
    }

    /// The built-in strategy for `component_type`.
    #[must_use]
    pub fn builtin(component_type: ComponentType) -> Self {
        Self::new(builtin_properties(component_type).iter().copied())
    }
}

impl IdentifierStrategy for TypeStrategy {
    fn comparison_properties(&self) -> &[String] {
        &self.properties
    }
}

/// Type-indexed table of strategies.
#[derive(Debug, Clone)]
pub struct StrategyRegistry {
    strategies: BTreeMap<ComponentType, TypeStrategy>,
}

impl StrategyRegistry {
    /// A registry with no strategies at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            strategies: BTreeMap::new(),
        }
    }

    /// Replace the strategy for one type.
    #[must_use]
    pub fn with_strategy(mut self, component_type: ComponentType, strategy: TypeStrategy) -> Self {
        self.strategies.insert(component_type, strategy);
        self
    }

    /// Remove the strategy for one type.
    #[must_use]
    pub fn without(mut self, component_type: ComponentType) -> Self {
        self.strategies.remove(&component_type);
        self
    }

    #[must_use]
    pub fn get(&self, component_type: ComponentType) -> Option<&TypeStrategy> {
        self.strategies.get(&component_type)
    }

    #[must_use]
    pub fn contains(&self, component_type: ComponentType) -> bool {
        self.strategies.contains_key(&component_type)
    }

    /// Registered strategies in type order.
    pub fn iter(&self) -> impl Iterator<Item = (ComponentType, &TypeStrategy)> {
        self.strategies.iter().map(|(ty, s)| (*ty, s))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl Default for StrategyRegistry {
    /// All ten built-in strategies.
    fn default() -> Self {
        let strategies = ComponentType::ALL
            .into_iter()
            .map(|ty| (ty, TypeStrategy::builtin(ty)))
            .collect();
        Self { strategies }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(pairs: &[(&str, &str)]) -> Properties {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_default_registry_covers_every_type() {
        let registry = StrategyRegistry::default();
        assert_eq!(registry.len(), 10);
        for ty in ComponentType::ALL {
            let strategy = registry.get(ty).expect("builtin strategy");
            assert!(!strategy.comparison_properties().is_empty(), "{ty}");
        }
    }

    #[test]
    fn test_cpu_properties() {
        let registry = StrategyRegistry::default();
        let cpu = registry.get(ComponentType::Cpu).unwrap();
        assert_eq!(
            cpu.comparison_properties(),
            &["ProcessorId", "Name", "Manufacturer"]
        );
    }

    #[test]
    fn test_identifier_uses_first_property() {
        let strategy = TypeStrategy::builtin(ComponentType::Cpu);
        let p = props(&[("Name", "Ryzen 7"), ("ProcessorId", "178BFBFF00A20F10")]);
        assert_eq!(strategy.identifier(&p), "178BFBFF00A20F10");
    }

    #[test]
    fn test_identifier_empty_when_absent_or_blank() {
        let strategy = TypeStrategy::builtin(ComponentType::Cpu);
        assert_eq!(strategy.identifier(&props(&[("Name", "x")])), "");
        assert_eq!(strategy.identifier(&props(&[("ProcessorId", "  ")])), "");
    }

    #[test]
    fn test_fallback_identifiers_skip_missing() {
        let strategy = TypeStrategy::builtin(ComponentType::Cpu);
        let p = props(&[("ProcessorId", "X"), ("Manufacturer", "AuthenticAMD")]);
        assert_eq!(strategy.fallback_identifiers(&p), vec!["AuthenticAMD"]);
    }

    #[test]
    fn test_empty_strategy_has_no_identifiers() {
        let strategy = TypeStrategy::new(Vec::<String>::new());
        let p = props(&[("Anything", "value")]);
        assert_eq!(strategy.identifier(&p), "");
        assert!(strategy.fallback_identifiers(&p).is_empty());
    }

    #[test]
    fn test_with_and_without() {
        let registry = StrategyRegistry::default()
            .without(ComponentType::Usb)
            .with_strategy(ComponentType::Gpu, TypeStrategy::new(["Name"]));
        assert!(!registry.contains(ComponentType::Usb));
        assert_eq!(
            registry.get(ComponentType::Gpu).unwrap().comparison_properties(),
            &["Name"]
        );
        assert_eq!(registry.len(), 9);
        assert!(StrategyRegistry::empty().is_empty());
    }
}
