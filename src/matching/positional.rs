//! Greedy type-only matching.

use super::{ComponentMatcher, ComponentPair};
use crate::model::{Component, ComponentType};
use std::collections::{HashMap, VecDeque};

/// Pairs each base component with the first unclaimed target of the same
/// type. Identifiers are not consulted, so order of appearance decides
/// which of several same-type components are compared.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalMatcher;

impl PositionalMatcher {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Target indices per type, in target order.
pub(super) fn queues_by_type(
    target: &[Component],
    claimed: &[bool],
) -> HashMap<ComponentType, VecDeque<usize>> {
    let mut queues: HashMap<ComponentType, VecDeque<usize>> = HashMap::new();
    for (idx, component) in target.iter().enumerate() {
        if !claimed[idx] {
            queues
                .entry(component.component_type)
                .or_default()
                .push_back(idx);
        }
    }
    queues
}

/// Append every unclaimed target as `Added`.
pub(super) fn push_unclaimed<'a>(
    pairs: &mut Vec<ComponentPair<'a>>,
    target: &'a [Component],
    claimed: &[bool],
) {
    pairs.extend(
        target
            .iter()
            .zip(claimed)
            .filter(|(_, claimed)| !**claimed)
            .map(|(component, _)| ComponentPair::Added(component)),
    );
}

impl ComponentMatcher for PositionalMatcher {
    fn match_components<'a>(
        &self,
        base: &'a [Component],
        target: &'a [Component],
    ) -> Vec<ComponentPair<'a>> {
        let mut claimed = vec![false; target.len()];
        let mut queues = queues_by_type(target, &claimed);
        let mut pairs = Vec::with_capacity(base.len().max(target.len()));

        for component in base {
            let candidate = queues
                .get_mut(&component.component_type)
                .and_then(VecDeque::pop_front);
            match candidate {
                Some(idx) => {
                    claimed[idx] = true;
                    pairs.push(ComponentPair::Matched {
                        base: component,
                        target: &target[idx],
                    });
                }
                None => pairs.push(ComponentPair::Removed(component)),
            }
        }

        push_unclaimed(&mut pairs, target, &claimed);
        pairs
    }

    fn name(&self) -> &'static str {
        "positional"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ram(key: &str) -> Component {
        Component::new(ComponentType::Ram, key)
    }

    fn cpu(key: &str) -> Component {
        Component::new(ComponentType::Cpu, key)
    }

    #[test]
    fn test_pairs_in_list_order() {
        let base = vec![ram("A"), ram("B")];
        let target = vec![ram("B"), ram("A")];
        let pairs = PositionalMatcher.match_components(&base, &target);
        assert_eq!(
            pairs,
            vec![
                ComponentPair::Matched {
                    base: &base[0],
                    target: &target[0]
                },
                ComponentPair::Matched {
                    base: &base[1],
                    target: &target[1]
                },
            ]
        );
    }

    #[test]
    fn test_type_isolation() {
        let base = vec![cpu("C")];
        let target = vec![ram("R")];
        let pairs = PositionalMatcher.match_components(&base, &target);
        assert_eq!(
            pairs,
            vec![
                ComponentPair::Removed(&base[0]),
                ComponentPair::Added(&target[0])
            ]
        );
    }

    #[test]
    fn test_unclaimed_targets_follow_in_order() {
        let base = vec![ram("A")];
        let target = vec![cpu("C"), ram("A"), ram("B")];
        let pairs = PositionalMatcher.match_components(&base, &target);
        assert_eq!(pairs.len(), 3);
        assert_eq!(
            pairs[0],
            ComponentPair::Matched {
                base: &base[0],
                target: &target[1]
            }
        );
        assert_eq!(pairs[1], ComponentPair::Added(&target[0]));
        assert_eq!(pairs[2], ComponentPair::Added(&target[2]));
    }

    #[test]
    fn test_empty_inputs() {
        let none: Vec<Component> = Vec::new();
        let some = vec![cpu("C")];
        assert!(PositionalMatcher.match_components(&none, &none).is_empty());
        assert_eq!(
            PositionalMatcher.match_components(&some, &none),
            vec![ComponentPair::Removed(&some[0])]
        );
        assert_eq!(
            PositionalMatcher.match_components(&none, &some),
            vec![ComponentPair::Added(&some[0])]
        );
    }
}
