//! Key-first matching.

use super::positional::{push_unclaimed, queues_by_type};
use super::{ComponentMatcher, ComponentPair};
use crate::model::{Component, ComponentType};
use std::collections::{HashMap, VecDeque};

/// Pairs components whose non-empty unique keys are equal, then falls back
/// to positional pairing for everything left over.
///
/// Reordered but otherwise unchanged components therefore produce no diff,
/// unlike with [`super::PositionalMatcher`].
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityMatcher;

impl IdentityMatcher {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ComponentMatcher for IdentityMatcher {
    fn match_components<'a>(
        &self,
        base: &'a [Component],
        target: &'a [Component],
    ) -> Vec<ComponentPair<'a>> {
        let mut claimed = vec![false; target.len()];
        let mut partner: Vec<Option<usize>> = vec![None; base.len()];

        let mut by_key: HashMap<(ComponentType, &str), VecDeque<usize>> = HashMap::new();
        for (idx, component) in target.iter().enumerate() {
            if !component.unique_key.is_empty() {
                by_key
                    .entry((component.component_type, component.unique_key.as_str()))
                    .or_default()
                    .push_back(idx);
            }
        }

        for (b, component) in base.iter().enumerate() {
            if component.unique_key.is_empty() {
                continue;
            }
            let key = (component.component_type, component.unique_key.as_str());
            if let Some(idx) = by_key.get_mut(&key).and_then(VecDeque::pop_front) {
                claimed[idx] = true;
                partner[b] = Some(idx);
            }
        }

        let mut queues = queues_by_type(target, &claimed);
        for (b, component) in base.iter().enumerate() {
            if partner[b].is_some() {
                continue;
            }
            if let Some(idx) = queues
                .get_mut(&component.component_type)
                .and_then(VecDeque::pop_front)
            {
                claimed[idx] = true;
                partner[b] = Some(idx);
            }
        }

        let mut pairs: Vec<ComponentPair<'a>> = base
            .iter()
            .zip(&partner)
            .map(|(component, partner)| match partner {
                Some(idx) => ComponentPair::Matched {
                    base: component,
                    target: &target[*idx],
                },
                None => ComponentPair::Removed(component),
            })
            .collect();
        push_unclaimed(&mut pairs, target, &claimed);
        pairs
    }

    fn name(&self) -> &'static str {
        "identity"
    }
}
