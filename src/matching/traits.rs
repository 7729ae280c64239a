//! Matcher abstraction and the pair type it produces.

use crate::model::Component;
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One entry of a matching: both sides, or only one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentPair<'a> {
    /// Same-type components paired across the snapshots
    Matched {
        base: &'a Component,
        target: &'a Component,
    },
    /// Base component with no counterpart in the target
    Removed(&'a Component),
    /// Target component with no counterpart in the base
    Added(&'a Component),
}

impl<'a> ComponentPair<'a> {
    #[must_use]
    pub const fn base(&self) -> Option<&'a Component> {
        match *self {
            Self::Matched { base, .. } | Self::Removed(base) => Some(base),
            Self::Added(_) => None,
        }
    }

    #[must_use]
    pub const fn target(&self) -> Option<&'a Component> {
        match *self {
            Self::Matched { target, .. } | Self::Added(target) => Some(target),
            Self::Removed(_) => None,
        }
    }

    /// The component whose type and key describe this pair.
    #[must_use]
    pub const fn primary(&self) -> &'a Component {
        match *self {
            Self::Matched { base, .. } | Self::Removed(base) => base,
            Self::Added(target) => target,
        }
    }
}

/// Pairs components of two snapshots.
///
/// Implementations must only pair components of the same type, must put
/// base-derived entries first in base order, and must follow them with
/// every unclaimed target in target order.
pub trait ComponentMatcher: Send + Sync {
    fn match_components<'a>(
        &self,
        base: &'a [Component],
        target: &'a [Component],
    ) -> Vec<ComponentPair<'a>>;

    /// Short name used in logs and reports.
    fn name(&self) -> &'static str;
}

/// Selectable matching algorithm.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    JsonSchema,
    ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum MatchingStrategyKind {
    /// First unclaimed component of the same type, in list order
    #[default]
    Positional,
    /// Equal unique keys first, then positional for the rest
    Identity,
}

impl std::fmt::Display for MatchingStrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positional => write!(f, "positional"),
            Self::Identity => write!(f, "identity"),
        }
    }
}
