//! Component matching across two snapshots.
//!
//! A matcher turns the base and target component lists into
//! [`ComponentPair`]s. Pairing never crosses component types.
//!
//! - [`PositionalMatcher`] (default): first unclaimed same-type target wins
//! - [`IdentityMatcher`]: equal unique keys first, positional for the rest

mod identity;
mod positional;
mod traits;

pub use identity::IdentityMatcher;
pub use positional::PositionalMatcher;
pub use traits::{ComponentMatcher, ComponentPair, MatchingStrategyKind};

use std::sync::Arc;

/// Build the matcher for a configured strategy.
#[must_use]
pub fn matcher_for(kind: MatchingStrategyKind) -> Arc<dyn ComponentMatcher> {
    match kind {
        MatchingStrategyKind::Positional => Arc::new(PositionalMatcher),
        MatchingStrategyKind::Identity => Arc::new(IdentityMatcher),
    }
}
