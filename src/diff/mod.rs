//! Change detection between matched components.
//!
//! The [`ChangeDetector`] takes the pairs produced by a
//! [`ComponentMatcher`](crate::matching::ComponentMatcher) and, using the
//! comparison properties of each type's strategy, emits:
//!
//! - `Added`: every comparison property with an empty old value
//! - `Removed`: every comparison property with an empty new value
//! - `Modified`: only the properties whose values differ
//!
//! Matched pairs with no differing property produce nothing.

mod detector;
mod result;

pub use detector::{ChangeDetector, Detection};
pub use result::{
    ChangeCounts, ChangeType, ComparisonReport, ComparisonResult, ComparisonSummary,
    PropertyChange, SkippedPair,
};
