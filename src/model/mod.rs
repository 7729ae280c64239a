//! Data model shared by the parser, matcher and change detector.
//!
//! A snapshot is parsed into [`Component`]s, each tagged with a closed
//! [`ComponentType`]. Sections that cannot become components are kept as
//! [`DroppedSection`]s on the [`ParsedSnapshot`] instead of failing the parse.

mod component;
mod snapshot;

pub use component::*;
pub use snapshot::*;
