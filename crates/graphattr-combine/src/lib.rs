//! Reduction strategies for merging attribute values.
//!
//! When several vertices or edges collapse into one (contraction,
//! simplification), each attribute's values for the merged entities are
//! reduced to one value by a [`Combinator`]. A [`CombinationSpec`] picks the
//! combinator per attribute name, falling back to a default entry and then to
//! [`Combinator::Ignore`].

pub mod combinator;
pub mod error;
pub mod spec;

pub use combinator::{Combinator, CustomCombinator};
pub use error::ReduceError;
pub use spec::CombinationSpec;
