//! Reduction failures.
//!
//! Combinators do not know which attribute they are reducing; the store lifts
//! a [`ReduceError`] into an [`AttributeError`] once the name is known.

use graphattr_core::{AttributeError, BoxError};
use thiserror::Error;

/// Errors produced while reducing one merge group.
#[derive(Debug, Error)]
pub enum ReduceError {
    /// A member value cannot be coerced to what the combinator needs.
    #[error("expected {expected}, got {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// A custom combination function failed.
    #[error(transparent)]
    Custom(BoxError),
}

impl ReduceError {
    /// Attaches the attribute name being combined.
    pub fn for_attribute(self, attribute: &str) -> AttributeError {
        match self {
            ReduceError::TypeMismatch { expected, found } => AttributeError::TypeMismatch {
                attribute: attribute.to_string(),
                expected,
                found,
            },
            ReduceError::Custom(source) => AttributeError::CombinatorFailure {
                attribute: attribute.to_string(),
                source,
            },
        }
    }
}
