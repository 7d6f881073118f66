//! Error types shared by the attribute crates.
//!
//! Uses `thiserror` for structured, matchable variants. Lookup misses and
//! type mismatches are recoverable; every mutating entry point guarantees that
//! a returned error leaves the store in its pre-call state.

use thiserror::Error;

use crate::scope::Scope;

/// Boxed error reported by caller-supplied combination functions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced by attribute storage, inference and combination.
#[derive(Debug, Error)]
pub enum AttributeError {
    /// Allocating storage for a sequence or table failed.
    #[error("out of memory allocating {requested} attribute values")]
    OutOfMemory { requested: usize },

    /// The named attribute does not exist in the given scope.
    #[error("no such {scope} attribute: '{name}'")]
    NoSuchAttribute { scope: Scope, name: String },

    /// No vertex carries the requested name.
    #[error("no such vertex: {name}")]
    NoSuchVertex { name: String },

    /// A value could not be coerced to the type an operation needs.
    #[error("type mismatch in attribute '{attribute}': expected {expected}, got {found}")]
    TypeMismatch {
        attribute: String,
        expected: &'static str,
        found: &'static str,
    },

    /// An attribute name was rejected before any mutation happened.
    #[error("invalid attribute name: {reason}")]
    InvalidAttributeName { reason: String },

    /// A custom combination function reported failure.
    #[error("combination of attribute '{attribute}' failed: {source}")]
    CombinatorFailure {
        attribute: String,
        #[source]
        source: BoxError,
    },

    /// A value record does not have one value per entity.
    #[error("{scope} attribute '{name}' has {got} values, expected {expected}")]
    LengthMismatch {
        scope: Scope,
        name: String,
        expected: usize,
        got: usize,
    },

    /// A selection, permutation or merge group referenced a missing position.
    #[error("{scope} position {position} out of range (len {len})")]
    PositionOutOfRange {
        scope: Scope,
        position: usize,
        len: usize,
    },

    /// A declarative combination spec named an unknown reduction.
    #[error("unknown combinator: '{name}'")]
    UnknownCombinator { name: String },
}
