//! Value model for graph attribute storage.
//!
//! - [`value`]: the [`Value`] tagged union stored in every attribute slot
//! - [`scope`]: the three attribute tiers (graph, vertex, edge)
//! - [`sequence`]: [`AttributeSequence`], one value per entity
//! - [`infer`]: [`AttributeKind`] classification of a sequence
//! - [`error`]: [`AttributeError`] shared by every crate in the workspace

pub mod error;
pub mod infer;
pub mod scope;
pub mod sequence;
pub mod value;

// Re-export commonly used types
pub use error::{AttributeError, BoxError};
pub use infer::{infer_kind, AttributeKind};
pub use scope::Scope;
pub use sequence::{validate_name, AttributeSequence};
pub use value::{Opaque, Value};
