//! A minimal graph engine driving the attribute-table adapter.
//!
//! [`AttributedGraph`] owns a `petgraph` topology and an attribute store, and
//! calls the store's [`AttributeTableAdapter`] callbacks at each structural
//! mutation point: vertex and edge insertion, deletion (as a permutation),
//! reordering, contraction and simplification (as combines), and copying.
//!
//! # Modules
//!
//! - [`graph`]: the [`AttributedGraph`] type
//! - [`error`]: [`GraphError`]

pub mod error;
pub mod graph;

pub use error::GraphError;
pub use graph::AttributedGraph;
pub use graphattr_store::AttributeTableAdapter;
