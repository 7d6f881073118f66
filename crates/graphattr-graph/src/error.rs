//! Errors produced by the graph engine.

use graphattr_core::AttributeError;
use thiserror::Error;

/// Errors produced by [`AttributedGraph`](crate::AttributedGraph) operations.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The attribute store rejected the operation; the graph is unchanged.
    #[error(transparent)]
    Attribute(#[from] AttributeError),

    /// A vertex id was past the end of the vertex set.
    #[error("vertex not found: {id} (graph has {count} vertices)")]
    NoSuchVertexId { id: usize, count: usize },

    /// An edge id was past the end of the edge set.
    #[error("edge not found: {id} (graph has {count} edges)")]
    NoSuchEdgeId { id: usize, count: usize },

    /// A contraction membership vector did not cover the vertex set.
    #[error("invalid membership: {reason}")]
    InvalidMembership { reason: String },

    /// A vertex reordering was not a permutation of the vertex set.
    #[error("invalid permutation: {reason}")]
    InvalidPermutation { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphattr_core::Scope;

    #[test]
    fn attribute_errors_pass_through() {
        let err: GraphError = AttributeError::NoSuchAttribute {
            scope: Scope::Vertex,
            name: "w".into(),
        }
        .into();
        assert!(matches!(err, GraphError::Attribute(_)));
        assert_eq!(err.to_string(), "no such vertex attribute: 'w'");
    }

    #[test]
    fn vertex_id_message() {
        let err = GraphError::NoSuchVertexId { id: 4, count: 2 };
        assert_eq!(err.to_string(), "vertex not found: 4 (graph has 2 vertices)");
    }
}
