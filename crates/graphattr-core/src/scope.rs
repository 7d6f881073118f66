//! The three tiers at which attributes exist.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Attribute scope: a single table per graph, per vertex, or per edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Graph,
    Vertex,
    Edge,
}

impl Scope {
    /// All scopes in table order.
    pub const ALL: [Scope; 3] = [Scope::Graph, Scope::Vertex, Scope::Edge];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Graph => "graph",
            Scope::Vertex => "vertex",
            Scope::Edge => "edge",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
