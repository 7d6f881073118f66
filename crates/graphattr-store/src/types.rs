//! Argument and result types for the adapter callbacks.

use graphattr_core::{AttributeKind, Value};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Values for newly inserted entities, keyed by attribute name. Each vector
/// holds exactly one value per new entity.
pub type NewAttributes = IndexMap<String, Vec<Value>>;

/// Old entity positions that collapse into one new entity, in order.
pub type MergeGroup = SmallVec<[usize; 4]>;

/// Which positions a typed getter returns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// Every entity, in position order.
    #[default]
    All,
    /// The listed positions, in the listed order.
    Positions(Vec<usize>),
}

impl Selection {
    pub fn single(position: usize) -> Self {
        Selection::Positions(vec![position])
    }
}

/// Which scopes [`copy`](crate::AttributeTableAdapter::copy) carries over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyScopes {
    pub graph: bool,
    pub vertex: bool,
    pub edge: bool,
}

impl CopyScopes {
    pub const ALL: CopyScopes = CopyScopes {
        graph: true,
        vertex: true,
        edge: true,
    };

    pub const NONE: CopyScopes = CopyScopes {
        graph: false,
        vertex: false,
        edge: false,
    };
}

impl Default for CopyScopes {
    fn default() -> Self {
        CopyScopes::ALL
    }
}

/// Attribute names and inferred kinds for all three scopes, in table order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttributeInfo {
    pub graph: IndexMap<String, AttributeKind>,
    pub vertex: IndexMap<String, AttributeKind>,
    pub edge: IndexMap<String, AttributeKind>,
}
