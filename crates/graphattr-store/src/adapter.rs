//! The [`AttributeTableAdapter`] trait: the callbacks a graph engine invokes
//! at each structural mutation and attribute read.
//!
//! Callback groups:
//! - **Lifecycle**: `init`, `destroy`, `copy`
//! - **Structure**: add/permute/combine for vertices and for edges
//! - **Queries**: `get_info`, `has_attr`, `get_type`
//! - **Typed getters**: numeric, string and boolean views of one attribute
//!
//! Every structural callback is all-or-nothing: on error the adapter is left
//! exactly as it was before the call.

use graphattr_combine::CombinationSpec;
use graphattr_core::{validate_name, AttributeError, AttributeKind, Scope, Value};
use indexmap::IndexMap;

use crate::config::StoreConfig;
use crate::store::AttributeStore;
use crate::types::{AttributeInfo, CopyScopes, MergeGroup, NewAttributes, Selection};

/// The attribute-table contract between a graph engine and its attribute
/// storage.
pub trait AttributeTableAdapter: Sized {
    // -------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------

    /// Creates storage for a new, empty graph, seeded with graph attributes.
    fn init(config: StoreConfig, graph_attributes: Vec<(String, Value)>)
        -> Result<Self, AttributeError>;

    /// Releases the storage. Consuming `self` makes a second call impossible.
    fn destroy(self);

    /// Deep-copies the selected scopes. Unselected scopes start empty.
    fn copy(&self, scopes: CopyScopes) -> Result<Self, AttributeError>;

    // -------------------------------------------------------------------
    // Vertex structure
    // -------------------------------------------------------------------

    /// Appends `count` vertices. Attributes missing from `new` get nulls.
    fn add_vertices(&mut self, count: usize, new: &NewAttributes) -> Result<(), AttributeError>;

    /// Rebuilds vertex attributes so new position `i` holds old `mapping[i]`.
    fn permute_vertices(&mut self, mapping: &[usize]) -> Result<(), AttributeError>;

    /// Collapses vertices: new vertex `i` is the merge of `groups[i]`.
    fn combine_vertices(
        &mut self,
        groups: &[MergeGroup],
        spec: &CombinationSpec,
    ) -> Result<(), AttributeError>;

    // -------------------------------------------------------------------
    // Edge structure
    // -------------------------------------------------------------------

    fn add_edges(&mut self, count: usize, new: &NewAttributes) -> Result<(), AttributeError>;

    fn permute_edges(&mut self, mapping: &[usize]) -> Result<(), AttributeError>;

    fn combine_edges(
        &mut self,
        groups: &[MergeGroup],
        spec: &CombinationSpec,
    ) -> Result<(), AttributeError>;

    /// Permutes vertices and edges together. Both mappings are checked
    /// before either scope changes, so a bad edge mapping leaves the vertex
    /// table untouched.
    fn permute_vertices_and_edges(
        &mut self,
        vertex_mapping: &[usize],
        edge_mapping: &[usize],
    ) -> Result<(), AttributeError>;

    // -------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------

    /// Names and inferred kinds of every attribute, per scope.
    fn get_info(&self) -> AttributeInfo;

    /// Whether `name` exists in `scope`. The empty name is never stored,
    /// so it reports `false` rather than an error.
    fn has_attr(&self, scope: Scope, name: &str) -> bool;

    /// Inferred kind of one attribute.
    fn get_type(&self, scope: Scope, name: &str) -> Result<AttributeKind, AttributeError>;

    // -------------------------------------------------------------------
    // Typed getters
    // -------------------------------------------------------------------

    /// Numeric view. Null reads as NaN, booleans as 1.0/0.0.
    fn get_numeric(
        &self,
        scope: Scope,
        name: &str,
        selection: &Selection,
    ) -> Result<Vec<f64>, AttributeError>;

    /// String view. Null reads as the empty string.
    fn get_string(
        &self,
        scope: Scope,
        name: &str,
        selection: &Selection,
    ) -> Result<Vec<String>, AttributeError>;

    /// Boolean view. Null reads as false, numbers and strings by truthiness.
    fn get_boolean(
        &self,
        scope: Scope,
        name: &str,
        selection: &Selection,
    ) -> Result<Vec<bool>, AttributeError>;

    // -------------------------------------------------------------------
    // Name lookup
    // -------------------------------------------------------------------

    /// Position of the vertex whose `name` attribute equals `name`.
    fn resolve_vertex_by_name(&self, name: &Value) -> Result<usize, AttributeError>;
}

/// Applies `convert` to each selected value, reporting the first value it
/// rejects as a type mismatch on `name`.
fn typed<T>(
    store: &AttributeStore,
    scope: Scope,
    name: &str,
    selection: &Selection,
    expected: &'static str,
    convert: impl Fn(&Value) -> Result<T, &'static str>,
) -> Result<Vec<T>, AttributeError> {
    store
        .select(scope, name, selection)?
        .into_iter()
        .map(|value| {
            convert(value).map_err(|found| AttributeError::TypeMismatch {
                attribute: name.to_string(),
                expected,
                found,
            })
        })
        .collect()
}

impl AttributeTableAdapter for AttributeStore {
    fn init(
        config: StoreConfig,
        graph_attributes: Vec<(String, Value)>,
    ) -> Result<Self, AttributeError> {
        // Validate everything before building, so a bad record never leaves a
        // half-populated store behind.
        for (name, _) in &graph_attributes {
            validate_name(name)?;
        }
        let mut store = AttributeStore::new(&config);
        for (name, value) in graph_attributes {
            store.set_attribute(Scope::Graph, &name, vec![value])?;
        }
        tracing::debug!(
            seeded = config.random_seed.is_some(),
            graph_attributes = store.table(Scope::Graph).len(),
            "attribute store initialised"
        );
        Ok(store)
    }

    fn destroy(self) {
        tracing::debug!(
            vertices = self.vertex_count(),
            edges = self.edge_count(),
            "attribute store destroyed"
        );
        drop(self);
    }

    fn copy(&self, scopes: CopyScopes) -> Result<Self, AttributeError> {
        self.copy_scopes(scopes)
    }

    fn add_vertices(&mut self, count: usize, new: &NewAttributes) -> Result<(), AttributeError> {
        self.add_entities(Scope::Vertex, count, new)
    }

    fn permute_vertices(&mut self, mapping: &[usize]) -> Result<(), AttributeError> {
        self.permute_entities(Scope::Vertex, mapping)
    }

    fn combine_vertices(
        &mut self,
        groups: &[MergeGroup],
        spec: &CombinationSpec,
    ) -> Result<(), AttributeError> {
        self.combine_entities(Scope::Vertex, groups, spec)
    }

    fn add_edges(&mut self, count: usize, new: &NewAttributes) -> Result<(), AttributeError> {
        self.add_entities(Scope::Edge, count, new)
    }

    fn permute_edges(&mut self, mapping: &[usize]) -> Result<(), AttributeError> {
        self.permute_entities(Scope::Edge, mapping)
    }

    fn combine_edges(
        &mut self,
        groups: &[MergeGroup],
        spec: &CombinationSpec,
    ) -> Result<(), AttributeError> {
        self.combine_entities(Scope::Edge, groups, spec)
    }

    fn permute_vertices_and_edges(
        &mut self,
        vertex_mapping: &[usize],
        edge_mapping: &[usize],
    ) -> Result<(), AttributeError> {
        AttributeStore::permute_vertices_and_edges(self, vertex_mapping, edge_mapping)
    }

    fn get_info(&self) -> AttributeInfo {
        let kinds = |scope: Scope| -> IndexMap<String, AttributeKind> {
            self.table(scope)
                .iter()
                .map(|(name, seq)| (name.clone(), seq.kind()))
                .collect()
        };
        AttributeInfo {
            graph: kinds(Scope::Graph),
            vertex: kinds(Scope::Vertex),
            edge: kinds(Scope::Edge),
        }
    }

    fn has_attr(&self, scope: Scope, name: &str) -> bool {
        self.table(scope).contains_key(name)
    }

    fn get_type(&self, scope: Scope, name: &str) -> Result<AttributeKind, AttributeError> {
        validate_name(name)?;
        self.attribute(scope, name)
            .map(|seq| seq.kind())
            .ok_or_else(|| AttributeError::NoSuchAttribute {
                scope,
                name: name.to_string(),
            })
    }

    fn get_numeric(
        &self,
        scope: Scope,
        name: &str,
        selection: &Selection,
    ) -> Result<Vec<f64>, AttributeError> {
        typed(self, scope, name, selection, "number", |value| {
            value.to_number().map(|n| n.unwrap_or(f64::NAN))
        })
    }

    fn get_string(
        &self,
        scope: Scope,
        name: &str,
        selection: &Selection,
    ) -> Result<Vec<String>, AttributeError> {
        typed(self, scope, name, selection, "string", |value| {
            value.to_text().map(|text| text.into_owned())
        })
    }

    fn get_boolean(
        &self,
        scope: Scope,
        name: &str,
        selection: &Selection,
    ) -> Result<Vec<bool>, AttributeError> {
        typed(self, scope, name, selection, "boolean", Value::to_bool)
    }

    fn resolve_vertex_by_name(&self, name: &Value) -> Result<usize, AttributeError> {
        self.lookup_name(name)
    }
}
