//! The in-memory attribute store.
//!
//! [`AttributeStore`] keeps one insertion-ordered table per scope. Vertex and
//! edge sequences always hold exactly one value per entity; graph sequences
//! hold exactly one value. The structural callbacks (add/permute/combine) live
//! in [`crate::adapter`]; this module has the shared machinery plus direct
//! accessors and setters used by binding layers.

use graphattr_combine::CombinationSpec;
use graphattr_core::{validate_name, AttributeError, AttributeSequence, Scope, Value};
use indexmap::IndexMap;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::StoreConfig;
use crate::name_index::{NameIndex, NAME_ATTRIBUTE};
use crate::types::{CopyScopes, MergeGroup, NewAttributes, Selection};

/// Attribute name -> sequence, in insertion order.
pub type AttributeTable = IndexMap<String, AttributeSequence>;

/// An empty table with room for `capacity` attributes.
fn try_table(capacity: usize) -> Result<AttributeTable, AttributeError> {
    let mut table = AttributeTable::new();
    table
        .try_reserve_exact(capacity)
        .map_err(|_| AttributeError::OutOfMemory {
            requested: capacity,
        })?;
    Ok(table)
}

/// Attribute storage owned by exactly one graph.
#[derive(Debug)]
pub struct AttributeStore {
    graph: AttributeTable,
    vertices: AttributeTable,
    edges: AttributeTable,
    vertex_count: usize,
    edge_count: usize,
    name_index: NameIndex,
    /// Single random source for the `Random` combinator.
    rng: ChaCha8Rng,
}

impl AttributeStore {
    /// Creates an empty store for a graph with no vertices or edges.
    pub fn new(config: &StoreConfig) -> Self {
        AttributeStore {
            graph: AttributeTable::new(),
            vertices: AttributeTable::new(),
            edges: AttributeTable::new(),
            vertex_count: 0,
            edge_count: 0,
            name_index: NameIndex::new(),
            rng: config.rng(),
        }
    }

    // -----------------------------------------------------------------------
    // Read-only accessors
    // -----------------------------------------------------------------------

    pub fn table(&self, scope: Scope) -> &AttributeTable {
        match scope {
            Scope::Graph => &self.graph,
            Scope::Vertex => &self.vertices,
            Scope::Edge => &self.edges,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Number of values every sequence in `scope` holds.
    pub fn entity_count(&self, scope: Scope) -> usize {
        match scope {
            Scope::Graph => 1,
            Scope::Vertex => self.vertex_count,
            Scope::Edge => self.edge_count,
        }
    }

    pub fn attribute(&self, scope: Scope, name: &str) -> Option<&AttributeSequence> {
        self.table(scope).get(name)
    }

    pub fn attribute_names(&self, scope: Scope) -> impl Iterator<Item = &str> + '_ {
        self.table(scope).keys().map(String::as_str)
    }

    pub fn graph_attribute(&self, name: &str) -> Option<&Value> {
        self.graph.get(name).and_then(|seq| seq.get(0))
    }

    /// Returns true once a name lookup has built the index and nothing has
    /// invalidated it since.
    pub fn is_name_index_built(&self) -> bool {
        self.name_index.is_built()
    }

    // -----------------------------------------------------------------------
    // Name resolution
    // -----------------------------------------------------------------------

    /// Resolves each name to a vertex position, failing on the first miss.
    pub fn resolve_vertices_by_name(&self, names: &[Value]) -> Result<Vec<usize>, AttributeError> {
        names
            .iter()
            .map(|name| self.lookup_name(name))
            .collect()
    }

    pub(crate) fn lookup_name(&self, name: &Value) -> Result<usize, AttributeError> {
        self.name_index
            .lookup(self.vertices.get(NAME_ATTRIBUTE), name)
    }

    // -----------------------------------------------------------------------
    // Setters
    // -----------------------------------------------------------------------

    /// Replaces (or creates) a whole attribute sequence.
    ///
    /// `values` must hold one value per entity of `scope` (one for graph
    /// scope).
    pub fn set_attribute(
        &mut self,
        scope: Scope,
        name: &str,
        values: Vec<Value>,
    ) -> Result<(), AttributeError> {
        validate_name(name)?;
        let expected = self.entity_count(scope);
        if values.len() != expected {
            return Err(AttributeError::LengthMismatch {
                scope,
                name: name.to_string(),
                expected,
                got: values.len(),
            });
        }
        self.table_mut(scope)
            .insert(name.to_string(), AttributeSequence::from(values));
        self.after_attribute_write(scope, name);
        Ok(())
    }

    /// Sets a graph-scope attribute.
    pub fn set_graph_attribute(
        &mut self,
        name: &str,
        value: impl Into<Value>,
    ) -> Result<(), AttributeError> {
        self.set_attribute(Scope::Graph, name, vec![value.into()])
    }

    /// Overwrites one value, creating a null-filled attribute first if `name`
    /// does not exist yet. Returns the previous value.
    pub fn set_value(
        &mut self,
        scope: Scope,
        name: &str,
        position: usize,
        value: Value,
    ) -> Result<Value, AttributeError> {
        validate_name(name)?;
        let len = self.entity_count(scope);
        if position >= len {
            return Err(AttributeError::PositionOutOfRange {
                scope,
                position,
                len,
            });
        }
        let old = match self.table_mut(scope).get_mut(name) {
            Some(seq) => seq.set(scope, position, value)?,
            None => {
                let mut seq = AttributeSequence::nulls(len)?;
                seq.set(scope, position, value)?;
                self.table_mut(scope).insert(name.to_string(), seq);
                Value::Null
            }
        };
        self.after_attribute_write(scope, name);
        Ok(old)
    }

    /// Removes an attribute, keeping the order of the remaining ones.
    pub fn remove_attribute(
        &mut self,
        scope: Scope,
        name: &str,
    ) -> Result<AttributeSequence, AttributeError> {
        validate_name(name)?;
        let removed = self
            .table_mut(scope)
            .shift_remove(name)
            .ok_or_else(|| AttributeError::NoSuchAttribute {
                scope,
                name: name.to_string(),
            })?;
        self.after_attribute_write(scope, name);
        Ok(removed)
    }

    /// Replaces the random source with one seeded from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    // -----------------------------------------------------------------------
    // Structural machinery shared by the vertex and edge callbacks
    // -----------------------------------------------------------------------

    fn table_mut(&mut self, scope: Scope) -> &mut AttributeTable {
        match scope {
            Scope::Graph => &mut self.graph,
            Scope::Vertex => &mut self.vertices,
            Scope::Edge => &mut self.edges,
        }
    }

    fn set_entity_count(&mut self, scope: Scope, count: usize) {
        match scope {
            Scope::Graph => {}
            Scope::Vertex => self.vertex_count = count,
            Scope::Edge => self.edge_count = count,
        }
    }

    fn after_attribute_write(&mut self, scope: Scope, name: &str) {
        if scope == Scope::Vertex && name == NAME_ATTRIBUTE {
            self.name_index.invalidate();
        }
    }

    fn after_structural_change(&mut self, scope: Scope) {
        if scope == Scope::Vertex {
            self.name_index.invalidate();
        }
        #[cfg(debug_assertions)]
        self.assert_consistency();
    }

    /// Appends `count` entities to `scope`.
    pub(crate) fn add_entities(
        &mut self,
        scope: Scope,
        count: usize,
        new: &NewAttributes,
    ) -> Result<(), AttributeError> {
        debug_assert!(scope != Scope::Graph);
        for (name, values) in new {
            validate_name(name)?;
            if values.len() != count {
                return Err(AttributeError::LengthMismatch {
                    scope,
                    name: name.clone(),
                    expected: count,
                    got: values.len(),
                });
            }
        }

        let current = self.entity_count(scope);
        let total = current
            .checked_add(count)
            .ok_or(AttributeError::OutOfMemory { requested: count })?;

        // Attributes first seen in this call, built off to the side.
        let mut created = Vec::new();
        for (name, values) in new {
            if self.table(scope).contains_key(name) {
                continue;
            }
            let mut seq = AttributeSequence::try_with_capacity(total)?;
            seq.extend_or_nulls(current, None);
            seq.extend_or_nulls(count, Some(values));
            created.push((name.clone(), seq));
        }

        // Reserving capacity is not observable, so a failure here still
        // leaves every sequence unchanged.
        let table = self.table_mut(scope);
        for seq in table.values_mut() {
            seq.try_reserve(count)?;
        }

        for (name, seq) in table.iter_mut() {
            seq.extend_or_nulls(count, new.get(name).map(Vec::as_slice));
        }
        table.extend(created);

        self.set_entity_count(scope, total);
        tracing::debug!(%scope, added = count, total, "entities added");
        self.after_structural_change(scope);
        Ok(())
    }

    /// Rebuilds every sequence of `scope` as `old[mapping[i]]`.
    pub(crate) fn permute_entities(
        &mut self,
        scope: Scope,
        mapping: &[usize],
    ) -> Result<(), AttributeError> {
        let rebuilt = self.permuted_table(scope, mapping)?;
        self.publish_permuted(scope, rebuilt, mapping.len());
        self.after_structural_change(scope);
        Ok(())
    }

    /// Permutes the vertex and edge tables as one operation: both rebuilt
    /// tables are built before either is published.
    pub(crate) fn permute_vertices_and_edges(
        &mut self,
        vertex_mapping: &[usize],
        edge_mapping: &[usize],
    ) -> Result<(), AttributeError> {
        let vertices = self.permuted_table(Scope::Vertex, vertex_mapping)?;
        let edges = self.permuted_table(Scope::Edge, edge_mapping)?;
        self.publish_permuted(Scope::Vertex, vertices, vertex_mapping.len());
        self.publish_permuted(Scope::Edge, edges, edge_mapping.len());
        self.after_structural_change(Scope::Vertex);
        Ok(())
    }

    /// Validates `mapping` and gathers a new table for `scope` without
    /// touching the store.
    fn permuted_table(
        &self,
        scope: Scope,
        mapping: &[usize],
    ) -> Result<AttributeTable, AttributeError> {
        debug_assert!(scope != Scope::Graph);
        let len = self.entity_count(scope);
        if let Some(&position) = mapping.iter().find(|&&old| old >= len) {
            return Err(AttributeError::PositionOutOfRange {
                scope,
                position,
                len,
            });
        }

        let table = self.table(scope);
        let mut rebuilt = try_table(table.len())?;
        for (name, seq) in table {
            rebuilt.insert(name.clone(), seq.gather(mapping)?);
        }
        Ok(rebuilt)
    }

    fn publish_permuted(&mut self, scope: Scope, rebuilt: AttributeTable, count: usize) {
        let from = self.entity_count(scope);
        *self.table_mut(scope) = rebuilt;
        self.set_entity_count(scope, count);
        tracing::debug!(%scope, from, to = count, "entities permuted");
    }

    /// Replaces the table of `scope` with one value per merge group.
    ///
    /// Any attribute failing to combine aborts the whole operation.
    pub(crate) fn combine_entities(
        &mut self,
        scope: Scope,
        groups: &[MergeGroup],
        spec: &CombinationSpec,
    ) -> Result<(), AttributeError> {
        debug_assert!(scope != Scope::Graph);
        let len = self.entity_count(scope);
        for group in groups {
            if let Some(&position) = group.iter().find(|&&old| old >= len) {
                return Err(AttributeError::PositionOutOfRange {
                    scope,
                    position,
                    len,
                });
            }
        }

        let table = match scope {
            Scope::Graph => &self.graph,
            Scope::Vertex => &self.vertices,
            Scope::Edge => &self.edges,
        };
        let combined = combine_table(table, groups, spec, &mut self.rng)?;

        let kept = combined.len();
        *self.table_mut(scope) = combined;
        self.set_entity_count(scope, groups.len());
        tracing::debug!(%scope, from = len, to = groups.len(), kept, "entities combined");
        self.after_structural_change(scope);
        Ok(())
    }

    /// Deep copy of the selected scopes into a fresh store.
    pub(crate) fn copy_scopes(&self, scopes: CopyScopes) -> Result<Self, AttributeError> {
        let copy_table = |selected: bool, table: &AttributeTable| {
            if !selected {
                return Ok(AttributeTable::new());
            }
            let mut copy = try_table(table.len())?;
            for (name, seq) in table {
                copy.insert(name.clone(), seq.try_clone()?);
            }
            Ok::<_, AttributeError>(copy)
        };

        let store = AttributeStore {
            graph: copy_table(scopes.graph, &self.graph)?,
            vertices: copy_table(scopes.vertex, &self.vertices)?,
            edges: copy_table(scopes.edge, &self.edges)?,
            vertex_count: self.vertex_count,
            edge_count: self.edge_count,
            name_index: NameIndex::new(),
            rng: self.rng.clone(),
        };
        tracing::debug!(?scopes, "attribute store copied");
        Ok(store)
    }

    /// Values of `name` at the selected positions.
    pub(crate) fn select(
        &self,
        scope: Scope,
        name: &str,
        selection: &Selection,
    ) -> Result<Vec<&Value>, AttributeError> {
        validate_name(name)?;
        let seq = self
            .attribute(scope, name)
            .ok_or_else(|| AttributeError::NoSuchAttribute {
                scope,
                name: name.to_string(),
            })?;
        match selection {
            Selection::All => Ok(seq.iter().collect()),
            Selection::Positions(positions) => positions
                .iter()
                .map(|&position| {
                    seq.get(position).ok_or(AttributeError::PositionOutOfRange {
                        scope,
                        position,
                        len: seq.len(),
                    })
                })
                .collect(),
        }
    }

    // -----------------------------------------------------------------------
    // Debug consistency assertion
    // -----------------------------------------------------------------------

    /// Verifies that every sequence holds one value per entity of its scope.
    ///
    /// Only called in debug builds (via `cfg(debug_assertions)`).
    #[cfg(debug_assertions)]
    fn assert_consistency(&self) {
        for scope in Scope::ALL {
            let expected = self.entity_count(scope);
            for (name, seq) in self.table(scope) {
                assert_eq!(
                    seq.len(),
                    expected,
                    "{} attribute '{}' has {} values, expected {}",
                    scope,
                    name,
                    seq.len(),
                    expected
                );
            }
        }
    }
}

/// Reduces every attribute of `table` over `groups`, dropping ignored ones.
fn combine_table(
    table: &AttributeTable,
    groups: &[MergeGroup],
    spec: &CombinationSpec,
    rng: &mut ChaCha8Rng,
) -> Result<AttributeTable, AttributeError> {
    let mut combined = try_table(table.len())?;
    let largest = groups.iter().map(|group| group.len()).max().unwrap_or(0);
    let mut members: Vec<Value> = Vec::new();
    members
        .try_reserve_exact(largest)
        .map_err(|_| AttributeError::OutOfMemory { requested: largest })?;
    for (name, seq) in table {
        let combinator = spec.resolve(name);
        if combinator.is_ignore() {
            continue;
        }
        let mut out = AttributeSequence::try_with_capacity(groups.len())?;
        for group in groups {
            members.clear();
            members.extend(group.iter().map(|&old| seq[old].clone()));
            let value = combinator
                .reduce(&members, rng)
                .map_err(|e| e.for_attribute(name))?;
            out.push(value);
        }
        combined.insert(name.clone(), out);
    }
    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::AttributeTableAdapter;
    use graphattr_combine::Combinator;
    use smallvec::smallvec;

    fn store_with_vertices(n: usize) -> AttributeStore {
        let mut store = AttributeStore::new(&StoreConfig::default().with_seed(1));
        store.add_entities(Scope::Vertex, n, &NewAttributes::new()).unwrap();
        store
    }

    fn numbers(xs: &[f64]) -> Vec<Value> {
        xs.iter().map(|&x| Value::Number(x)).collect()
    }

    #[test]
    fn add_entities_pads_existing_and_new_attributes() {
        let mut store = store_with_vertices(2);
        store
            .set_attribute(Scope::Vertex, "weight", numbers(&[1.0, 2.0]))
            .unwrap();

        let mut new = NewAttributes::new();
        new.insert("color".into(), vec![Value::from("red")]);
        store.add_entities(Scope::Vertex, 1, &new).unwrap();

        assert_eq!(store.vertex_count(), 3);
        let weight = store.attribute(Scope::Vertex, "weight").unwrap();
        assert_eq!(weight.as_slice(), &[Value::Number(1.0), Value::Number(2.0), Value::Null]);
        let color = store.attribute(Scope::Vertex, "color").unwrap();
        assert_eq!(color.as_slice(), &[Value::Null, Value::Null, Value::from("red")]);
    }

    #[test]
    fn add_entities_length_mismatch_leaves_store_untouched() {
        let mut store = store_with_vertices(2);
        store
            .set_attribute(Scope::Vertex, "weight", numbers(&[1.0, 2.0]))
            .unwrap();

        let mut new = NewAttributes::new();
        new.insert("weight".into(), numbers(&[5.0]));
        new.insert("color".into(), vec![Value::from("a"), Value::from("b"), Value::from("c")]);
        let err = store.add_entities(Scope::Vertex, 2, &new).unwrap_err();
        assert!(matches!(err, AttributeError::LengthMismatch { .. }));

        assert_eq!(store.vertex_count(), 2);
        assert_eq!(store.attribute(Scope::Vertex, "weight").unwrap().len(), 2);
        assert!(store.attribute(Scope::Vertex, "color").is_none());
    }

    #[test]
    fn add_entities_rejects_empty_name_before_mutating() {
        let mut store = store_with_vertices(1);
        let mut new = NewAttributes::new();
        new.insert(String::new(), vec![Value::Null]);
        let err = store.add_entities(Scope::Vertex, 1, &new).unwrap_err();
        assert!(matches!(err, AttributeError::InvalidAttributeName { .. }));
        assert_eq!(store.vertex_count(), 1);
    }

    #[test]
    fn permute_out_of_range_is_rejected() {
        let mut store = store_with_vertices(2);
        let err = store.permute_entities(Scope::Vertex, &[0, 2]).unwrap_err();
        assert!(matches!(
            err,
            AttributeError::PositionOutOfRange { position: 2, len: 2, .. }
        ));
        assert_eq!(store.vertex_count(), 2);
    }

    #[test]
    fn combine_aborts_whole_operation_on_type_mismatch() {
        let mut store = store_with_vertices(3);
        store
            .set_attribute(Scope::Vertex, "weight", numbers(&[1.0, 2.0, 3.0]))
            .unwrap();
        store
            .set_attribute(
                Scope::Vertex,
                "label",
                vec![Value::from("a"), Value::Number(1.0), Value::from("c")],
            )
            .unwrap();

        let spec = CombinationSpec::uniform(Combinator::Sum);
        let groups: Vec<MergeGroup> = vec![smallvec![0, 1], smallvec![2]];
        let err = store
            .combine_entities(Scope::Vertex, &groups, &spec)
            .unwrap_err();
        match err {
            AttributeError::TypeMismatch { attribute, .. } => assert_eq!(attribute, "label"),
            other => panic!("expected TypeMismatch, got {:?}", other),
        }

        // Nothing was published: weight still has its three original values.
        assert_eq!(store.vertex_count(), 3);
        assert_eq!(
            store.attribute(Scope::Vertex, "weight").unwrap().as_slice(),
            numbers(&[1.0, 2.0, 3.0]).as_slice()
        );
    }

    #[test]
    fn set_value_creates_missing_attribute() {
        let mut store = store_with_vertices(3);
        let old = store
            .set_value(Scope::Vertex, "flag", 1, Value::Bool(true))
            .unwrap();
        assert_eq!(old, Value::Null);
        let flag = store.attribute(Scope::Vertex, "flag").unwrap();
        assert_eq!(flag.as_slice(), &[Value::Null, Value::Bool(true), Value::Null]);
    }

    #[test]
    fn set_attribute_checks_length() {
        let mut store = store_with_vertices(2);
        let err = store
            .set_attribute(Scope::Vertex, "w", numbers(&[1.0]))
            .unwrap_err();
        assert!(matches!(
            err,
            AttributeError::LengthMismatch { expected: 2, got: 1, .. }
        ));
    }

    #[test]
    fn remove_attribute_keeps_order() {
        let mut store = store_with_vertices(1);
        for name in ["a", "b", "c"] {
            store
                .set_attribute(Scope::Vertex, name, vec![Value::Null])
                .unwrap();
        }
        store.remove_attribute(Scope::Vertex, "b").unwrap();
        let names: Vec<&str> = store.attribute_names(Scope::Vertex).collect();
        assert_eq!(names, vec!["a", "c"]);

        assert!(matches!(
            store.remove_attribute(Scope::Vertex, "b"),
            Err(AttributeError::NoSuchAttribute { .. })
        ));
    }

    #[test]
    fn remove_empty_name_is_invalid() {
        let mut store = store_with_vertices(1);
        assert!(matches!(
            store.remove_attribute(Scope::Vertex, ""),
            Err(AttributeError::InvalidAttributeName { .. })
        ));
        assert!(matches!(
            store.select(Scope::Edge, "", &Selection::All),
            Err(AttributeError::InvalidAttributeName { .. })
        ));
    }

    #[test]
    fn joint_permute_rejects_bad_edge_mapping_without_change() {
        let mut store = store_with_vertices(2);
        store
            .set_attribute(Scope::Vertex, "w", numbers(&[1.0, 2.0]))
            .unwrap();
        store.add_entities(Scope::Edge, 1, &NewAttributes::new()).unwrap();

        let err = store.permute_vertices_and_edges(&[1, 0], &[5]).unwrap_err();
        assert!(matches!(
            err,
            AttributeError::PositionOutOfRange { scope: Scope::Edge, position: 5, len: 1 }
        ));
        assert_eq!(store.attribute(Scope::Vertex, "w").unwrap().as_slice(), numbers(&[1.0, 2.0]));
        assert_eq!(store.vertex_count(), 2);
        assert_eq!(store.edge_count(), 1);
    }

    #[test]
    fn joint_permute_moves_both_scopes() {
        let mut store = store_with_vertices(3);
        store
            .set_attribute(Scope::Vertex, NAME_ATTRIBUTE, vec![Value::from("a"), Value::from("b"), Value::from("c")])
            .unwrap();
        store.add_entities(Scope::Edge, 2, &NewAttributes::new()).unwrap();
        store
            .set_attribute(Scope::Edge, "e", numbers(&[10.0, 20.0]))
            .unwrap();
        assert_eq!(store.resolve_vertex_by_name(&Value::from("c")).unwrap(), 2);

        store.permute_vertices_and_edges(&[2, 0], &[1]).unwrap();
        assert_eq!(store.vertex_count(), 2);
        assert_eq!(store.edge_count(), 1);
        assert_eq!(store.attribute(Scope::Edge, "e").unwrap().as_slice(), numbers(&[20.0]));
        assert!(!store.is_name_index_built());
        assert_eq!(store.resolve_vertex_by_name(&Value::from("c")).unwrap(), 0);
    }

    #[test]
    fn combine_reserves_for_largest_group() {
        let mut store = store_with_vertices(4);
        store
            .set_attribute(Scope::Vertex, "w", numbers(&[1.0, 2.0, 3.0, f64::INFINITY]))
            .unwrap();
        let groups: Vec<MergeGroup> = vec![smallvec![0, 1, 2], smallvec![3, 0]];
        let spec = CombinationSpec::uniform(Combinator::Mean);
        store.combine_entities(Scope::Vertex, &groups, &spec).unwrap();
        assert_eq!(
            store.attribute(Scope::Vertex, "w").unwrap().as_slice(),
            numbers(&[2.0, f64::INFINITY])
        );

        let copy = store.copy_scopes(CopyScopes::ALL).unwrap();
        assert_eq!(copy.attribute(Scope::Vertex, "w"), store.attribute(Scope::Vertex, "w"));
    }

    #[test]
    fn writing_name_attribute_invalidates_index() {
        let mut store = store_with_vertices(2);
        store
            .set_attribute(Scope::Vertex, NAME_ATTRIBUTE, vec![Value::from("a"), Value::from("b")])
            .unwrap();
        assert_eq!(store.resolve_vertex_by_name(&Value::from("b")).unwrap(), 1);
        assert!(store.is_name_index_built());

        store
            .set_value(Scope::Vertex, NAME_ATTRIBUTE, 1, Value::from("z"))
            .unwrap();
        assert!(!store.is_name_index_built());
        assert!(matches!(
            store.resolve_vertex_by_name(&Value::from("b")),
            Err(AttributeError::NoSuchVertex { .. })
        ));
        assert_eq!(store.resolve_vertex_by_name(&Value::from("z")).unwrap(), 1);
    }

    #[test]
    fn writing_other_attributes_keeps_index() {
        let mut store = store_with_vertices(1);
        store
            .set_attribute(Scope::Vertex, NAME_ATTRIBUTE, vec![Value::from("a")])
            .unwrap();
        store.resolve_vertex_by_name(&Value::from("a")).unwrap();
        store
            .set_attribute(Scope::Vertex, "weight", vec![Value::Number(1.0)])
            .unwrap();
        store
            .set_attribute(Scope::Edge, NAME_ATTRIBUTE, vec![])
            .unwrap();
        assert!(store.is_name_index_built());
    }

    #[test]
    fn graph_attribute_roundtrip() {
        let mut store = AttributeStore::new(&StoreConfig::default());
        store.set_graph_attribute("title", "karate").unwrap();
        assert_eq!(store.graph_attribute("title"), Some(&Value::from("karate")));
        assert!(store.graph_attribute("missing").is_none());
        assert!(store
            .set_attribute(Scope::Graph, "two", vec![Value::Null, Value::Null])
            .is_err());
    }

    #[test]
    fn reseed_makes_random_reproducible() {
        let picks = |seed: u64| {
            let mut store = AttributeStore::new(&StoreConfig::default());
            store.reseed(seed);
            let mut new = NewAttributes::new();
            new.insert("w".into(), (0..16).map(Value::from).collect());
            store.add_entities(Scope::Vertex, 16, &new).unwrap();
            let groups: Vec<MergeGroup> = vec![(0..16).collect(), (0..16).collect()];
            store
                .combine_entities(Scope::Vertex, &groups, &Combinator::Random.into())
                .unwrap();
            store.attribute(Scope::Vertex, "w").unwrap().clone()
        };
        assert_eq!(picks(9), picks(9));
    }

    #[test]
    fn select_explicit_positions() {
        let mut store = store_with_vertices(3);
        store
            .set_attribute(Scope::Vertex, "w", numbers(&[1.0, 2.0, 3.0]))
            .unwrap();
        let picked = store
            .select(Scope::Vertex, "w", &Selection::Positions(vec![2, 0]))
            .unwrap();
        assert_eq!(picked, vec![&Value::Number(3.0), &Value::Number(1.0)]);
        assert!(store
            .select(Scope::Vertex, "w", &Selection::single(3))
            .is_err());
    }
}
