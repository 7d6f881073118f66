//! [`AttributedGraph`]: a directed multigraph that keeps an attribute store in
//! lock-step with its topology.
//!
//! Vertices and edges are identified by dense positions `0..n`. Every
//! structural operation first validates its input, then drives the attribute
//! adapter (add, permute or combine), and only rebuilds the petgraph topology
//! once the adapter has accepted the change. An adapter failure therefore
//! leaves both halves of the graph untouched.
//!
//! Operations that touch both scopes (`delete_vertices`) go through the
//! joint `permute_vertices_and_edges` callback, which commits neither scope
//! unless both succeed.

use std::collections::HashMap;
use std::ops::Range;

use graphattr_combine::CombinationSpec;
use graphattr_core::Value;
use graphattr_store::{
    AttributeStore, AttributeTableAdapter, CopyScopes, MergeGroup, NewAttributes, StoreConfig,
};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};

use crate::error::GraphError;

/// A directed multigraph whose vertices and edges carry attributes.
#[derive(Debug)]
pub struct AttributedGraph<A: AttributeTableAdapter = AttributeStore> {
    topology: DiGraph<(), ()>,
    attributes: A,
}

impl<A: AttributeTableAdapter> AttributedGraph<A> {
    /// Creates an empty graph with the given graph-scope attributes.
    pub fn new(
        config: StoreConfig,
        graph_attributes: Vec<(String, Value)>,
    ) -> Result<Self, GraphError> {
        Ok(AttributedGraph {
            topology: DiGraph::new(),
            attributes: A::init(config, graph_attributes)?,
        })
    }

    /// Creates a graph with `count` attribute-less vertices and no edges.
    pub fn with_vertices(config: StoreConfig, count: usize) -> Result<Self, GraphError> {
        let mut graph = Self::new(config, Vec::new())?;
        graph.add_vertices(count, &NewAttributes::new())?;
        Ok(graph)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn vertex_count(&self) -> usize {
        self.topology.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.topology.edge_count()
    }

    pub fn topology(&self) -> &DiGraph<(), ()> {
        &self.topology
    }

    pub fn attributes(&self) -> &A {
        &self.attributes
    }

    /// Mutable access for attribute setters.
    ///
    /// Structural callbacks must go through the graph, not this reference,
    /// or the attribute counts drift from the topology.
    pub fn attributes_mut(&mut self) -> &mut A {
        &mut self.attributes
    }

    /// `(source, target)` of edge `edge`.
    pub fn endpoints(&self, edge: usize) -> Result<(usize, usize), GraphError> {
        self.topology
            .edge_endpoints(EdgeIndex::new(edge))
            .map(|(s, t)| (s.index(), t.index()))
            .ok_or(GraphError::NoSuchEdgeId {
                id: edge,
                count: self.edge_count(),
            })
    }

    /// All edges as `(source, target)`, in edge-position order.
    pub fn edge_list(&self) -> Vec<(usize, usize)> {
        self.topology
            .raw_edges()
            .iter()
            .map(|e| (e.source().index(), e.target().index()))
            .collect()
    }

    // -----------------------------------------------------------------------
    // Insertion
    // -----------------------------------------------------------------------

    /// Appends `count` vertices, returning their positions.
    pub fn add_vertices(
        &mut self,
        count: usize,
        new: &NewAttributes,
    ) -> Result<Range<usize>, GraphError> {
        self.attributes.add_vertices(count, new)?;
        let start = self.vertex_count();
        for _ in 0..count {
            self.topology.add_node(());
        }
        tracing::debug!(added = count, total = self.vertex_count(), "vertices added");
        Ok(start..start + count)
    }

    /// Appends one edge per `(source, target)` pair, returning their positions.
    pub fn add_edges(
        &mut self,
        edges: &[(usize, usize)],
        new: &NewAttributes,
    ) -> Result<Range<usize>, GraphError> {
        for &(source, target) in edges {
            self.check_vertex(source)?;
            self.check_vertex(target)?;
        }
        self.attributes.add_edges(edges.len(), new)?;
        let start = self.edge_count();
        for &(source, target) in edges {
            self.topology.add_edge(NodeIndex::new(source), NodeIndex::new(target), ());
        }
        tracing::debug!(added = edges.len(), total = self.edge_count(), "edges added");
        Ok(start..start + edges.len())
    }

    /// Like [`add_edges`](Self::add_edges), with endpoints given by the
    /// vertices' `name` attribute.
    pub fn add_edges_by_name(
        &mut self,
        edges: &[(Value, Value)],
        new: &NewAttributes,
    ) -> Result<Range<usize>, GraphError> {
        let resolved = edges
            .iter()
            .map(|(source, target)| -> Result<(usize, usize), GraphError> {
                Ok((
                    self.attributes.resolve_vertex_by_name(source)?,
                    self.attributes.resolve_vertex_by_name(target)?,
                ))
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.add_edges(&resolved, new)
    }

    // -----------------------------------------------------------------------
    // Deletion and reordering
    // -----------------------------------------------------------------------

    /// Removes the given vertices and every edge incident to them. Surviving
    /// vertices and edges keep their relative order.
    pub fn delete_vertices(&mut self, vertices: &[usize]) -> Result<(), GraphError> {
        let n = self.vertex_count();
        let mut removed = vec![false; n];
        for &v in vertices {
            self.check_vertex(v)?;
            removed[v] = true;
        }

        let mut new_position = vec![usize::MAX; n];
        let mut vertex_mapping = Vec::with_capacity(n);
        for old in (0..n).filter(|&old| !removed[old]) {
            new_position[old] = vertex_mapping.len();
            vertex_mapping.push(old);
        }

        let mut edge_mapping = Vec::new();
        let mut edges = Vec::new();
        for (id, (source, target)) in self.edge_list().into_iter().enumerate() {
            if removed[source] || removed[target] {
                continue;
            }
            edge_mapping.push(id);
            edges.push((new_position[source], new_position[target]));
        }

        self.attributes
            .permute_vertices_and_edges(&vertex_mapping, &edge_mapping)?;
        self.rebuild(vertex_mapping.len(), &edges);
        tracing::debug!(
            vertices = self.vertex_count(),
            edges = self.edge_count(),
            "vertices deleted"
        );
        Ok(())
    }

    /// Removes the given edges, keeping the order of the rest.
    pub fn delete_edges(&mut self, edges: &[usize]) -> Result<(), GraphError> {
        let m = self.edge_count();
        let mut removed = vec![false; m];
        for &e in edges {
            self.check_edge(e)?;
            removed[e] = true;
        }

        let old_edges = self.edge_list();
        let edge_mapping: Vec<usize> = (0..m).filter(|&id| !removed[id]).collect();
        let kept: Vec<(usize, usize)> = edge_mapping.iter().map(|&id| old_edges[id]).collect();

        self.attributes.permute_edges(&edge_mapping)?;
        self.rebuild(self.vertex_count(), &kept);
        tracing::debug!(edges = self.edge_count(), "edges deleted");
        Ok(())
    }

    /// Reorders vertices so new position `i` is old vertex `order[i]`.
    pub fn reorder_vertices(&mut self, order: &[usize]) -> Result<(), GraphError> {
        let n = self.vertex_count();
        if order.len() != n {
            return Err(GraphError::InvalidPermutation {
                reason: format!("expected {} positions, got {}", n, order.len()),
            });
        }
        let mut new_position = vec![usize::MAX; n];
        for (new, &old) in order.iter().enumerate() {
            self.check_vertex(old)?;
            if new_position[old] != usize::MAX {
                return Err(GraphError::InvalidPermutation {
                    reason: format!("vertex {} appears more than once", old),
                });
            }
            new_position[old] = new;
        }

        let edges: Vec<(usize, usize)> = self
            .edge_list()
            .into_iter()
            .map(|(s, t)| (new_position[s], new_position[t]))
            .collect();

        self.attributes.permute_vertices(order)?;
        self.rebuild(n, &edges);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Merging
    // -----------------------------------------------------------------------

    /// Contracts vertices: old vertex `i` becomes new vertex `membership[i]`.
    ///
    /// The new vertex count is one more than the largest membership id; ids
    /// nobody maps to become vertices whose attributes are combined from an
    /// empty group. Edges are kept (possibly as loops) with their attributes.
    pub fn contract_vertices(
        &mut self,
        membership: &[usize],
        spec: &CombinationSpec,
    ) -> Result<(), GraphError> {
        let n = self.vertex_count();
        if membership.len() != n {
            return Err(GraphError::InvalidMembership {
                reason: format!("expected {} entries, got {}", n, membership.len()),
            });
        }
        let new_count = membership.iter().max().map_or(0, |&max| max + 1);
        if new_count > n {
            return Err(GraphError::InvalidMembership {
                reason: format!("id {} exceeds vertex count {}", new_count - 1, n),
            });
        }

        let mut groups: Vec<MergeGroup> = vec![MergeGroup::new(); new_count];
        for (old, &new) in membership.iter().enumerate() {
            groups[new].push(old);
        }
        let edges: Vec<(usize, usize)> = self
            .edge_list()
            .into_iter()
            .map(|(s, t)| (membership[s], membership[t]))
            .collect();

        self.attributes.combine_vertices(&groups, spec)?;
        self.rebuild(new_count, &edges);
        tracing::debug!(from = n, to = new_count, "vertices contracted");
        Ok(())
    }

    /// Merges parallel edges (if `multiple`) and drops self-loops (if
    /// `loops`), combining edge attributes with `spec`.
    ///
    /// Merged edges take the position of the first edge of their group.
    pub fn simplify(
        &mut self,
        multiple: bool,
        loops: bool,
        spec: &CombinationSpec,
    ) -> Result<(), GraphError> {
        let mut groups: Vec<MergeGroup> = Vec::new();
        let mut edges: Vec<(usize, usize)> = Vec::new();
        let mut seen: HashMap<(usize, usize), usize> = HashMap::new();

        for (id, endpoints) in self.edge_list().into_iter().enumerate() {
            if loops && endpoints.0 == endpoints.1 {
                continue;
            }
            if multiple {
                if let Some(&group) = seen.get(&endpoints) {
                    groups[group].push(id);
                    continue;
                }
                seen.insert(endpoints, groups.len());
            }
            groups.push(smallvec::smallvec![id]);
            edges.push(endpoints);
        }

        let before = self.edge_count();
        self.attributes.combine_edges(&groups, spec)?;
        self.rebuild(self.vertex_count(), &edges);
        tracing::debug!(from = before, to = edges.len(), "graph simplified");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Copies the topology and the selected attribute scopes.
    pub fn copy_with(&self, scopes: CopyScopes) -> Result<Self, GraphError> {
        Ok(AttributedGraph {
            topology: self.topology.clone(),
            attributes: self.attributes.copy(scopes)?,
        })
    }

    /// Tears the graph down, releasing its attribute store.
    pub fn destroy(self) {
        self.attributes.destroy();
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn check_vertex(&self, id: usize) -> Result<(), GraphError> {
        if id < self.vertex_count() {
            Ok(())
        } else {
            Err(GraphError::NoSuchVertexId {
                id,
                count: self.vertex_count(),
            })
        }
    }

    fn check_edge(&self, id: usize) -> Result<(), GraphError> {
        if id < self.edge_count() {
            Ok(())
        } else {
            Err(GraphError::NoSuchEdgeId {
                id,
                count: self.edge_count(),
            })
        }
    }

    /// Replaces the topology with `vertex_count` vertices and `edges`.
    fn rebuild(&mut self, vertex_count: usize, edges: &[(usize, usize)]) {
        let mut topology = DiGraph::with_capacity(vertex_count, edges.len());
        for _ in 0..vertex_count {
            topology.add_node(());
        }
        for &(source, target) in edges {
            topology.add_edge(NodeIndex::new(source), NodeIndex::new(target), ());
        }
        self.topology = topology;
    }
}
