use std::collections::{BTreeSet, HashMap, HashSet};

use crate::error::{GraphError, Result};

/// Integer vertex identifier.
pub type VertexId = i64;

/// Undirected edge in canonical `(min, max)` form.
pub type CanonicalEdge = (VertexId, VertexId);

/// Immutable undirected graph: vertex list, canonical edges, and the derived
/// adjacency mapping.
///
/// Adjacency holds an entry for every vertex (possibly empty) and is
/// symmetric: `b` is a neighbor of `a` iff `a` is a neighbor of `b`.
#[derive(Debug, Clone)]
pub struct Graph {
    vertices: Vec<VertexId>,
    edges: Vec<CanonicalEdge>,
    adjacency: HashMap<VertexId, Vec<VertexId>>,
}

/// Order an endpoint pair so `(a, b)` and `(b, a)` compare equal.
pub fn canonical_edge(a: VertexId, b: VertexId) -> CanonicalEdge {
    (a.min(b), a.max(b))
}

impl Graph {
    /// Build and validate a graph.
    ///
    /// Edges are canonicalized first, then checked against the vertex list.
    /// Construction is all-or-nothing: any structural violation returns an
    /// error and no graph is produced.
    pub fn new<V, E>(vertices: V, edges: E) -> Result<Self>
    where
        V: IntoIterator<Item = VertexId>,
        E: IntoIterator<Item = (VertexId, VertexId)>,
    {
        let vertices: Vec<VertexId> = vertices.into_iter().collect();
        let edges: Vec<CanonicalEdge> = edges
            .into_iter()
            .map(|(a, b)| canonical_edge(a, b))
            .collect();

        if let Err(err) = validate(&vertices, &edges) {
            tracing::debug!(error = %err, "graph validation failed");
            return Err(err);
        }

        let adjacency = build_adjacency(&vertices, &edges);

        tracing::debug!(
            vertices = vertices.len(),
            edges = edges.len(),
            "graph constructed"
        );

        Ok(Self {
            vertices,
            edges,
            adjacency,
        })
    }

    /// Vertices in the order they were supplied.
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    /// Canonical edges in the order they were supplied.
    pub fn edges(&self) -> &[CanonicalEdge] {
        &self.edges
    }

    /// Neighbors of `id` in insertion order. Empty for unknown vertices.
    pub fn neighbors(&self, id: VertexId) -> &[VertexId] {
        self.adjacency.get(&id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn contains(&self, id: VertexId) -> bool {
        self.adjacency.contains_key(&id)
    }

    pub fn degree(&self, id: VertexId) -> usize {
        self.neighbors(id).len()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let vertex_mem = self.vertices.len() * size_of::<VertexId>();
        let edge_mem = self.edges.len() * size_of::<CanonicalEdge>();
        let adj_mem: usize = self
            .adjacency
            .values()
            .map(|v| {
                size_of::<VertexId>() + size_of::<Vec<VertexId>>() + v.len() * size_of::<VertexId>()
            })
            .sum();

        vertex_mem + edge_mem + adj_mem
    }
}

/// Check structural invariants. First violation wins, in this order:
/// duplicate vertices, dangling endpoints, self-loops, duplicate edges.
fn validate(vertices: &[VertexId], edges: &[CanonicalEdge]) -> Result<()> {
    let mut seen: HashSet<VertexId> = HashSet::with_capacity(vertices.len());
    let duplicates: BTreeSet<VertexId> = vertices
        .iter()
        .copied()
        .filter(|&v| !seen.insert(v))
        .collect();
    if !duplicates.is_empty() {
        return Err(GraphError::DuplicateVertices { duplicates });
    }

    for &(from, to) in edges {
        if let Some(missing) = [from, to].into_iter().find(|v| !seen.contains(v)) {
            return Err(GraphError::DanglingEdge { from, to, missing });
        }
    }

    if let Some(&(vertex, _)) = edges.iter().find(|(a, b)| a == b) {
        return Err(GraphError::SelfLoop { vertex });
    }

    let mut seen_edges: HashSet<CanonicalEdge> = HashSet::with_capacity(edges.len());
    let duplicates: BTreeSet<CanonicalEdge> = edges
        .iter()
        .copied()
        .filter(|&e| !seen_edges.insert(e))
        .collect();
    if !duplicates.is_empty() {
        return Err(GraphError::DuplicateEdges { duplicates });
    }

    Ok(())
}

/// Every vertex gets an empty list up front. Forward directions are inserted
/// for all edges first, then reverse directions, both in edge order.
fn build_adjacency(
    vertices: &[VertexId],
    edges: &[CanonicalEdge],
) -> HashMap<VertexId, Vec<VertexId>> {
    let mut adjacency: HashMap<VertexId, Vec<VertexId>> =
        vertices.iter().map(|&v| (v, Vec::new())).collect();

    for &(a, b) in edges {
        if let Some(list) = adjacency.get_mut(&a) {
            list.push(b);
        }
    }
    for &(a, b) in edges {
        if let Some(list) = adjacency.get_mut(&b) {
            list.push(a);
        }
    }

    adjacency
}
