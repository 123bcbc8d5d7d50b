use std::collections::BTreeSet;

use crate::graph::VertexId;

/// Errors raised by graph construction and queries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// The vertex list names the same vertex more than once.
    #[error("vertices contain duplicates: {duplicates:?}")]
    DuplicateVertices { duplicates: BTreeSet<VertexId> },

    /// An edge endpoint is not a member of the vertex list.
    #[error("edge ({from}, {to}) has endpoint {missing} which is not a vertex")]
    DanglingEdge {
        from: VertexId,
        to: VertexId,
        missing: VertexId,
    },

    /// An edge connects a vertex to itself.
    #[error("edge ({vertex}, {vertex}) is a self-loop")]
    SelfLoop { vertex: VertexId },

    /// Two edges are the same once canonicalized to (min, max).
    #[error("edges contain duplicates: {duplicates:?}")]
    DuplicateEdges {
        duplicates: BTreeSet<(VertexId, VertexId)>,
    },

    /// No path connects the two vertices.
    #[error("vertex {end} is not reachable from vertex {start}")]
    NotReachable { start: VertexId, end: VertexId },

    /// The vertex is not part of the graph.
    #[error("vertex {0} is not in the graph")]
    UnknownVertex(VertexId),

    /// A top-k request asked for more entries than there are vertices.
    #[error("requested top {k} but the graph has {available} vertices")]
    RankOutOfRange { k: usize, available: usize },
}

impl GraphError {
    /// True for structural errors raised while constructing a graph.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            GraphError::DuplicateVertices { .. }
                | GraphError::DanglingEdge { .. }
                | GraphError::SelfLoop { .. }
                | GraphError::DuplicateEdges { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
