//! graph-centrality-core: In-memory undirected graph analysis.
//!
//! Builds an immutable graph from an explicit vertex list and edge list,
//! validates it, and answers path and centrality queries over it:
//! breadth-first shortest paths, exhaustive simple-path enumeration,
//! geodesic enumeration, and betweenness centrality with top-k ranking.
//!
//! Everything is synchronous and allocation-local to each query. A built
//! `Graph` is never mutated, so shared references can be queried from many
//! threads at once.
//!
//! ```
//! use graph_centrality_core::{min_distance, top_k_betweenness_centrality, Graph};
//!
//! let g = Graph::new(vec![1, 2, 3], vec![(1, 2), (2, 3)]).unwrap();
//! assert_eq!(min_distance(&g, 1, 3).unwrap(), 3);
//! assert_eq!(top_k_betweenness_centrality(&g, 1).unwrap(), vec![1.0]);
//! ```

mod centrality;
mod error;
mod graph;
mod traversal;


pub use centrality::{
    betweenness_all, betweenness_centrality, top_k_betweenness_centrality, top_k_ranked,
    RankedVertex,
};
pub use error::{GraphError, Result};
pub use graph::{canonical_edge, CanonicalEdge, Graph, VertexId};
pub use traversal::{
    all_shortest_paths, all_simple_paths, bfs_paths, min_distance, shortest_path, BfsPaths, Path,
};
