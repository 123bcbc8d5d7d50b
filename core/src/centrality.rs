//! Betweenness centrality over geodesic (shortest) paths.
//!
//! BC(v) = Σ through(s, t) / total(s, t) over every unordered pair {s, t}
//! drawn from the vertices other than v, where total(s, t) is the number of
//! shortest paths between s and t and through(s, t) is how many of them pass
//! through v. Pairs with no connecting path contribute nothing.
//!
//! Normalized scores divide by (N-1)(N-2)/2, the number of such pairs.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{GraphError, Result};
use crate::graph::{Graph, VertexId};
use crate::traversal::{all_shortest_paths, Path};

/// A vertex paired with its normalized betweenness score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedVertex {
    pub vertex: VertexId,
    pub score: f64,
}

/// Geodesic summary for one vertex pair: how many shortest paths connect
/// the pair and how many of them visit each vertex.
struct PairGeodesics {
    source: VertexId,
    target: VertexId,
    total: usize,
    through: HashMap<VertexId, usize>,
}

impl PairGeodesics {
    fn new(source: VertexId, target: VertexId, paths: &[Path]) -> Self {
        let mut through: HashMap<VertexId, usize> = HashMap::new();
        for path in paths {
            for &v in path {
                *through.entry(v).or_default() += 1;
            }
        }
        Self {
            source,
            target,
            total: paths.len(),
            through,
        }
    }

    /// Fraction of this pair's geodesics that visit `node`. None when the
    /// pair is disconnected.
    fn ratio(&self, node: VertexId) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        let through = self.through.get(&node).copied().unwrap_or(0);
        Some(through as f64 / self.total as f64)
    }
}

/// Raw (unnormalized) betweenness centrality of `node`.
///
/// Pairs are taken in vertex order. Disconnected pairs are skipped.
pub fn betweenness_centrality(graph: &Graph, node: VertexId) -> Result<f64> {
    if !graph.contains(node) {
        return Err(GraphError::UnknownVertex(node));
    }

    let others: Vec<VertexId> = graph
        .vertices()
        .iter()
        .copied()
        .filter(|&v| v != node)
        .collect();

    let mut score = 0.0;
    let mut disconnected = 0usize;
    for (i, &source) in others.iter().enumerate() {
        for &target in &others[i + 1..] {
            let paths = all_shortest_paths(graph, source, target);
            match PairGeodesics::new(source, target, &paths).ratio(node) {
                Some(r) => score += r,
                None => disconnected += 1,
            }
        }
    }

    tracing::debug!(node, score, disconnected, "betweenness computed");
    Ok(score)
}

/// Normalized betweenness of every vertex, in vertex order.
///
/// Each pair's geodesics are enumerated once and shared across all vertices.
/// Sums run over pairs in the same order as `betweenness_centrality`, so the
/// raw values agree exactly.
pub fn betweenness_all(graph: &Graph) -> Vec<RankedVertex> {
    let pairs = pair_geodesics(graph);
    let scale = normalization_factor(graph.vertex_count());

    graph
        .vertices()
        .iter()
        .map(|&vertex| {
            let raw: f64 = pairs
                .iter()
                .filter(|p| p.source != vertex && p.target != vertex)
                .filter_map(|p| p.ratio(vertex))
                .fold(0.0, |acc, r| acc + r);
            RankedVertex {
                vertex,
                score: normalize(raw, scale),
            }
        })
        .collect()
}

/// The `k` highest normalized betweenness scores, descending.
///
/// Only scores are returned; use `top_k_ranked` to keep the vertex
/// identities. Fails with `RankOutOfRange` when `k` exceeds the vertex count.
pub fn top_k_betweenness_centrality(graph: &Graph, k: usize) -> Result<Vec<f64>> {
    check_rank(graph, k)?;

    let mut scores: Vec<f64> = betweenness_all(graph).into_iter().map(|r| r.score).collect();
    scores.sort_by(|a, b| b.total_cmp(a));
    scores.truncate(k);
    Ok(scores)
}

/// The `k` most central vertices with their normalized scores, descending.
/// Ties keep vertex order.
pub fn top_k_ranked(graph: &Graph, k: usize) -> Result<Vec<RankedVertex>> {
    check_rank(graph, k)?;

    let mut ranked = betweenness_all(graph);
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(k);
    Ok(ranked)
}

fn check_rank(graph: &Graph, k: usize) -> Result<()> {
    let available = graph.vertex_count();
    if k > available {
        return Err(GraphError::RankOutOfRange { k, available });
    }
    Ok(())
}

/// Geodesic summaries for every unordered vertex pair, in vertex order.
fn pair_geodesics(graph: &Graph) -> Vec<PairGeodesics> {
    let vertices = graph.vertices();
    let mut pairs = Vec::with_capacity(vertices.len() * vertices.len().saturating_sub(1) / 2);

    for (i, &source) in vertices.iter().enumerate() {
        for &target in &vertices[i + 1..] {
            let paths = all_shortest_paths(graph, source, target);
            tracing::trace!(source, target, geodesics = paths.len(), "pair enumerated");
            pairs.push(PairGeodesics::new(source, target, &paths));
        }
    }

    tracing::debug!(pairs = pairs.len(), "pair geodesics enumerated");
    pairs
}

/// (N-1)(N-2)/2: pairs available to a vertex once it is excluded.
fn normalization_factor(n: usize) -> f64 {
    if n < 3 {
        return 0.0;
    }
    ((n - 1) * (n - 2)) as f64 / 2.0
}

/// Graphs with fewer than three vertices have no pairs to normalize over;
/// their scores are defined as 0.
fn normalize(raw: f64, scale: f64) -> f64 {
    if scale == 0.0 {
        0.0
    } else {
        raw / scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo() -> Graph {
        Graph::new(
            vec![1, 2, 3, 4, 5, 6],
            vec![(1, 2), (1, 5), (2, 3), (2, 5), (3, 4), (3, 6), (4, 5), (4, 6)],
        )
        .unwrap()
    }

    fn make_chain(n: VertexId) -> Graph {
        Graph::new(0..n, (0..n - 1).map(|i| (i, i + 1))).unwrap()
    }

    fn make_star(leaves: VertexId) -> Graph {
        Graph::new(0..=leaves, (1..=leaves).map(|i| (0, i))).unwrap()
    }

    fn make_cycle(n: VertexId) -> Graph {
        Graph::new(0..n, (0..n).map(|i| (i, (i + 1) % n))).unwrap()
    }

    // --- Single-vertex betweenness ---

    #[test]
    fn test_betweenness_demo() {
        let g = demo();
        assert_eq!(betweenness_centrality(&g, 1), Ok(0.0));
        assert_eq!(betweenness_centrality(&g, 2), Ok(2.0));
        assert_eq!(betweenness_centrality(&g, 3), Ok(2.0));
        assert_eq!(betweenness_centrality(&g, 4), Ok(2.0));
        assert_eq!(betweenness_centrality(&g, 5), Ok(2.0));
        assert_eq!(betweenness_centrality(&g, 6), Ok(0.0));
    }

    #[test]
    fn test_betweenness_star_center() {
        // Every leaf pair routes through the hub: C(5, 2) = 10
        let g = make_star(5);
        assert_eq!(betweenness_centrality(&g, 0), Ok(10.0));
        assert_eq!(betweenness_centrality(&g, 3), Ok(0.0));
    }

    #[test]
    fn test_betweenness_chain_middle() {
        // 0-1-2-3-4: pairs {0,1} x {3,4} cross vertex 2
        let g = make_chain(5);
        assert_eq!(betweenness_centrality(&g, 2), Ok(4.0));
        assert_eq!(betweenness_centrality(&g, 0), Ok(0.0));
    }

    #[test]
    fn test_betweenness_split_geodesics() {
        // 4-cycle: 1 and 3 are joined through 0 or 2, so 0 gets half
        let g = make_cycle(4);
        assert_eq!(betweenness_centrality(&g, 0), Ok(0.5));
    }

    #[test]
    fn test_betweenness_disconnected_pairs_skipped() {
        let g = Graph::new(vec![1, 2, 3, 4], vec![(1, 2), (2, 3)]).unwrap();
        assert_eq!(betweenness_centrality(&g, 2), Ok(1.0));
        assert_eq!(betweenness_centrality(&g, 4), Ok(0.0));
    }

    #[test]
    fn test_betweenness_unknown_vertex() {
        let g = demo();
        assert_eq!(
            betweenness_centrality(&g, 42),
            Err(GraphError::UnknownVertex(42))
        );
    }

    // --- All-vertex scores ---

    #[test]
    fn test_betweenness_all_matches_single() {
        let g = demo();
        let scale = normalization_factor(g.vertex_count());
        for ranked in betweenness_all(&g) {
            let raw = betweenness_centrality(&g, ranked.vertex).unwrap();
            assert_eq!(ranked.score, raw / scale);
        }
    }

    #[test]
    fn test_betweenness_all_vertex_order() {
        let g = Graph::new(vec![3, 1, 2], vec![(1, 2), (2, 3)]).unwrap();
        let all = betweenness_all(&g);
        let order: Vec<VertexId> = all.iter().map(|r| r.vertex).collect();
        assert_eq!(order, vec![3, 1, 2]);
        assert_eq!(all[2].score, 1.0);
    }

    #[test]
    fn test_betweenness_all_tiny_graphs() {
        let g = Graph::new(vec![1, 2], vec![(1, 2)]).unwrap();
        assert!(betweenness_all(&g).iter().all(|r| r.score == 0.0));

        let g = Graph::new(Vec::new(), Vec::new()).unwrap();
        assert!(betweenness_all(&g).is_empty());
    }

    // --- Top-k ---

    #[test]
    fn test_top_k_demo() {
        let g = demo();
        let top = top_k_betweenness_centrality(&g, 5).unwrap();
        assert_eq!(top, vec![0.2, 0.2, 0.2, 0.2, 0.0]);
    }

    #[test]
    fn test_top_k_sorted_and_bounded() {
        let g = make_chain(7);
        let top = top_k_betweenness_centrality(&g, 7).unwrap();
        assert_eq!(top.len(), 7);
        for w in top.windows(2) {
            assert!(w[0] >= w[1], "not sorted: {} >= {} failed", w[0], w[1]);
        }
        assert!(top.iter().all(|s| (0.0..=1.0).contains(s)));
    }

    #[test]
    fn test_top_k_star_center_is_one() {
        let g = make_star(6);
        let top = top_k_betweenness_centrality(&g, 1).unwrap();
        assert_eq!(top, vec![1.0]);
    }

    #[test]
    fn test_top_k_zero() {
        let g = demo();
        assert_eq!(top_k_betweenness_centrality(&g, 0), Ok(Vec::new()));
    }

    #[test]
    fn test_top_k_out_of_range() {
        let g = demo();
        assert_eq!(
            top_k_betweenness_centrality(&g, 7),
            Err(GraphError::RankOutOfRange { k: 7, available: 6 })
        );
        assert!(top_k_ranked(&g, 7).is_err());
    }

    #[test]
    fn test_top_k_ranked_keeps_identity() {
        let g = demo();
        let ranked = top_k_ranked(&g, 6).unwrap();
        let order: Vec<VertexId> = ranked.iter().map(|r| r.vertex).collect();
        // Equal scores keep vertex order
        assert_eq!(order, vec![2, 3, 4, 5, 1, 6]);

        let scores: Vec<f64> = ranked.iter().map(|r| r.score).collect();
        assert_eq!(scores, top_k_betweenness_centrality(&g, 6).unwrap());
    }

    #[test]
    fn test_top_k_ranked_star() {
        let g = make_star(4);
        let ranked = top_k_ranked(&g, 2).unwrap();
        assert_eq!(ranked[0], RankedVertex { vertex: 0, score: 1.0 });
        assert_eq!(ranked[1].score, 0.0);
    }
}
