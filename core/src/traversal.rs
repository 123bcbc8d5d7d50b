use std::collections::{HashSet, VecDeque};

use crate::error::{GraphError, Result};
use crate::graph::{Graph, VertexId};

/// Ordered vertex sequence from start to end. Consecutive vertices are
/// adjacent and no vertex repeats.
pub type Path = Vec<VertexId>;

/// Breadth-first enumeration of the simple paths from `start` that end at
/// `end`, shortest first.
///
/// Each queued state carries its own path, and a neighbor is skipped only if
/// it is already on that path. Cycles are excluded per path, not globally,
/// so every simple path to `end` is eventually produced. A state that reaches
/// `end` is yielded and not extended further.
///
/// Neighbors are expanded in adjacency order, which makes the yield order
/// deterministic for a fixed graph.
pub struct BfsPaths<'a> {
    graph: &'a Graph,
    end: VertexId,
    queue: VecDeque<Path>,
    trivial: Option<Path>,
}

impl<'a> BfsPaths<'a> {
    fn new(graph: &'a Graph, start: VertexId, end: VertexId) -> Self {
        let mut queue = VecDeque::new();
        let mut trivial = None;

        if graph.contains(start) && graph.contains(end) {
            if start == end {
                trivial = Some(vec![start]);
            } else {
                queue.push_back(vec![start]);
            }
        }

        Self {
            graph,
            end,
            queue,
            trivial,
        }
    }
}

impl Iterator for BfsPaths<'_> {
    type Item = Path;

    fn next(&mut self) -> Option<Path> {
        if let Some(path) = self.trivial.take() {
            return Some(path);
        }

        while let Some(path) = self.queue.pop_front() {
            let Some(&current) = path.last() else {
                continue;
            };

            let mut found = None;
            for &next in self.graph.neighbors(current) {
                if path.contains(&next) {
                    continue;
                }
                let mut extended = path.clone();
                extended.push(next);
                if next == self.end {
                    found = Some(extended);
                } else {
                    self.queue.push_back(extended);
                }
            }

            if found.is_some() {
                return found;
            }
        }

        None
    }
}

/// Lazily enumerate simple paths from `start` to `end` in breadth-first order.
///
/// Yields nothing if either vertex is not in the graph. Yields `[v]` once
/// when `start == end`.
pub fn bfs_paths(graph: &Graph, start: VertexId, end: VertexId) -> BfsPaths<'_> {
    BfsPaths::new(graph, start, end)
}

/// One shortest path from `start` to `end`: the first path `bfs_paths` yields.
///
/// Ties among equal-length paths are broken by adjacency order.
/// Returns None if `end` is unreachable or either vertex is unknown.
pub fn shortest_path(graph: &Graph, start: VertexId, end: VertexId) -> Option<Path> {
    bfs_paths(graph, start, end).next()
}

/// Length (vertex count) of a shortest path between two vertices.
///
/// Unknown vertices fail with `UnknownVertex`; a disconnected pair fails with
/// `NotReachable`. `min_distance(v, v)` is 1.
pub fn min_distance(graph: &Graph, start: VertexId, end: VertexId) -> Result<usize> {
    for v in [start, end] {
        if !graph.contains(v) {
            return Err(GraphError::UnknownVertex(v));
        }
    }
    geodesic_len(graph, start, end).ok_or(GraphError::NotReachable { start, end })
}

/// Vertex count of a shortest path, via level-order BFS with a global visited
/// set. Path length is independent of tie-breaking, so this agrees with
/// `shortest_path(..).len()` without enumerating paths.
pub(crate) fn geodesic_len(graph: &Graph, start: VertexId, end: VertexId) -> Option<usize> {
    if !graph.contains(start) || !graph.contains(end) {
        return None;
    }
    if start == end {
        return Some(1);
    }

    let mut visited: HashSet<VertexId> = HashSet::new();
    let mut queue: VecDeque<(VertexId, usize)> = VecDeque::new();
    visited.insert(start);
    queue.push_back((start, 1));

    while let Some((current, len)) = queue.pop_front() {
        for &next in graph.neighbors(current) {
            if next == end {
                return Some(len + 1);
            }
            if visited.insert(next) {
                queue.push_back((next, len + 1));
            }
        }
    }

    None
}

/// Every simple path from `start` to `end`, in depth-first discovery order.
///
/// A branch closes when it reaches `end` or runs out of unvisited neighbors.
/// Returns `[[v]]` when `start == end` and an empty list when `start` is
/// unknown or no path exists.
///
/// Exponential in the worst case: dense or cyclic graphs have very many
/// simple paths.
pub fn all_simple_paths(graph: &Graph, start: VertexId, end: VertexId) -> Vec<Path> {
    if !graph.contains(start) || !graph.contains(end) {
        return Vec::new();
    }
    extend_paths(graph, &[start], end, None)
}

/// All geodesics between `start` and `end`: the members of
/// `all_simple_paths` whose length equals `min_distance`, in the same order.
///
/// Empty when the pair is disconnected or a vertex is unknown.
pub fn all_shortest_paths(graph: &Graph, start: VertexId, end: VertexId) -> Vec<Path> {
    match geodesic_len(graph, start, end) {
        Some(len) => extend_paths(graph, &[start], end, Some(len)),
        None => Vec::new(),
    }
}

/// Depth-first extension of `path` toward `end`.
///
/// Each step builds a fresh path rather than mutating a shared one. With
/// `max_len` set, branches that reach that length without hitting `end` are
/// cut; the surviving paths keep their unbounded discovery order.
fn extend_paths(graph: &Graph, path: &[VertexId], end: VertexId, max_len: Option<usize>) -> Vec<Path> {
    let Some(&current) = path.last() else {
        return Vec::new();
    };

    if current == end {
        return vec![path.to_vec()];
    }
    if max_len.is_some_and(|max| path.len() >= max) {
        return Vec::new();
    }

    graph
        .neighbors(current)
        .iter()
        .filter(|&&next| !path.contains(&next))
        .flat_map(|&next| {
            let mut extended = path.to_vec();
            extended.push(next);
            extend_paths(graph, &extended, end, max_len)
        })
        .collect()
}
