//! Single-source shortest path lengths (Dijkstra).

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap, HashMap, HashSet};

use graphwalk_core::{EdgeId, Graph, VertexId};
use tracing::trace;

use crate::algorithm::label_text;
use crate::error::EngineResult;

/// Shortest route lengths from one start vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPaths {
    /// Vertex the lengths are measured from.
    pub start: VertexId,
    /// Final length for every vertex reachable from `start` (including the
    /// start itself at 0).
    pub lengths: BTreeMap<VertexId, i64>,
    /// Edges of the shortest-path tree, in the order their far vertex was
    /// finalised.
    pub tree: Vec<EdgeId>,
}

impl ShortestPaths {
    /// Length of the shortest route to `vertex`, if reachable.
    pub fn length_to(&self, vertex: VertexId) -> Option<i64> {
        self.lengths.get(&vertex).copied()
    }

    /// `label=length` for every positive length, sorted as text and joined
    /// with `, `.
    pub fn summary(&self, graph: &Graph) -> String {
        let mut entries: Vec<String> = self
            .lengths
            .iter()
            .filter(|(_, length)| **length > 0)
            .map(|(vertex, length)| format!("{}={}", label_text(graph, *vertex), length))
            .collect();
        entries.sort();
        entries.join(", ")
    }
}

/// Compute shortest route lengths from `start`.
///
/// Ties in the queue are broken by insertion order. Negative weights are
/// accepted, but lengths are then not guaranteed to be minimal.
pub fn dijkstra(graph: &Graph, start: VertexId) -> EngineResult<ShortestPaths> {
    let mut lengths = BTreeMap::new();
    let mut via: HashMap<VertexId, EdgeId> = HashMap::new();
    let mut finalised = HashSet::new();
    let mut tree = Vec::new();
    let mut queue = BinaryHeap::new();
    let mut seq: u64 = 0;

    lengths.insert(start, 0i64);
    queue.push(Reverse((0i64, seq, start)));

    while let Some(Reverse((length, _, vertex))) = queue.pop() {
        // stale entry for an already finalised vertex
        if !finalised.insert(vertex) {
            continue;
        }
        if let Some(edge) = via.get(&vertex) {
            tree.push(*edge);
        }
        trace!(vertex = vertex.0, length, "dijkstra_finalised");

        for edge in graph.neighbors(vertex)? {
            if finalised.contains(&edge.end) {
                continue;
            }
            let candidate = length + i64::from(edge.weight.get());
            let improves = lengths
                .get(&edge.end)
                .map_or(true, |known| candidate < *known);
            if improves {
                lengths.insert(edge.end, candidate);
                via.insert(edge.end, edge.id);
                seq += 1;
                queue.push(Reverse((candidate, seq, edge.end)));
            }
        }
    }

    Ok(ShortestPaths {
        start,
        lengths,
        tree,
    })
}
