//! Minimum spanning tree of the start vertex's component (Prim).

use std::collections::HashSet;

use graphwalk_core::{Edge, EdgeId, Graph, VertexId};
use tracing::trace;

use crate::algorithm::label_text;
use crate::error::{EngineError, EngineResult};

/// Tree edges chosen by Prim's algorithm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanningTree {
    pub start: VertexId,
    /// Chosen edges, in selection order. Each points away from the tree.
    pub edges: Vec<EdgeId>,
    pub total_weight: i64,
}

impl SpanningTree {
    /// `child=parent` for every tree edge, sorted as text and joined with `, `.
    pub fn summary(&self, graph: &Graph) -> String {
        let mut entries: Vec<String> = self
            .edges
            .iter()
            .filter_map(|id| graph.edge(*id))
            .map(|edge| {
                format!(
                    "{}={}",
                    label_text(graph, edge.end),
                    label_text(graph, edge.start)
                )
            })
            .collect();
        entries.sort();
        entries.join(", ")
    }
}

/// Grow a minimum spanning tree from `start`.
///
/// Among equally light candidate edges the one that became a candidate
/// first wins.
pub fn prim(graph: &Graph, start: VertexId) -> EngineResult<SpanningTree> {
    let mut connected = HashSet::new();
    let mut candidates: Vec<EdgeId> = Vec::new();
    let mut edges = Vec::new();
    let mut total_weight = 0i64;

    connect(graph, start, &mut connected, &mut candidates)?;

    while !candidates.is_empty() {
        let edge = lightest(graph, &candidates)?;
        let (id, end, weight) = (edge.id, edge.end, edge.weight.get());

        trace!(edge = id.0, vertex = end.0, weight, "prim_edge_chosen");
        edges.push(id);
        total_weight += i64::from(weight);
        connect(graph, end, &mut connected, &mut candidates)?;
    }

    Ok(SpanningTree {
        start,
        edges,
        total_weight,
    })
}

/// Add `vertex` to the tree: drop candidates leading into it and offer its
/// edges to vertices still outside.
fn connect(
    graph: &Graph,
    vertex: VertexId,
    connected: &mut HashSet<VertexId>,
    candidates: &mut Vec<EdgeId>,
) -> EngineResult<()> {
    connected.insert(vertex);
    candidates.retain(|id| graph.edge(*id).is_some_and(|e| e.end != vertex));
    candidates.extend(
        graph
            .neighbors(vertex)?
            .filter(|e| !connected.contains(&e.end))
            .map(|e| e.id),
    );
    Ok(())
}

fn lightest<'g>(graph: &'g Graph, candidates: &[EdgeId]) -> EngineResult<&'g Edge> {
    candidates
        .iter()
        .filter_map(|id| graph.edge(*id))
        .min_by_key(|e| e.weight)
        .ok_or_else(|| EngineError::InconsistentState {
            message: "candidate edges refer to missing edges".to_string(),
        })
}
