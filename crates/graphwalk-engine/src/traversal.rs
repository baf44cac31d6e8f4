//! Depth-first and breadth-first traversal.
//!
//! Both walks record the edge through which each vertex was first reached,
//! so the returned sequence has exactly one edge per reachable vertex other
//! than the start.

use graphwalk_core::{EdgeId, Graph, VertexId};
use tracing::trace;

use crate::algorithm::label_text;
use crate::error::EngineResult;

/// Depth-first walk in recursive pre-order.
///
/// Expects the start vertex to be marked visited already.
pub fn depth_first(graph: &mut Graph, start: VertexId) -> EngineResult<Vec<EdgeId>> {
    let mut sequence = Vec::new();
    // (vertex, next adjacency index to look at)
    let mut stack: Vec<(VertexId, usize)> = vec![(start, 0)];

    while let Some(frame) = stack.last_mut() {
        let (vertex, cursor) = *frame;
        let next = graph
            .vertex(vertex)
            .and_then(|v| v.adjacency().get(cursor).copied());
        let Some(edge_id) = next else {
            stack.pop();
            continue;
        };
        frame.1 += 1;

        let Some(end) = graph.edge(edge_id).map(|e| e.end) else {
            continue;
        };
        if !graph.is_visited(end) {
            graph.set_visited(end, true)?;
            trace!(edge = edge_id.0, vertex = end.0, "dfs_discovered");
            sequence.push(edge_id);
            stack.push((end, 0));
        }
    }

    Ok(sequence)
}

/// Breadth-first walk, level by level.
///
/// Within a level, vertices are expanded in the order they were discovered
/// and each vertex's edges in insertion order.
pub fn breadth_first(graph: &mut Graph, start: VertexId) -> EngineResult<Vec<EdgeId>> {
    let mut sequence = Vec::new();
    let mut frontier = vec![start];

    while !frontier.is_empty() {
        let mut candidates = Vec::new();
        for &vertex in &frontier {
            for edge in graph.neighbors(vertex)? {
                if !graph.is_visited(edge.end) {
                    candidates.push((edge.id, edge.end));
                }
            }
        }

        let mut next = Vec::new();
        for (edge_id, end) in candidates {
            if graph.is_visited(end) {
                continue;
            }
            graph.set_visited(end, true)?;
            trace!(edge = edge_id.0, vertex = end.0, "bfs_discovered");
            sequence.push(edge_id);
            next.push(end);
        }
        frontier = next;
    }

    Ok(sequence)
}

/// Summary line such as `DFS : A -> B -> C`.
pub fn describe(prefix: &str, graph: &Graph, start: VertexId, sequence: &[EdgeId]) -> String {
    let mut text = format!("{prefix} : {}", label_text(graph, start));
    for end in sequence.iter().filter_map(|id| graph.edge(*id)).map(|e| e.end) {
        text.push_str(" -> ");
        text.push_str(label_text(graph, end));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphwalk_core::{Label, Position, Weight};

    /// A - B, A - C, B - D, C - D, D - E, inserted in that order.
    fn diamond() -> (Graph, Vec<VertexId>) {
        let mut graph = Graph::new();
        let ids: Vec<VertexId> = ["A", "B", "C", "D", "E"]
            .iter()
            .enumerate()
            .map(|(i, l)| {
                graph
                    .add_vertex(Label::new(*l).unwrap(), Position::new(i as i32 * 100, 0))
                    .unwrap()
            })
            .collect();
        for (from, to) in [(0, 1), (0, 2), (1, 3), (2, 3), (3, 4)] {
            graph
                .add_edge(Weight::new(1).unwrap(), ids[from], ids[to])
                .unwrap();
        }
        (graph, ids)
    }

    fn ends(graph: &Graph, sequence: &[EdgeId]) -> Vec<String> {
        sequence
            .iter()
            .map(|id| label_text(graph, graph.edge(*id).unwrap().end).to_string())
            .collect()
    }

    #[test]
    fn test_depth_first_goes_deep_before_wide() {
        let (mut graph, ids) = diamond();
        graph.select_vertex(ids[0]).unwrap();

        let sequence = depth_first(&mut graph, ids[0]).unwrap();

        assert_eq!(ends(&graph, &sequence), ["B", "D", "C", "E"]);
        assert_eq!(
            describe("DFS", &graph, ids[0], &sequence),
            "DFS : A -> B -> D -> C -> E"
        );
    }

    #[test]
    fn test_breadth_first_visits_by_level() {
        let (mut graph, ids) = diamond();
        graph.select_vertex(ids[0]).unwrap();

        let sequence = breadth_first(&mut graph, ids[0]).unwrap();

        assert_eq!(ends(&graph, &sequence), ["B", "C", "D", "E"]);
        assert_eq!(
            describe("BFS", &graph, ids[0], &sequence),
            "BFS : A -> B -> C -> D -> E"
        );
    }

    #[test]
    fn test_walks_stay_in_component() {
        let (mut graph, ids) = diamond();
        graph
            .add_vertex(Label::new("Z").unwrap(), Position::new(0, 500))
            .unwrap();
        graph.select_vertex(ids[4]).unwrap();

        let sequence = depth_first(&mut graph, ids[4]).unwrap();
        assert_eq!(sequence.len(), 4);
        assert!(!ends(&graph, &sequence).contains(&"Z".to_string()));
    }

    #[test]
    fn test_every_step_edge_starts_at_visited_vertex() {
        let (mut graph, ids) = diamond();
        graph.select_vertex(ids[2]).unwrap();
        let sequence = breadth_first(&mut graph, ids[2]).unwrap();

        let mut seen = vec![ids[2]];
        for id in &sequence {
            let edge = graph.edge(*id).unwrap();
            assert!(seen.contains(&edge.start));
            assert!(!seen.contains(&edge.end));
            seen.push(edge.end);
        }
    }
}
