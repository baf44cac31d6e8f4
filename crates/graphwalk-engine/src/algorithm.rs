//! Algorithm kinds, run states and the dispatch into the four algorithms.

use std::fmt;

use graphwalk_core::{EdgeId, Graph, Label, VertexId};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::VisualizerConfig;
use crate::error::{EngineError, EngineResult};
use crate::{shortest_path, spanning_tree, traversal};

/// The algorithms a user can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlgorithmKind {
    DepthFirst,
    BreadthFirst,
    Dijkstra,
    Prim,
}

impl AlgorithmKind {
    /// All kinds, in menu order.
    pub const ALL: [AlgorithmKind; 4] = [
        AlgorithmKind::DepthFirst,
        AlgorithmKind::BreadthFirst,
        AlgorithmKind::Dijkstra,
        AlgorithmKind::Prim,
    ];

    /// Human readable name.
    pub fn name(&self) -> &'static str {
        match self {
            AlgorithmKind::DepthFirst => "Depth-First Search",
            AlgorithmKind::BreadthFirst => "Breadth-First Search",
            AlgorithmKind::Dijkstra => "Dijkstra's Algorithm",
            AlgorithmKind::Prim => "Prim's Algorithm",
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lifecycle of the algorithm occupying the session slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlgorithmState {
    /// Waiting for the user to pick a start vertex.
    SelectStart,
    /// The traversal sequence is being replayed.
    Running,
    /// Cancelled from outside.
    Stopped,
    /// Replay finished; the result text is available.
    Terminated,
}

/// An algorithm's state together with the text shown for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmStatus {
    /// Which algorithm this status belongs to.
    pub kind: AlgorithmKind,
    /// Current lifecycle state.
    pub state: AlgorithmState,
    result: Option<String>,
}

impl AlgorithmStatus {
    /// Fresh status waiting for a start vertex.
    pub fn new(kind: AlgorithmKind) -> Self {
        Self {
            kind,
            state: AlgorithmState::SelectStart,
            result: None,
        }
    }

    /// Record the result text and move to `Terminated`.
    pub fn finish(&mut self, result: impl Into<String>) {
        self.result = Some(result.into());
        self.state = AlgorithmState::Terminated;
    }

    /// Result text of the last finished run.
    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    /// Text to display for the current state. Stopped runs show nothing.
    pub fn display_text(&self) -> Option<&str> {
        match self.state {
            AlgorithmState::SelectStart => Some("Please choose a starting vertex"),
            AlgorithmState::Running => Some("Please wait..."),
            AlgorithmState::Terminated => self.result.as_deref(),
            AlgorithmState::Stopped => None,
        }
    }

    /// Whether a click on a vertex should (re)start the run.
    pub fn accepts_start(&self) -> bool {
        matches!(
            self.state,
            AlgorithmState::SelectStart | AlgorithmState::Terminated
        )
    }
}

/// Output of one synchronous algorithm run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Traversal {
    /// Algorithm that produced this run.
    pub kind: AlgorithmKind,
    /// Start vertex chosen by the user.
    pub start: VertexId,
    /// Edges to replay, in discovery order.
    pub sequence: Vec<EdgeId>,
    /// Final text shown once replay ends.
    pub summary: String,
}

/// Run `kind` from `start` over the current graph.
///
/// Visited marks are cleared first, so repeated runs on an unchanged graph
/// produce identical results.
pub fn run(
    kind: AlgorithmKind,
    graph: &mut Graph,
    start: VertexId,
    config: &VisualizerConfig,
) -> EngineResult<Traversal> {
    if graph.vertex(start).is_none() {
        return Err(EngineError::StartNotFound { vertex: start });
    }
    graph.reset_visited_marks();

    let (sequence, summary) = match kind {
        AlgorithmKind::DepthFirst => {
            graph.select_vertex(start)?;
            let sequence = traversal::depth_first(graph, start)?;
            let summary = traversal::describe("DFS", graph, start, &sequence);
            (sequence, summary)
        }
        AlgorithmKind::BreadthFirst => {
            graph.select_vertex(start)?;
            let sequence = traversal::breadth_first(graph, start)?;
            let summary = traversal::describe("BFS", graph, start, &sequence);
            (sequence, summary)
        }
        AlgorithmKind::Dijkstra => {
            let paths = shortest_path::dijkstra(graph, start)?;
            let sequence = if config.animate_shortest_path_tree {
                paths.tree.clone()
            } else {
                Vec::new()
            };
            (sequence, paths.summary(graph))
        }
        AlgorithmKind::Prim => {
            graph.select_vertex(start)?;
            let tree = spanning_tree::prim(graph, start)?;
            let summary = tree.summary(graph);
            (tree.edges, summary)
        }
    };

    info!(
        algorithm = kind.name(),
        start = start.0,
        steps = sequence.len(),
        "algorithm_run_complete"
    );

    Ok(Traversal {
        kind,
        start,
        sequence,
        summary,
    })
}

/// Label text of a vertex, or `?` for a vertex that no longer exists.
pub(crate) fn label_text(graph: &Graph, id: VertexId) -> &str {
    graph.label(id).map(Label::as_str).unwrap_or("?")
}
