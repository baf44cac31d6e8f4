//! Integration tests for graphwalk-engine against brute-force and petgraph
//! reference results.

use std::collections::{HashMap, HashSet, VecDeque};
use std::time::Instant;

use anyhow::Result;
use graphwalk_core::{Graph, Label, Position, VertexId, Weight};
use graphwalk_engine::{
    algorithm, shortest_path, spanning_tree, AlgorithmKind, AlgorithmState, ClickOutcome, Mode,
    PlaybackEvent, Session, VisualizerConfig,
};
use petgraph::algo::{dijkstra, min_spanning_tree};
use petgraph::data::Element;
use petgraph::visit::EdgeRef;

// ============================================================================
// Test Graph Builders
// ============================================================================

/// Small deterministic generator so failures are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next() % n
    }

    fn weight(&mut self, min: i32, max: i32) -> i32 {
        min + self.below((max - min + 1) as u64) as i32
    }
}

/// Builder for labelled graphs laid out on a grid.
#[derive(Default)]
struct TestGraphBuilder {
    graph: Graph,
    ids: Vec<VertexId>,
}

impl TestGraphBuilder {
    fn new() -> Self {
        Self::default()
    }

    fn vertices(mut self, labels: &str) -> Self {
        for label in labels.chars() {
            let i = self.ids.len() as i32;
            let id = self
                .graph
                .add_vertex(
                    Label::new(label.to_string()).unwrap(),
                    Position::new(60 + (i % 8) * 90, 60 + (i / 8) * 90),
                )
                .unwrap();
            self.ids.push(id);
        }
        self
    }

    fn connect(mut self, from: usize, to: usize, weight: i32) -> Self {
        self.graph
            .add_edge(Weight::new(weight).unwrap(), self.ids[from], self.ids[to])
            .unwrap();
        self
    }

    fn build(self) -> (Graph, Vec<VertexId>) {
        (self.graph, self.ids)
    }
}

/// A random connected graph: a random spanning chain plus `extra` more
/// connections (parallel connections allowed).
fn random_connected(seed: u64, n: usize, extra: usize, min: i32, max: i32) -> (Graph, Vec<VertexId>) {
    let mut rng = Lcg(seed);
    let labels: String = (0..n).map(|i| (b'A' + i as u8) as char).collect();
    let mut builder = TestGraphBuilder::new().vertices(&labels);
    for to in 1..n {
        let from = rng.below(to as u64) as usize;
        let w = rng.weight(min, max);
        builder = builder.connect(from, to, w);
    }
    for _ in 0..extra {
        let from = rng.below(n as u64) as usize;
        let mut to = rng.below(n as u64) as usize;
        if to == from {
            to = (to + 1) % n;
        }
        let w = rng.weight(min, max);
        builder = builder.connect(from, to, w);
    }
    builder.build()
}

// ============================================================================
// Reference implementations
// ============================================================================

/// Repeated relaxation until nothing changes (non-negative weights).
fn relaxation_lengths(graph: &Graph, start: VertexId) -> HashMap<VertexId, i64> {
    let mut lengths = HashMap::from([(start, 0i64)]);
    loop {
        let mut changed = false;
        for edge in graph.edges() {
            let Some(&from) = lengths.get(&edge.start) else {
                continue;
            };
            let candidate = from + i64::from(edge.weight.get());
            if lengths.get(&edge.end).map_or(true, |known| candidate < *known) {
                lengths.insert(edge.end, candidate);
                changed = true;
            }
        }
        if !changed {
            return lengths;
        }
    }
}

/// Cheapest simple path to every reachable vertex, by enumerating all of
/// them.
fn enumerated_path_lengths(graph: &Graph, start: VertexId) -> HashMap<VertexId, i64> {
    fn walk(
        graph: &Graph,
        vertex: VertexId,
        length: i64,
        on_path: &mut Vec<VertexId>,
        best: &mut HashMap<VertexId, i64>,
    ) {
        let entry = best.entry(vertex).or_insert(length);
        *entry = (*entry).min(length);
        for edge in graph.neighbors(vertex).unwrap() {
            if on_path.contains(&edge.end) {
                continue;
            }
            on_path.push(edge.end);
            walk(graph, edge.end, length + i64::from(edge.weight.get()), on_path, best);
            on_path.pop();
        }
    }

    let mut best = HashMap::new();
    walk(graph, start, 0, &mut vec![start], &mut best);
    best
}

/// Minimum total weight over every subset of `n - 1` connections that
/// spans all vertices.
fn brute_force_spanning_weight(graph: &Graph) -> Option<i64> {
    let vertices: Vec<VertexId> = graph.vertices().map(|v| v.id).collect();
    let connections: Vec<(VertexId, VertexId, i64)> = graph
        .connections()
        .map(|e| (e.start, e.end, i64::from(e.weight.get())))
        .collect();
    let needed = vertices.len().saturating_sub(1);

    let mut best: Option<i64> = None;
    for mask in 0u32..(1 << connections.len()) {
        if mask.count_ones() as usize != needed {
            continue;
        }
        let mut parent: HashMap<VertexId, VertexId> =
            vertices.iter().map(|v| (*v, *v)).collect();
        let mut total = 0;
        let mut acyclic = true;
        for (i, (a, b, w)) in connections.iter().enumerate() {
            if mask & (1 << i) == 0 {
                continue;
            }
            let (ra, rb) = (root(&mut parent, *a), root(&mut parent, *b));
            if ra == rb {
                acyclic = false;
                break;
            }
            parent.insert(ra, rb);
            total += w;
        }
        if acyclic {
            best = Some(best.map_or(total, |b| b.min(total)));
        }
    }
    best
}

fn root(parent: &mut HashMap<VertexId, VertexId>, v: VertexId) -> VertexId {
    let p = parent[&v];
    if p == v {
        v
    } else {
        let r = root(parent, p);
        parent.insert(v, r);
        r
    }
}

fn hop_distances(graph: &Graph, start: VertexId) -> HashMap<VertexId, usize> {
    let mut hops = HashMap::from([(start, 0)]);
    let mut queue = VecDeque::from([start]);
    while let Some(v) = queue.pop_front() {
        for edge in graph.neighbors(v).unwrap() {
            if !hops.contains_key(&edge.end) {
                hops.insert(edge.end, hops[&v] + 1);
                queue.push_back(edge.end);
            }
        }
    }
    hops
}

// ============================================================================
// Shortest paths
// ============================================================================

#[test]
fn test_dijkstra_matches_relaxation_and_petgraph() -> Result<()> {
    for seed in 0..25 {
        let (graph, ids) = random_connected(seed, 7, 6, 0, 30);
        let start = ids[(seed as usize) % ids.len()];

        let paths = shortest_path::dijkstra(&graph, start)?;
        let reference = relaxation_lengths(&graph, start);
        assert_eq!(paths.lengths.len(), reference.len(), "seed {seed}");
        for (vertex, length) in &reference {
            assert_eq!(paths.length_to(*vertex), Some(*length), "seed {seed}");
        }

        let (pg, index) = graph.to_petgraph();
        let pg_lengths = dijkstra(&pg, index[&start], None, |e| i64::from(*e.weight()));
        for (vertex, node) in &index {
            assert_eq!(
                paths.length_to(*vertex),
                pg_lengths.get(node).copied(),
                "seed {seed}"
            );
        }
    }
    Ok(())
}

#[test]
fn test_dijkstra_matches_path_enumeration() -> Result<()> {
    for seed in 0..10 {
        let (graph, ids) = random_connected(seed + 300, 6, 4, 0, 25);
        let paths = shortest_path::dijkstra(&graph, ids[0])?;
        let enumerated = enumerated_path_lengths(&graph, ids[0]);

        assert_eq!(paths.lengths.len(), enumerated.len(), "seed {seed}");
        for (vertex, length) in &enumerated {
            assert_eq!(paths.length_to(*vertex), Some(*length), "seed {seed}");
        }
    }
    Ok(())
}

#[test]
fn test_dijkstra_tree_realises_lengths() -> Result<()> {
    let (graph, ids) = random_connected(99, 8, 8, 1, 20);
    let paths = shortest_path::dijkstra(&graph, ids[0])?;

    assert_eq!(paths.tree.len(), ids.len() - 1);
    for id in &paths.tree {
        let edge = graph.edge(*id).unwrap();
        let from = paths.length_to(edge.start).unwrap();
        assert_eq!(
            from + i64::from(edge.weight.get()),
            paths.length_to(edge.end).unwrap()
        );
    }
    Ok(())
}

#[test]
fn test_dijkstra_reference_triangle() -> Result<()> {
    let (mut graph, ids) = TestGraphBuilder::new()
        .vertices("ABC")
        .connect(0, 1, 4)
        .connect(1, 2, 1)
        .connect(0, 2, 9)
        .build();

    let run = algorithm::run(
        AlgorithmKind::Dijkstra,
        &mut graph,
        ids[0],
        &VisualizerConfig::default(),
    )?;

    assert_eq!(run.summary, "B=4, C=5");
    assert!(run.sequence.is_empty());
    // the start vertex is not highlighted for this algorithm
    assert!(!graph.vertex(ids[0]).unwrap().selected);
    Ok(())
}

// ============================================================================
// Spanning trees
// ============================================================================

#[test]
fn test_prim_matches_brute_force_and_petgraph() -> Result<()> {
    for seed in 0..20 {
        let (graph, ids) = random_connected(seed + 1000, 6, 5, -9, 20);
        let start = ids[(seed as usize) % ids.len()];

        let tree = spanning_tree::prim(&graph, start)?;
        assert_eq!(tree.edges.len(), ids.len() - 1, "seed {seed}");
        assert_eq!(
            Some(tree.total_weight),
            brute_force_spanning_weight(&graph),
            "seed {seed}"
        );

        let (pg, _) = graph.to_petgraph();
        let kruskal: i64 = min_spanning_tree(&pg)
            .filter_map(|element| match element {
                Element::Edge { weight, .. } => Some(i64::from(weight)),
                Element::Node { .. } => None,
            })
            .sum();
        assert_eq!(tree.total_weight, kruskal, "seed {seed}");
    }
    Ok(())
}

#[test]
fn test_prim_reference_triangle() -> Result<()> {
    let (mut graph, ids) = TestGraphBuilder::new()
        .vertices("ABC")
        .connect(0, 1, 4)
        .connect(1, 2, 1)
        .connect(0, 2, 9)
        .build();

    let run = algorithm::run(
        AlgorithmKind::Prim,
        &mut graph,
        ids[0],
        &VisualizerConfig::default(),
    )?;

    assert_eq!(run.summary, "B=A, C=B");
    assert_eq!(run.sequence.len(), 2);
    Ok(())
}

// ============================================================================
// Traversals
// ============================================================================

#[test]
fn test_walks_reach_component_once_each() -> Result<()> {
    for seed in 0..15 {
        let (mut graph, ids) = random_connected(seed + 500, 8, 6, 1, 9);
        // a second component that must stay untouched
        let stray = graph.add_vertex(Label::new("z")?, Position::new(900, 900))?;
        let start = ids[(seed as usize) % ids.len()];

        for kind in [AlgorithmKind::DepthFirst, AlgorithmKind::BreadthFirst] {
            let run = algorithm::run(kind, &mut graph, start, &VisualizerConfig::default())?;
            let ends: Vec<VertexId> = run
                .sequence
                .iter()
                .map(|id| graph.edge(*id).unwrap().end)
                .collect();
            let unique: HashSet<VertexId> = ends.iter().copied().collect();

            assert_eq!(ends.len(), ids.len() - 1, "{kind} seed {seed}");
            assert_eq!(unique.len(), ends.len());
            assert!(!unique.contains(&start));
            assert!(!unique.contains(&stray));
        }
    }
    Ok(())
}

#[test]
fn test_breadth_first_discovers_in_level_order() -> Result<()> {
    for seed in 0..15 {
        let (mut graph, ids) = random_connected(seed + 700, 9, 8, 1, 9);
        let start = ids[0];
        let hops = hop_distances(&graph, start);

        let run = algorithm::run(
            AlgorithmKind::BreadthFirst,
            &mut graph,
            start,
            &VisualizerConfig::default(),
        )?;
        let levels: Vec<usize> = run
            .sequence
            .iter()
            .map(|id| hops[&graph.edge(*id).unwrap().end])
            .collect();
        assert!(levels.windows(2).all(|w| w[0] <= w[1]), "seed {seed}: {levels:?}");
        for id in &run.sequence {
            let edge = graph.edge(*id).unwrap();
            assert_eq!(hops[&edge.end], hops[&edge.start] + 1);
        }
    }
    Ok(())
}

#[test]
fn test_runs_are_idempotent() -> Result<()> {
    let (mut graph, ids) = random_connected(42, 8, 7, -5, 15);
    let config = VisualizerConfig::default();

    for kind in AlgorithmKind::ALL {
        let first = algorithm::run(kind, &mut graph, ids[3], &config)?;
        let second = algorithm::run(kind, &mut graph, ids[3], &config)?;
        assert_eq!(first, second, "{kind}");
    }
    Ok(())
}

#[test]
fn test_single_vertex_summaries() -> Result<()> {
    let (mut graph, ids) = TestGraphBuilder::new().vertices("A").build();
    let run = algorithm::run(
        AlgorithmKind::DepthFirst,
        &mut graph,
        ids[0],
        &VisualizerConfig::default(),
    )?;
    assert_eq!(run.summary, "DFS : A");
    assert!(run.sequence.is_empty());
    Ok(())
}

// ============================================================================
// Graph store
// ============================================================================

#[test]
fn test_removals_leave_no_dangling_edges() -> Result<()> {
    let (mut graph, ids) = random_connected(7, 10, 12, 1, 9);
    let mut rng = Lcg(3);

    for round in 0..4 {
        let victim = ids[(round * 3 + 1) % ids.len()];
        if graph.vertex(victim).is_some() {
            graph.remove_vertex(victim)?;
        }
        let pick = rng.below(graph.connection_count().max(1) as u64) as usize;
        let edge = graph.connections().nth(pick).map(|e| e.id);
        if let Some(edge) = edge {
            graph.remove_edge(edge)?;
        }

        for edge in graph.edges() {
            assert!(graph.vertex(edge.start).is_some());
            assert!(graph.vertex(edge.end).is_some());
            let twin = graph.edge(edge.twin).expect("twin survives");
            assert_eq!((twin.start, twin.end), (edge.end, edge.start));
        }
        for vertex in graph.vertices() {
            for id in vertex.adjacency() {
                assert_eq!(graph.edge(*id).map(|e| e.start), Some(vertex.id));
            }
        }
        assert_eq!(graph.edge_count(), 2 * graph.connection_count());
    }
    Ok(())
}

// ============================================================================
// Session
// ============================================================================

#[test]
fn test_session_end_to_end() -> Result<()> {
    let mut session = Session::new(VisualizerConfig::fast());
    let now = Instant::now();

    for (label, x) in [("A", 100), ("B", 300), ("C", 500)] {
        let position = Position::new(x, 200);
        assert_eq!(
            session.click(position, now)?,
            ClickOutcome::LabelRequested(position)
        );
        session.add_vertex(Label::new(label)?, position)?;
    }

    session.set_mode(Mode::AddEdge);
    for (from_x, to_x, weight) in [(100, 300, 3), (300, 500, 2)] {
        session.click(Position::new(from_x, 200), now)?;
        let ClickOutcome::WeightRequested { from, to } =
            session.click(Position::new(to_x, 200), now)?
        else {
            panic!("expected a weight prompt");
        };
        session.add_edge(Weight::new(weight)?, from, to)?;
    }
    assert_eq!(session.graph().connection_count(), 2);

    session.start_algorithm(AlgorithmKind::Dijkstra);
    let ClickOutcome::AlgorithmStarted(run) = session.click(Position::new(100, 200), now)? else {
        panic!("expected the run to start");
    };
    assert_eq!(run.summary, "B=3, C=5");

    let events = session.advance(now + session.config().step_interval());
    assert_eq!(events, vec![PlaybackEvent::Finished("B=3, C=5".into())]);
    let status = session.algorithm().unwrap();
    assert_eq!(status.state, AlgorithmState::Terminated);
    assert_eq!(status.display_text(), Some("B=3, C=5"));

    session.request_reset();
    assert!(session.graph().is_empty());
    assert!(session.algorithm().is_none());
    Ok(())
}
