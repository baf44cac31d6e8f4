//! The mutable graph store.

use std::collections::{BTreeMap, HashMap};

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use tracing::{debug, trace};

use crate::error::{GraphError, GraphResult};
use crate::{Edge, EdgeId, Label, Position, Vertex, VertexId, Weight};

/// Entities discarded by a removal, so a presentation layer can drop the
/// matching shapes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovedItems {
    /// Removed vertices.
    pub vertices: Vec<VertexId>,
    /// Removed directed edges (both directions of every connection).
    pub edges: Vec<EdgeId>,
    /// Weight labels that disappeared, identified by the forward edge of
    /// their connection.
    pub weight_labels: Vec<EdgeId>,
}

impl RemovedItems {
    /// Whether nothing was removed.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.edges.is_empty()
    }
}

/// Vertices keyed by canvas slot plus a flat collection of directed edges.
#[derive(Debug, Default, Clone)]
pub struct Graph {
    vertices: BTreeMap<VertexId, Vertex>,
    slots: HashMap<Position, VertexId>,
    edges: BTreeMap<EdgeId, Edge>,
    next_vertex_id: u64,
    next_edge_id: u64,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of directed edges (two per connection).
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of undirected connections.
    pub fn connection_count(&self) -> usize {
        self.edges.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Look up a vertex.
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(&id)
    }

    /// Look up an edge.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    /// All vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.values()
    }

    /// All directed edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// One edge per connection (the forward direction), in insertion order.
    pub fn connections(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values().filter(|edge| edge.is_forward())
    }

    /// Label of a vertex, if it exists.
    pub fn label(&self, id: VertexId) -> Option<&Label> {
        self.vertices.get(&id).map(|v| &v.label)
    }

    /// First vertex (in insertion order) carrying the given label text.
    pub fn find_by_label(&self, label: &str) -> Option<VertexId> {
        self.vertices
            .values()
            .find(|v| v.label.as_str() == label)
            .map(|v| v.id)
    }

    /// Vertex occupying exactly the given slot.
    pub fn vertex_in_slot(&self, position: Position) -> Option<VertexId> {
        self.slots.get(&position).copied()
    }

    /// Adds a vertex centred on `position`.
    ///
    /// An occupied slot is rejected rather than overwritten.
    pub fn add_vertex(&mut self, label: Label, position: Position) -> GraphResult<VertexId> {
        if let Some(&existing) = self.slots.get(&position) {
            return Err(GraphError::PositionOccupied { position, existing });
        }

        let id = VertexId(self.next_vertex_id);
        self.next_vertex_id += 1;

        debug!(vertex = id.0, label = %label, %position, "vertex_added");
        self.vertices.insert(id, Vertex::new(id, label, position));
        self.slots.insert(position, id);
        Ok(id)
    }

    /// Connects two vertices with a pair of directed edges sharing `weight`.
    ///
    /// Returns `(from -> to, to -> from)`.
    pub fn add_edge(
        &mut self,
        weight: Weight,
        from: VertexId,
        to: VertexId,
    ) -> GraphResult<(EdgeId, EdgeId)> {
        if from == to {
            return Err(GraphError::SelfLoop { vertex: from });
        }
        self.require_vertex(from)?;
        self.require_vertex(to)?;

        let forward = EdgeId(self.next_edge_id);
        let backward = EdgeId(self.next_edge_id + 1);
        self.next_edge_id += 2;

        self.edges.insert(
            forward,
            Edge {
                id: forward,
                start: from,
                end: to,
                weight,
                twin: backward,
                selected: false,
            },
        );
        self.edges.insert(
            backward,
            Edge {
                id: backward,
                start: to,
                end: from,
                weight,
                twin: forward,
                selected: false,
            },
        );

        if let Some(vertex) = self.vertices.get_mut(&from) {
            vertex.adjacency.push(forward);
        }
        if let Some(vertex) = self.vertices.get_mut(&to) {
            vertex.adjacency.push(backward);
        }

        debug!(
            from = from.0,
            to = to.0,
            weight = weight.get(),
            "connection_added"
        );
        Ok((forward, backward))
    }

    /// Removes a vertex together with every edge touching it, in both
    /// directions.
    pub fn remove_vertex(&mut self, id: VertexId) -> GraphResult<RemovedItems> {
        let vertex = self
            .vertices
            .remove(&id)
            .ok_or(GraphError::VertexNotFound { id })?;
        self.slots.remove(&vertex.position);

        let mut removed = RemovedItems {
            vertices: vec![id],
            ..Default::default()
        };

        for edge_id in vertex.adjacency {
            if let Some(edge) = self.edges.remove(&edge_id) {
                self.detach_twin(&edge, &mut removed);
                removed.weight_labels.push(edge.connection_id());
                removed.edges.push(edge.id);
            }
        }

        debug!(
            vertex = id.0,
            edges = removed.edges.len(),
            "vertex_removed"
        );
        Ok(removed)
    }

    /// Removes a connection given either of its directed edges.
    pub fn remove_edge(&mut self, id: EdgeId) -> GraphResult<RemovedItems> {
        let edge = self
            .edges
            .remove(&id)
            .ok_or(GraphError::EdgeNotFound { id })?;

        if let Some(start) = self.vertices.get_mut(&edge.start) {
            start.adjacency.retain(|e| *e != edge.id);
        }

        let mut removed = RemovedItems::default();
        self.detach_twin(&edge, &mut removed);
        removed.weight_labels.push(edge.connection_id());
        removed.edges.push(edge.id);

        debug!(edge = id.0, "connection_removed");
        Ok(removed)
    }

    /// Outgoing edges of a vertex in insertion order.
    pub fn neighbors(&self, id: VertexId) -> GraphResult<impl Iterator<Item = &Edge> + '_> {
        let vertex = self.require_vertex(id)?;
        Ok(vertex
            .adjacency
            .iter()
            .filter_map(move |edge_id| self.edges.get(edge_id)))
    }

    /// Clears the traversal marker on every vertex.
    pub fn reset_visited_marks(&mut self) {
        for vertex in self.vertices.values_mut() {
            vertex.visited = false;
        }
    }

    /// Clears traversal markers and every highlight.
    pub fn unselect(&mut self) {
        for vertex in self.vertices.values_mut() {
            vertex.visited = false;
            vertex.selected = false;
        }
        for edge in self.edges.values_mut() {
            edge.selected = false;
        }
    }

    /// Whether a vertex carries the traversal marker. Unknown vertices count
    /// as unvisited.
    pub fn is_visited(&self, id: VertexId) -> bool {
        self.vertices.get(&id).is_some_and(|v| v.visited)
    }

    /// Sets the traversal marker on a vertex.
    pub fn set_visited(&mut self, id: VertexId, visited: bool) -> GraphResult<()> {
        self.require_vertex_mut(id)?.visited = visited;
        Ok(())
    }

    /// Sets the presentation highlight on a vertex.
    pub fn set_selected(&mut self, id: VertexId, selected: bool) -> GraphResult<()> {
        self.require_vertex_mut(id)?.selected = selected;
        Ok(())
    }

    /// Marks a vertex both visited and highlighted.
    pub fn select_vertex(&mut self, id: VertexId) -> GraphResult<()> {
        let vertex = self.require_vertex_mut(id)?;
        vertex.visited = true;
        vertex.selected = true;
        Ok(())
    }

    /// Highlights a traversed connection and its far vertex.
    pub fn highlight_step(&mut self, id: EdgeId) -> GraphResult<&Edge> {
        let (twin, end) = {
            let edge = self
                .edges
                .get_mut(&id)
                .ok_or(GraphError::EdgeNotFound { id })?;
            edge.selected = true;
            (edge.twin, edge.end)
        };
        if let Some(twin) = self.edges.get_mut(&twin) {
            twin.selected = true;
        }
        self.select_vertex(end)?;
        trace!(edge = id.0, vertex = end.0, "step_highlighted");
        self.edges.get(&id).ok_or(GraphError::EdgeNotFound { id })
    }

    /// First vertex (in insertion order) whose disc of the given diameter
    /// contains `point`.
    pub fn vertex_at(&self, point: Position, diameter: f32) -> Option<VertexId> {
        let radius = f64::from(diameter) / 2.0;
        self.vertices
            .values()
            .find(|v| v.position.distance_to(point) <= radius)
            .map(|v| v.id)
    }

    /// First connection whose square hit box of side `hit_size`, centred on
    /// the connection midpoint, contains `point`. Returns the forward edge.
    pub fn edge_at(&self, point: Position, hit_size: i32) -> Option<EdgeId> {
        let half = hit_size / 2;
        self.connections()
            .find(|edge| {
                let (Some(start), Some(end)) = (self.vertex(edge.start), self.vertex(edge.end))
                else {
                    return false;
                };
                let mid = start.position.midpoint(end.position);
                let left = mid.x - half;
                let top = mid.y - half;
                (left..left + hit_size).contains(&point.x) && (top..top + hit_size).contains(&point.y)
            })
            .map(|edge| edge.id)
    }

    /// Removes every vertex and edge. Identifiers keep increasing.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.slots.clear();
        self.edges.clear();
        debug!("graph_cleared");
    }

    /// Convert to a petgraph `StableDiGraph` for analysis.
    /// Returns the graph and a mapping from `VertexId` to `NodeIndex`.
    pub fn to_petgraph(&self) -> (StableDiGraph<Label, i32>, HashMap<VertexId, NodeIndex>) {
        let mut graph = StableDiGraph::new();
        let mut id_to_index = HashMap::new();

        for vertex in self.vertices.values() {
            let idx = graph.add_node(vertex.label.clone());
            id_to_index.insert(vertex.id, idx);
        }

        for edge in self.edges.values() {
            if let (Some(&from_idx), Some(&to_idx)) =
                (id_to_index.get(&edge.start), id_to_index.get(&edge.end))
            {
                graph.add_edge(from_idx, to_idx, edge.weight.get());
            }
        }

        (graph, id_to_index)
    }

    // Internal helpers

    fn require_vertex(&self, id: VertexId) -> GraphResult<&Vertex> {
        self.vertices
            .get(&id)
            .ok_or(GraphError::VertexNotFound { id })
    }

    fn require_vertex_mut(&mut self, id: VertexId) -> GraphResult<&mut Vertex> {
        self.vertices
            .get_mut(&id)
            .ok_or(GraphError::VertexNotFound { id })
    }

    fn detach_twin(&mut self, edge: &Edge, removed: &mut RemovedItems) {
        if let Some(twin) = self.edges.remove(&edge.twin) {
            if let Some(owner) = self.vertices.get_mut(&twin.start) {
                owner.adjacency.retain(|e| *e != twin.id);
            }
            removed.edges.push(twin.id);
        }
    }
}
