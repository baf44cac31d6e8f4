//! Core domain types shared across the graphwalk workspace.
//!
//! The graph store keeps vertices keyed by their canvas slot and a flat,
//! insertion-ordered collection of directed edges. Every undirected
//! connection drawn by a user is stored as two directed edges that point at
//! each other through [`Edge::twin`], so adjacency is symmetric by
//! construction.

mod error;
mod graph;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use error::{GraphError, GraphResult};
pub use graph::{Graph, RemovedItems};

/// Identifier for vertices within a [`Graph`].
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct VertexId(pub u64);

/// Identifier for directed edges within a [`Graph`].
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct EdgeId(pub u64);

/// Canvas coordinates of a vertex centre.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Position {
    /// Create a position from raw coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: Position) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        dx.hypot(dy)
    }

    /// Integer midpoint between two positions.
    pub fn midpoint(&self, other: Position) -> Position {
        Position::new((self.x + other.x) / 2, (self.y + other.y) / 2)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Display token identifying a vertex to the user.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Label(String);

impl Label {
    /// Create a label, rejecting empty or whitespace-only text.
    pub fn new(text: impl Into<String>) -> GraphResult<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(GraphError::InvalidLabel { input: text });
        }
        Ok(Self(text))
    }

    /// Borrow the label text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Label {
    type Err = GraphError;

    fn from_str(s: &str) -> GraphResult<Self> {
        Label::new(s)
    }
}

/// Integer weight shared by both directions of a connection.
///
/// Weights are limited to one or two decimal digits with an optional sign,
/// i.e. `-99..=99`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Weight(i32);

impl Weight {
    /// Smallest accepted weight.
    pub const MIN: i32 = -99;
    /// Largest accepted weight.
    pub const MAX: i32 = 99;

    /// Create a weight, rejecting values outside `MIN..=MAX`.
    pub fn new(value: i32) -> GraphResult<Self> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(GraphError::InvalidWeight {
                input: value.to_string(),
            });
        }
        Ok(Self(value))
    }

    /// The numeric value.
    pub fn get(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Weight {
    type Err = GraphError;

    /// Parse text of the form `[+-]?\d{1,2}`.
    fn from_str(s: &str) -> GraphResult<Self> {
        let invalid = || GraphError::InvalidWeight {
            input: s.to_string(),
        };

        let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
        if digits.is_empty() || digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let value: i32 = s.parse().map_err(|_| invalid())?;
        Weight::new(value)
    }
}

/// A vertex and its outgoing adjacency.
#[derive(Debug, Clone)]
pub struct Vertex {
    /// Unique identifier.
    pub id: VertexId,
    /// User-facing label.
    pub label: Label,
    /// Centre of the vertex on the canvas.
    pub position: Position,
    /// Traversal marker, reset before every algorithm run.
    pub visited: bool,
    /// Presentation-only highlight flag.
    pub selected: bool,
    adjacency: Vec<EdgeId>,
}

impl Vertex {
    fn new(id: VertexId, label: Label, position: Position) -> Self {
        Self {
            id,
            label,
            position,
            visited: false,
            selected: false,
            adjacency: Vec::new(),
        }
    }

    /// Outgoing edges in insertion order.
    pub fn adjacency(&self) -> &[EdgeId] {
        &self.adjacency
    }

    /// Number of outgoing edges.
    pub fn degree(&self) -> usize {
        self.adjacency.len()
    }
}

/// One direction of a weighted connection.
#[derive(Debug, Clone)]
pub struct Edge {
    /// Unique identifier.
    pub id: EdgeId,
    /// Vertex whose adjacency list owns this edge.
    pub start: VertexId,
    /// Far endpoint.
    pub end: VertexId,
    /// Weight shared with the twin.
    pub weight: Weight,
    /// The opposite direction of the same connection.
    pub twin: EdgeId,
    /// Presentation-only highlight flag.
    pub selected: bool,
}

impl Edge {
    /// Whether this is the edge that represents the connection (and its
    /// weight label) for rendering and hit-testing.
    pub fn is_forward(&self) -> bool {
        self.id < self.twin
    }

    /// Identifier of the forward edge of this connection.
    pub fn connection_id(&self) -> EdgeId {
        self.id.min(self.twin)
    }
}
