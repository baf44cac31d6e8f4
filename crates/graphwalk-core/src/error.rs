//! Error types for the graph store.

use thiserror::Error;

use crate::{EdgeId, Position, VertexId};

/// Result type alias for graph store operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors that can occur while mutating or querying the graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A vertex already occupies the requested slot.
    #[error("position {position} is already occupied by vertex {existing:?}")]
    PositionOccupied {
        position: Position,
        existing: VertexId,
    },

    /// A vertex referenced by ID was not found in the graph.
    #[error("vertex not found: {id:?}")]
    VertexNotFound { id: VertexId },

    /// An edge referenced by ID was not found in the graph.
    #[error("edge not found: {id:?}")]
    EdgeNotFound { id: EdgeId },

    /// Both endpoints of a requested connection are the same vertex.
    #[error("cannot connect vertex {vertex:?} to itself")]
    SelfLoop { vertex: VertexId },

    /// Label text was empty or otherwise unusable.
    #[error("invalid vertex label: {input:?}")]
    InvalidLabel { input: String },

    /// Weight text was not a signed integer of at most two digits.
    #[error("invalid edge weight: {input:?} (expected an integer between -99 and 99)")]
    InvalidWeight { input: String },
}
