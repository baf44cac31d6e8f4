//! Error types for algorithm runs and session control.

use graphwalk_core::{GraphError, VertexId};
use thiserror::Error;

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while running algorithms or driving a session.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The graph store rejected an operation.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// An algorithm was asked to start from a vertex that does not exist.
    #[error("start vertex not found: {vertex:?}")]
    StartNotFound { vertex: VertexId },

    /// A vertex label typed by the user was not a single visible character.
    #[error("invalid vertex label {input:?}: expected exactly one non-blank character")]
    InvalidLabelInput { input: String },

    /// The run reached an inconsistent state.
    #[error("algorithm inconsistency: {message}")]
    InconsistentState { message: String },

    /// Configuration could not be loaded or saved.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error (file operations).
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
