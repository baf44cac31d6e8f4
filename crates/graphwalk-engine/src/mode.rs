//! Edit modes of the interaction layer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What a click on the canvas currently means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Mode {
    /// Clicks are ignored (also used while an algorithm runs).
    None,
    /// One-shot request to clear the graph; resolves to [`Mode::START`].
    Reset,
    /// Clicking empty canvas creates a vertex.
    #[default]
    AddVertex,
    /// Clicking two vertices connects them.
    AddEdge,
    /// Clicking a vertex removes it and its connections.
    RemoveVertex,
    /// Clicking a connection's weight area removes it.
    RemoveEdge,
}

impl Mode {
    /// Mode the session starts in and falls back to after a reset.
    pub const START: Mode = Mode::AddVertex;

    /// The modes a user can pick from the mode menu, in menu order.
    pub const EDIT_MODES: [Mode; 5] = [
        Mode::AddVertex,
        Mode::AddEdge,
        Mode::RemoveVertex,
        Mode::RemoveEdge,
        Mode::None,
    ];

    /// Human readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Mode::None => "None",
            Mode::Reset | Mode::AddVertex => "Add a Vertex",
            Mode::AddEdge => "Add an Edge",
            Mode::RemoveVertex => "Remove a Vertex",
            Mode::RemoveEdge => "Remove an Edge",
        }
    }

    /// Text for the status line.
    pub fn status_text(&self) -> String {
        format!("Current Mode -> {}", self.name())
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text() {
        assert_eq!(Mode::START.status_text(), "Current Mode -> Add a Vertex");
        assert_eq!(Mode::Reset.status_text(), "Current Mode -> Add a Vertex");
        assert_eq!(Mode::RemoveEdge.status_text(), "Current Mode -> Remove an Edge");
    }
}
