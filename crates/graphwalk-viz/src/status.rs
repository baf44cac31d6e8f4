//! Status and result lines, fed by session notifications.

use std::cell::RefCell;
use std::rc::Rc;

use graphwalk_core::Edge;
use graphwalk_engine::{AlgorithmKind, AlgorithmState, AlgorithmStatus, Mode, SessionListener};
use tracing::debug;

/// Text shown around the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBoard {
    /// "Current Mode -> ..." line.
    pub mode_text: String,
    /// Result line; empty when nothing is to be shown.
    pub result_text: String,
    /// Whether the result line uses the highlighted background.
    pub result_highlighted: bool,
    /// Algorithm in the slot, if any.
    pub algorithm: Option<AlgorithmKind>,
    /// Steps highlighted in the current replay.
    pub steps_shown: usize,
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self {
            mode_text: Mode::START.status_text(),
            result_text: String::new(),
            result_highlighted: false,
            algorithm: None,
            steps_shown: 0,
        }
    }
}

/// Shared handle registered as a [`SessionListener`].
#[derive(Debug, Clone, Default)]
pub struct StatusListener(pub Rc<RefCell<StatusBoard>>);

impl SessionListener for StatusListener {
    fn on_mode_change(&mut self, mode: Mode) {
        self.0.borrow_mut().mode_text = mode.status_text();
    }

    fn on_algorithm_selected(&mut self, kind: AlgorithmKind) {
        let mut board = self.0.borrow_mut();
        board.algorithm = Some(kind);
        board.steps_shown = 0;
    }

    fn on_algorithm_state_change(&mut self, status: &AlgorithmStatus) {
        let mut board = self.0.borrow_mut();
        board.result_text = status.display_text().unwrap_or_default().to_string();
        match status.state {
            AlgorithmState::SelectStart => board.result_highlighted = true,
            AlgorithmState::Running => board.steps_shown = 0,
            AlgorithmState::Stopped => {
                board.result_highlighted = false;
                board.algorithm = None;
            }
            AlgorithmState::Terminated => {}
        }
    }

    fn on_step(&mut self, edge: &Edge) {
        debug!(edge = edge.id.0, "step_shown");
        self.0.borrow_mut().steps_shown += 1;
    }
}
