//! egui front-end for the graphwalk algorithm visualizer.
//!
//! Users place labelled vertices on a canvas, connect them with weighted
//! edges and pick an algorithm from the menu; the traversal is then replayed
//! step by step on the canvas while the result line reports the outcome.

mod app;
mod dialog;
mod render;
mod settings;
mod status;

pub use app::{GraphWalkApp, MenuCommand};
pub use dialog::{Prompt, PromptAction, PromptKind};
pub use settings::SettingsStyle;
pub use status::{StatusBoard, StatusListener};

/// Window title.
pub const WINDOW_TITLE: &str = "Graph-Algorithms Visualizer";
/// Initial window size.
pub const WINDOW_SIZE: [f32; 2] = [800.0, 600.0];
