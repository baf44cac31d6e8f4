//! Algorithm runs, edit modes and timed playback for the graphwalk visualizer.
//!
//! The engine sits between the graph store ([`graphwalk_core`]) and a
//! front-end:
//!
//! - [`algorithm::run`] executes depth-first search, breadth-first search,
//!   Dijkstra or Prim synchronously and returns the edge sequence to replay
//!   plus a one-line result.
//! - [`AnimationPlayer`] releases that sequence one edge per interval.
//! - [`Session`] owns the graph, the current [`Mode`] and the single active
//!   algorithm, interprets canvas clicks and notifies [`SessionListener`]s.
//!
//! ## Example
//!
//! ```
//! use std::time::Instant;
//! use graphwalk_core::{Label, Position, Weight};
//! use graphwalk_engine::{AlgorithmKind, Session};
//!
//! let mut session = Session::default();
//! let a = session.add_vertex(Label::new("A").unwrap(), Position::new(0, 0)).unwrap();
//! let b = session.add_vertex(Label::new("B").unwrap(), Position::new(100, 0)).unwrap();
//! session.add_edge(Weight::new(4).unwrap(), a, b).unwrap();
//!
//! session.start_algorithm(AlgorithmKind::Dijkstra);
//! let run = session.choose_start(a, Instant::now()).unwrap().unwrap();
//! assert_eq!(run.summary, "B=4");
//! ```

pub mod algorithm;
mod config;
#[cfg(feature = "async-driver")]
mod driver;
mod error;
pub mod input;
mod mode;
mod player;
mod session;
pub mod shortest_path;
pub mod spanning_tree;
pub mod traversal;

pub use algorithm::{AlgorithmKind, AlgorithmState, AlgorithmStatus, Traversal};
pub use config::VisualizerConfig;
#[cfg(feature = "async-driver")]
pub use driver::run_animation;
pub use error::{EngineError, EngineResult};
pub use mode::Mode;
pub use player::{AnimationPlayer, PlaybackEvent, PlayerState};
pub use session::{ClickOutcome, Session, SessionListener};
