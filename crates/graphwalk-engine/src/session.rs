//! The interactive session: graph, edit mode, active algorithm and playback.
//!
//! A [`Session`] is the single owner of all mutable state. Front-ends feed it
//! clicks and prompt answers, drive playback from their frame loop or a timer,
//! and observe changes through [`SessionListener`]s.

use std::time::{Duration, Instant};

use graphwalk_core::{Edge, EdgeId, Graph, Label, Position, RemovedItems, VertexId, Weight};
use tracing::{debug, info, warn};

use crate::algorithm::{self, AlgorithmKind, AlgorithmState, AlgorithmStatus, Traversal};
use crate::config::VisualizerConfig;
use crate::error::{EngineError, EngineResult};
use crate::mode::Mode;
use crate::player::{AnimationPlayer, PlaybackEvent};

/// Observer of session changes. Every method defaults to doing nothing.
pub trait SessionListener {
    /// The edit mode changed (receives the requested mode, so a reset
    /// reports [`Mode::Reset`]).
    fn on_mode_change(&mut self, _mode: Mode) {}

    /// A new algorithm took the slot.
    fn on_algorithm_selected(&mut self, _kind: AlgorithmKind) {}

    /// The algorithm in the slot changed state.
    fn on_algorithm_state_change(&mut self, _status: &AlgorithmStatus) {}

    /// Playback highlighted an edge.
    fn on_step(&mut self, _edge: &Edge) {}
}

/// What a canvas click led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Nothing happened.
    Ignored,
    /// A vertex was highlighted (existing vertex in add-vertex mode, or the
    /// source of a new connection).
    VertexSelected(VertexId),
    /// The front-end should ask for a label and call [`Session::add_vertex`].
    LabelRequested(Position),
    /// The front-end should ask for a weight and call [`Session::add_edge`]
    /// (or [`Session::cancel_edge`]).
    WeightRequested { from: VertexId, to: VertexId },
    /// Something was removed from the graph.
    Removed(RemovedItems),
    /// The active algorithm ran from the clicked vertex; playback started.
    AlgorithmStarted(Traversal),
}

struct ActiveAlgorithm {
    status: AlgorithmStatus,
    player: AnimationPlayer,
}

/// Owns the graph and everything the user can do to it.
pub struct Session {
    graph: Graph,
    config: VisualizerConfig,
    mode: Mode,
    edge_source: Option<VertexId>,
    active: Option<ActiveAlgorithm>,
    last_run: Option<Traversal>,
    listeners: Vec<Box<dyn SessionListener>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(VisualizerConfig::default())
    }
}

impl Session {
    pub fn new(config: VisualizerConfig) -> Self {
        Self {
            graph: Graph::new(),
            config,
            mode: Mode::START,
            edge_source: None,
            active: None,
            last_run: None,
            listeners: Vec::new(),
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Source vertex of a connection being drawn.
    pub fn edge_source(&self) -> Option<VertexId> {
        self.edge_source
    }

    /// Status of the algorithm in the slot, if any.
    pub fn algorithm(&self) -> Option<&AlgorithmStatus> {
        self.active.as_ref().map(|a| &a.status)
    }

    /// Output of the most recent algorithm run.
    pub fn last_run(&self) -> Option<&Traversal> {
        self.last_run.as_ref()
    }

    pub fn register_listener(&mut self, listener: Box<dyn SessionListener>) {
        self.listeners.push(listener);
    }

    // ---- control ---------------------------------------------------------

    /// Switch the edit mode, stopping any active algorithm first.
    pub fn set_mode(&mut self, mode: Mode) {
        self.stop_algorithm();
        self.graph.unselect();
        self.edge_source = None;

        if mode == Mode::Reset {
            self.graph.clear();
            self.mode = Mode::START;
        } else {
            self.mode = mode;
        }

        info!(mode = mode.name(), "mode_changed");
        broadcast(&mut self.listeners, |l| l.on_mode_change(mode));
    }

    /// Clear the graph and go back to the start mode.
    pub fn request_reset(&mut self) {
        self.set_mode(Mode::Reset);
    }

    /// Put `kind` in the slot and wait for a start vertex.
    pub fn start_algorithm(&mut self, kind: AlgorithmKind) {
        self.set_mode(Mode::None);

        let active = ActiveAlgorithm {
            status: AlgorithmStatus::new(kind),
            player: AnimationPlayer::new(self.config.step_interval()),
        };
        info!(algorithm = kind.name(), "algorithm_selected");
        broadcast(&mut self.listeners, |l| l.on_algorithm_selected(kind));
        broadcast(&mut self.listeners, |l| {
            l.on_algorithm_state_change(&active.status)
        });
        self.active = Some(active);
    }

    /// Cancel the active algorithm, if any. Returns whether one was stopped.
    pub fn stop_algorithm(&mut self) -> bool {
        let Some(mut active) = self.active.take() else {
            return false;
        };
        active.player.stop();
        active.status.state = AlgorithmState::Stopped;
        info!(algorithm = active.status.kind.name(), "algorithm_stopped");
        broadcast(&mut self.listeners, |l| {
            l.on_algorithm_state_change(&active.status)
        });
        true
    }

    /// Run the active algorithm from `vertex` and start playback.
    ///
    /// Returns `Ok(None)` when no algorithm is waiting for a start vertex
    /// (nothing in the slot, or a replay still running).
    pub fn choose_start(
        &mut self,
        vertex: VertexId,
        now: Instant,
    ) -> EngineResult<Option<Traversal>> {
        let Some(active) = self.active.as_mut() else {
            return Ok(None);
        };
        if !active.status.accepts_start() {
            debug!(vertex = vertex.0, "start_ignored_while_running");
            return Ok(None);
        }
        if self.graph.vertex(vertex).is_none() {
            return Err(EngineError::StartNotFound { vertex });
        }

        self.graph.unselect();
        active.status.state = AlgorithmState::Running;
        broadcast(&mut self.listeners, |l| {
            l.on_algorithm_state_change(&active.status)
        });

        let kind = active.status.kind;
        let traversal = match algorithm::run(kind, &mut self.graph, vertex, &self.config) {
            Ok(traversal) => traversal,
            Err(e) => {
                warn!(algorithm = kind.name(), error = %e, "algorithm_run_failed");
                self.stop_algorithm();
                return Err(e);
            }
        };

        if let Some(active) = self.active.as_mut() {
            active
                .player
                .play(traversal.sequence.clone(), traversal.summary.clone(), now);
        }
        self.last_run = Some(traversal.clone());
        Ok(Some(traversal))
    }

    // ---- canvas ----------------------------------------------------------

    /// Interpret a click at `position` according to the current mode.
    pub fn click(&mut self, position: Position, now: Instant) -> EngineResult<ClickOutcome> {
        let hit_vertex = self.graph.vertex_at(position, self.config.vertex_diameter);

        if self.active.is_some() {
            let Some(vertex) = hit_vertex else {
                return Ok(ClickOutcome::Ignored);
            };
            return Ok(match self.choose_start(vertex, now)? {
                Some(traversal) => ClickOutcome::AlgorithmStarted(traversal),
                None => ClickOutcome::Ignored,
            });
        }

        match self.mode {
            Mode::AddVertex => match hit_vertex {
                Some(vertex) => {
                    self.graph.set_selected(vertex, true)?;
                    Ok(ClickOutcome::VertexSelected(vertex))
                }
                None => Ok(ClickOutcome::LabelRequested(position)),
            },
            Mode::AddEdge => {
                let Some(vertex) = hit_vertex else {
                    return Ok(ClickOutcome::Ignored);
                };
                match self.edge_source {
                    None => {
                        self.graph.set_selected(vertex, true)?;
                        self.edge_source = Some(vertex);
                        Ok(ClickOutcome::VertexSelected(vertex))
                    }
                    Some(source) if source == vertex => Ok(ClickOutcome::Ignored),
                    Some(source) => Ok(ClickOutcome::WeightRequested {
                        from: source,
                        to: vertex,
                    }),
                }
            }
            Mode::RemoveVertex => match hit_vertex {
                Some(vertex) => Ok(ClickOutcome::Removed(self.remove_vertex(vertex)?)),
                None => Ok(ClickOutcome::Ignored),
            },
            Mode::RemoveEdge => {
                match self.graph.edge_at(position, self.config.edge_hit_size) {
                    Some(edge) => Ok(ClickOutcome::Removed(self.remove_edge(edge)?)),
                    None => Ok(ClickOutcome::Ignored),
                }
            }
            Mode::None | Mode::Reset => Ok(ClickOutcome::Ignored),
        }
    }

    // ---- graph edits -----------------------------------------------------

    pub fn add_vertex(&mut self, label: Label, position: Position) -> EngineResult<VertexId> {
        Ok(self.graph.add_vertex(label, position)?)
    }

    /// Connect two vertices. The pending source selection is cleared whether
    /// or not the connection was accepted.
    pub fn add_edge(
        &mut self,
        weight: Weight,
        from: VertexId,
        to: VertexId,
    ) -> EngineResult<(EdgeId, EdgeId)> {
        let result = self.graph.add_edge(weight, from, to);
        self.cancel_edge();
        Ok(result?)
    }

    /// Drop the pending source selection of a connection being drawn.
    pub fn cancel_edge(&mut self) {
        if let Some(source) = self.edge_source.take() {
            // the source may have been removed in the meantime
            if self.graph.vertex(source).is_some() {
                self.graph.set_selected(source, false).ok();
            }
        }
    }

    pub fn remove_vertex(&mut self, vertex: VertexId) -> EngineResult<RemovedItems> {
        if self.edge_source == Some(vertex) {
            self.edge_source = None;
        }
        Ok(self.graph.remove_vertex(vertex)?)
    }

    pub fn remove_edge(&mut self, edge: EdgeId) -> EngineResult<RemovedItems> {
        Ok(self.graph.remove_edge(edge)?)
    }

    // ---- playback --------------------------------------------------------

    /// Whether a replay is in progress.
    pub fn is_animating(&self) -> bool {
        self.active.as_ref().is_some_and(|a| a.player.is_playing())
    }

    /// Handle one timer firing.
    pub fn tick_animation(&mut self) -> Option<PlaybackEvent> {
        let event = self.active.as_mut()?.player.tick()?;
        self.apply(&event);
        Some(event)
    }

    /// Handle every tick that fell due by `now`.
    pub fn advance(&mut self, now: Instant) -> Vec<PlaybackEvent> {
        let events = match self.active.as_mut() {
            Some(active) => active.player.poll(now),
            None => return Vec::new(),
        };
        for event in &events {
            self.apply(event);
        }
        events
    }

    /// How long a front-end may sleep before the next step is due.
    pub fn time_until_next_step(&self, now: Instant) -> Option<Duration> {
        self.active
            .as_ref()
            .and_then(|a| a.player.time_until_next(now))
    }

    fn apply(&mut self, event: &PlaybackEvent) {
        match event {
            PlaybackEvent::Step(id) => match self.graph.highlight_step(*id) {
                Ok(edge) => {
                    let edge = edge.clone();
                    broadcast(&mut self.listeners, |l| l.on_step(&edge));
                }
                Err(e) => warn!(edge = id.0, error = %e, "step_skipped"),
            },
            PlaybackEvent::Finished(result) => {
                let Some(active) = self.active.as_mut() else {
                    return;
                };
                active.status.finish(result.clone());
                info!(
                    algorithm = active.status.kind.name(),
                    result = %result,
                    "algorithm_terminated"
                );
                broadcast(&mut self.listeners, |l| {
                    l.on_algorithm_state_change(&active.status)
                });
            }
        }
    }
}

fn broadcast(
    listeners: &mut [Box<dyn SessionListener>],
    mut notify: impl FnMut(&mut dyn SessionListener),
) {
    for listener in listeners.iter_mut() {
        notify(listener.as_mut());
    }
}
