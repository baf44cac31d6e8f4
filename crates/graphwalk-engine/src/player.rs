//! Timed replay of a traversal sequence.
//!
//! The player owns a queue of edge ids. Every tick releases one edge; the
//! tick after the last edge releases the result text and ends playback. The
//! player does not own a clock: callers either call [`AnimationPlayer::tick`]
//! from their own timer or feed the current instant to
//! [`AnimationPlayer::poll`] and let it work out which ticks are due.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use graphwalk_core::EdgeId;
use tracing::debug;

/// Where a player is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Idle,
    Playing,
    Finished,
    Stopped,
}

/// Something released by a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// Highlight this edge.
    Step(EdgeId),
    /// Playback is over; show this result.
    Finished(String),
}

/// Replays one sequence at a fixed interval.
#[derive(Debug)]
pub struct AnimationPlayer {
    interval: Duration,
    queue: VecDeque<EdgeId>,
    result: Option<String>,
    state: PlayerState,
    next_due: Option<Instant>,
}

impl AnimationPlayer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            queue: VecDeque::new(),
            result: None,
            state: PlayerState::Idle,
            next_due: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlayerState::Playing
    }

    /// Edges not yet released.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Start replaying `sequence`; the first tick falls due one interval
    /// after `now`. Anything still queued from an earlier run is dropped.
    pub fn play(&mut self, sequence: Vec<EdgeId>, result: String, now: Instant) {
        debug!(steps = sequence.len(), "playback_started");
        self.queue = sequence.into();
        self.result = Some(result);
        self.state = PlayerState::Playing;
        self.next_due = Some(now + self.interval);
    }

    /// Release the next event, if playing.
    pub fn tick(&mut self) -> Option<PlaybackEvent> {
        if self.state != PlayerState::Playing {
            return None;
        }
        match self.queue.pop_front() {
            Some(edge) => Some(PlaybackEvent::Step(edge)),
            None => {
                self.state = PlayerState::Finished;
                self.next_due = None;
                debug!("playback_finished");
                Some(PlaybackEvent::Finished(self.result.take().unwrap_or_default()))
            }
        }
    }

    /// Release every tick that has fallen due by `now`, in order.
    pub fn poll(&mut self, now: Instant) -> Vec<PlaybackEvent> {
        let mut events = Vec::new();
        while let Some(due) = self.next_due {
            if due > now {
                break;
            }
            self.next_due = Some(due + self.interval);
            match self.tick() {
                Some(event) => events.push(event),
                None => self.next_due = None,
            }
        }
        events
    }

    /// Time left until the next tick is due, or `None` when not playing.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }

    /// Cancel playback and discard queued edges. Returns whether anything
    /// was actually playing.
    pub fn stop(&mut self) -> bool {
        let was_playing = self.is_playing();
        self.queue.clear();
        self.result = None;
        self.next_due = None;
        if was_playing {
            self.state = PlayerState::Stopped;
            debug!("playback_stopped");
        }
        was_playing
    }
}
