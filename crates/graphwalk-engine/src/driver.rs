//! Timer-driven playback for hosts without a frame loop.

use std::time::Duration;

use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

use crate::player::PlaybackEvent;
use crate::session::Session;

/// Tick the session's player on a `tokio` interval until playback ends.
///
/// Returns every event released along the way. Returns immediately when
/// nothing is playing.
pub async fn run_animation(session: &mut Session) -> Vec<PlaybackEvent> {
    // tokio intervals reject a zero period
    let period = session.config().step_interval().max(Duration::from_millis(1));
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut events = Vec::new();
    while session.is_animating() {
        ticker.tick().await;
        if let Some(event) = session.tick_animation() {
            events.push(event);
        }
    }
    debug!(events = events.len(), "animation_driver_done");
    events
}
