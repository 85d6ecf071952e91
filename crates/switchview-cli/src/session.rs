//! Scripted session: taps on a schedule, frames from a fixed clock.

use crate::activity::MainActivity;
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use switchview_core::FrameClock;
use tracing::{debug, info};

/// How a session drives the activity.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SessionConfig {
    /// Number of taps to deliver
    pub(crate) taps: u32,
    /// Time between consecutive taps
    pub(crate) tap_interval: Duration,
    /// Frame interval
    pub(crate) frame: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            taps: 1,
            tap_interval: Duration::from_millis(500),
            frame: Duration::from_millis(16),
        }
    }
}

/// What happened during a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct SessionReport {
    /// Taps delivered
    pub(crate) taps: u32,
    /// Taps that started a transition
    pub(crate) accepted_taps: u32,
    /// Clicks counted by the default handler
    pub(crate) clicks: u32,
    /// Frames delivered
    pub(crate) frames: u64,
    /// Simulated time elapsed
    pub(crate) elapsed_ms: u128,
    /// Reported state changes, in order
    pub(crate) changes: Vec<bool>,
    /// State at the end of the session
    pub(crate) final_checked: bool,
}

impl fmt::Display for SessionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Session complete")?;
        writeln!(
            f,
            "  Taps: {} ({} accepted, {} clicks)",
            self.taps, self.accepted_taps, self.clicks
        )?;
        writeln!(f, "  Frames: {} ({} ms)", self.frames, self.elapsed_ms)?;
        writeln!(f, "  Changes: {:?}", self.changes)?;
        write!(f, "  Final state: {}", if self.final_checked { "on" } else { "off" })
    }
}

/// Run `config` against `activity` until every tap is delivered and the
/// switch is idle.
pub(crate) fn run(activity: &mut MainActivity, config: SessionConfig) -> SessionReport {
    let mut clock = FrameClock::new(config.frame);
    let mut next_tap = Duration::ZERO;
    let mut delivered = 0;
    let mut accepted = 0;
    let mut animating = false;

    info!(taps = config.taps, "session started");
    while delivered < config.taps || animating {
        while delivered < config.taps && next_tap <= clock.now() {
            let idle = !activity.switch().is_animating();
            activity.tap();
            if idle && activity.switch().is_animating() {
                accepted += 1;
            }
            debug!(tap = delivered, at_ms = clock.now().as_millis(), idle, "tap delivered");
            delivered += 1;
            next_tap += config.tap_interval;
        }
        animating = activity.frame(clock.tick());
    }

    let report = SessionReport {
        taps: delivered,
        accepted_taps: accepted,
        clicks: activity.clicks(),
        frames: clock.frames(),
        elapsed_ms: clock.now().as_millis(),
        changes: activity.changes().to_vec(),
        final_checked: activity.switch().is_checked(),
    };
    info!(frames = report.frames, changes = report.changes.len(), "session finished");
    report
}
