//! Host-side frame driving
//!
//! The simulation never schedules itself. A host (browser animation frame,
//! timer, test harness) turns its own clock into deltas and calls tick.

use std::ops::ControlFlow;

use super::tick::clamp_delta;

/// Converts host timestamps into clamped frame deltas
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta since the previous call, `now` in seconds. The first call yields 0.
    pub fn delta(&mut self, now: f64) -> f32 {
        let raw = match self.last {
            Some(last) => (now - last) as f32,
            None => 0.0,
        };
        self.last = Some(now);
        clamp_delta(raw)
    }

    /// Forget the last timestamp (e.g. after the page was hidden)
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Run frames until `next_delta` runs dry or `tick_fn` breaks.
/// Each raw delta is clamped to `[0, max_delta]`. Returns the number of frames run.
pub fn run(
    mut next_delta: impl FnMut() -> Option<f32>,
    max_delta: f32,
    mut tick_fn: impl FnMut(f32) -> ControlFlow<()>,
) -> u64 {
    let mut frames = 0;
    while let Some(raw) = next_delta() {
        let dt = if raw.is_finite() {
            raw.clamp(0.0, max_delta)
        } else {
            0.0
        };
        frames += 1;
        if tick_fn(dt).is_break() {
            break;
        }
    }
    frames
}
