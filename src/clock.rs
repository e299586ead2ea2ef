//! Frame clock
//!
//! Supplies the per-tick `dt` and the monotonic timestamp used for
//! session timing. `dt` is capped so a stalled frame can't blow up
//! integration.

use std::time::{Duration, Instant};

use crate::tuning::SessionTuning;

/// Timing for a single tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Seconds since the previous tick (capped)
    pub dt: f32,
    /// Monotonic time since the clock started
    pub now: Duration,
}

impl FrameTime {
    /// Build a synthetic frame (deterministic drivers, tests)
    pub fn fixed(dt: f32, now: Duration) -> Self {
        Self {
            dt: dt.max(0.0),
            now,
        }
    }
}

/// Wall-clock frame source
#[derive(Debug, Clone)]
pub struct FrameClock {
    origin: Instant,
    last: Instant,
    max_dt: f32,
}

impl FrameClock {
    /// Start a clock capping dt at the session's `max_frame_dt`
    pub fn for_session(tuning: &SessionTuning) -> Self {
        Self::new(tuning.max_frame_dt)
    }

    pub fn new(max_dt: f32) -> Self {
        let now = Instant::now();
        Self {
            origin: now,
            last: now,
            max_dt: max_dt.max(0.0),
        }
    }

    /// Advance the clock, returning the elapsed frame time
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let raw_dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        FrameTime {
            dt: raw_dt.min(self.max_dt),
            now: now.duration_since(self.origin),
        }
    }
}
