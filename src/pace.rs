//! Tick pacing for the cooperative tasks.
//!
//! Every task in the main loop is invoked each iteration and self-throttles
//! here: a tick fires when a full interval has elapsed since the last
//! *scheduled* run, and the schedule advances by exactly one interval per
//! fire. Anchoring to the schedule rather than to "now" keeps the long-run
//! cadence drift-free; a stalled loop catches up one fire per call.

/// Cumulative-deadline throttle owned by one task.
#[derive(Debug, Default, Clone, Copy)]
pub struct Pace {
    last_ms: u64,
}

impl Pace {
    pub const fn new() -> Self {
        Self { last_ms: 0 }
    }

    /// True when `interval_ms` has elapsed since the last scheduled fire.
    /// An interval of zero never fires.
    pub fn due(&mut self, now_ms: u64, interval_ms: u64) -> bool {
        if interval_ms == 0 {
            return false;
        }
        if now_ms.saturating_sub(self.last_ms) < interval_ms {
            return false;
        }
        self.last_ms += interval_ms;
        true
    }
}
