//! Status LED blinking.
//!
//! The blink interval comes from the lifecycle state each tick. A latch
//! (Caps Lock from the host, or the console's LED command) forces the LED
//! on and pauses the blink; clearing it drops the LED and resumes blinking
//! at whatever rate the lifecycle currently dictates.

use crate::pace::Pace;

/// Blink schedule plus the latched-on override.
pub struct StatusBlinker {
    pace: Pace,
    led_on: bool,
    latched_on: bool,
}

impl StatusBlinker {
    pub const fn new() -> Self {
        Self {
            pace: Pace::new(),
            led_on: false,
            latched_on: false,
        }
    }

    /// Set or clear the latch. Returns the level to drive immediately.
    pub fn set_latched(&mut self, on: bool) -> bool {
        self.latched_on = on;
        self.led_on = on;
        on
    }

    pub fn is_latched(&self) -> bool {
        self.latched_on
    }

    /// Advance the blink schedule; yields the new level on a toggle.
    pub fn poll(&mut self, now_ms: u64, interval_ms: u64) -> Option<bool> {
        if self.latched_on {
            return None;
        }
        if !self.pace.due(now_ms, interval_ms) {
            return None;
        }
        self.led_on = !self.led_on;
        Some(self.led_on)
    }
}

impl Default for StatusBlinker {
    fn default() -> Self {
        Self::new()
    }
}
