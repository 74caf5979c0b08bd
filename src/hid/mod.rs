//! HID report layer - the outgoing keyboard report and the LED OUTPUT
//! report the host sends back.

pub mod keyboard;
pub mod keycodes;


pub use keyboard::{KeyboardReport, KEYBOARD_REPORT_DESCRIPTOR, KEYBOARD_REPORT_SIZE};

use crate::error::Error;

/// Keyboard LED bitmask from a host OUTPUT report (byte 0).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedMask(u8);

impl LedMask {
    pub const NUM_LOCK: u8 = 0x01;
    pub const CAPS_LOCK: u8 = 0x02;
    pub const SCROLL_LOCK: u8 = 0x04;

    pub const fn new(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn caps_lock(self) -> bool {
        self.0 & Self::CAPS_LOCK != 0
    }
}

/// Interpret a SET_REPORT OUTPUT payload as a keyboard LED state.
///
/// A zero-length payload is malformed; the caller ignores it (there is no
/// error channel back to the host).
pub fn parse_output_report(data: &[u8]) -> Result<LedMask, Error> {
    match data.first() {
        Some(&bits) => Ok(LedMask::new(bits)),
        None => Err(Error::EmptyOutputReport),
    }
}
