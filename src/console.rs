//! Runtime console commands.
//!
//! Single-byte protocol on the CDC interface:
//!
//! - `O` - latch the status LED on and stop blinking
//! - `A` - remap the top-left key to the `A` usage code
//! - `0` - remap the top-left key back to the `0` usage code
//!
//! Every accepted command is answered with [`REPLY_OK`]; unrecognised
//! bytes are ignored.

use crate::error::Error;
use crate::hid::keycodes;
use crate::led::StatusBlinker;
use crate::matrix::{KeyAction, Keymap};

/// Reply sent after each accepted command.
pub const REPLY_OK: &str = "OK\r\n";

/// Parsed console command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Latch the status LED on.
    LedOn,
    /// Point the top-left position at a different usage code.
    RemapTopLeft(u8),
}

pub fn parse(byte: u8) -> Result<Command, Error> {
    match byte {
        b'O' => Ok(Command::LedOn),
        b'A' => Ok(Command::RemapTopLeft(keycodes::KEY_A)),
        b'0' => Ok(Command::RemapTopLeft(keycodes::KEY_0)),
        other => Err(Error::UnknownCommand(other)),
    }
}

/// Apply a command between ticks. Returns a level to drive the LED to,
/// when the command changes it.
pub fn apply(cmd: Command, keymap: &mut Keymap, blinker: &mut StatusBlinker) -> Option<bool> {
    match cmd {
        Command::LedOn => Some(blinker.set_latched(true)),
        Command::RemapTopLeft(code) => {
            keymap.set(0, 0, KeyAction::Key(code));
            None
        }
    }
}
