//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and protocol
//! constants live here so they can be tuned in one place.

use crate::hid::keycodes;
use crate::matrix::{KeyAction, Layout};

// Matrix topology

/// Number of row sense lines.
pub const MATRIX_ROWS: usize = 3;

/// Number of column drive lines.
pub const MATRIX_COLS: usize = 3;

// Scan / report timing

/// Matrix scan cadence (ms). One column is sampled per tick, so a full
/// grid refresh takes `MATRIX_COLS` ticks.
pub const SCAN_INTERVAL_MS: u64 = 1;

/// Settle time between driving a column and sampling the rows (µs).
/// Covers line capacitance and contact bounce; tune, don't remove.
pub const SETTLE_DELAY_US: u32 = 2;

/// Scan ticks a released position is held pressed after its last raw
/// press. 0 disables debouncing entirely (raw 3 ms refresh only).
pub const DEBOUNCE_HOLD_TICKS: u8 = 5;

/// HID report cadence (ms).
pub const REPORT_INTERVAL_MS: u64 = 10;

// Status LED blink pattern
//
// The blink rate encodes the USB lifecycle state.

/// Device not yet configured by the host.
pub const BLINK_NOT_MOUNTED_MS: u64 = 250;

/// Device mounted and running.
pub const BLINK_MOUNTED_MS: u64 = 1000;

/// Bus suspended.
pub const BLINK_SUSPENDED_MS: u64 = 2500;

// USB

/// USB VID/PID - use the "pid.codes" open-source test VID.
/// Replace with your own allocated VID/PID for production.
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0002;

/// USB device strings.
pub const USB_MANUFACTURER: &str = "matrixpad";
pub const USB_PRODUCT: &str = "3x3 Matrix Keypad";
pub const USB_SERIAL_NUMBER: &str = "000001";

/// USB HID endpoint polling interval (ms); matches the report cadence.
pub const USB_HID_POLL_MS: u8 = 10;

// GPIO pin assignments (RP2040, GPIO numbering)
//
// These are logical names; actual `embassy_rp::peripherals::*` types are
// selected in `board.rs`.  Adjust for your custom PCB.
//
//   Row 0          → GPIO4  (pulled up)
//   Row 1          → GPIO6  (pulled up)
//   Row 2          → GPIO9  (pulled up)
//   Column 0       → GPIO5  (idle high, driven low when active)
//   Column 1       → GPIO7
//   Column 2       → GPIO8
//   Status LED     → GPIO25 (Pico on-board LED)

// Default key layout
//
// Row-major. Positions mapped to `Modifier` contribute only modifier bits
// to the report, never a usage code.

/// Layout the keymap boots with (and the console remaps from).
pub const DEFAULT_LAYOUT: Layout = [
    [
        KeyAction::Key(keycodes::KEY_0),
        KeyAction::Key(keycodes::KEY_1),
        KeyAction::Key(keycodes::KEY_2),
    ],
    [
        KeyAction::Key(keycodes::KEY_3),
        KeyAction::Key(keycodes::KEY_4),
        KeyAction::Key(keycodes::KEY_5),
    ],
    [
        KeyAction::Modifier(keycodes::MOD_LEFT_CTRL),
        KeyAction::Key(keycodes::KEY_7),
        KeyAction::Modifier(keycodes::MOD_LEFT_CTRL),
    ],
];
