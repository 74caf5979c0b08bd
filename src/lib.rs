//! matrixpad - 3×3 matrix keypad firmware presenting a USB HID keyboard.
//!
//! All pipeline logic (scanning, debouncing, key aggregation, report
//! scheduling, lifecycle, LED policy, console protocol) lives here as
//! `no_std` code with no hardware types, so the host can test it with
//! `cargo test`.
//!
//! The embedded binary (`src/main.rs`, `--features embedded`) wires these
//! components to the RP2040 through Embassy: GPIO pins behind the
//! [`matrix::MatrixBus`] seam, the USB stack behind [`report::HidSink`]
//! and the [`lifecycle::Event`] channel.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod console;
pub mod error;
pub mod hid;
pub mod led;
pub mod lifecycle;
pub mod matrix;
pub mod pace;
pub mod report;

#[cfg(feature = "embedded")]
pub mod board;
#[cfg(feature = "embedded")]
pub mod usb;

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests
// ═══════════════════════════════════════════════════════════════════════════
