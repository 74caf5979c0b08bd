//! Coordinate → key identity mapping and report aggregation.

use heapless::Vec;

use super::scanner::Snapshot;
use crate::config::{DEFAULT_LAYOUT, MATRIX_COLS, MATRIX_ROWS};
use crate::hid::KeyboardReport;

/// What a matrix position produces while pressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyAction {
    /// Plain key: one usage code in the report's key list.
    Key(u8),
    /// Modifier: bits OR'd into the report's modifier byte. Contributes no
    /// usage code.
    Modifier(u8),
}

/// Full grid assignment, row-major.
pub type Layout = [[KeyAction; MATRIX_COLS]; MATRIX_ROWS];

/// Runtime key lookup table.
///
/// Remappable through console commands between ticks; the scan/report path
/// only ever reads it.
pub struct Keymap {
    table: Layout,
}

impl Keymap {
    pub const fn new(table: Layout) -> Self {
        Self { table }
    }

    pub fn get(&self, row: usize, col: usize) -> KeyAction {
        self.table[row][col]
    }

    pub fn set(&mut self, row: usize, col: usize, action: KeyAction) {
        self.table[row][col] = action;
    }

    /// Aggregate a snapshot into a boot keyboard report.
    ///
    /// Pure and deterministic: positions are visited in row-major order,
    /// pressed plain keys fill the 6-slot list first-found-first (the rest
    /// are silently dropped), and pressed modifiers OR into the modifier
    /// byte.
    pub fn build_report(&self, snapshot: &Snapshot) -> KeyboardReport {
        let mut modifier = 0u8;
        let mut keys: Vec<u8, 6> = Vec::new();

        for row in 0..MATRIX_ROWS {
            for col in 0..MATRIX_COLS {
                if !snapshot.pressed(row, col) {
                    continue;
                }
                match self.table[row][col] {
                    KeyAction::Key(code) => {
                        // Full list: truncate, not fail.
                        let _ = keys.push(code);
                    }
                    KeyAction::Modifier(bits) => modifier |= bits,
                }
            }
        }

        let mut report = KeyboardReport::empty();
        report.modifier = modifier;
        report.keycodes[..keys.len()].copy_from_slice(&keys);
        report
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new(DEFAULT_LAYOUT)
    }
}
