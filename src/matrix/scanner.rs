//! Time-sliced matrix scanning.
//!
//! One column is driven active per scan tick and every row is sampled, so
//! a full grid refresh spans `MATRIX_COLS` ticks (3 ms at the reference
//! cadence). A snapshot is therefore the union of the three most recent
//! column samples; the skew is far below human key timing.

use crate::config::{MATRIX_COLS, MATRIX_ROWS, SCAN_INTERVAL_MS};
use crate::pace::Pace;

/// Bits of a column mask that correspond to real rows.
pub(crate) const ROW_MASK: u8 = (1 << MATRIX_ROWS) - 1;

/// Hardware seam between the scanner and the GPIO lines.
///
/// The scanner calls these in a fixed order per tick: release, drive,
/// settle, read. `settle` is the only blocking wait in the whole loop and
/// must stay microsecond-bounded.
pub trait MatrixBus {
    /// Return every column driver to its idle (inactive) level.
    fn release_columns(&mut self);

    /// Drive a single column active. Never called with a second column
    /// still active.
    fn drive_column(&mut self, col: usize);

    /// Wait for the lines to settle after a column change.
    fn settle(&mut self);

    /// Raw row levels, bit *r* = electrical level of row *r*. Rows are
    /// pulled up, so an idle row reads 1 and a pressed key reads 0.
    fn read_rows(&mut self) -> u8;
}

/// Pressed state of the whole grid: one mask per column, bit *r* set iff
/// (row *r*, column) is pressed.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Snapshot {
    cols: [u8; MATRIX_COLS],
}

impl Snapshot {
    pub const fn new(cols: [u8; MATRIX_COLS]) -> Self {
        Self { cols }
    }

    pub fn pressed(&self, row: usize, col: usize) -> bool {
        self.cols[col] & (1 << row) != 0
    }

    /// True when any position in the grid is pressed.
    pub fn any_pressed(&self) -> bool {
        let union = self.cols.iter().fold(0u8, |acc, &mask| acc | mask);
        union & ROW_MASK != 0
    }
}

/// Round-robin column scanner. Owns the scan cursor and the latched
/// per-column masks; nothing else writes them.
pub struct Scanner {
    cursor: usize,
    cols: [u8; MATRIX_COLS],
    pace: Pace,
}

impl Scanner {
    pub const fn new() -> Self {
        Self {
            cursor: 0,
            cols: [0; MATRIX_COLS],
            pace: Pace::new(),
        }
    }

    /// Sample the column under the cursor and advance it. No-op (returns
    /// `false`) until a scan interval has elapsed.
    pub fn poll(&mut self, now_ms: u64, bus: &mut impl MatrixBus) -> bool {
        if !self.pace.due(now_ms, SCAN_INTERVAL_MS) {
            return false;
        }

        bus.release_columns();
        bus.drive_column(self.cursor);
        bus.settle();

        // Active-low: a pressed switch shorts its row to the driven-low
        // column, so invert the raw levels to get a pressed mask.
        self.cols[self.cursor] = !bus.read_rows() & ROW_MASK;

        self.cursor = (self.cursor + 1) % MATRIX_COLS;
        true
    }

    /// Copy of the current grid state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot { cols: self.cols }
    }

    /// Column the next `poll` will sample.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}
