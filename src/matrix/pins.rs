//! GPIO-backed matrix bus.
//!
//! Generic over `embedded-hal` 1.0 pin and delay traits, so the same
//! driver runs on Embassy pins on target and on fake pins in host tests.
//! Columns idle high and are driven low when active; rows are pulled up
//! and read low through a pressed switch.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use super::scanner::MatrixBus;
use crate::config::{MATRIX_COLS, MATRIX_ROWS, SETTLE_DELAY_US};

/// Column-driven, row-sampled switch matrix.
pub struct GpioMatrix<I, O, D> {
    rows: [I; MATRIX_ROWS],
    cols: [O; MATRIX_COLS],
    delay: D,
}

impl<I, O, D> GpioMatrix<I, O, D>
where
    I: InputPin,
    O: OutputPin,
    D: DelayNs,
{
    /// Take ownership of the pins and park every column at its idle level.
    pub fn new(rows: [I; MATRIX_ROWS], cols: [O; MATRIX_COLS], delay: D) -> Self {
        let mut matrix = Self { rows, cols, delay };
        matrix.release_columns();
        matrix
    }
}

impl<I, O, D> MatrixBus for GpioMatrix<I, O, D>
where
    I: InputPin,
    O: OutputPin,
    D: DelayNs,
{
    fn release_columns(&mut self) {
        for col in &mut self.cols {
            let _ = col.set_high();
        }
    }

    fn drive_column(&mut self, col: usize) {
        if let Some(pin) = self.cols.get_mut(col) {
            let _ = pin.set_low();
        }
    }

    fn settle(&mut self) {
        self.delay.delay_us(SETTLE_DELAY_US);
    }

    fn read_rows(&mut self) -> u8 {
        let mut levels = 0u8;
        for (row, pin) in self.rows.iter_mut().enumerate() {
            // A failed read counts as idle-high; the next scan retries.
            if pin.is_high().unwrap_or(true) {
                levels |= 1 << row;
            }
        }
        levels
    }
}
