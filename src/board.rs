//! Board bring-up - matrix pins and the status LED.
//!
//! The pin map is documented in `config.rs`; this module turns it into
//! Embassy GPIO handles. Rows idle pulled-up, columns idle high, LED off.

use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::USB;
use embassy_rp::Peripherals;
use embassy_time::Delay;

use crate::matrix::GpioMatrix;

/// Matrix driver as wired on this board.
pub type BoardMatrix = GpioMatrix<Input<'static>, Output<'static>, Delay>;

/// Everything the pipeline task owns on the hardware side.
pub struct Board {
    pub matrix: BoardMatrix,
    pub led: Output<'static>,
}

/// Claim the pins and hand back the USB peripheral for the device stack.
pub fn init(p: Peripherals) -> (Board, USB) {
    let rows = [
        Input::new(p.PIN_4, Pull::Up),
        Input::new(p.PIN_6, Pull::Up),
        Input::new(p.PIN_9, Pull::Up),
    ];
    let cols = [
        Output::new(p.PIN_5, Level::High),
        Output::new(p.PIN_7, Level::High),
        Output::new(p.PIN_8, Level::High),
    ];
    let matrix = GpioMatrix::new(rows, cols, Delay);
    let led = Output::new(p.PIN_25, Level::Low);

    (Board { matrix, led }, p.USB)
}
