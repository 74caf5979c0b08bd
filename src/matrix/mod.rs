//! Matrix subsystem - time-sliced column scanning, release-hold
//! debouncing, and the coordinate→key layout.
//!
//! ## Components
//!
//! - **Scanner**: drives one column at a time and latches per-column row
//!   masks; owns the scan cursor.
//! - **Debounce**: eager per-position hold filter between the raw scan and
//!   the report path.
//! - **Keymap**: data-driven lookup from grid coordinates to key actions,
//!   remappable at runtime through the console.

pub mod debounce;
pub mod keymap;
pub mod pins;
pub mod scanner;

#[cfg(test)]
mod tests;

pub use debounce::Debounce;
pub use keymap::{KeyAction, Keymap, Layout};
pub use pins::GpioMatrix;
pub use scanner::{MatrixBus, Scanner, Snapshot};
