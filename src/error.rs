//! Unified error type for matrixpad.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.
//!
//! Nothing here is fatal: every failure is handled by skipping the current
//! sample or byte and re-evaluating on the next tick.

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// SET_REPORT carried an OUTPUT payload with no LED byte.
    EmptyOutputReport,

    /// Console byte did not match any command.
    UnknownCommand(u8),
}
