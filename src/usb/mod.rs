//! USB device subsystem - presents a boot keyboard plus a CDC-ACM console
//! to the host.
//!
//! The RP2040's built-in Full-Speed controller is driven by `embassy-usb`.
//! Cross-task traffic crosses this module only through the statics below;
//! the pipeline task stays the single writer of all pipeline state:
//!
//! - [`REPORTS`]: pipeline → HID writer task (outgoing keyboard reports)
//! - [`USB_EVENTS`]: device stack → pipeline (lifecycle callbacks)
//! - [`LED_REPORTS`]: device stack → pipeline (host LED state)
//! - [`CONSOLE_COMMANDS`]: CDC task → pipeline (parsed commands)
//! - [`WAKEUP`]: pipeline → device runner (remote wakeup request)

pub mod device;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use crate::console::Command;
use crate::hid::{KeyboardReport, LedMask};
use crate::lifecycle::Event;
use crate::report::HidSink;

/// Outgoing keyboard reports.
pub static REPORTS: Channel<CriticalSectionRawMutex, KeyboardReport, 8> = Channel::new();

/// Lifecycle callbacks from the device stack.
pub static USB_EVENTS: Channel<CriticalSectionRawMutex, Event, 8> = Channel::new();

/// Latest keyboard LED state from a SET_REPORT OUTPUT payload.
pub static LED_REPORTS: Signal<CriticalSectionRawMutex, LedMask> = Signal::new();

/// Parsed console commands awaiting the pipeline.
pub static CONSOLE_COMMANDS: Channel<CriticalSectionRawMutex, Command, 4> = Channel::new();

/// Remote-wakeup request towards the device runner.
pub static WAKEUP: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// The report generator's view of the stack: ready while the report
/// channel has room, submission is a non-blocking enqueue.
pub struct StackSink;

impl HidSink for StackSink {
    fn is_ready(&self) -> bool {
        !REPORTS.is_full()
    }

    fn submit(&mut self, report: &KeyboardReport) -> bool {
        REPORTS.try_send(*report).is_ok()
    }

    fn request_remote_wakeup(&mut self) {
        WAKEUP.signal(());
    }
}
