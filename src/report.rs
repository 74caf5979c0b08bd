//! Keyboard report scheduling and submission.
//!
//! Runs on its own cadence (10 ms reference), reading the stabilised grid
//! state and pushing boot keyboard reports through the device stack's
//! narrow report interface. Empty reports are edge-suppressed: exactly one
//! all-zero report marks a release, idle after that is silence.

use crate::config::REPORT_INTERVAL_MS;
use crate::hid::KeyboardReport;
use crate::lifecycle::Lifecycle;
use crate::matrix::{Keymap, Snapshot};
use crate::pace::Pace;

/// Narrow interface to the device stack's report channel.
pub trait HidSink {
    /// Whether the channel can accept a new report right now.
    fn is_ready(&self) -> bool;

    /// Hand one report to the stack. `false` means the stack refused it;
    /// the caller never retries within a tick - the next tick resamples
    /// fresh state and supersedes the lost report.
    fn submit(&mut self, report: &KeyboardReport) -> bool;

    /// Ask the host to resume a suspended bus.
    fn request_remote_wakeup(&mut self);
}

/// Paces and builds outgoing keyboard reports.
pub struct ReportScheduler {
    pace: Pace,
    had_key: bool,
}

impl ReportScheduler {
    pub const fn new() -> Self {
        Self {
            pace: Pace::new(),
            had_key: false,
        }
    }

    /// Run one report tick if due.
    ///
    /// A busy channel skips the whole tick, suppression state included.
    /// While suspended, a pressed key requests remote wakeup instead of a
    /// report.
    pub fn poll<S: HidSink>(
        &mut self,
        now_ms: u64,
        snapshot: &Snapshot,
        keymap: &Keymap,
        lifecycle: &Lifecycle,
        sink: &mut S,
    ) {
        if !self.pace.due(now_ms, REPORT_INTERVAL_MS) {
            return;
        }
        if !sink.is_ready() {
            return;
        }

        let any_pressed = snapshot.any_pressed();

        if lifecycle.is_suspended() && any_pressed {
            sink.request_remote_wakeup();
        } else if any_pressed {
            sink.submit(&keymap.build_report(snapshot));
            self.had_key = true;
        } else if self.had_key {
            // Release edge: one empty report, then silence.
            sink.submit(&KeyboardReport::empty());
            self.had_key = false;
        }
    }
}

impl Default for ReportScheduler {
    fn default() -> Self {
        Self::new()
    }
}
