//! USB lifecycle bookkeeping.
//!
//! State is driven entirely by device-stack callbacks delivered as
//! [`Event`]s; this module holds no timers of its own. The derived state
//! feeds the report path (suspend gating) and the status LED blink rate.

use crate::config::{BLINK_MOUNTED_MS, BLINK_NOT_MOUNTED_MS, BLINK_SUSPENDED_MS};

/// Device-stack lifecycle callbacks, as data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Host configured the device.
    Mounted,
    /// Host deconfigured the device or the cable went away.
    Unmounted,
    /// Bus suspended. `remote_wakeup` is whether the host granted the
    /// remote-wakeup feature.
    Suspended { remote_wakeup: bool },
    /// Bus resumed.
    Resumed,
}

/// not-mounted → mounted ⇄ suspended, back to not-mounted on detach.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UsbState {
    NotMounted,
    Mounted,
    Suspended,
}

/// Mount/suspend flags with the state machine derived on read, so a
/// resume lands back in whichever of mounted/not-mounted held before the
/// suspend.
pub struct Lifecycle {
    mounted: bool,
    suspended: bool,
    remote_wakeup_enabled: bool,
}

impl Lifecycle {
    pub const fn new() -> Self {
        Self {
            mounted: false,
            suspended: false,
            remote_wakeup_enabled: false,
        }
    }

    pub fn handle(&mut self, event: Event) {
        match event {
            Event::Mounted => {
                self.mounted = true;
                self.suspended = false;
            }
            Event::Unmounted => {
                self.mounted = false;
                self.suspended = false;
            }
            Event::Suspended { remote_wakeup } => {
                self.suspended = true;
                self.remote_wakeup_enabled = remote_wakeup;
            }
            Event::Resumed => {
                self.suspended = false;
            }
        }
    }

    pub fn state(&self) -> UsbState {
        if self.suspended {
            UsbState::Suspended
        } else if self.mounted {
            UsbState::Mounted
        } else {
            UsbState::NotMounted
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Whether the host granted remote wakeup on the latest suspend.
    pub fn remote_wakeup_enabled(&self) -> bool {
        self.remote_wakeup_enabled
    }

    /// Blink rate encoding the current state.
    pub fn blink_interval_ms(&self) -> u64 {
        match self.state() {
            UsbState::NotMounted => BLINK_NOT_MOUNTED_MS,
            UsbState::Mounted => BLINK_MOUNTED_MS,
            UsbState::Suspended => BLINK_SUSPENDED_MS,
        }
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}
