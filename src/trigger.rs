//! Interrupt-safe activation requests for `no_std` environments.
//!
//! The controller is not reentrant and must only be driven from the polling
//! loop. An interrupt handler (a motion sensor edge, a button) never calls it
//! directly: it records its request here, and the polling loop hands the
//! request over through
//! [`BrightnessController::poll`](crate::BrightnessController::poll).
//! The trigger is the only piece meant to be shared across contexts.

use core::cell::Cell;

use critical_section::Mutex;

/// Single-slot activation latch guarded by critical sections.
///
/// Requests made before the poller drains the latch are merged: one
/// activation is delivered, and it is immediate if any request was.
pub struct ActivationTrigger {
    pending: Mutex<Cell<Option<bool>>>,
}

impl ActivationTrigger {
    /// Create a new empty trigger.
    pub const fn new() -> Self {
        Self {
            pending: Mutex::new(Cell::new(None)),
        }
    }

    /// Request activation.
    ///
    /// `immediate` asks for full brightness without the ramp-up.
    pub fn request(&self, immediate: bool) {
        critical_section::with(|cs| {
            let slot = self.pending.borrow(cs);
            let merged = slot.get().map_or(immediate, |pending| pending || immediate);
            slot.set(Some(merged));
        });
    }

    /// Take the pending request, leaving the trigger empty.
    ///
    /// Returns `Some(immediate)` if a request was pending.
    pub fn take(&self) -> Option<bool> {
        critical_section::with(|cs| self.pending.borrow(cs).take())
    }

    /// Check if a request is waiting.
    pub fn is_pending(&self) -> bool {
        critical_section::with(|cs| self.pending.borrow(cs).get().is_some())
    }
}

impl Default for ActivationTrigger {
    fn default() -> Self {
        Self::new()
    }
}
