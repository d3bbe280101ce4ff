//! State-change notification.

use heapless::Vec;

use crate::LightState;

/// Receives every state transition of a controller
///
/// Called synchronously from `process`/`activate`, so it must return quickly.
pub trait StateObserver {
    fn on_state_changed(&mut self, state: LightState);
}

impl<F: FnMut(LightState)> StateObserver for F {
    fn on_state_changed(&mut self, state: LightState) {
        self(state);
    }
}

/// Empty observer slot
#[derive(Debug, Clone, Copy, Default)]
pub struct NoObserver;

impl StateObserver for NoObserver {
    fn on_state_changed(&mut self, _state: LightState) {}
}

/// Observer that keeps the first `N` transitions
#[derive(Debug, Clone, Default)]
pub struct StateRecorder<const N: usize> {
    states: Vec<LightState, N>,
    dropped: usize,
}

impl<const N: usize> StateRecorder<N> {
    pub const fn new() -> Self {
        Self {
            states: Vec::new(),
            dropped: 0,
        }
    }

    /// Recorded transitions, oldest first
    pub fn states(&self) -> &[LightState] {
        &self.states
    }

    /// Most recent recorded transition
    pub fn last(&self) -> Option<LightState> {
        self.states.last().copied()
    }

    /// Number of transitions that did not fit
    pub const fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn clear(&mut self) {
        self.states.clear();
        self.dropped = 0;
    }
}

impl<const N: usize> StateObserver for StateRecorder<N> {
    fn on_state_changed(&mut self, state: LightState) {
        if self.states.push(state).is_err() {
            self.dropped += 1;
        }
    }
}
