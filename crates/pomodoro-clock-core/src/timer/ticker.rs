//! Periodic tick registration.
//!
//! A [`Ticker`] schedules repeated callbacks into the controller. The
//! controller keeps the returned [`TickHandle`] in its own state and cancels
//! it before registering another, so a correct ticker never has more than one
//! live registration per controller.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Identifier of one periodic-tick registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TickHandle(u64);

impl TickHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

pub trait Ticker: Send {
    /// Start delivering ticks every `period` until cancelled.
    fn register(&mut self, period: Duration) -> TickHandle;

    /// Stop delivering ticks for `handle`. Unknown handles are ignored.
    fn cancel(&mut self, handle: TickHandle);
}

#[derive(Debug, Default)]
struct ManualTickerState {
    next_id: u64,
    live: BTreeSet<TickHandle>,
    registered: usize,
    cancelled: usize,
    last_period: Option<Duration>,
}

/// Ticker that records registrations instead of scheduling anything.
///
/// The caller drives ticks by hand via `TimerController::on_tick`. Clones
/// share the same bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct ManualTicker {
    state: Arc<Mutex<ManualTickerState>>,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ManualTickerState> {
        // A poisoned lock only means a test panicked mid-update; the counters
        // are still usable.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Handles registered and not yet cancelled.
    pub fn live(&self) -> Vec<TickHandle> {
        self.lock().live.iter().copied().collect()
    }

    pub fn live_count(&self) -> usize {
        self.lock().live.len()
    }

    pub fn registered_count(&self) -> usize {
        self.lock().registered
    }

    pub fn cancelled_count(&self) -> usize {
        self.lock().cancelled
    }

    pub fn last_period(&self) -> Option<Duration> {
        self.lock().last_period
    }
}

impl Ticker for ManualTicker {
    fn register(&mut self, period: Duration) -> TickHandle {
        let mut state = self.lock();
        state.next_id += 1;
        let handle = TickHandle::new(state.next_id);
        state.live.insert(handle);
        state.registered += 1;
        state.last_period = Some(period);
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        let mut state = self.lock();
        if state.live.remove(&handle) {
            state.cancelled += 1;
        }
    }
}
