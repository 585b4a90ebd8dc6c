use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::ticker::{TickHandle, Ticker};

/// Ticker backed by tokio interval tasks.
///
/// Each registration spawns one task that sends its handle down the channel
/// every period; cancelling aborts the task. The receiving side feeds the
/// handles to `TimerController::on_tick`. Must be used inside a tokio
/// runtime.
#[derive(Debug)]
pub struct TokioTicker {
    tx: mpsc::UnboundedSender<TickHandle>,
    next_id: u64,
    tasks: HashMap<TickHandle, JoinHandle<()>>,
}

impl TokioTicker {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TickHandle>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let ticker = Self {
            tx,
            next_id: 0,
            tasks: HashMap::new(),
        };
        (ticker, rx)
    }

    pub fn live_count(&self) -> usize {
        self.tasks.len()
    }
}

impl Ticker for TokioTicker {
    fn register(&mut self, period: Duration) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle::new(self.next_id);
        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(handle).is_err() {
                    break;
                }
            }
        });
        self.tasks.insert(handle, task);
        tracing::debug!(handle = handle.id(), ?period, "tick registered");
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
            tracing::debug!(handle = handle.id(), "tick cancelled");
        }
    }
}

impl Drop for TokioTicker {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}
