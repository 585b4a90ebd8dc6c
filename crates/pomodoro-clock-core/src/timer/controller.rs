//! Timer controller implementation.
//!
//! The controller is a wall-clock-driven state machine. It does not spawn
//! threads or tasks: on start it asks its [`Ticker`] for one periodic
//! registration and keeps the handle in its own state, and the front end
//! routes every delivered tick back through [`TimerController::on_tick`].
//!
//! ## State Transitions
//!
//! ```text
//! Idle --start--> Running --pause--> Idle
//! Running --tick (1s elapsed)--> Running   (remaining - 1)
//! Running --remaining hits 0--> Running    (phase flipped, alert played)
//! any --reset--> Idle                      (defaults restored)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut timer = TimerController::new(SystemClock, ticker, alert);
//! timer.toggle_running();
//! // Each time the ticker fires:
//! for event in timer.on_tick(handle) { render(&event); }
//! ```

use std::fmt;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::clock::Clock;
use super::phase::{
    adjusted_length, format_remaining, Phase, DEFAULT_BREAK_SECS, DEFAULT_WORK_SECS,
};
use super::ticker::{TickHandle, Ticker};
use crate::alert::AlertSink;
use crate::events::Event;

/// Tick cadence. Much finer than a second so the countdown follows the wall
/// clock closely even when callbacks are delayed.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(30);

const SECOND_MS: u64 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
}

/// The live tick registration. Present exactly while running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActiveTick {
    handle: TickHandle,
    /// Clock reading at which the next decrement is due. Advanced by exactly
    /// one second per decrement, never re-anchored to "now".
    next_due_ms: u64,
}

pub struct TimerController {
    work_length: u32,
    break_length: u32,
    remaining: u32,
    phase: Phase,
    tick: Option<ActiveTick>,
    poll_interval: Duration,
    clock: Box<dyn Clock>,
    ticker: Box<dyn Ticker>,
    alert: Box<dyn AlertSink>,
}

impl TimerController {
    /// Create an idle controller in the work phase with default lengths.
    ///
    /// `alert` is the single audio resource used for every phase change.
    pub fn new(
        clock: impl Clock + 'static,
        ticker: impl Ticker + 'static,
        alert: impl AlertSink + 'static,
    ) -> Self {
        Self {
            work_length: DEFAULT_WORK_SECS,
            break_length: DEFAULT_BREAK_SECS,
            remaining: DEFAULT_WORK_SECS,
            phase: Phase::Work,
            tick: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            clock: Box::new(clock),
            ticker: Box::new(ticker),
            alert: Box::new(alert),
        }
    }

    /// Override the tick cadence. Applies from the next start.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval.max(Duration::from_millis(1));
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        if self.tick.is_some() {
            TimerState::Running
        } else {
            TimerState::Idle
        }
    }

    pub fn is_running(&self) -> bool {
        self.tick.is_some()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining
    }

    pub fn remaining_display(&self) -> String {
        format_remaining(self.remaining)
    }

    pub fn work_length_secs(&self) -> u32 {
        self.work_length
    }

    pub fn break_length_secs(&self) -> u32 {
        self.break_length
    }

    pub fn length_secs(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Work => self.work_length,
            Phase::Break => self.break_length,
        }
    }

    /// Handle of the live tick registration, if running.
    pub fn tick_handle(&self) -> Option<TickHandle> {
        self.tick.map(|t| t.handle)
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state(),
            phase: self.phase,
            remaining_secs: self.remaining,
            remaining_display: self.remaining_display(),
            work_length_secs: self.work_length,
            break_length_secs: self.break_length,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin ticking. No-op while already running.
    pub fn start(&mut self) -> Option<Event> {
        if self.is_running() {
            return None;
        }
        let handle = self.ticker.register(self.poll_interval);
        self.tick = Some(ActiveTick {
            handle,
            next_due_ms: self.clock.now_ms().saturating_add(SECOND_MS),
        });
        tracing::info!(phase = %self.phase, remaining = self.remaining, "timer started");
        Some(Event::TimerStarted {
            phase: self.phase,
            remaining_secs: self.remaining,
            at: Utc::now(),
        })
    }

    /// Stop ticking, keeping the remaining time. No-op while idle.
    pub fn pause(&mut self) -> Option<Event> {
        let active = self.tick.take()?;
        self.ticker.cancel(active.handle);
        tracing::info!(phase = %self.phase, remaining = self.remaining, "timer paused");
        Some(Event::TimerPaused {
            phase: self.phase,
            remaining_secs: self.remaining,
            at: Utc::now(),
        })
    }

    /// Start when idle, pause when running.
    pub fn toggle_running(&mut self) -> Event {
        let event = if self.is_running() {
            self.pause()
        } else {
            self.start()
        };
        event.unwrap_or_else(|| self.snapshot())
    }

    /// Cancel any tick and restore every default.
    pub fn reset(&mut self) -> Event {
        self.cancel_tick();
        self.work_length = DEFAULT_WORK_SECS;
        self.break_length = DEFAULT_BREAK_SECS;
        self.remaining = DEFAULT_WORK_SECS;
        self.phase = Phase::Work;
        tracing::info!("timer reset");
        Event::TimerReset { at: Utc::now() }
    }

    /// Change a phase length by `delta_secs` (whole minutes).
    ///
    /// Returns `None` without touching state when the result would leave
    /// `[60, 3600]` seconds. While idle, editing the active phase also
    /// reloads the countdown.
    pub fn adjust_length(&mut self, phase: Phase, delta_secs: i32) -> Option<Event> {
        let current = self.length_secs(phase);
        let Some(next) = adjusted_length(current, delta_secs) else {
            tracing::debug!(%phase, current, delta_secs, "length adjustment rejected");
            return None;
        };

        match phase {
            Phase::Work => self.work_length = next,
            Phase::Break => self.break_length = next,
        }
        if phase == self.phase && !self.is_running() {
            self.remaining = next;
        }
        Some(Event::LengthAdjusted {
            phase,
            length_secs: next,
            remaining_secs: self.remaining,
            at: Utc::now(),
        })
    }

    /// Tick callback. Applies one decrement per whole second elapsed since
    /// the last one and returns the resulting events in order.
    ///
    /// The alert plays at most once per callback, however many phase changes
    /// a late callback catches up on.
    ///
    /// Ticks for any handle other than the live one are ignored, so a tick
    /// that was already queued when its registration was cancelled has no
    /// effect.
    pub fn on_tick(&mut self, handle: TickHandle) -> Vec<Event> {
        let Some(active) = self.tick else {
            tracing::debug!(handle = handle.id(), "tick while idle ignored");
            return Vec::new();
        };
        if active.handle != handle {
            tracing::debug!(handle = handle.id(), live = active.handle.id(), "stale tick ignored");
            return Vec::new();
        }

        let now = self.clock.now_ms();
        let mut next_due_ms = active.next_due_ms;
        let mut events = Vec::new();
        while now >= next_due_ms {
            next_due_ms += SECOND_MS;
            events.push(self.decrement());
        }
        if let Some(active) = self.tick.as_mut() {
            active.next_due_ms = next_due_ms;
        }
        if events.iter().any(Event::is_phase_change) {
            self.play_alert();
        }
        events
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn cancel_tick(&mut self) {
        if let Some(active) = self.tick.take() {
            self.ticker.cancel(active.handle);
        }
    }

    /// Take one second off and, if that empties the countdown, switch phase
    /// in the same step.
    fn decrement(&mut self) -> Event {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            return self.switch_phase();
        }
        Event::CountdownTicked {
            phase: self.phase,
            remaining_secs: self.remaining,
            at: Utc::now(),
        }
    }

    fn switch_phase(&mut self) -> Event {
        let from = self.phase;
        self.phase = from.other();
        self.remaining = self.length_secs(self.phase);
        tracing::info!(%from, to = %self.phase, remaining = self.remaining, "phase changed");
        Event::PhaseChanged {
            from,
            to: self.phase,
            remaining_secs: self.remaining,
            at: Utc::now(),
        }
    }

    fn play_alert(&mut self) {
        if let Err(e) = self.alert.play() {
            tracing::warn!(error = %e, "alert playback failed");
        }
    }
}

impl Drop for TimerController {
    fn drop(&mut self) {
        self.cancel_tick();
    }
}

impl fmt::Debug for TimerController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerController")
            .field("work_length", &self.work_length)
            .field("break_length", &self.break_length)
            .field("remaining", &self.remaining)
            .field("phase", &self.phase)
            .field("tick", &self.tick)
            .field("poll_interval", &self.poll_interval)
            .finish_non_exhaustive()
    }
}
