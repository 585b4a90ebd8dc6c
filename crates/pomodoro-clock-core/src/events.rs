use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{Phase, TimerState};

/// Every state change in the controller produces an Event.
/// Front ends re-render on events; the CLI prints them as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        phase: Phase,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    /// A configured phase length changed.
    LengthAdjusted {
        phase: Phase,
        length_secs: u32,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// One second came off the countdown.
    CountdownTicked {
        phase: Phase,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// The countdown hit zero and the next phase was loaded.
    PhaseChanged {
        from: Phase,
        to: Phase,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        phase: Phase,
        remaining_secs: u32,
        remaining_display: String,
        work_length_secs: u32,
        break_length_secs: u32,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn is_phase_change(&self) -> bool {
        matches!(self, Event::PhaseChanged { .. })
    }
}
