//! Presentation model.
//!
//! Front ends render a [`ClockView`] and translate input into [`Control`]s.
//! Nothing here owns state or validates anything; every mutation goes
//! through [`TimerController`].

use std::fmt;
use std::str::FromStr;

use crate::events::Event;
use crate::timer::{format_remaining, Phase, TimerController, LENGTH_STEP_SECS};

/// Label, current length and +/- controls for one phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthAdjuster {
    label: &'static str,
    phase: Phase,
    value: String,
}

impl LengthAdjuster {
    pub fn new(label: &'static str, phase: Phase, length_secs: u32) -> Self {
        Self {
            label,
            phase,
            value: format_remaining(length_secs),
        }
    }

    pub fn for_phase(phase: Phase, timer: &TimerController) -> Self {
        let label = match phase {
            Phase::Work => "Session Length",
            Phase::Break => "Break Length",
        };
        Self::new(label, phase, timer.length_secs(phase))
    }

    pub fn label(&self) -> &str {
        self.label
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn on_increment(&self, timer: &mut TimerController) -> Option<Event> {
        timer.adjust_length(self.phase, LENGTH_STEP_SECS)
    }

    pub fn on_decrement(&self, timer: &mut TimerController) -> Option<Event> {
        timer.adjust_length(self.phase, -LENGTH_STEP_SECS)
    }
}

impl fmt::Display for LengthAdjuster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<15} [-] {} [+]", self.label, self.value)
    }
}

/// Everything a front end shows: three read-only displays and the controls
/// that act on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockView {
    pub phase_label: &'static str,
    pub remaining: String,
    pub toggle_label: &'static str,
    pub break_length: LengthAdjuster,
    pub session_length: LengthAdjuster,
}

impl ClockView {
    pub fn from_controller(timer: &TimerController) -> Self {
        Self {
            phase_label: match timer.phase() {
                Phase::Work => "Work time!",
                Phase::Break => "Break time!",
            },
            remaining: timer.remaining_display(),
            toggle_label: if timer.is_running() { "pause" } else { "start" },
            break_length: LengthAdjuster::for_phase(Phase::Break, timer),
            session_length: LengthAdjuster::for_phase(Phase::Work, timer),
        }
    }

    /// One-line form used while the countdown is running.
    pub fn status_line(&self) -> String {
        format!(
            "{} {}  [{}]  break {}  session {}",
            self.phase_label,
            self.remaining,
            self.toggle_label,
            self.break_length.value(),
            self.session_length.value()
        )
    }
}

impl fmt::Display for ClockView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pomodoro Clock")?;
        writeln!(f, "{}", self.break_length)?;
        writeln!(f, "{}", self.phase_label)?;
        writeln!(f, "  {}", self.remaining)?;
        writeln!(f, "  [{}] [reset]", self.toggle_label)?;
        write!(f, "{}", self.session_length)
    }
}

/// The five interactive controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    ToggleRunning,
    Reset,
    Increment(Phase),
    Decrement(Phase),
}

impl Control {
    /// Apply this control to the timer.
    pub fn dispatch(self, timer: &mut TimerController) -> Option<Event> {
        match self {
            Control::ToggleRunning => Some(timer.toggle_running()),
            Control::Reset => Some(timer.reset()),
            Control::Increment(phase) => {
                LengthAdjuster::for_phase(phase, timer).on_increment(timer)
            }
            Control::Decrement(phase) => {
                LengthAdjuster::for_phase(phase, timer).on_decrement(timer)
            }
        }
    }

    pub fn help() -> &'static str {
        "s: start/pause  r: reset  w+/w-: session length  b+/b-: break length  q: quit"
    }
}

impl FromStr for Control {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_ascii_lowercase();
        match input.as_str() {
            "" | "s" | "start" | "pause" | "toggle" => return Ok(Control::ToggleRunning),
            "r" | "reset" => return Ok(Control::Reset),
            _ => {}
        }

        let (name, sign) = if let Some(name) = input.strip_suffix('+') {
            (name, true)
        } else if let Some(name) = input.strip_suffix('-') {
            (name, false)
        } else {
            return Err(format!("unknown command: {}", s.trim()));
        };
        let phase = match name.trim() {
            "w" => Phase::Work,
            "b" => Phase::Break,
            other => other.parse::<Phase>()?,
        };
        Ok(if sign {
            Control::Increment(phase)
        } else {
            Control::Decrement(phase)
        })
    }
}
