use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Default work-phase length in seconds (25 minutes).
pub const DEFAULT_WORK_SECS: u32 = 25 * 60;
/// Default break-phase length in seconds (5 minutes).
pub const DEFAULT_BREAK_SECS: u32 = 5 * 60;
/// Shortest configurable phase length in seconds.
pub const MIN_LENGTH_SECS: u32 = 60;
/// Longest configurable phase length in seconds.
pub const MAX_LENGTH_SECS: u32 = 60 * 60;
/// Lengths move in whole minutes.
pub const LENGTH_STEP_SECS: i32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Work,
    Break,
}

impl Phase {
    /// The phase that follows this one.
    pub fn other(self) -> Self {
        match self {
            Phase::Work => Phase::Break,
            Phase::Break => Phase::Work,
        }
    }

    pub fn default_length_secs(self) -> u32 {
        match self {
            Phase::Work => DEFAULT_WORK_SECS,
            Phase::Break => DEFAULT_BREAK_SECS,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Work => f.write_str("work"),
            Phase::Break => f.write_str("break"),
        }
    }
}

impl FromStr for Phase {
    type Err = String;

    /// Accepts `session` as an alias for `work`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "work" | "session" => Ok(Phase::Work),
            "break" => Ok(Phase::Break),
            other => Err(format!("unknown phase: {other}")),
        }
    }
}

/// Apply `delta_secs` to `current`, returning the new length if it stays
/// within bounds.
///
/// The delta must be a non-zero whole number of minutes and the result must
/// land in `[MIN_LENGTH_SECS, MAX_LENGTH_SECS]`.
pub fn adjusted_length(current: u32, delta_secs: i32) -> Option<u32> {
    if delta_secs == 0 || delta_secs % LENGTH_STEP_SECS != 0 {
        return None;
    }
    let next = i64::from(current) + i64::from(delta_secs);
    if next < i64::from(MIN_LENGTH_SECS) || next > i64::from(MAX_LENGTH_SECS) {
        return None;
    }
    u32::try_from(next).ok()
}

/// Format seconds as `MM:SS`, each field zero-padded to two digits.
///
/// Minutes are not capped, so values beyond an hour render with three or more
/// minute digits.
pub fn format_remaining(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
