mod clock;
mod controller;
mod phase;
mod ticker;
mod tokio_ticker;

pub use clock::{Clock, ManualClock, SystemClock};
pub use controller::{TimerController, TimerState, DEFAULT_POLL_INTERVAL};
pub use phase::{
    adjusted_length, format_remaining, Phase, DEFAULT_BREAK_SECS, DEFAULT_WORK_SECS,
    LENGTH_STEP_SECS, MAX_LENGTH_SECS, MIN_LENGTH_SECS,
};
pub use ticker::{ManualTicker, TickHandle, Ticker};
pub use tokio_ticker::TokioTicker;
