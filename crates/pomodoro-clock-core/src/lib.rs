//! # Pomodoro Clock Core Library
//!
//! Business logic for a work/break countdown timer. The terminal binary is a
//! thin skin over this crate: every control it offers maps onto one call on
//! [`TimerController`].
//!
//! ## Architecture
//!
//! - **Timer Controller**: owns the countdown state and the single live tick
//!   registration. It does not spawn anything itself; a [`Ticker`] delivers
//!   periodic callbacks and a [`Clock`] supplies wall-clock time.
//! - **Alert**: one audio resource loaded at startup, rewound and replayed on
//!   every phase change. Failures are logged and ignored.
//! - **View**: the presentation model ([`ClockView`], [`LengthAdjuster`],
//!   [`Control`]) rendered by front ends.
//! - **Storage**: TOML-based configuration.

pub mod alert;
pub mod error;
pub mod events;
pub mod storage;
pub mod timer;
pub mod view;

pub use alert::{AlertSink, AudioClip, BeepAlert, RecordingAlert, SilentAlert, BEEP_SOUND_URL};
pub use error::{AlertError, ConfigError, CoreError};
pub use events::Event;
pub use storage::Config;
pub use timer::{
    format_remaining, Clock, ManualClock, ManualTicker, Phase, SystemClock, TickHandle, Ticker,
    TimerController, TimerState, TokioTicker,
};
pub use view::{ClockView, Control, LengthAdjuster};
