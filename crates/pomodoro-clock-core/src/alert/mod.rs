//! Audible alert fired on every phase change.
//!
//! The controller owns exactly one [`AlertSink`] for its whole lifetime and
//! treats playback as best-effort: an `Err` from [`AlertSink::play`] is logged
//! and the phase change proceeds.

mod beep;
mod clip;

pub use beep::{BeepAlert, PlayerCommand};
pub use clip::{AudioClip, BEEP_SOUND_URL};

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use crate::error::AlertError;

pub trait AlertSink: Send {
    /// Play the alert from its start.
    fn play(&mut self) -> Result<(), AlertError>;
}

impl<A: AlertSink + ?Sized> AlertSink for Box<A> {
    fn play(&mut self) -> Result<(), AlertError> {
        (**self).play()
    }
}

/// Alert used when alerts are switched off in the config.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAlert;

impl AlertSink for SilentAlert {
    fn play(&mut self) -> Result<(), AlertError> {
        Ok(())
    }
}

/// Counts play requests. Clones share the counter.
#[derive(Debug, Clone, Default)]
pub struct RecordingAlert {
    plays: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
}

impl RecordingAlert {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose every play attempt is counted and then fails.
    pub fn failing() -> Self {
        let alert = Self::default();
        alert.set_failing(true);
        alert
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of play attempts, successful or not.
    pub fn plays(&self) -> usize {
        self.plays.load(Ordering::SeqCst)
    }
}

impl AlertSink for RecordingAlert {
    fn play(&mut self) -> Result<(), AlertError> {
        self.plays.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(AlertError::Playback("audio device unavailable".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_alert_counts_failed_attempts() {
        let mut alert = RecordingAlert::failing();
        let observer = alert.clone();
        assert!(alert.play().is_err());
        observer.set_failing(false);
        assert!(alert.play().is_ok());
        assert_eq!(observer.plays(), 2);
    }

    #[test]
    fn silent_alert_never_fails() {
        assert!(SilentAlert.play().is_ok());
    }
}
