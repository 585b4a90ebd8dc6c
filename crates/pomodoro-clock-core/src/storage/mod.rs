mod config;

pub use config::{AlertConfig, Config, LoggingConfig, TimerConfig};

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/pomodoro-clock[-dev]/` based on POMODORO_CLOCK_ENV.
///
/// Set POMODORO_CLOCK_ENV=dev to use the development directory.
/// POMODORO_CLOCK_HOME replaces `~/.config` as the base directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = match std::env::var_os("POMODORO_CLOCK_HOME") {
        Some(home) => PathBuf::from(home),
        None => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config"),
    };

    let env = std::env::var("POMODORO_CLOCK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("pomodoro-clock-dev")
    } else {
        base_dir.join("pomodoro-clock")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
