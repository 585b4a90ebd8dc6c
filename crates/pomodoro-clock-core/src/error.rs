//! Core error types for pomodoro-clock-core.
//!
//! The countdown itself has no failure domain: rejected adjustments are
//! silent no-ops and alert failures are logged, never propagated. The types
//! here cover the edges that can actually fail: configuration files and the
//! alert asset.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pomodoro-clock-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Alert asset or playback errors
    #[error("Alert error: {0}")]
    Alert(#[from] AlertError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not name a configuration value
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Alert asset and playback errors.
///
/// Never surfaced to the user; the controller logs them and carries on.
#[derive(Error, Debug)]
pub enum AlertError {
    /// The asset request could not be sent or its body could not be read
    #[error("Failed to fetch alert sound from {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The asset server answered with a non-success status
    #[error("Alert sound request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The asset URL is malformed
    #[error("Invalid alert sound URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The external player could not be launched
    #[error("Failed to launch audio player '{program}': {source}")]
    Player {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Playback was forced to fail (test sinks)
    #[error("Alert playback failed: {0}")]
    Playback(String),

    /// Writing to the terminal failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
