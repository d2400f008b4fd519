//! Tracking error types

use thiserror::Error;

/// Errors that can occur while configuring or driving trackers
#[derive(Error, Debug)]
pub enum TrackingError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Session already running")]
    AlreadyRunning,

    #[error("Session not running")]
    NotRunning,

    #[error("Pointer source error: {0}")]
    Source(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for tracking operations
pub type TrackingResult<T> = Result<T, TrackingError>;
