//! Error types for Wild West Slots

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum WwError {
    /// Start requested while a spin is still in progress
    #[error("A spin is already running")]
    AlreadyRunning,

    #[error("Asset missing: {0}")]
    AssetMissing(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Audio subsystem unavailable")]
    AudioUnavailable,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias
pub type WwResult<T> = Result<T, WwError>;
