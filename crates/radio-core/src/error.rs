//! Error types for the FM radio pipeline.

use thiserror::Error;

/// Configuration and pipeline construction errors.
#[derive(Error, Debug)]
pub enum RadioError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("unknown config key: {0}")]
    UnknownKey(String),

    #[error("invalid sample rate: {0}")]
    InvalidSampleRate(f64),

    #[error("invalid frequency: {0}")]
    InvalidFrequency(f64),

    #[error("device error: {0}")]
    Device(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for configuration/device-level fallible operations.
pub type RadioResult<T> = Result<T, RadioError>;
