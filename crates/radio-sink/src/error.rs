//! Sink error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("wav error: {0}")]
    Wav(String),
}

pub type SinkResult<T> = Result<T, SinkError>;

impl From<hound::Error> for SinkError {
    fn from(err: hound::Error) -> Self {
        SinkError::Wav(err.to_string())
    }
}
