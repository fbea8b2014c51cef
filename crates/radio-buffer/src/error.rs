//! Pipeline runtime error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("no source configured")]
    NoSource,

    #[error("source error: {0}")]
    Source(String),

    #[error("sink error: {0}")]
    Sink(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
