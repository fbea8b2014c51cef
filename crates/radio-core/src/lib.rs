//! radio-core: shared types used across the FM receiver pipeline.
//!
//! This crate provides the sample types, error types, and pipeline
//! configuration shared by `radio-dsp`, `radio-buffer`, `radio-decode`,
//! `radio-sink`, and `radio-source`.

mod config;
mod error;
mod sample;

pub use config::*;
pub use error::*;
pub use sample::*;
