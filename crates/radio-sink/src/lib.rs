//! radio-sink: output destinations for demodulated audio and PPS events.
//!
//! Four sinks, one audio trait shape:
//! - [`WavSink`] — interleaved `f32` PCM via `hound`
//! - [`RawSink`] — interleaved `i16` PCM (s16le), no container
//! - [`FloatSink`] — interleaved `f32` PCM, no container
//! - [`PpsSink`] — line-oriented PPS event log

mod error;
mod float_sink;
mod pps_sink;
mod raw_sink;
mod wav_sink;

pub use error::{SinkError, SinkResult};
pub use float_sink::FloatSink;
pub use pps_sink::{PpsFileSink, PpsSink};
pub use raw_sink::RawSink;
pub use wav_sink::WavSink;
