//! radio-buffer: the blocking sample queue and driver loop that glue a
//! [`Tuner`] source, a decode closure, and an [`AudioSink`] together.

mod buffer;
mod driver;
mod error;
mod sink_trait;
mod tuner_trait;

pub use buffer::DataBuffer;
pub use driver::{PipelineDriver, PipelineStats};
pub use error::{PipelineError, PipelineResult};
pub use sink_trait::AudioSink;
pub use tuner_trait::Tuner;
