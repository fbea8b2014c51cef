//! Audio sink interface: a destination for demodulated audio blocks.

use radio_core::{AudioBlock, RadioResult};

pub trait AudioSink: Send {
    /// Write a block of samples (interleaved L/R for stereo).
    fn write(&mut self, samples: &AudioBlock) -> RadioResult<()>;

    /// Flush and finalize the destination. Called once by the driver
    /// after the sink thread observes end-of-stream.
    fn close(&mut self) -> RadioResult<()> {
        Ok(())
    }

    /// Last error observed by a prior `write`/`close` call, if the sink
    /// prefers to report out-of-band rather than fail the call itself.
    fn error(&self) -> Option<&str> {
        None
    }
}
