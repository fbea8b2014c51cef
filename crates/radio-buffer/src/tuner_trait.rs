//! Tuner interface: a source of I/Q sample blocks, whether from a
//! hardware front end or a recorded file.

use radio_core::{IqBlock, RadioResult};

pub trait Tuner: Send {
    /// Fetch the next block of samples into `out`, replacing its
    /// contents. Returns `Ok(false)` once the source is exhausted (end
    /// of file, device disconnected); the caller stops polling and
    /// marks the downstream buffer's end.
    fn get_samples(&mut self, out: &mut IqBlock) -> RadioResult<bool>;

    /// Nominal I/Q sample rate in Hz.
    fn sample_rate(&self) -> f64;
}
