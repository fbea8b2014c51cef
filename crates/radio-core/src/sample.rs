//! Sample types shared by every stage of the pipeline.

use num_complex::Complex;

/// One I/Q sample: a complex pair of 32-bit floats, |value| nominally <= 1
/// after AGC.
pub type IqSample = Complex<f32>;

/// One audio sample: a 64-bit float, nominal range +/-1.
pub type AudioSample = f64;

/// An ordered sequence of I/Q samples. Intra-block ordering is strict;
/// every stateful component carries state from the end of one block into
/// the start of the next.
pub type IqBlock = Vec<IqSample>;

/// An ordered sequence of audio samples. For stereo output this is
/// interleaved L, R, L, R, ...
pub type AudioBlock = Vec<AudioSample>;

/// A PPS (pulse-per-second) marker emitted by the pilot PLL once every
/// 19 000 pilot cycles while locked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PpsEvent {
    /// Monotonically increasing index of this PPS event since lock was
    /// (re)acquired.
    pub pps_index: u64,
    /// Absolute sample index, counted from pipeline start, at which the
    /// event occurred.
    pub sample_index: u64,
    /// Fractional position of the event within the block that produced
    /// it, in [0, 1).
    pub block_position: f64,
}

/// Replace a zero-magnitude I/Q sample with a tiny non-zero one so that
/// `arg()` stays defined. Safe because upstream AGC suppresses true zeros.
#[inline]
pub fn zero_safe(s: IqSample) -> IqSample {
    if s.norm_sqr() == 0.0 {
        IqSample::new(1.0e-10, 0.0)
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_safe_replaces_only_zero() {
        let z = zero_safe(IqSample::new(0.0, 0.0));
        assert!(z.norm_sqr() > 0.0);
        let s = IqSample::new(0.3, 0.4);
        assert_eq!(zero_safe(s), s);
    }
}
