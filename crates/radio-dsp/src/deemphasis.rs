//! De-emphasis (playback RC low-pass) and DC-blocking high-pass, the two
//! post-detection audio filters every decoder runs.

use crate::biquad::{Biquad, BiquadCoeffs};

/// First-order de-emphasis IIR with time constant `tau = time_constant_us
/// * 1e-6` seconds: `a1 = -exp(-1/(tau*Fs))`, `b0 = 1 + a1`.
#[derive(Debug, Clone)]
pub struct Deemphasis {
    b0: f64,
    a1: f64,
    y1: f64,
}

impl Deemphasis {
    pub fn new(time_constant_us: f64, sample_rate: f64) -> Self {
        let tau = time_constant_us * 1.0e-6;
        let a1 = -(-1.0 / (tau * sample_rate)).exp();
        Self {
            b0: 1.0 + a1,
            a1,
            y1: 0.0,
        }
    }

    pub fn reset(&mut self) {
        self.y1 = 0.0;
    }

    #[inline]
    pub fn process_sample(&mut self, input: f64) -> f64 {
        let output = self.b0 * input - self.a1 * self.y1;
        self.y1 = output;
        output
    }

    pub fn process_block(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.process_sample(*sample);
        }
    }
}

/// 2nd-order Butterworth high-pass used to remove DC and sub-audio
/// offset after demodulation. 30Hz for the FM family, 60Hz for
/// AM/SSB/CW/WSPR (matching the narrower post-detection bandwidth of
/// those modes).
#[derive(Debug, Clone)]
pub struct DcBlock {
    filter: Biquad,
}

impl DcBlock {
    pub fn new(cutoff_hz: f64, sample_rate: f64) -> Self {
        Self {
            filter: Biquad::new(BiquadCoeffs::butterworth_highpass(cutoff_hz, sample_rate)),
        }
    }

    pub fn reset(&mut self) {
        self.filter.reset();
    }

    #[inline]
    pub fn process_sample(&mut self, input: f64) -> f64 {
        self.filter.process_sample(input)
    }

    pub fn process_block(&mut self, buffer: &mut [f64]) {
        self.filter.process_block(buffer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deemphasis_smooths_a_step() {
        let mut filter = Deemphasis::new(75.0, 48_000.0);
        let mut last = 0.0;
        for _ in 0..10_000 {
            last = filter.process_sample(1.0);
        }
        assert!((last - 1.0).abs() < 1e-6);
    }

    #[test]
    fn dc_block_removes_offset() {
        let mut filter = DcBlock::new(30.0, 48_000.0);
        let mut last = 0.0;
        for _ in 0..20_000 {
            last = filter.process_sample(0.5);
        }
        assert!(last.abs() < 0.01);
    }
}
