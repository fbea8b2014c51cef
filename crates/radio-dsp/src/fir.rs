//! Symmetric-tap FIR low-pass filter with integer decimation for I/Q
//! sample blocks.

use num_complex::Complex;
use std::collections::VecDeque;

/// Low-pass filter and integer decimator for complex I/Q samples.
///
/// Exploits the symmetry of a Type-I FIR (`taps[k] == taps[n-1-k]`) to
/// halve the number of multiplications per output sample.
#[derive(Debug, Clone)]
pub struct FirIqDecimator {
    taps: Vec<f64>,
    history: VecDeque<Complex<f64>>,
    decimation: usize,
    phase: usize,
}

impl FirIqDecimator {
    /// `taps` must be a symmetric (Type-I) low-pass design, e.g. from
    /// [`crate::coeffs::lowpass_kaiser`]. `decimation` of 1 disables
    /// downsampling and only applies the filter.
    pub fn new(taps: Vec<f64>, decimation: usize) -> Self {
        assert!(decimation >= 1, "decimation factor must be at least 1");
        assert!(!taps.is_empty(), "need at least one tap");
        let num_taps = taps.len();
        Self {
            taps,
            history: VecDeque::from(vec![Complex::new(0.0, 0.0); num_taps]),
            decimation,
            phase: 0,
        }
    }

    pub fn decimation(&self) -> usize {
        self.decimation
    }

    pub fn reset(&mut self) {
        for s in self.history.iter_mut() {
            *s = Complex::new(0.0, 0.0);
        }
        self.phase = 0;
    }

    pub fn latency(&self) -> usize {
        self.taps.len() / 2
    }

    pub fn process(&mut self, input: &[Complex<f32>]) -> Vec<Complex<f32>> {
        let num_taps = self.taps.len();
        let half = num_taps / 2;
        let mut out = Vec::with_capacity(input.len() / self.decimation + 1);

        for &sample in input {
            self.history.pop_front();
            self.history
                .push_back(Complex::new(sample.re as f64, sample.im as f64));

            if self.phase == 0 {
                let mut acc = Complex::new(0.0, 0.0);
                for k in 0..half {
                    acc += (self.history[k] + self.history[num_taps - 1 - k]) * self.taps[k];
                }
                if num_taps % 2 == 1 {
                    acc += self.history[half] * self.taps[half];
                }
                out.push(Complex::new(acc.re as f32, acc.im as f32));
            }

            self.phase += 1;
            if self.phase == self.decimation {
                self.phase = 0;
            }
        }

        out
    }
}

/// Symmetric-tap FIR low-pass for real-valued audio, no decimation.
/// Used post-resample to cut the stereo pilot and anything above the
/// programme bandwidth before de-emphasis.
#[derive(Debug, Clone)]
pub struct FirAudioFilter {
    taps: Vec<f64>,
    history: VecDeque<f64>,
}

impl FirAudioFilter {
    pub fn new(taps: Vec<f64>) -> Self {
        assert!(!taps.is_empty(), "need at least one tap");
        let num_taps = taps.len();
        Self {
            taps,
            history: VecDeque::from(vec![0.0; num_taps]),
        }
    }

    pub fn reset(&mut self) {
        for s in self.history.iter_mut() {
            *s = 0.0;
        }
    }

    pub fn latency(&self) -> usize {
        self.taps.len() / 2
    }

    pub fn process(&mut self, input: &[f64]) -> Vec<f64> {
        let num_taps = self.taps.len();
        let half = num_taps / 2;
        let mut out = Vec::with_capacity(input.len());

        for &sample in input {
            self.history.pop_front();
            self.history.push_back(sample);

            let mut acc = 0.0;
            for k in 0..half {
                acc += (self.history[k] + self.history[num_taps - 1 - k]) * self.taps[k];
            }
            if num_taps % 2 == 1 {
                acc += self.history[half] * self.taps[half];
            }
            out.push(acc);
        }

        out
    }
}
