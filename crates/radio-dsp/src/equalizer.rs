//! Complex-coefficient adaptive FIR equalizer for FM multipath
//! cancellation, updated by a constant-modulus LMS (CMA) rule.
//!
//! Reference: J. Treichler and B. Agee, "A new approach to multipath
//! correction of constant modulus signals," IEEE TASSP 31(2), 1983.

use num_complex::Complex;
use std::collections::VecDeque;

/// `L = 4*stages + 1` taps, with the unity-gain reference tap fixed at
/// position `3*stages`.
#[derive(Debug, Clone)]
pub struct MultipathEqualizer {
    reference_index: usize,
    taps: Vec<Complex<f64>>,
    state: VecDeque<Complex<f64>>,
    reference_level: f64,
    error: f64,
    sample_count: u64,
}

impl MultipathEqualizer {
    pub fn new(stages: usize) -> Self {
        assert!(stages > 0, "multipath equalizer needs at least one stage");
        let num_taps = stages * 4 + 1;
        let reference_index = stages * 3;
        let mut taps = vec![Complex::new(0.0, 0.0); num_taps];
        taps[reference_index] = Complex::new(1.0, 0.0);
        Self {
            reference_index,
            taps,
            state: VecDeque::from(vec![Complex::new(0.0, 0.0); num_taps]),
            reference_level: 1.0,
            error: 0.0,
            sample_count: 0,
        }
    }

    pub fn error(&self) -> f64 {
        self.error
    }

    pub fn coefficients(&self) -> &[Complex<f64>] {
        &self.taps
    }

    pub fn reference_level(&self) -> f64 {
        self.taps[self.reference_index].re
    }

    pub fn reset(&mut self) {
        let num_taps = self.taps.len();
        self.taps.iter_mut().for_each(|c| *c = Complex::new(0.0, 0.0));
        self.taps[self.reference_index] = Complex::new(1.0, 0.0);
        self.state = VecDeque::from(vec![Complex::new(0.0, 0.0); num_taps]);
        self.error = 0.0;
        self.sample_count = 0;
    }

    fn single(&mut self, input: Complex<f64>) -> Complex<f64> {
        self.state.pop_front();
        self.state.push_back(input);

        let mut output = Complex::new(0.0, 0.0);
        for (tap, sample) in self.taps.iter().zip(self.state.iter()) {
            output += tap * sample;
        }
        output
    }

    fn update(&mut self, output: Complex<f64>) {
        let num_taps = self.taps.len();
        let alpha = 0.002 / num_taps as f64;
        let envelope = output.norm_sqr();
        let error = self.reference_level - envelope;
        let factor = Complex::new(alpha * error, 0.0) * output;

        for (tap, sample) in self.taps.iter_mut().zip(self.state.iter()) {
            *tap += factor * sample.conj();
        }
        self.taps[self.reference_index].im = 0.0;
        self.error = error;
    }

    /// Process a block of I/Q samples; coefficients are updated once
    /// every 4th sample to amortize the adaptation cost without
    /// changing the convergence behaviour.
    pub fn process(&mut self, input: &[Complex<f32>]) -> Vec<Complex<f32>> {
        let mut out = Vec::with_capacity(input.len());
        for &sample in input {
            let x = Complex::new(sample.re as f64, sample.im as f64);
            let y = self.single(x);
            out.push(Complex::new(y.re as f32, y.im as f32));
            if self.sample_count & 0x3 == 0 {
                self.update(y);
            }
            self.sample_count += 1;
        }
        out
    }
}
