//! Automatic gain control using the Tisserand-Berviller algorithm.
//!
//! Reference: Etienne Tisserand, Yves Berviller, "Design and implementation
//! of a new digital automatic gain control", Electronics Letters, IET,
//! 2016, 52(22), pp. 1847-1849.

use num_complex::Complex;

/// IF-stage AGC operating on complex I/Q samples, target level 1.0.
#[derive(Debug, Clone)]
pub struct IfAgc {
    initial_gain: f32,
    current_gain: f32,
    max_gain: f32,
    rate: f32,
}

impl IfAgc {
    pub fn new(initial_gain: f32, max_gain: f32, rate: f32) -> Self {
        Self {
            initial_gain,
            current_gain: initial_gain,
            max_gain,
            rate,
        }
    }

    pub fn reset_gain(&mut self) {
        self.current_gain = self.initial_gain;
    }

    pub fn current_gain(&self) -> f32 {
        self.current_gain
    }

    pub fn process(&mut self, input: &[Complex<f32>]) -> Vec<Complex<f32>> {
        input
            .iter()
            .map(|&x| {
                let y = x * self.current_gain;
                let z = 1.0 + self.rate * (1.0 - y.norm_sqr());
                self.current_gain *= z;
                if !self.current_gain.is_finite() {
                    self.reset_gain();
                } else if self.current_gain > self.max_gain {
                    self.current_gain = self.max_gain;
                }
                y
            })
            .collect()
    }
}

/// AF-stage AGC operating on real-valued audio samples, with a
/// configurable target reference level.
#[derive(Debug, Clone)]
pub struct AfAgc {
    initial_gain: f64,
    current_gain: f64,
    max_gain: f64,
    reference: f64,
    rate: f64,
}

impl AfAgc {
    pub fn new(initial_gain: f64, max_gain: f64, reference: f64, rate: f64) -> Self {
        Self {
            initial_gain,
            current_gain: initial_gain,
            max_gain,
            reference,
            rate,
        }
    }

    pub fn reset_gain(&mut self) {
        self.current_gain = self.initial_gain;
    }

    pub fn current_gain(&self) -> f64 {
        self.current_gain
    }

    pub fn process(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            let y = *sample * self.current_gain;
            *sample = y * self.reference;
            let z = 1.0 + self.rate * (1.0 - y * y);
            self.current_gain *= z;
            if !self.current_gain.is_finite() {
                self.reset_gain();
            } else if self.current_gain > self.max_gain {
                self.current_gain = self.max_gain;
            }
        }
    }
}
