//! FM phase discriminator: recovers the instantaneous frequency of a
//! baseband I/Q stream as the angle of the conjugate product between
//! successive samples.

use num_complex::Complex;
use radio_core::zero_safe;
use std::f64::consts::PI;

/// Detects frequency by phase discrimination between successive samples.
///
/// Output is scaled so that `+-1.0` represents `max_freq_dev` (the full
/// scale frequency deviation, relative to the sample rate).
#[derive(Debug, Clone)]
pub struct PhaseDiscriminator {
    normalize_factor: f64,
    previous: Complex<f64>,
}

impl PhaseDiscriminator {
    pub fn new(max_freq_dev: f64) -> Self {
        Self {
            normalize_factor: max_freq_dev * 2.0 * PI,
            previous: Complex::new(1.0, 0.0),
        }
    }

    pub fn reset(&mut self) {
        self.previous = Complex::new(1.0, 0.0);
    }

    pub fn process(&mut self, input: &[Complex<f32>]) -> Vec<f64> {
        let mut out = Vec::with_capacity(input.len());
        for &raw in input {
            let s = zero_safe(raw);
            let current = Complex::new(s.re as f64, s.im as f64);
            let product = self.previous.conj() * current;
            let angle = product.im.atan2(product.re);
            out.push(angle / self.normalize_factor);
            self.previous = current;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI as PI64;

    #[test]
    fn constant_phase_step_yields_constant_output() {
        let max_dev = 0.1;
        let mut disc = PhaseDiscriminator::new(max_dev);
        let step = max_dev * 2.0 * PI64 * 0.5;
        let samples: Vec<Complex<f32>> = (0..100)
            .map(|i| {
                let phi = step * i as f64;
                Complex::new(phi.cos() as f32, phi.sin() as f32)
            })
            .collect();
        let out = disc.process(&samples);
        for &v in &out[1..] {
            assert_relative_eq!(v, 0.5, epsilon = 1e-6);
        }
    }

    #[test]
    fn zero_magnitude_sample_does_not_produce_nan() {
        let mut disc = PhaseDiscriminator::new(0.2);
        let out = disc.process(&[Complex::new(0.0, 0.0), Complex::new(0.5, 0.5)]);
        assert!(out.iter().all(|v| v.is_finite()));
    }
}
