//! Fine tuner: shifts the frequency of an I/Q signal by a fixed offset using
//! a precomputed complex-exponential table.

use num_complex::Complex;
use std::f64::consts::PI;

/// Mixes the input signal against a phase-continuous complex exponential.
///
/// `freq_shift` is expressed in table steps: the applied shift is
/// `sample_rate * freq_shift / table_size`. Re-tuning via
/// [`Self::set_freq_shift`] preserves phase continuity across the
/// retune point by reading back the phase at the current table index
/// before rebuilding the table.
#[derive(Debug, Clone)]
pub struct FineTuner {
    table: Vec<Complex<f64>>,
    phase_table: Vec<f64>,
    index: usize,
}

impl FineTuner {
    pub fn new(table_size: usize, freq_shift: i64) -> Self {
        assert!(table_size > 0, "table_size must be positive");
        let mut tuner = Self {
            table: vec![Complex::new(1.0, 0.0); table_size],
            phase_table: vec![0.0; table_size],
            index: 0,
        };
        tuner.set_freq_shift(freq_shift);
        tuner
    }

    /// Rebuild the table for a new frequency shift, keeping the phase at
    /// the current table index continuous.
    pub fn set_freq_shift(&mut self, freq_shift: i64) {
        let phase_offset = self.phase_table[self.index].rem_euclid(2.0 * PI);
        self.index = 0;

        let table_size = self.table.len();
        let phase_step = 2.0 * PI / table_size as f64;
        for i in 0..table_size {
            let step = (freq_shift * i as i64).rem_euclid(table_size as i64) as f64;
            let phi = step * phase_step + phase_offset;
            self.table[i] = Complex::new(phi.cos(), phi.sin());
            self.phase_table[i] = phi;
        }
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    pub fn process(&mut self, input: &[Complex<f32>]) -> Vec<Complex<f32>> {
        let table_size = self.table.len();
        let mut idx = self.index;
        let out = input
            .iter()
            .map(|&s| {
                let mixed =
                    Complex::new(s.re as f64, s.im as f64) * self.table[idx];
                idx += 1;
                if idx == table_size {
                    idx = 0;
                }
                Complex::new(mixed.re as f32, mixed.im as f32)
            })
            .collect();
        self.index = idx;
        out
    }
}
