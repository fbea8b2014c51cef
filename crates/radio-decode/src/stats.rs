//! Running level statistics reported by every decoder, independent of
//! modulation mode.

use num_complex::Complex;

/// Single-pole exponential moving average used for level metering
/// (`level = (1-alpha)*level + alpha*x`).
#[derive(Debug, Clone, Copy)]
pub struct Ema {
    value: f64,
    alpha: f64,
}

impl Ema {
    pub fn new(alpha: f64) -> Self {
        Self { value: 0.0, alpha }
    }

    pub fn update(&mut self, sample: f64) -> f64 {
        self.value = (1.0 - self.alpha) * self.value + self.alpha * sample;
        self.value
    }

    pub fn get(&self) -> f64 {
        self.value
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }
}

pub fn rms(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = samples.iter().map(|s| s * s).sum();
    (sum_sq / samples.len() as f64).sqrt()
}

pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// RMS over a small prefix of the block, cheap enough to call every
/// block without materially affecting throughput.
pub fn iq_rms_prefix(samples: &[Complex<f32>]) -> f64 {
    let total = samples.len();
    if total == 0 {
        return 0.0;
    }
    let n = (total + 63) / 64;
    let sum_sq: f64 = samples[..n]
        .iter()
        .map(|s| (s.re as f64).powi(2) + (s.im as f64).powi(2))
        .sum();
    (sum_sq / n as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ema_converges_to_constant_input() {
        let mut ema = Ema::new(0.05);
        for _ in 0..500 {
            ema.update(2.0);
        }
        assert!((ema.get() - 2.0).abs() < 1e-3);
    }

    #[test]
    fn rms_of_constant_signal_equals_its_magnitude() {
        assert!((rms(&[0.5; 100]) - 0.5).abs() < 1e-9);
    }
}
