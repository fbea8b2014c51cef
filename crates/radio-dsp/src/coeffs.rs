//! Windowed-sinc FIR coefficient design.
//!
//! Coefficients are generated at runtime from a cutoff ratio rather than
//! embedded as literal tables, so front-end filter bandwidth can track
//! the selected modulation mode without a coefficient table per mode.

use std::f64::consts::PI;

/// Modified Bessel function of the first kind, order 0. Series from
/// Abramowitz & Stegun 9.8.1, accurate to better than 1e-12 for the
/// `beta` range used by FIR window design (0 <= beta <= 20).
fn bessel_i0(x: f64) -> f64 {
    let mut term = 1.0;
    let mut sum = 1.0;
    let half_x_sq = (x / 2.0) * (x / 2.0);
    for k in 1..32 {
        term *= half_x_sq / (k as f64 * k as f64);
        sum += term;
        if term < sum * 1e-16 {
            break;
        }
    }
    sum
}

/// Design a symmetric (Type-I, odd-length) low-pass FIR using a Kaiser
/// window. `cutoff_ratio` is the -6dB point relative to the sample rate
/// (0 < cutoff_ratio < 0.5). Coefficients are normalized to unity DC gain.
pub fn lowpass_kaiser(num_taps: usize, cutoff_ratio: f64, beta: f64) -> Vec<f64> {
    assert!(num_taps % 2 == 1, "num_taps must be odd for a symmetric FIR");
    assert!(
        cutoff_ratio > 0.0 && cutoff_ratio < 0.5,
        "cutoff_ratio out of range"
    );

    let m = (num_taps - 1) as f64;
    let i0_beta = bessel_i0(beta);
    let mut taps = vec![0.0; num_taps];

    for (n, tap) in taps.iter_mut().enumerate() {
        let k = n as f64 - m / 2.0;
        let sinc = if k == 0.0 {
            2.0 * cutoff_ratio
        } else {
            (2.0 * PI * cutoff_ratio * k).sin() / (PI * k)
        };
        let x = k / (m / 2.0);
        let window = bessel_i0(beta * (1.0 - x * x).max(0.0).sqrt()) / i0_beta;
        *tap = sinc * window;
    }

    let dc_gain: f64 = taps.iter().sum();
    for tap in taps.iter_mut() {
        *tap /= dc_gain;
    }
    taps
}
