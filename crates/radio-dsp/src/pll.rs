//! 4th-order type-2 phase-locked loop recovering the 19kHz stereo pilot
//! and generating a phase-locked 38kHz subcarrier tone.

use crate::biquad::{Biquad, BiquadCoeffs};
use radio_core::PpsEvent;
use std::f64::consts::PI;

const PILOT_FREQUENCY: u64 = 19_000;

/// Two conjugate real poles approximating a 30Hz-bandwidth low-pass,
/// applied independently to the in-phase and quadrature phase-detector
/// products.
fn phasor_lowpass_coeffs(bandwidth_ratio: f64) -> BiquadCoeffs {
    let p1 = (-1.146 * 2.0 * PI * bandwidth_ratio).exp();
    let p2 = (-5.331 * 2.0 * PI * bandwidth_ratio).exp();
    let a1 = -(p1 + p2);
    let a2 = p1 * p2;
    let b0 = (1.0 - p1) * (1.0 - p2);
    BiquadCoeffs::raw(b0, 0.0, 0.0, a1, a2)
}

/// Single-zero loop filter: `gain * (x[n] - q * x[n-1])`.
fn loop_filter_coeffs(bandwidth_ratio: f64) -> BiquadCoeffs {
    let q = (-0.1153 * 2.0 * PI * bandwidth_ratio).exp();
    let gain = 0.62 * 2.0 * PI * bandwidth_ratio;
    BiquadCoeffs::raw(gain, -gain * q, 0.0, 0.0, 0.0)
}

/// Recovers the stereo pilot and emits a phase-locked double-frequency
/// tone plus PPS (pulse-per-second) markers while locked.
pub struct PilotPll {
    min_freq: f64,
    max_freq: f64,
    freq: f64,
    phase: f64,
    pilot_level: f64,
    lock_delay: u64,
    lock_count: u64,
    pilot_periods: u64,
    pps_count: u64,
    sample_count: u64,
    phasor_i: Biquad,
    phasor_q: Biquad,
    phase_err_filter: Biquad,
    freq_err: f64,
    min_signal: f64,
    phase_shift: bool,
}

impl PilotPll {
    /// `freq_ratio` and `bandwidth_ratio` are relative to the IF sample
    /// rate (0.5 = Nyquist). `min_signal` is the minimum detected pilot
    /// amplitude (after doubling) required to declare lock.
    pub fn new(freq_ratio: f64, bandwidth_ratio: f64, min_signal: f64) -> Self {
        Self {
            min_freq: (freq_ratio - bandwidth_ratio) * 2.0 * PI,
            max_freq: (freq_ratio + bandwidth_ratio) * 2.0 * PI,
            freq: freq_ratio * 2.0 * PI,
            phase: 0.0,
            pilot_level: 0.0,
            lock_delay: (20.0 / bandwidth_ratio) as u64,
            lock_count: 0,
            pilot_periods: 0,
            pps_count: 0,
            sample_count: 0,
            phasor_i: Biquad::new(phasor_lowpass_coeffs(bandwidth_ratio)),
            phasor_q: Biquad::new(phasor_lowpass_coeffs(bandwidth_ratio)),
            phase_err_filter: Biquad::new(loop_filter_coeffs(bandwidth_ratio)),
            freq_err: 0.0,
            min_signal,
            phase_shift: false,
        }
    }

    pub fn set_phase_shift(&mut self, shift: bool) {
        self.phase_shift = shift;
    }

    pub fn locked(&self) -> bool {
        self.lock_count >= self.lock_delay
    }

    pub fn pilot_level(&self) -> f64 {
        2.0 * self.pilot_level
    }

    pub fn freq_error(&self) -> f64 {
        self.freq_err
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
        self.pilot_level = 0.0;
        self.lock_count = 0;
        self.pilot_periods = 0;
        self.pps_count = 0;
        self.sample_count = 0;
        self.phasor_i.reset();
        self.phasor_q.reset();
        self.phase_err_filter.reset();
        self.freq_err = 0.0;
    }

    /// Process a block of baseband (post-discriminator) samples,
    /// returning the locked double-frequency tone and any PPS events
    /// that occurred within the block.
    pub fn process(&mut self, input: &[f64]) -> (Vec<f64>, Vec<PpsEvent>) {
        let n = input.len();
        let mut out = Vec::with_capacity(n);
        let mut pps_events = Vec::new();
        if n == 0 {
            return (out, pps_events);
        }

        let was_locked = self.locked();
        self.pilot_level = 1000.0;

        for (i, &x) in input.iter().enumerate() {
            let psin = self.phase.sin();
            let pcos = self.phase.cos();

            let tone = if self.phase_shift {
                2.0 * pcos * pcos - 1.0
            } else {
                2.0 * psin * pcos
            };
            out.push(tone);

            let phasor_i = psin * x;
            let phasor_q = pcos * x;
            let new_i = self.phasor_i.process_sample(phasor_i);
            let new_q = self.phasor_q.process_sample(phasor_q);

            // Within 45 degrees of lock, Q_lp/I_lp approximates the phase
            // error; otherwise clamp to the nearer rail.
            let phase_err = if new_i > new_q.abs() {
                new_q / new_i
            } else if new_q >= 0.0 {
                1.0
            } else {
                -1.0
            };

            self.pilot_level = self.pilot_level.min(new_i);

            let new_phase_err = self.phase_err_filter.process_sample(phase_err);
            self.freq_err = new_phase_err;
            self.freq = (self.freq + self.freq_err).clamp(self.min_freq, self.max_freq);

            self.phase += self.freq;
            if self.phase > 2.0 * PI {
                self.phase -= 2.0 * PI;
                self.pilot_periods += 1;
                if self.pilot_periods == PILOT_FREQUENCY {
                    self.pilot_periods = 0;
                    if was_locked {
                        pps_events.push(PpsEvent {
                            pps_index: self.pps_count,
                            sample_index: self.sample_count + i as u64,
                            block_position: i as f64 / n as f64,
                        });
                        self.pps_count += 1;
                    }
                }
            }
        }

        if 2.0 * self.pilot_level > self.min_signal {
            if self.lock_count < self.lock_delay {
                self.lock_count += n as u64;
            }
        } else {
            self.lock_count = 0;
        }

        if self.lock_count < self.lock_delay {
            self.pilot_periods = 0;
            self.pps_count = 0;
            pps_events.clear();
        }

        self.sample_count += n as u64;
        (out, pps_events)
    }
}
