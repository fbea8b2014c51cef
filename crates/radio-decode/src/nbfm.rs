//! Narrow-band FM decoder (C12): a leaner cousin of [`crate::fm::FmDecoder`]
//! with no stereo pilot, no multipath stage, and a fixed gain trim instead
//! of an AF AGC.

use crate::stats::{iq_rms_prefix, mean, rms, Ema};
use radio_core::{AudioBlock, IqBlock, PipelineConfig};
use radio_dsp::agc::IfAgc;
use radio_dsp::coeffs::lowpass_kaiser;
use radio_dsp::discriminator::PhaseDiscriminator;
use radio_dsp::fir::{FirAudioFilter, FirIqDecimator};

const FREQ_DEV: f64 = 5_000.0;
const CHANNEL_BANDWIDTH: f64 = 12_500.0;
const AUDIO_BANDWIDTH: f64 = 3_000.0;

/// -3dB trim applied after the audio low-pass, matching the reference
/// receiver's fixed output-level compensation.
const GAIN_TRIM: f64 = 0.707_945_784; // 10^(-3/20)

pub struct NbfmDecoder {
    nbfmfilter: FirIqDecimator,
    ifagc: IfAgc,
    discriminator: PhaseDiscriminator,
    audiofilter: FirAudioFilter,

    if_level: Ema,
    baseband_mean: Ema,
    baseband_level: Ema,
}

impl NbfmDecoder {
    pub fn new(config: &PipelineConfig) -> Self {
        let if_rate = config.if_sample_rate;
        let out_rate = config.output_sample_rate;
        let downsample = ((if_rate / out_rate).round() as usize).max(1);
        let demod_rate = if_rate / downsample as f64;

        let channel_cutoff = (CHANNEL_BANDWIDTH / if_rate).min(0.45);
        let nbfmfilter = FirIqDecimator::new(lowpass_kaiser(81, channel_cutoff, 7.0), downsample);

        let audio_cutoff = (AUDIO_BANDWIDTH / demod_rate).min(0.45);
        let audiofilter = FirAudioFilter::new(lowpass_kaiser(49, audio_cutoff, 6.0));

        Self {
            nbfmfilter,
            ifagc: IfAgc::new(1.0, 100_000.0, 0.0001),
            discriminator: PhaseDiscriminator::new(FREQ_DEV / demod_rate),
            audiofilter,
            if_level: Ema::new(0.05),
            baseband_mean: Ema::new(0.05),
            baseband_level: Ema::new(0.05),
        }
    }

    pub fn tuning_offset_hz(&self) -> f64 {
        self.baseband_mean.get() * FREQ_DEV
    }

    pub fn baseband_level(&self) -> f64 {
        self.baseband_level.get()
    }

    pub fn if_rms(&self) -> f64 {
        self.if_level.get()
    }

    pub fn process(&mut self, samples_in: &IqBlock) -> AudioBlock {
        self.if_level.update(iq_rms_prefix(samples_in));

        let filtered = self.nbfmfilter.process(samples_in);
        if filtered.is_empty() {
            return AudioBlock::new();
        }

        let agc_out = self.ifagc.process(&filtered);
        let baseband = self.discriminator.process(&agc_out);
        if baseband.is_empty() {
            return AudioBlock::new();
        }

        self.baseband_mean.update(mean(&baseband));
        self.baseband_level.update(rms(&baseband));

        let mut audio = self.audiofilter.process(&baseband);
        for sample in audio.iter_mut() {
            *sample *= GAIN_TRIM;
        }
        audio
    }
}
