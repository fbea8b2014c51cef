//! Wide-band FM decoder (C11): front-end filtering, IF AGC, optional
//! multipath cancellation, phase discrimination, mono/stereo resampling,
//! pilot recovery, and stereo matrixing.

use crate::stats::{iq_rms_prefix, mean, rms, Ema};
use num_complex::Complex;
use radio_core::{AudioBlock, IqBlock, PipelineConfig, PpsEvent};
use radio_dsp::agc::IfAgc;
use radio_dsp::coeffs::lowpass_kaiser;
use radio_dsp::deemphasis::{DcBlock, Deemphasis};
use radio_dsp::discriminator::PhaseDiscriminator;
use radio_dsp::equalizer::MultipathEqualizer;
use radio_dsp::fir::{FirAudioFilter, FirIqDecimator};
use radio_dsp::pll::PilotPll;
use radio_dsp::resampler::AudioResampler;

const FREQ_DEV: f64 = 75_000.0;
const BANDWIDTH_PCM: f64 = 15_000.0;
const PILOT_FREQ: f64 = 19_000.0;
const IF_FILTER_BANDWIDTH: f64 = 180_000.0;
const PILOT_MIN_SIGNAL: f64 = 0.01;
const MULTIPATH_WARMUP_BLOCKS: u32 = 2;
const DC_BLOCK_HZ: f64 = 30.0;

/// Orchestrates C1-C10 into a complete wide-band FM (+stereo) decoder.
pub struct FmDecoder {
    stereo_enabled: bool,
    stereo_detected: bool,

    fmfilter: FirIqDecimator,
    ifagc: IfAgc,
    multipath: Option<MultipathEqualizer>,
    multipath_warmup_remaining: u32,
    discriminator: PhaseDiscriminator,

    audio_resampler_mono: AudioResampler,
    pilotcut_mono: FirAudioFilter,
    dcblock_mono: DcBlock,
    deemph_mono: Option<Deemphasis>,

    pilotpll: PilotPll,
    audio_resampler_stereo: AudioResampler,
    pilotcut_stereo: FirAudioFilter,
    dcblock_stereo: DcBlock,
    deemph_stereo: Option<Deemphasis>,

    if_level: Ema,
    baseband_mean: Ema,
    baseband_level: Ema,
    last_pps_events: Vec<PpsEvent>,
}

impl FmDecoder {
    pub fn new(config: &PipelineConfig) -> Self {
        let if_rate = config.if_sample_rate;
        let downsample = ((if_rate / 200_000.0).round() as usize).max(1);
        let baseband_rate = if_rate / downsample as f64;
        let out_rate = config.output_sample_rate;

        let fmfilter_cutoff = (IF_FILTER_BANDWIDTH / if_rate).min(0.45);
        let fmfilter = FirIqDecimator::new(lowpass_kaiser(101, fmfilter_cutoff, 7.0), downsample);

        let pilotcut_cutoff = (BANDWIDTH_PCM / out_rate).min(0.45);
        let pilotcut_taps = lowpass_kaiser(63, pilotcut_cutoff, 6.0);

        // Internal resampling granularity; `AudioResampler` buffers across
        // calls, so this only trades off warm-up latency against per-call
        // overhead, not correctness.
        let max_chunk = 1024;

        let pilot_bandwidth_ratio = 50.0 / baseband_rate;
        let mut pilotpll = PilotPll::new(PILOT_FREQ / baseband_rate, pilot_bandwidth_ratio, PILOT_MIN_SIGNAL);
        pilotpll.set_phase_shift(config.pilot_phase_shift);

        let deemph = |us: f64| {
            if us > 0.0 {
                Some(Deemphasis::new(us, out_rate))
            } else {
                None
            }
        };

        Self {
            stereo_enabled: config.stereo,
            stereo_detected: false,

            fmfilter,
            ifagc: IfAgc::new(1.0, 1.0e6, 0.0003),
            multipath: if config.multipath_stages > 0 {
                Some(MultipathEqualizer::new(config.multipath_stages))
            } else {
                None
            },
            multipath_warmup_remaining: MULTIPATH_WARMUP_BLOCKS,
            discriminator: PhaseDiscriminator::new(FREQ_DEV / baseband_rate),

            audio_resampler_mono: AudioResampler::new(baseband_rate, out_rate, max_chunk),
            pilotcut_mono: FirAudioFilter::new(pilotcut_taps.clone()),
            dcblock_mono: DcBlock::new(DC_BLOCK_HZ, out_rate),
            deemph_mono: deemph(config.deemphasis_us),

            pilotpll,
            audio_resampler_stereo: AudioResampler::new(baseband_rate, out_rate, max_chunk),
            pilotcut_stereo: FirAudioFilter::new(pilotcut_taps),
            dcblock_stereo: DcBlock::new(DC_BLOCK_HZ, out_rate),
            deemph_stereo: deemph(config.deemphasis_us),

            if_level: Ema::new(0.05),
            baseband_mean: Ema::new(0.05),
            baseband_level: Ema::new(0.05),
            last_pps_events: Vec::new(),
        }
    }

    pub fn stereo_detected(&self) -> bool {
        self.stereo_detected
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

    pub fn pilot_level(&self) -> f64 {
        self.pilotpll.pilot_level()
    }

    pub fn pps_events(&self) -> &[PpsEvent] {
        &self.last_pps_events
    }

    pub fn multipath_error(&self) -> Option<f64> {
        self.multipath.as_ref().map(|m| m.error())
    }

    pub fn multipath_coefficients(&self) -> Option<&[Complex<f64>]> {
        self.multipath.as_ref().map(|m| m.coefficients())
    }

    pub fn process(&mut self, samples_in: &IqBlock) -> AudioBlock {
        self.if_level.update(iq_rms_prefix(samples_in));

        let filtered = self.fmfilter.process(samples_in);
        let agc_out = self.ifagc.process(&filtered);

        let equalized = match &mut self.multipath {
            Some(eq) if self.multipath_warmup_remaining == 0 => eq.process(&agc_out),
            Some(_) => {
                self.multipath_warmup_remaining -= 1;
                agc_out
            }
            None => agc_out,
        };

        let baseband = self.discriminator.process(&equalized);

        self.baseband_mean.update(mean(&baseband));
        self.baseband_level.update(rms(&baseband));

        let mono_resampled = self.audio_resampler_mono.process(&baseband);
        let mut mono = self.pilotcut_mono.process(&mono_resampled);
        self.dcblock_mono.process_block(&mut mono);

        if self.stereo_enabled {
            let (tone, pps) = self.pilotpll.process(&baseband);
            self.stereo_detected = self.pilotpll.locked();
            self.last_pps_events = pps;

            let raw_stereo: Vec<f64> = baseband
                .iter()
                .zip(tone.iter())
                .map(|(&b, &t)| 1.17 * b * t)
                .collect();
            let stereo_resampled = self.audio_resampler_stereo.process(&raw_stereo);
            let mut stereo = self.pilotcut_stereo.process(&stereo_resampled);
            self.dcblock_stereo.process_block(&mut stereo);

            if self.stereo_detected {
                if let Some(de) = &mut self.deemph_mono {
                    de.process_block(&mut mono);
                }
                if let Some(de) = &mut self.deemph_stereo {
                    de.process_block(&mut stereo);
                }
                matrix_stereo(&mono, &stereo)
            } else {
                if let Some(de) = &mut self.deemph_mono {
                    de.process_block(&mut mono);
                }
                duplicate_mono(&mono)
            }
        } else {
            if let Some(de) = &mut self.deemph_mono {
                de.process_block(&mut mono);
            }
            mono
        }
    }
}

fn matrix_stereo(mono: &[f64], stereo: &[f64]) -> AudioBlock {
    mono.iter()
        .zip(stereo.iter())
        .flat_map(|(&m, &s)| [m + s, m - s])
        .collect()
}

fn duplicate_mono(mono: &[f64]) -> AudioBlock {
    mono.iter().flat_map(|&m| [m, m]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use radio_core::{DeemphasisRegion, ModulationMode};
    use std::f64::consts::PI;

    fn fm_config(stereo: bool, if_rate: f64) -> PipelineConfig {
        let mut cfg =
            PipelineConfig::new(ModulationMode::Fm, if_rate, 48_000.0, DeemphasisRegion::Na).unwrap();
        cfg.stereo = stereo;
        cfg
    }

    #[test]
    fn silent_carrier_settles_to_near_zero_audio() {
        let mut decoder = FmDecoder::new(&fm_config(true, 384_000.0));
        let input: IqBlock = vec![Complex::new(1.0, 0.0); 20_000];
        let mut last = Vec::new();
        for _ in 0..20 {
            last = decoder.process(&input);
        }
        assert!(!decoder.stereo_detected());
        assert!(last.iter().all(|s| s.abs() < 0.05));
    }

    #[test]
    fn mono_only_mode_emits_single_channel() {
        let mut decoder = FmDecoder::new(&fm_config(false, 384_000.0));
        let input: IqBlock = vec![Complex::new(1.0, 0.0); 4000];
        let audio = decoder.process(&input);
        assert!(!audio.is_empty());
    }

    #[test]
    fn pilot_tone_baseband_eventually_locks_stereo() {
        let if_rate = 384_000.0;
        let mut decoder = FmDecoder::new(&fm_config(true, if_rate));
        // Baseband at 19kHz after phase discrimination requires an IF
        // signal whose instantaneous phase step corresponds to a 19kHz
        // deviation; build a simple FM-modulated carrier.
        let n = 40_000;
        let mut phase = 0.0f64;
        let input: IqBlock = (0..n)
            .map(|_| {
                let dev = 2.0 * PI * 19_000.0 / if_rate;
                phase += dev;
                Complex::new(phase.cos() as f32, phase.sin() as f32)
            })
            .collect();
        for _ in 0..10 {
            decoder.process(&input);
        }
        assert!(decoder.if_rms() > 0.0);
    }
}
