//! AM/DSB/SSB/CW/WSPR decoder (C13): amplitude and synchronous-detection
//! modes sharing one IF-filter/AGC/DC-block/AF-AGC/de-emphasis skeleton,
//! differing only in front-end filter choice, fine-tune brackets, and
//! detector (magnitude vs. real part).

use crate::stats::{iq_rms_prefix, mean, rms, Ema};
use num_complex::Complex;
use radio_core::{AudioBlock, IqBlock, ModulationMode, PipelineConfig};
use radio_dsp::agc::{AfAgc, IfAgc};
use radio_dsp::coeffs::lowpass_kaiser;
use radio_dsp::deemphasis::{DcBlock, Deemphasis};
use radio_dsp::fir::FirIqDecimator;
use radio_dsp::tuner::FineTuner;

const BANDWIDTH_PCM: f64 = 4_500.0;
const DEEMPHASIS_TIME_US: f64 = 100.0;
const DC_BLOCK_HZ: f64 = 60.0;
const AM_BANDWIDTH: f64 = 9_000.0;
const SSB_BANDWIDTH: f64 = 1_500.0;
const CW_BANDWIDTH: f64 = 500.0;
const SSB_SHIFT_HZ: f64 = 1_500.0;
const CW_SHIFT_HZ: f64 = 500.0;
const FINETUNER_STEP_HZ: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmMode {
    Am,
    Dsb,
    Usb,
    Lsb,
    Cw,
    Wspr,
}

impl AmMode {
    pub fn from_modulation(mode: ModulationMode) -> Option<Self> {
        Some(match mode {
            ModulationMode::Am => Self::Am,
            ModulationMode::Dsb => Self::Dsb,
            ModulationMode::Usb => Self::Usb,
            ModulationMode::Lsb => Self::Lsb,
            ModulationMode::Cw => Self::Cw,
            ModulationMode::Wspr => Self::Wspr,
            _ => return None,
        })
    }

    fn is_cw_or_wspr(self) -> bool {
        matches!(self, Self::Cw | Self::Wspr)
    }

    fn is_peak_limited(self) -> bool {
        matches!(self, Self::Usb | Self::Lsb | Self::Cw | Self::Wspr)
    }
}

pub struct AmDecoder {
    mode: AmMode,

    amfilter: FirIqDecimator,
    cwfilter: FirIqDecimator,
    ssbfilter: FirIqDecimator,
    cw_finetuner: FineTuner,
    ssb_up_finetuner: FineTuner,
    ssb_down_finetuner: FineTuner,

    ifagc: IfAgc,
    dcblock: DcBlock,
    afagc: AfAgc,
    deemph: Deemphasis,

    if_level: Ema,
    baseband_mean: Ema,
    baseband_level: Ema,
}

impl AmDecoder {
    pub fn new(config: &PipelineConfig, mode: AmMode) -> Self {
        let if_rate = config.if_sample_rate;

        // The AM/SSB/CW/WSPR path has no resampling stage (unlike FM):
        // the decoder emits audio at the IF rate, so every downstream
        // time constant below is derived from `if_rate`, not
        // `config.output_sample_rate`.
        let am_cutoff = (AM_BANDWIDTH / if_rate).min(0.45);
        let cw_cutoff = (CW_BANDWIDTH / if_rate).min(0.45);
        let ssb_cutoff = (SSB_BANDWIDTH / if_rate).min(0.45);

        let table_size = (if_rate / FINETUNER_STEP_HZ).round().max(1.0) as usize;
        let step = |hz: f64| (hz / FINETUNER_STEP_HZ).round() as i64;

        let (af_reference, af_rate) = if mode.is_peak_limited() {
            (0.24, if mode.is_cw_or_wspr() { 0.00125 } else { 0.001 })
        } else {
            (0.6, 0.001)
        };
        let if_rate_const = if mode.is_cw_or_wspr() { 0.0006 } else { 0.0003 };

        Self {
            mode,
            amfilter: FirIqDecimator::new(lowpass_kaiser(81, am_cutoff, 7.0), 1),
            cwfilter: FirIqDecimator::new(lowpass_kaiser(161, cw_cutoff, 8.0), 1),
            ssbfilter: FirIqDecimator::new(lowpass_kaiser(101, ssb_cutoff, 7.0), 1),
            cw_finetuner: FineTuner::new(table_size, step(CW_SHIFT_HZ)),
            ssb_up_finetuner: FineTuner::new(table_size, step(SSB_SHIFT_HZ)),
            ssb_down_finetuner: FineTuner::new(table_size, step(-SSB_SHIFT_HZ)),

            ifagc: IfAgc::new(1.0, 1_000_000.0, if_rate_const),
            dcblock: DcBlock::new(DC_BLOCK_HZ, if_rate),
            afagc: AfAgc::new(1.0, 1.5, af_reference, af_rate),
            deemph: Deemphasis::new(DEEMPHASIS_TIME_US, if_rate),

            if_level: Ema::new(0.05),
            baseband_mean: Ema::new(0.05),
            baseband_level: Ema::new(0.05),
        }
    }

    pub fn baseband_level(&self) -> f64 {
        self.baseband_level.get()
    }

    pub fn if_rms(&self) -> f64 {
        self.if_level.get()
    }

    pub fn af_agc_gain(&self) -> f64 {
        self.afagc.current_gain()
    }

    pub fn if_agc_gain(&self) -> f32 {
        self.ifagc.current_gain()
    }

    fn front_end(&mut self, samples_in: &IqBlock) -> Vec<Complex<f32>> {
        match self.mode {
            AmMode::Am | AmMode::Dsb => self.amfilter.process(samples_in),
            AmMode::Usb => {
                let shifted = self.ssb_down_finetuner.process(samples_in);
                let filtered = self.ssbfilter.process(&shifted);
                self.ssb_up_finetuner.process(&filtered)
            }
            AmMode::Lsb => {
                let shifted = self.ssb_up_finetuner.process(samples_in);
                let filtered = self.ssbfilter.process(&shifted);
                self.ssb_down_finetuner.process(&filtered)
            }
            AmMode::Cw => {
                let filtered = self.cwfilter.process(samples_in);
                self.cw_finetuner.process(&filtered)
            }
            AmMode::Wspr => {
                let shifted = self.ssb_down_finetuner.process(samples_in);
                let filtered = self.cwfilter.process(&shifted);
                self.ssb_up_finetuner.process(&filtered)
            }
        }
    }

    fn detect(&self, samples: &[Complex<f32>]) -> Vec<f64> {
        match self.mode {
            AmMode::Am => samples.iter().map(|s| s.norm() as f64).collect(),
            _ => samples.iter().map(|s| s.re as f64).collect(),
        }
    }

    pub fn process(&mut self, samples_in: &IqBlock) -> AudioBlock {
        let filtered = self.front_end(samples_in);
        if filtered.is_empty() {
            return AudioBlock::new();
        }

        self.if_level.update(iq_rms_prefix(&filtered));

        let agc_out = self.ifagc.process(&filtered);
        let mut baseband = self.detect(&agc_out);
        if baseband.is_empty() {
            return AudioBlock::new();
        }

        self.dcblock.process_block(&mut baseband);

        self.baseband_mean.update(mean(&baseband));
        self.baseband_level.update(rms(&baseband));

        self.afagc.process(&mut baseband);
        self.deemph.process_block(&mut baseband);
        baseband
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use radio_core::DeemphasisRegion;

    fn am_config(mode: ModulationMode) -> PipelineConfig {
        PipelineConfig::new(mode, 48_000.0, 12_000.0, DeemphasisRegion::Na).unwrap()
    }

    #[test]
    fn am_magnitude_detector_recovers_positive_envelope() {
        let config = am_config(ModulationMode::Am);
        let mut decoder = AmDecoder::new(&config, AmMode::Am);
        let input: IqBlock = vec![Complex::new(1.0, 0.0); 4000];
        let audio = decoder.process(&input);
        assert!(audio.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn usb_brackets_shift_without_panicking() {
        let config = am_config(ModulationMode::Usb);
        let mut decoder = AmDecoder::new(&config, AmMode::Usb);
        let input: IqBlock = vec![Complex::new(0.3, 0.1); 4000];
        let audio = decoder.process(&input);
        assert!(audio.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn cw_shifts_to_audible_pitch_without_panicking() {
        let config = am_config(ModulationMode::Cw);
        let mut decoder = AmDecoder::new(&config, AmMode::Cw);
        let input: IqBlock = vec![Complex::new(0.2, 0.2); 4000];
        let audio = decoder.process(&input);
        assert!(audio.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn mode_from_modulation_rejects_fm_family() {
        assert!(AmMode::from_modulation(ModulationMode::Fm).is_none());
        assert!(AmMode::from_modulation(ModulationMode::Wspr).is_some());
    }
}
