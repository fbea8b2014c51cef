//! Mode dispatch: builds the right decoder for a [`PipelineConfig`] and
//! exposes one `process` entry point regardless of which one was picked.

use crate::am::{AmDecoder, AmMode};
use crate::fm::FmDecoder;
use crate::nbfm::NbfmDecoder;
use radio_core::{AudioBlock, IqBlock, ModulationMode, PipelineConfig, PpsEvent};

pub enum Decoder {
    Fm(FmDecoder),
    Nbfm(NbfmDecoder),
    Am(AmDecoder),
}

impl Decoder {
    pub fn new(config: &PipelineConfig) -> Self {
        match config.mode {
            ModulationMode::Fm => Self::Fm(FmDecoder::new(config)),
            ModulationMode::Nbfm => Self::Nbfm(NbfmDecoder::new(config)),
            mode => {
                let am_mode = AmMode::from_modulation(mode)
                    .expect("ModulationMode exhaustively covers Fm, Nbfm, and the AM family");
                Self::Am(AmDecoder::new(config, am_mode))
            }
        }
    }

    pub fn process(&mut self, samples_in: &IqBlock) -> AudioBlock {
        match self {
            Self::Fm(d) => d.process(samples_in),
            Self::Nbfm(d) => d.process(samples_in),
            Self::Am(d) => d.process(samples_in),
        }
    }

    pub fn baseband_level(&self) -> f64 {
        match self {
            Self::Fm(d) => d.baseband_level(),
            Self::Nbfm(d) => d.baseband_level(),
            Self::Am(d) => d.baseband_level(),
        }
    }

    pub fn if_rms(&self) -> f64 {
        match self {
            Self::Fm(d) => d.if_rms(),
            Self::Nbfm(d) => d.if_rms(),
            Self::Am(d) => d.if_rms(),
        }
    }

    /// PPS events observed during the most recent `process` call. Always
    /// empty outside wide-band FM, which is the only mode with a pilot PLL.
    pub fn pps_events(&self) -> &[PpsEvent] {
        match self {
            Self::Fm(d) => d.pps_events(),
            Self::Nbfm(_) | Self::Am(_) => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex;
    use radio_core::DeemphasisRegion;

    #[test]
    fn dispatches_to_fm_for_fm_mode() {
        let config =
            PipelineConfig::new(ModulationMode::Fm, 384_000.0, 48_000.0, DeemphasisRegion::Na)
                .unwrap();
        let mut decoder = Decoder::new(&config);
        let input: IqBlock = vec![Complex::new(1.0, 0.0); 2000];
        let audio = decoder.process(&input);
        assert!(audio.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn dispatches_to_am_family_for_usb_mode() {
        let config =
            PipelineConfig::new(ModulationMode::Usb, 48_000.0, 12_000.0, DeemphasisRegion::Na)
                .unwrap();
        let mut decoder = Decoder::new(&config);
        let input: IqBlock = vec![Complex::new(0.3, 0.1); 2000];
        let audio = decoder.process(&input);
        assert!(audio.iter().all(|s| s.is_finite()));
    }
}
