//! Pipeline configuration: the set of decisions frozen at startup.

use crate::error::{RadioError, RadioResult};

/// Modulation format selected for the lifetime of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModulationMode {
    Fm,
    Nbfm,
    Am,
    Dsb,
    Usb,
    Lsb,
    Cw,
    Wspr,
}

impl ModulationMode {
    pub fn from_str(s: &str) -> RadioResult<Self> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "fm" => Self::Fm,
            "nbfm" => Self::Nbfm,
            "am" => Self::Am,
            "dsb" => Self::Dsb,
            "usb" => Self::Usb,
            "lsb" => Self::Lsb,
            "cw" => Self::Cw,
            "wspr" => Self::Wspr,
            other => return Err(RadioError::Config(format!("unknown mode: {other}"))),
        })
    }

    /// True for the wide-band/narrow-band FM family (phase-discriminator
    /// demodulation), false for the AM/SSB/CW/WSPR family (envelope or
    /// synchronous demodulation).
    pub fn is_fm_family(self) -> bool {
        matches!(self, Self::Fm | Self::Nbfm)
    }
}

/// De-emphasis time constant region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeemphasisRegion {
    /// 50 microseconds (Europe/Japan).
    Eu,
    /// 75 microseconds (North America).
    Na,
}

impl DeemphasisRegion {
    pub fn time_constant_us(self) -> f64 {
        match self {
            Self::Eu => 50.0,
            Self::Na => 75.0,
        }
    }
}

/// Decisions frozen at pipeline construction time; immutable afterwards
/// and shared (typically via `Arc`) by every thread in the driver.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub mode: ModulationMode,
    pub if_sample_rate: f64,
    pub output_sample_rate: f64,
    pub stereo: bool,
    /// De-emphasis time constant in microseconds; 0 disables de-emphasis.
    pub deemphasis_us: f64,
    /// Number of multipath-equalizer stages; 0 disables the equalizer.
    pub multipath_stages: usize,
    /// Emit `cos(2*phi)` instead of `sin(2*phi)` from the pilot PLL, for
    /// multipath detection experiments.
    pub pilot_phase_shift: bool,
}

impl PipelineConfig {
    pub fn new(
        mode: ModulationMode,
        if_sample_rate: f64,
        output_sample_rate: f64,
        deemphasis_region: DeemphasisRegion,
    ) -> RadioResult<Self> {
        if !(if_sample_rate > 0.0 && if_sample_rate.is_finite()) {
            return Err(RadioError::InvalidSampleRate(if_sample_rate));
        }
        if !(output_sample_rate > 0.0 && output_sample_rate.is_finite()) {
            return Err(RadioError::InvalidSampleRate(output_sample_rate));
        }
        Ok(Self {
            mode,
            if_sample_rate,
            output_sample_rate,
            stereo: mode == ModulationMode::Fm,
            deemphasis_us: deemphasis_region.time_constant_us(),
            multipath_stages: 0,
            pilot_phase_shift: false,
        })
    }

    pub fn validate(&self) -> RadioResult<()> {
        if self.stereo && !self.mode.is_fm_family() {
            return Err(RadioError::Config(
                "stereo decoding is only valid for FM".to_string(),
            ));
        }
        if self.multipath_stages > 0 && self.mode != ModulationMode::Fm {
            return Err(RadioError::Config(
                "multipath cancellation is only valid for wide-band FM".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_sample_rate() {
        let err = PipelineConfig::new(ModulationMode::Fm, 0.0, 48_000.0, DeemphasisRegion::Na);
        assert!(err.is_err());
    }

    #[test]
    fn rejects_stereo_non_fm() {
        let mut cfg =
            PipelineConfig::new(ModulationMode::Am, 384_000.0, 48_000.0, DeemphasisRegion::Na)
                .unwrap();
        cfg.stereo = true;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!(ModulationMode::from_str("FM").unwrap(), ModulationMode::Fm);
        assert_eq!(
            ModulationMode::from_str("wspr").unwrap(),
            ModulationMode::Wspr
        );
        assert!(ModulationMode::from_str("xyz").is_err());
    }
}
