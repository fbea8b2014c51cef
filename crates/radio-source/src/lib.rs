//! radio-source: trivial file-backed `Tuner` implementations so the
//! pipeline runs end-to-end without real radio hardware. No DSP here.

mod file_tuner;
mod null_tuner;

pub use file_tuner::FileTuner;
pub use null_tuner::NullTuner;
