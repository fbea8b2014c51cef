//! radio-decode: the three modulation-family decoders (wide-band FM with
//! stereo, narrow-band FM, and the AM/SSB/CW/WSPR family) built from
//! `radio-dsp` stages, plus the mode dispatcher the driver calls into.

pub mod am;
pub mod decoder;
pub mod fm;
pub mod nbfm;
pub mod stats;

pub use am::{AmDecoder, AmMode};
pub use decoder::Decoder;
pub use fm::FmDecoder;
pub use nbfm::NbfmDecoder;
