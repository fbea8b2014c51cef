//! Argument surface for the receiver CLI.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "radio-cli",
    about = "Software FM broadcast receiver: tunes an I/Q source, demodulates, and writes audio"
)]
pub struct Args {
    /// Device type; only `file` is implemented without real hardware.
    #[arg(short = 't', long = "device", default_value = "file")]
    pub device_type: String,

    /// Device index, for backends exposing more than one unit.
    #[arg(short = 'd', long = "device-index", default_value_t = 0)]
    pub device_index: usize,

    /// Demodulation mode.
    #[arg(short = 'm', long = "mode")]
    pub mode: String,

    /// Device config string: `key=value[,key=value...]` (at minimum `freq`, `srate`).
    #[arg(short = 'c', long = "config", default_value = "")]
    pub config: String,

    /// Write raw s16le PCM to this file.
    #[arg(short = 'R', long = "raw")]
    pub raw_out: Option<PathBuf>,

    /// Write a WAV file.
    #[arg(short = 'W', long = "wav")]
    pub wav_out: Option<PathBuf>,

    /// Write raw float32 PCM to this file.
    #[arg(short = 'F', long = "float")]
    pub float_out: Option<PathBuf>,

    /// Live playback device index. Accepted for CLI-surface parity with
    /// the reference receiver; playback is out of scope for this core
    /// and is reported as unsupported rather than attempted.
    #[arg(short = 'P', long = "play", num_args = 0..=1, default_missing_value = "0")]
    pub play: Option<usize>,

    /// Disable stereo decoding (wide-band FM only).
    #[arg(short = 'M', long = "mono", action = ArgAction::SetTrue)]
    pub mono: bool,

    /// De-emphasis region.
    #[arg(short = 'X', long = "deemphasis", default_value = "na")]
    pub deemphasis: String,

    /// Emit cos(2*phi) instead of sin(2*phi) from the pilot PLL.
    #[arg(short = 'U', long = "pilot-phase-shift", action = ArgAction::SetTrue)]
    pub pilot_phase_shift: bool,

    /// Multipath equalizer stage count; 0 disables it. FM only.
    #[arg(long = "multipathfilter", default_value_t = 0)]
    pub multipath_stages: usize,

    /// Write PPS events as line-oriented text to this file.
    #[arg(short = 'T', long = "pps")]
    pub pps_out: Option<PathBuf>,

    /// Suppress all logging below `error`.
    #[arg(short = 'q', long = "quiet", action = ArgAction::SetTrue)]
    pub quiet: bool,

    /// Increase verbosity; repeatable (-v, -vv, -vvv). Overridden by `RUST_LOG`.
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Output sample rate in Hz. Defaults to standard broadcast audio rate.
    #[arg(long = "outrate", default_value_t = 48_000.0)]
    pub output_sample_rate: f64,

    /// Fixed I/Q block size read from the file tuner, in samples.
    #[arg(long = "blocksize", default_value_t = 4096)]
    pub block_size: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_fm_invocation() {
        let args = Args::parse_from([
            "radio-cli",
            "-m",
            "fm",
            "-c",
            "freq=100300000,srate=384000,path=/tmp/iq.raw",
            "-W",
            "/tmp/out.wav",
        ]);
        assert_eq!(args.mode, "fm");
        assert!(args.wav_out.is_some());
        assert!(!args.mono);
        assert_eq!(args.multipath_stages, 0);
    }

    #[test]
    fn play_flag_accepts_bare_or_indexed_form() {
        let bare = Args::parse_from(["radio-cli", "-m", "fm", "-c", "", "-P"]);
        assert_eq!(bare.play, Some(0));
        let indexed = Args::parse_from(["radio-cli", "-m", "fm", "-c", "", "-P", "2"]);
        assert_eq!(indexed.play, Some(2));
    }
}
