//! CLI entry point (C18): parses arguments, builds a `PipelineConfig`,
//! wires up the selected tuner and sink(s), and hands off to
//! `PipelineDriver`. Exit code 0 on success, 1 on configuration or fatal
//! runtime error.

mod cli;
mod config_string;

use clap::Parser;
use cli::Args;
use radio_buffer::{AudioSink, PipelineDriver, Tuner};
use radio_core::{AudioBlock, DeemphasisRegion, IqBlock, ModulationMode, PipelineConfig};
use radio_decode::Decoder;
use radio_sink::{FloatSink, PpsFileSink, PpsSink, RawSink, WavSink};
use radio_source::FileTuner;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

fn init_logging(args: &Args) {
    use env_logger::Env;

    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();
}

/// A sink that fans a block out to every configured destination, plus an
/// optional PPS log fed separately by the driver loop.
struct FanOutSink {
    sinks: Vec<Box<dyn AudioSink>>,
}

impl AudioSink for FanOutSink {
    fn write(&mut self, samples: &AudioBlock) -> radio_core::RadioResult<()> {
        for sink in &mut self.sinks {
            sink.write(samples)?;
        }
        Ok(())
    }

    fn close(&mut self) -> radio_core::RadioResult<()> {
        for sink in &mut self.sinks {
            sink.close()?;
        }
        Ok(())
    }
}

fn build_pipeline_config(args: &Args) -> anyhow::Result<PipelineConfig> {
    let mode = ModulationMode::from_str(&args.mode)?;
    let region = match args.deemphasis.to_ascii_lowercase().as_str() {
        "eu" => DeemphasisRegion::Eu,
        "na" => DeemphasisRegion::Na,
        other => return Err(anyhow::anyhow!("unknown de-emphasis region: {other}")),
    };

    let config_map = config_string::parse(&args.config)?;
    let if_sample_rate = config_string::required_f64(&config_map, "srate")?;

    let mut config = PipelineConfig::new(mode, if_sample_rate, args.output_sample_rate, region)?;
    config.stereo = mode == ModulationMode::Fm && !args.mono;
    config.multipath_stages = args.multipath_stages;
    config.pilot_phase_shift = args.pilot_phase_shift;
    config.validate()?;
    Ok(config)
}

fn build_tuner(args: &Args, if_sample_rate: f64) -> anyhow::Result<Box<dyn Tuner>> {
    match args.device_type.as_str() {
        "file" => {
            let config_map = config_string::parse(&args.config)?;
            let path = config_map
                .get("path")
                .ok_or_else(|| anyhow::anyhow!("file device requires a `path` config key"))?;
            let tuner = FileTuner::open(path, if_sample_rate, args.block_size)?;
            Ok(Box::new(tuner))
        }
        other => Err(anyhow::anyhow!(
            "device type `{other}` is not implemented; only `file` is available without hardware"
        )),
    }
}

fn build_audio_sinks(args: &Args, config: &PipelineConfig) -> anyhow::Result<Box<dyn AudioSink>> {
    let mut sinks: Vec<Box<dyn AudioSink>> = Vec::new();
    let channels: u16 = if config.stereo { 2 } else { 1 };

    if let Some(path) = &args.wav_out {
        sinks.push(Box::new(WavSink::create(
            path,
            config.output_sample_rate as u32,
            channels,
        )?));
    }
    if let Some(path) = &args.raw_out {
        sinks.push(Box::new(RawSink::create(path)?));
    }
    if let Some(path) = &args.float_out {
        sinks.push(Box::new(FloatSink::create(path)?));
    }
    if let Some(index) = args.play {
        log::warn!("playback (-P {index}) is not supported by this receiver; ignoring");
    }
    if sinks.is_empty() {
        return Err(anyhow::anyhow!(
            "no output selected; pass at least one of -R, -W, -F"
        ));
    }

    Ok(Box::new(FanOutSink { sinks }))
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = build_pipeline_config(&args)?;
    log::info!("resolved pipeline config: {config:?}");

    let tuner = build_tuner(&args, config.if_sample_rate)?;
    let audio_sink = build_audio_sinks(&args, &config)?;
    let pps_sink: Arc<Mutex<Option<Box<dyn PpsSink>>>> = Arc::new(Mutex::new(match &args.pps_out {
        Some(path) => Some(Box::new(PpsFileSink::create(path)?) as Box<dyn PpsSink>),
        None => None,
    }));
    let pps_sink_for_closure = Arc::clone(&pps_sink);

    let mut decoder = Decoder::new(&config);
    let driver = PipelineDriver::new();

    let stop_flag = driver.stop_flag();
    if let Err(e) = ctrlc::set_handler(move || {
        log::warn!("interrupt received, stopping after the current block");
        stop_flag.store(true, std::sync::atomic::Ordering::SeqCst);
    }) {
        log::warn!("could not install Ctrl-C handler: {e}");
    }

    let stats = driver.run(
        tuner,
        audio_sink,
        move |block: IqBlock| -> AudioBlock {
            let audio = decoder.process(&block);
            if let Some(sink) = pps_sink_for_closure.lock().unwrap().as_mut() {
                let events = decoder.pps_events();
                if !events.is_empty() {
                    if let Err(e) = sink.write(events) {
                        log::error!("PPS sink write failed: {e}");
                    }
                }
            }
            audio
        },
        0,
    )?;

    if let Some(sink) = pps_sink.lock().unwrap().as_mut() {
        sink.close()?;
    }

    log::info!(
        "pipeline finished: {} I/Q blocks in, {} audio blocks out",
        stats.iq_blocks_in,
        stats.audio_blocks_out
    );
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
