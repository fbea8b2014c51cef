//! Drives the three-thread pipeline: a source thread filling the I/Q
//! buffer, a sink thread draining the audio buffer, and decode running
//! on the calling thread in between.

use crate::buffer::DataBuffer;
use crate::error::{PipelineError, PipelineResult};
use crate::sink_trait::AudioSink;
use crate::tuner_trait::Tuner;
use radio_core::{AudioBlock, AudioSample, IqSample};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

/// Block/sample counters accumulated over a pipeline run, useful for
/// post-run reporting.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineStats {
    pub iq_blocks_in: u64,
    pub audio_blocks_out: u64,
}

/// Owns the stop flag shared by the source, decode, and sink stages.
pub struct PipelineDriver {
    stop_flag: Arc<AtomicBool>,
}

impl Default for PipelineDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineDriver {
    pub fn new() -> Self {
        Self {
            stop_flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// A clone of the stop flag, e.g. to wire up to a signal handler.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop_flag)
    }

    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::SeqCst);
    }

    /// Run the pipeline to completion. `decode` runs on the calling
    /// thread, consuming one I/Q block and producing one audio block
    /// (possibly empty, e.g. during equalizer warm-up).
    pub fn run<D>(
        &self,
        mut tuner: Box<dyn Tuner>,
        mut sink: Box<dyn AudioSink>,
        mut decode: D,
        sink_min_fill: usize,
    ) -> PipelineResult<PipelineStats>
    where
        D: FnMut(Vec<IqSample>) -> AudioBlock + Send,
    {
        let iq_buffer = Arc::new(DataBuffer::<IqSample>::new());
        let audio_buffer = Arc::new(DataBuffer::<AudioSample>::new());
        let slow_consumer_threshold = (tuner.sample_rate() * 10.0).round() as usize;
        let mut slow_consumer_warned = false;

        let source_stop = Arc::clone(&self.stop_flag);
        let source_buf = Arc::clone(&iq_buffer);
        let source_thread = thread::spawn(move || {
            let mut block = Vec::new();
            while !source_stop.load(Ordering::SeqCst) {
                match tuner.get_samples(&mut block) {
                    Ok(true) => source_buf.push(std::mem::take(&mut block)),
                    Ok(false) | Err(_) => break,
                }
            }
            source_buf.push_end();
        });

        let sink_stop = Arc::clone(&self.stop_flag);
        let sink_audio_buf = Arc::clone(&audio_buffer);
        let sink_thread = thread::spawn(move || -> PipelineResult<()> {
            while !sink_stop.load(Ordering::SeqCst) {
                if sink_audio_buf.queued_samples() == 0 {
                    sink_audio_buf.wait_buffer_fill(sink_min_fill);
                }
                if sink_audio_buf.pull_end_reached() {
                    break;
                }
                let samples = sink_audio_buf.pull();
                if samples.is_empty() {
                    continue;
                }
                sink.write(&samples)
                    .map_err(|e| PipelineError::Sink(e.to_string()))?;
            }
            sink.close().map_err(|e| PipelineError::Sink(e.to_string()))?;
            Ok(())
        });

        let mut stats = PipelineStats::default();
        while !self.stop_flag.load(Ordering::SeqCst) {
            if iq_buffer.pull_end_reached() {
                break;
            }
            let queued = iq_buffer.queued_samples();
            if queued > slow_consumer_threshold && !slow_consumer_warned {
                log::warn!(
                    "source buffer depth {queued} exceeds 10x IF sample rate; decode is falling behind"
                );
                slow_consumer_warned = true;
            }
            let block = iq_buffer.pull();
            if block.is_empty() {
                continue;
            }
            stats.iq_blocks_in += 1;
            let audio = decode(block);
            // The first decoded block carries filter warm-up transients and
            // is discarded rather than handed to the sink.
            if stats.iq_blocks_in == 1 {
                continue;
            }
            if !audio.is_empty() {
                audio_buffer.push(audio);
                stats.audio_blocks_out += 1;
            }
        }
        audio_buffer.push_end();

        source_thread.join().map_err(|_| {
            PipelineError::Source("source thread panicked".to_string())
        })?;
        sink_thread
            .join()
            .map_err(|_| PipelineError::Sink("sink thread panicked".to_string()))??;

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use radio_core::RadioResult;

    struct CountingTuner {
        remaining: usize,
    }

    impl Tuner for CountingTuner {
        fn get_samples(&mut self, out: &mut Vec<IqSample>) -> RadioResult<bool> {
            if self.remaining == 0 {
                return Ok(false);
            }
            self.remaining -= 1;
            *out = vec![IqSample::new(1.0, 0.0); 16];
            Ok(true)
        }

        fn sample_rate(&self) -> f64 {
            384_000.0
        }
    }

    struct CollectingSink {
        total: usize,
    }

    impl AudioSink for CollectingSink {
        fn write(&mut self, samples: &AudioBlock) -> RadioResult<()> {
            self.total += samples.len();
            Ok(())
        }
    }

    #[test]
    fn drains_source_through_decode_to_sink() {
        let driver = PipelineDriver::new();
        let tuner = Box::new(CountingTuner { remaining: 5 });
        let sink = Box::new(CollectingSink { total: 0 });
        let stats = driver
            .run(tuner, sink, |block| block.iter().map(|s| s.re as f64).collect(), 0)
            .unwrap();
        assert_eq!(stats.iq_blocks_in, 5);
        // The first decoded block is discarded as filter warm-up.
        assert_eq!(stats.audio_blocks_out, 4);
    }

    #[test]
    fn single_block_run_produces_no_audio() {
        let driver = PipelineDriver::new();
        let tuner = Box::new(CountingTuner { remaining: 1 });
        let sink = Box::new(CollectingSink { total: 0 });
        let stats = driver
            .run(tuner, sink, |block| block.iter().map(|s| s.re as f64).collect(), 0)
            .unwrap();
        assert_eq!(stats.iq_blocks_in, 1);
        assert_eq!(stats.audio_blocks_out, 0);
    }

    #[test]
    fn stop_call_mid_stream_exits_cleanly_without_deadlock() {
        let driver = Arc::new(PipelineDriver::new());
        let tuner = Box::new(CountingTuner { remaining: usize::MAX });
        let sink = Box::new(CollectingSink { total: 0 });

        let stopper = Arc::clone(&driver);
        thread::spawn(move || {
            thread::sleep(std::time::Duration::from_millis(20));
            stopper.stop();
        });

        let stats = driver
            .run(tuner, sink, |block| block.iter().map(|s| s.re as f64).collect(), 0)
            .unwrap();
        assert!(stats.iq_blocks_in > 0);
        assert_eq!(stats.audio_blocks_out, stats.iq_blocks_in - 1);
    }
}
