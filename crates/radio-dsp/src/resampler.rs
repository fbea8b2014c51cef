//! Rational-ratio resampling, used to convert the demodulated baseband
//! rate to the output audio rate. Built on `rubato`'s windowed-sinc
//! interpolator rather than a hand-rolled polyphase bank.

use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};

fn sinc_params() -> SincInterpolationParameters {
    SincInterpolationParameters {
        sinc_len: 128,
        f_cutoff: 0.925,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 128,
        window: WindowFunction::BlackmanHarris2,
    }
}

/// Resamples a single-channel audio stream from `input_rate` to
/// `output_rate` at an arbitrary rational ratio.
///
/// `rubato`'s `SincFixedIn` demands *exactly* `input_frames_next()` frames
/// on every `process` call, but callers here hand in whatever length the
/// decoder happened to produce for this block. An internal ring buffer
/// absorbs that mismatch: incoming samples accumulate until a full chunk
/// is available, at which point it runs through the inner resampler and
/// any remainder is carried over to the next call, the same way every
/// other stateful stage here carries state across block boundaries.
pub struct AudioResampler {
    inner: SincFixedIn<f64>,
    chunk_size: usize,
    pending: Vec<f64>,
}

impl AudioResampler {
    pub fn new(input_rate: f64, output_rate: f64, max_chunk: usize) -> Self {
        let ratio = output_rate / input_rate;
        let inner = SincFixedIn::<f64>::new(ratio, 2.0, sinc_params(), max_chunk, 1)
            .expect("valid resampler ratio and chunk size");
        let chunk_size = inner.input_frames_next();
        Self {
            inner,
            chunk_size,
            pending: Vec::new(),
        }
    }

    pub fn reset(&mut self) {
        self.inner.reset();
        self.pending.clear();
    }

    pub fn process(&mut self, input: &[f64]) -> Vec<f64> {
        self.pending.extend_from_slice(input);

        let mut output = Vec::new();
        while self.pending.len() >= self.chunk_size {
            let chunk: Vec<f64> = self.pending.drain(..self.chunk_size).collect();
            match self.inner.process(&[chunk], None) {
                Ok(out) => output.extend(out.into_iter().next().unwrap_or_default()),
                Err(e) => {
                    // Recoverable invariant violation: reset to initial
                    // state and drop this chunk rather than propagate a
                    // panic into the decode loop.
                    log::error!("resampler invariant violation, resetting: {e}");
                    self.inner.reset();
                }
            }
        }
        output
    }
}
