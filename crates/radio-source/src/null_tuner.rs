//! Null/synthetic tuner (C16): emits generated sample blocks from a
//! closure, for exactly `N` blocks or until the stop flag is observed.
//! Used by property tests to drive the pipeline with silence, a pilot
//! tone, or a multipath echo without touching the filesystem.

use radio_buffer::Tuner;
use radio_core::{IqBlock, RadioResult};

pub struct NullTuner<F>
where
    F: FnMut(usize, usize) -> IqBlock + Send,
{
    generate: F,
    block_size: usize,
    sample_rate: f64,
    blocks_remaining: Option<usize>,
    blocks_emitted: usize,
}

impl<F> NullTuner<F>
where
    F: FnMut(usize, usize) -> IqBlock + Send,
{
    /// `generate(block_index, block_size)` produces each block.
    /// `block_count = None` means emit indefinitely (until the driver's
    /// stop flag halts polling from outside).
    pub fn new(generate: F, block_size: usize, sample_rate: f64, block_count: Option<usize>) -> Self {
        Self {
            generate,
            block_size: block_size.max(1),
            sample_rate,
            blocks_remaining: block_count,
            blocks_emitted: 0,
        }
    }
}

impl<F> Tuner for NullTuner<F>
where
    F: FnMut(usize, usize) -> IqBlock + Send,
{
    fn get_samples(&mut self, out: &mut IqBlock) -> RadioResult<bool> {
        if let Some(remaining) = self.blocks_remaining {
            if remaining == 0 {
                return Ok(false);
            }
            self.blocks_remaining = Some(remaining - 1);
        }
        *out = (self.generate)(self.blocks_emitted, self.block_size);
        self.blocks_emitted += 1;
        Ok(true)
    }

    fn sample_rate(&self) -> f64 {
        self.sample_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use radio_core::IqSample;

    #[test]
    fn emits_exactly_n_blocks_then_ends() {
        let mut tuner = NullTuner::new(
            |_, n| vec![IqSample::new(1.0, 0.0); n],
            16,
            48_000.0,
            Some(3),
        );
        let mut block = Vec::new();
        for _ in 0..3 {
            assert!(tuner.get_samples(&mut block).unwrap());
            assert_eq!(block.len(), 16);
        }
        assert!(!tuner.get_samples(&mut block).unwrap());
    }

    #[test]
    fn generator_sees_block_index() {
        let mut tuner = NullTuner::new(
            |index, n| vec![IqSample::new(index as f32, 0.0); n],
            4,
            48_000.0,
            Some(2),
        );
        let mut block = Vec::new();
        tuner.get_samples(&mut block).unwrap();
        assert_eq!(block[0].re, 0.0);
        tuner.get_samples(&mut block).unwrap();
        assert_eq!(block[0].re, 1.0);
    }
}
