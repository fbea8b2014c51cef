//! Raw interleaved-`f32` file tuner (C16): reads `(re, im)` pairs from a
//! file at a fixed configured sample rate, emitting fixed-size blocks and
//! signalling end-of-stream when the file is exhausted. Carries no DSP of
//! its own.

use radio_buffer::Tuner;
use radio_core::{IqBlock, IqSample, RadioError, RadioResult};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub struct FileTuner {
    reader: BufReader<File>,
    sample_rate: f64,
    block_size: usize,
    scratch: Vec<u8>,
}

impl FileTuner {
    pub fn open<P: AsRef<Path>>(path: P, sample_rate: f64, block_size: usize) -> RadioResult<Self> {
        if sample_rate <= 0.0 {
            return Err(RadioError::InvalidSampleRate(sample_rate));
        }
        let file = File::open(path.as_ref())?;
        Ok(Self {
            reader: BufReader::new(file),
            sample_rate,
            block_size: block_size.max(1),
            scratch: vec![0u8; block_size.max(1) * 8],
        })
    }
}

impl Tuner for FileTuner {
    fn get_samples(&mut self, out: &mut IqBlock) -> RadioResult<bool> {
        out.clear();
        let bytes_needed = self.block_size * 8;
        if self.scratch.len() != bytes_needed {
            self.scratch.resize(bytes_needed, 0);
        }

        let mut total_read = 0usize;
        while total_read < bytes_needed {
            match self.reader.read(&mut self.scratch[total_read..]) {
                Ok(0) => break,
                Ok(n) => total_read += n,
                Err(e) => return Err(RadioError::Io(e)),
            }
        }

        let complete_samples = total_read / 8;
        out.reserve(complete_samples);
        for chunk in self.scratch[..complete_samples * 8].chunks_exact(8) {
            let re = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            let im = f32::from_le_bytes([chunk[4], chunk[5], chunk[6], chunk[7]]);
            out.push(IqSample::new(re, im));
        }

        Ok(total_read > 0)
    }

    fn sample_rate(&self) -> f64 {
        self.sample_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_iq_file(path: &Path, pairs: &[(f32, f32)]) {
        let mut file = File::create(path).unwrap();
        for &(re, im) in pairs {
            file.write_all(&re.to_le_bytes()).unwrap();
            file.write_all(&im.to_le_bytes()).unwrap();
        }
    }

    #[test]
    fn reads_fixed_size_blocks_then_signals_end() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("iq.raw");
        write_iq_file(&path, &[(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0), (0.0, -1.0)]);

        let mut tuner = FileTuner::open(&path, 48_000.0, 2).unwrap();
        let mut block = Vec::new();

        assert!(tuner.get_samples(&mut block).unwrap());
        assert_eq!(block.len(), 2);
        assert_eq!(block[0], IqSample::new(1.0, 0.0));

        assert!(tuner.get_samples(&mut block).unwrap());
        assert_eq!(block.len(), 2);
        assert_eq!(block[1], IqSample::new(0.0, -1.0));

        assert!(!tuner.get_samples(&mut block).unwrap());
    }

    #[test]
    fn reports_nominal_sample_rate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.raw");
        File::create(&path).unwrap();
        let tuner = FileTuner::open(&path, 384_000.0, 1024).unwrap();
        assert_eq!(tuner.sample_rate(), 384_000.0);
    }
}
