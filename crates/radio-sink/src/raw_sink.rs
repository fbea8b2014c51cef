//! Raw sink (C17): interleaved `i16` PCM (s16le), no container, written
//! straight to any `Write` destination (file or stdout).

use radio_buffer::AudioSink;
use radio_core::{AudioBlock, RadioError, RadioResult};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct RawSink<W: Write + Send> {
    writer: W,
    last_error: Option<String>,
}

impl RawSink<BufWriter<File>> {
    pub fn create<P: AsRef<Path>>(path: P) -> RadioResult<Self> {
        let file = File::create(path.as_ref())?;
        Ok(Self {
            writer: BufWriter::new(file),
            last_error: None,
        })
    }
}

impl<W: Write + Send> RawSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            last_error: None,
        }
    }
}

impl<W: Write + Send> AudioSink for RawSink<W> {
    fn write(&mut self, samples: &AudioBlock) -> RadioResult<()> {
        let mut buf = Vec::with_capacity(samples.len() * 2);
        for &sample in samples {
            let clamped = (sample.clamp(-1.0, 1.0) * i16::MAX as f64) as i16;
            buf.extend_from_slice(&clamped.to_le_bytes());
        }
        self.writer.write_all(&buf).map_err(|e| {
            self.last_error = Some(e.to_string());
            RadioError::Io(e)
        })
    }

    fn close(&mut self) -> RadioResult<()> {
        self.writer.flush().map_err(|e| {
            self.last_error = Some(e.to_string());
            RadioError::Io(e)
        })
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_and_scales_to_s16le() {
        let mut buf = Vec::new();
        {
            let mut sink = RawSink::new(&mut buf);
            let block: AudioBlock = vec![1.5, -1.5, 0.0];
            sink.write(&block).unwrap();
            sink.close().unwrap();
        }
        assert_eq!(buf.len(), 6);
        let samples: Vec<i16> = buf
            .chunks_exact(2)
            .map(|c| i16::from_le_bytes([c[0], c[1]]))
            .collect();
        assert_eq!(samples, vec![i16::MAX, -i16::MAX, 0]);
    }
}
