//! WAV sink (C17): interleaved mono/stereo `f32` PCM via `hound`, written
//! one frame at a time with the header finalized on `close()`.

use crate::error::SinkError;
use radio_buffer::AudioSink;
use radio_core::{AudioBlock, RadioError, RadioResult};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct WavSink {
    writer: Option<hound::WavWriter<BufWriter<File>>>,
    last_error: Option<String>,
}

impl WavSink {
    pub fn create<P: AsRef<Path>>(path: P, sample_rate: u32, channels: u16) -> RadioResult<Self> {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let writer = hound::WavWriter::create(path.as_ref(), spec)
            .map_err(|e| RadioError::Io(std::io::Error::new(std::io::ErrorKind::Other, e.to_string())))?;
        Ok(Self {
            writer: Some(writer),
            last_error: None,
        })
    }

    fn write_inner(&mut self, samples: &AudioBlock) -> Result<(), SinkError> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| SinkError::Wav("sink already closed".to_string()))?;
        for &sample in samples {
            writer.write_sample(sample as f32)?;
        }
        Ok(())
    }
}

impl AudioSink for WavSink {
    fn write(&mut self, samples: &AudioBlock) -> RadioResult<()> {
        self.write_inner(samples).map_err(|e| {
            let msg = e.to_string();
            self.last_error = Some(msg.clone());
            RadioError::Io(std::io::Error::new(std::io::ErrorKind::Other, msg))
        })
    }

    fn close(&mut self) -> RadioResult<()> {
        if let Some(writer) = self.writer.take() {
            writer.finalize().map_err(|e| {
                let msg = e.to_string();
                self.last_error = Some(msg.clone());
                RadioError::Io(std::io::Error::new(std::io::ErrorKind::Other, msg))
            })?;
        }
        Ok(())
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

impl Drop for WavSink {
    fn drop(&mut self) {
        if let Some(writer) = self.writer.take() {
            let _ = writer.finalize();
        }
    }
}
