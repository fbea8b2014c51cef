//! Float sink (C17): interleaved `f32` PCM, no container.

use radio_buffer::AudioSink;
use radio_core::{AudioBlock, RadioError, RadioResult};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct FloatSink<W: Write + Send> {
    writer: W,
    last_error: Option<String>,
}

impl FloatSink<BufWriter<File>> {
    pub fn create<P: AsRef<Path>>(path: P) -> RadioResult<Self> {
        let file = File::create(path.as_ref())?;
        Ok(Self {
            writer: BufWriter::new(file),
            last_error: None,
        })
    }
}

impl<W: Write + Send> FloatSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            last_error: None,
        }
    }
}

impl<W: Write + Send> AudioSink for FloatSink<W> {
    fn write(&mut self, samples: &AudioBlock) -> RadioResult<()> {
        let mut buf = Vec::with_capacity(samples.len() * 4);
        for &sample in samples {
            buf.extend_from_slice(&(sample as f32).to_le_bytes());
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
