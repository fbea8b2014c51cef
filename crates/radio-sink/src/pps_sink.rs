//! PPS sink (C17): line-oriented text log of pilot-PLL PPS events, one
//! per line, `pps_index sample_index unix_time`, with a `#`-prefixed
//! header.

use radio_core::{PpsEvent, RadioError, RadioResult};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Same write/close/error shape as [`radio_buffer::AudioSink`], but over
/// PPS events rather than audio blocks — the two item types don't unify
/// under one trait without an artificial type parameter, so PPS output
/// gets its own narrow trait instead.
pub trait PpsSink: Send {
    fn write(&mut self, events: &[PpsEvent]) -> RadioResult<()>;
    fn close(&mut self) -> RadioResult<()> {
        Ok(())
    }
    fn error(&self) -> Option<&str> {
        None
    }
}

pub struct PpsFileSink<W: Write + Send> {
    writer: W,
    last_error: Option<String>,
}

impl PpsFileSink<BufWriter<File>> {
    pub fn create<P: AsRef<Path>>(path: P) -> RadioResult<Self> {
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(b"# pps_index sample_index unix_time\n")
            .map_err(RadioError::Io)?;
        Ok(Self {
            writer,
            last_error: None,
        })
    }
}

impl<W: Write + Send> PpsFileSink<W> {
    pub fn new(mut writer: W) -> RadioResult<Self> {
        writer
            .write_all(b"# pps_index sample_index unix_time\n")
            .map_err(RadioError::Io)?;
        Ok(Self {
            writer,
            last_error: None,
        })
    }
}

fn unix_time_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

impl<W: Write + Send> PpsSink for PpsFileSink<W> {
    fn write(&mut self, events: &[PpsEvent]) -> RadioResult<()> {
        let now = unix_time_now();
        for event in events {
            let line = format!("{} {} {}\n", event.pps_index, event.sample_index, now);
            if let Err(e) = self.writer.write_all(line.as_bytes()) {
                self.last_error = Some(e.to_string());
                return Err(RadioError::Io(e));
            }
        }
        Ok(())
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
