//! Generic direct-write handler over any byte sink
//!
//! `WriterSink` is the building block for the console and file handlers
//! and the seam used by tests: any `Write + Send` value becomes a sink.

use crate::core::error::{LogError, Result};
use crate::core::formatter::Formatter;
use crate::core::handler::{Handler, HandlerBase, LevelPolicy, WriterHandler};
use crate::core::level::Level;
use crate::core::record::Record;
use crate::format::TextFormatter;
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;

pub struct WriterSink<W: Write + Send> {
    name: String,
    base: HandlerBase,
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W, policy: impl Into<LevelPolicy>) -> Self {
        Self {
            name: "writer".to_string(),
            base: HandlerBase::new(policy, Arc::new(TextFormatter::new())),
            writer: Mutex::new(writer),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: Arc<dyn Formatter>) -> Self {
        self.base.formatter = formatter;
        self
    }

    pub fn set_formatter(&mut self, formatter: Arc<dyn Formatter>) {
        self.base.formatter = formatter;
    }
}

impl<W: Write + Send> Handler for WriterSink<W> {
    fn is_handling(&self, level: Level) -> bool {
        self.base.is_handling(level)
    }

    fn handle(&self, record: &Record) -> Result<()> {
        let bytes = self.base.format(record)?;
        self.write_bytes(&bytes)
    }

    fn flush(&self) -> Result<()> {
        self.writer
            .lock()
            .flush()
            .map_err(|e| LogError::write(&self.name, e))
    }

    fn close(&self) -> Result<()> {
        self.flush()
    }
}

impl<W: Write + Send> WriterHandler for WriterSink<W> {
    fn formatter(&self) -> Arc<dyn Formatter> {
        Arc::clone(&self.base.formatter)
    }

    fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        self.writer
            .lock()
            .write_all(bytes)
            .map_err(|e| LogError::write(&self.name, e))
    }
}

/// Clonable in-memory sink for tests and capturing output.
#[derive(Clone, Default)]
pub struct SharedBuf {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuf {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contents(&self) -> Vec<u8> {
        self.inner.lock().clone()
    }

    #[must_use]
    pub fn as_string(&self) -> String {
        String::from_utf8_lossy(&self.contents()).into_owned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.inner.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
