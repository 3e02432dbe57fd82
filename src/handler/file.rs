//! Simple file handler
//!
//! Direct-write append-mode file sink, no rotation. Wrap it in
//! [`BufferedHandler`](crate::handler::BufferedHandler) for batched
//! writes.

use crate::core::error::Result;
use crate::core::formatter::Formatter;
use crate::core::handler::{Handler, LevelPolicy, WriterHandler};
use crate::core::level::Level;
use crate::core::record::Record;
use crate::handler::writer::WriterSink;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct FileHandler {
    path: PathBuf,
    inner: WriterSink<File>,
}

impl FileHandler {
    pub fn new(path: impl Into<PathBuf>, policy: impl Into<LevelPolicy>) -> Result<Self> {
        let path = path.into();
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let name = format!("file:{}", path.display());

        Ok(Self {
            inner: WriterSink::new(file, policy).with_name(name),
            path,
        })
    }

    /// Panicking convenience constructor for demos and tests.
    #[must_use]
    pub fn must(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::new(path.clone(), Level::Info) {
            Ok(h) => h,
            Err(e) => panic!("failed to open log file {}: {}", path.display(), e),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: Arc<dyn Formatter>) -> Self {
        self.inner = self.inner.with_formatter(formatter);
        self
    }
}

impl Handler for FileHandler {
    fn is_handling(&self, level: Level) -> bool {
        self.inner.is_handling(level)
    }

    fn handle(&self, record: &Record) -> Result<()> {
        self.inner.handle(record)
    }

    fn flush(&self) -> Result<()> {
        self.inner.flush()
    }

    fn close(&self) -> Result<()> {
        self.inner.close()
    }
}

impl WriterHandler for FileHandler {
    fn formatter(&self) -> Arc<dyn Formatter> {
        self.inner.formatter()
    }

    fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        self.inner.write_bytes(bytes)
    }
}
