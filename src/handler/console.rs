//! Console handler

use crate::core::error::Result;
use crate::core::formatter::Formatter;
use crate::core::handler::{Handler, LevelPolicy, WriterHandler};
use crate::core::level::Level;
use crate::core::record::Record;
use crate::format::TextFormatter;
use crate::handler::writer::WriterSink;
use std::io::Stdout;
use std::sync::Arc;

/// Direct-write stdout sink with a colored text formatter.
pub struct ConsoleHandler {
    inner: WriterSink<Stdout>,
}

impl ConsoleHandler {
    #[must_use]
    pub fn new(policy: impl Into<LevelPolicy>) -> Self {
        let formatter = TextFormatter::new().with_color(cfg!(feature = "console"));
        Self {
            inner: WriterSink::new(std::io::stdout(), policy)
                .with_name("console")
                .with_formatter(Arc::new(formatter)),
        }
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: Arc<dyn Formatter>) -> Self {
        self.inner = self.inner.with_formatter(formatter);
        self
    }
}

impl Default for ConsoleHandler {
    fn default() -> Self {
        Self::new(Level::Debug)
    }
}

impl Handler for ConsoleHandler {
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

impl WriterHandler for ConsoleHandler {
    fn formatter(&self) -> Arc<dyn Formatter> {
        self.inner.formatter()
    }

    fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        self.inner.write_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_gate() {
        let h = ConsoleHandler::default();
        assert!(h.is_handling(Level::Info));
        assert!(h.is_handling(Level::Debug));
        assert!(!h.is_handling(Level::Trace));
    }

    #[test]
    fn test_list_policy() {
        let h = ConsoleHandler::new(vec![Level::Error, Level::Fatal]);
        assert!(h.is_handling(Level::Error));
        assert!(!h.is_handling(Level::Info));
    }
}
