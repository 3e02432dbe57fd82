//! Buffered-write decorator
//!
//! Wraps a [`WriterHandler`] with an in-memory buffer. Formatted records
//! accumulate under a mutex until the event-count threshold (default
//! 1000) or the optional byte threshold is crossed, at which point the
//! buffer drains to the wrapped handler's sink synchronously. No byte is
//! observable at the sink before a flush completes, whether explicit,
//! threshold-triggered or close-triggered.

use crate::core::error::Result;
use crate::core::handler::{Handler, WriterHandler};
use crate::core::level::Level;
use crate::core::record::Record;
use parking_lot::Mutex;

/// Default event-count flush threshold.
pub const DEFAULT_FLUSH_INTERVAL: usize = 1000;

#[derive(Default)]
struct BufferState {
    buf: Vec<u8>,
    count: usize,
}

pub struct BufferedHandler<H: WriterHandler> {
    inner: H,
    state: Mutex<BufferState>,
    flush_interval: usize,
    max_buffer_bytes: Option<usize>,
}

impl<H: WriterHandler> BufferedHandler<H> {
    pub fn new(inner: H) -> Self {
        Self {
            inner,
            state: Mutex::new(BufferState::default()),
            flush_interval: DEFAULT_FLUSH_INTERVAL,
            max_buffer_bytes: None,
        }
    }

    /// Flush after this many buffered records.
    #[must_use]
    pub fn with_flush_interval(mut self, records: usize) -> Self {
        self.flush_interval = records.max(1);
        self
    }

    /// Also flush once the buffer holds at least this many bytes.
    #[must_use]
    pub fn with_max_buffer_bytes(mut self, bytes: usize) -> Self {
        self.max_buffer_bytes = Some(bytes);
        self
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }

    /// Number of records currently buffered.
    pub fn pending(&self) -> usize {
        self.state.lock().count
    }

    fn flush_locked(&self, state: &mut BufferState) -> Result<()> {
        if !state.buf.is_empty() {
            self.inner.write_bytes(&state.buf)?;
            state.buf.clear();
        }
        state.count = 0;
        // Propagate for nested buffering.
        self.inner.flush()
    }
}

impl<H: WriterHandler> Handler for BufferedHandler<H> {
    fn is_handling(&self, level: Level) -> bool {
        self.inner.is_handling(level)
    }

    fn handle(&self, record: &Record) -> Result<()> {
        let bytes = self.inner.formatter().format(record)?;

        let mut state = self.state.lock();
        state.buf.extend_from_slice(&bytes);
        state.count += 1;

        let over_count = state.count >= self.flush_interval;
        let over_bytes = self
            .max_buffer_bytes
            .is_some_and(|max| state.buf.len() >= max);

        if over_count || over_bytes {
            self.flush_locked(&mut state)?;
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        let mut state = self.state.lock();
        self.flush_locked(&mut state)
    }

    fn close(&self) -> Result<()> {
        self.flush()?;
        self.inner.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::writer::{SharedBuf, WriterSink};
    use crate::format::TextFormatter;
    use std::sync::Arc;

    fn buffered(
        buf: &SharedBuf,
        interval: usize,
    ) -> BufferedHandler<WriterSink<SharedBuf>> {
        let sink = WriterSink::new(buf.clone(), Level::Trace)
            .with_formatter(Arc::new(TextFormatter::new().with_template("{{message}}\n")));
        BufferedHandler::new(sink).with_flush_interval(interval)
    }

    #[test]
    fn test_nothing_reaches_sink_below_threshold() {
        let buf = SharedBuf::new();
        let h = buffered(&buf, 10);

        for i in 0..9 {
            h.handle(&Record::new(Level::Info, format!("m{}", i))).unwrap();
        }

        assert!(buf.is_empty());
        assert_eq!(h.pending(), 9);
    }

    #[test]
    fn test_threshold_crossing_drains_in_emission_order() {
        let buf = SharedBuf::new();
        let h = buffered(&buf, 3);

        h.handle(&Record::new(Level::Info, "a")).unwrap();
        h.handle(&Record::new(Level::Info, "b")).unwrap();
        assert!(buf.is_empty());
        h.handle(&Record::new(Level::Info, "c")).unwrap();

        assert_eq!(buf.as_string(), "a\nb\nc\n");
        assert_eq!(h.pending(), 0);
    }

    #[test]
    fn test_explicit_flush_drains_exact_concatenation() {
        let buf = SharedBuf::new();
        let h = buffered(&buf, 100);

        h.handle(&Record::new(Level::Info, "one")).unwrap();
        h.handle(&Record::new(Level::Info, "two")).unwrap();
        assert!(buf.is_empty());

        h.flush().unwrap();
        assert_eq!(buf.as_string(), "one\ntwo\n");
    }

    #[test]
    fn test_byte_threshold() {
        let buf = SharedBuf::new();
        let sink = WriterSink::new(buf.clone(), Level::Trace)
            .with_formatter(Arc::new(TextFormatter::new().with_template("{{message}}")));
        let h = BufferedHandler::new(sink)
            .with_flush_interval(1000)
            .with_max_buffer_bytes(8);

        h.handle(&Record::new(Level::Info, "abcd")).unwrap();
        assert!(buf.is_empty());
        h.handle(&Record::new(Level::Info, "efgh")).unwrap();
        assert_eq!(buf.as_string(), "abcdefgh");
    }

    #[test]
    fn test_close_flushes() {
        let buf = SharedBuf::new();
        let h = buffered(&buf, 100);

        h.handle(&Record::new(Level::Info, "tail")).unwrap();
        h.close().unwrap();

        assert_eq!(buf.as_string(), "tail\n");
    }

    #[test]
    fn test_level_gate_delegates() {
        let buf = SharedBuf::new();
        let sink = WriterSink::new(buf.clone(), Level::Warn);
        let h = BufferedHandler::new(sink);
        assert!(h.is_handling(Level::Error));
        assert!(!h.is_handling(Level::Debug));
    }
}
