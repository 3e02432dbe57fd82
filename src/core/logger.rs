//! Logger: the event dispatch pipeline
//!
//! The logger owns an ordered list of handlers and an ordered list of
//! processors. On each emitted event it builds a record, runs the
//! processors in registration order, then offers the record to every
//! handler willing to handle that level. Handler failures are isolated:
//! one failing sink never blocks delivery to its siblings.
//!
//! Registration (`add_handler`, `add_processor`) is expected to happen
//! during single-threaded setup before concurrent logging begins; the
//! internal locks make list reads safe from any thread afterwards.

use crate::core::error::{LogError, Result};
use crate::core::field::FieldMap;
use crate::core::handler::Handler;
use crate::core::level::Level;
use crate::core::processor::Processor;
use crate::core::record::{Caller, Record};
use parking_lot::{Mutex, RwLock};
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Zero-argument callback run on process-exit request.
pub type ExitCallback = Arc<dyn Fn() + Send + Sync>;

/// Replaceable exit function, called after the exit-handler chain and the
/// final flush. Defaults to `std::process::exit`.
pub type ExitFunc = Arc<dyn Fn(i32) + Send + Sync>;

/// Exit function that does nothing, for tests and embedding.
pub fn do_nothing_on_exit(_code: i32) {}

pub struct Logger {
    name: String,
    handlers: RwLock<Vec<Arc<dyn Handler>>>,
    processors: RwLock<Vec<Arc<dyn Processor>>>,
    exit_handlers: Mutex<Vec<ExitCallback>>,
    report_caller: AtomicBool,
    exit_func: RwLock<ExitFunc>,
    /// Where handler and exit-handler errors are written. Defaults to the
    /// process error stream; replaceable for tests.
    error_output: Mutex<Box<dyn Write + Send>>,
    daemon_running: AtomicBool,
}

impl Logger {
    #[must_use]
    pub fn new() -> Self {
        Self::with_name("logger")
    }

    #[must_use]
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handlers: RwLock::new(Vec::new()),
            processors: RwLock::new(Vec::new()),
            exit_handlers: Mutex::new(Vec::new()),
            report_caller: AtomicBool::new(false),
            exit_func: RwLock::new(Arc::new(|code| std::process::exit(code))),
            error_output: Mutex::new(Box::new(std::io::stderr())),
            daemon_running: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_report_caller(&self, enabled: bool) {
        self.report_caller.store(enabled, Ordering::Relaxed);
    }

    pub fn reports_caller(&self) -> bool {
        self.report_caller.load(Ordering::Relaxed)
    }

    pub fn set_exit_func(&self, f: impl Fn(i32) + Send + Sync + 'static) {
        *self.exit_func.write() = Arc::new(f);
    }

    /// Replace the error stream used for handler and exit-handler
    /// failure reports.
    pub fn set_error_output(&self, out: Box<dyn Write + Send>) {
        *self.error_output.lock() = out;
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    pub fn add_handler<H: Handler + 'static>(&self, handler: H) {
        self.push_handler(Arc::new(handler));
    }

    /// Register an already-shared handler. Insertion order is dispatch
    /// order; duplicates are allowed.
    pub fn push_handler(&self, handler: Arc<dyn Handler>) {
        self.handlers.write().push(handler);
    }

    pub fn add_processor<P: Processor + 'static>(&self, processor: P) {
        self.push_processor(Arc::new(processor));
    }

    pub fn push_processor(&self, processor: Arc<dyn Processor>) {
        self.processors.write().push(processor);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.read().len()
    }

    pub fn reset_processors(&self) {
        self.processors.write().clear();
    }

    /// Discard all handlers, processors and exit handlers and return the
    /// logger to its freshly-constructed state. Full replacement, not
    /// incremental teardown: handler references taken before the reset
    /// stay valid and independently closable.
    pub fn reset(&self) {
        self.handlers.write().clear();
        self.processors.write().clear();
        self.exit_handlers.lock().clear();
        self.report_caller.store(false, Ordering::Relaxed);
        *self.exit_func.write() = Arc::new(|code| std::process::exit(code));
    }

    // ------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------

    /// Aggregate acceptance check: true iff at least one registered
    /// handler would accept `level`.
    pub fn is_handling(&self, level: Level) -> bool {
        self.handlers.read().iter().any(|h| h.is_handling(level))
    }

    #[track_caller]
    pub fn log(&self, level: Level, message: impl Into<String>) {
        self.emit(level, message.into(), None, None, None);
    }

    /// Start a chained record with a caller-supplied data payload.
    pub fn with_data(&self, data: FieldMap) -> RecordBuilder<'_> {
        RecordBuilder::new(self).data(data)
    }

    /// Start a chained record with caller-supplied fields.
    pub fn with_fields(&self, fields: FieldMap) -> RecordBuilder<'_> {
        RecordBuilder::new(self).fields(fields)
    }

    /// Start a chained record on a channel other than "application".
    pub fn with_channel(&self, channel: impl Into<String>) -> RecordBuilder<'_> {
        RecordBuilder::new(self).channel(channel)
    }

    #[track_caller]
    pub(crate) fn emit(
        &self,
        level: Level,
        message: String,
        data: Option<&FieldMap>,
        fields: Option<&FieldMap>,
        channel: Option<&str>,
    ) {
        // Short-circuit before allocating a record for disabled levels.
        if !self.is_handling(level) {
            return;
        }

        let mut record = Record::new(level, message);
        if let Some(d) = data {
            record.data = d.clone();
        }
        if let Some(f) = fields {
            record.fields = f.clone();
        }
        if let Some(c) = channel {
            record.channel = c.to_string();
        }
        if self.reports_caller() {
            let loc = std::panic::Location::caller();
            record.caller = Some(Caller::new(loc.file(), loc.line()));
        }

        {
            let processors = self.processors.read();
            for p in processors.iter() {
                p.process(&mut record);
            }
        }

        self.dispatch(&record);

        match level {
            // Exit runs the exit-handler chain and flushes before the
            // configured exit function is invoked.
            Level::Fatal => self.exit(1),
            Level::Panic => {
                let _ = self.flush_all();
                panic!("{}", record.message);
            }
            _ => {}
        }
    }

    fn dispatch(&self, record: &Record) {
        let handlers = self.handlers.read();
        for (idx, handler) in handlers.iter().enumerate() {
            if !handler.is_handling(record.level) {
                continue;
            }
            // A failing handler is reported but never prevents the
            // remaining handlers from receiving the record.
            if let Err(e) = handler.handle(record) {
                self.report_line(&format!("[LOGGER ERROR] handler #{} failed: {}", idx, e));
            }
        }
    }

    fn report_line(&self, line: &str) {
        let mut out = self.error_output.lock();
        let _ = writeln!(out, "{}", line);
        let _ = out.flush();
    }

    // ------------------------------------------------------------------
    // Per-level helpers
    // ------------------------------------------------------------------

    #[inline]
    #[track_caller]
    pub fn print(&self, message: impl Into<String>) {
        self.log(Level::Print, message);
    }

    #[inline]
    #[track_caller]
    pub fn trace(&self, message: impl Into<String>) {
        self.log(Level::Trace, message);
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(Level::Debug, message);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl Into<String>) {
        self.log(Level::Info, message);
    }

    #[inline]
    #[track_caller]
    pub fn notice(&self, message: impl Into<String>) {
        self.log(Level::Notice, message);
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(Level::Warn, message);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl Into<String>) {
        self.log(Level::Error, message);
    }

    /// Logs at Fatal, then flushes every handler and invokes the
    /// configured exit function with code 1.
    #[inline]
    #[track_caller]
    pub fn fatal(&self, message: impl Into<String>) {
        self.log(Level::Fatal, message);
    }

    /// Logs at Panic, flushes every handler, then panics with the message.
    #[inline]
    #[track_caller]
    pub fn panic(&self, message: impl Into<String>) {
        self.log(Level::Panic, message);
    }

    // ------------------------------------------------------------------
    // Flush
    // ------------------------------------------------------------------

    /// Flush every handler in registration order. The first error is
    /// returned, but every handler is still flushed.
    pub fn flush_all(&self) -> Result<()> {
        let mut first_err = None;
        for (idx, handler) in self.handlers.read().iter().enumerate() {
            if let Err(e) = handler.flush() {
                self.report_line(&format!("[LOGGER ERROR] handler #{} flush failed: {}", idx, e));
                if first_err.is_none() {
                    first_err = Some(e);
                }
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    /// Close every handler in registration order, flushing first.
    pub fn close_all(&self) -> Result<()> {
        let mut first_err = None;
        for handler in self.handlers.read().iter() {
            if let Err(e) = handler.close() {
                if first_err.is_none() {
                    first_err = Some(e);
                }
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    /// Run `flush_all` with a bounded wait. Returns true if the flush
    /// completed within `timeout`. Advisory, not cancelling: on timeout
    /// the in-flight flush continues in the background.
    pub fn flush_timeout(&self, timeout: Duration) -> bool {
        let handlers: Vec<Arc<dyn Handler>> = self.handlers.read().clone();
        let (done_tx, done_rx) = crossbeam_channel::bounded::<()>(1);

        thread::spawn(move || {
            for handler in &handlers {
                let _ = handler.flush();
            }
            let _ = done_tx.send(());
        });

        done_rx.recv_timeout(timeout).is_ok()
    }

    /// Start a background thread that flushes all handlers on a fixed
    /// interval, running until process exit. Starting a second daemon is
    /// a no-op; returns false in that case.
    pub fn flush_daemon(self: &Arc<Self>, interval: Duration) -> bool {
        if self.daemon_running.swap(true, Ordering::SeqCst) {
            return false;
        }

        let logger = Arc::clone(self);
        let spawned = thread::Builder::new()
            .name("logpipe-flush".to_string())
            .spawn(move || {
                let ticker = crossbeam_channel::tick(interval);
                while ticker.recv().is_ok() {
                    let _ = logger.flush_all();
                }
            });

        if spawned.is_err() {
            self.daemon_running.store(false, Ordering::SeqCst);
            return false;
        }
        true
    }

    // ------------------------------------------------------------------
    // Exit-handler chain
    // ------------------------------------------------------------------

    /// Append an exit handler; appended handlers run last.
    pub fn register_exit_handler(&self, f: impl Fn() + Send + Sync + 'static) {
        self.exit_handlers.lock().push(Arc::new(f));
    }

    /// Insert an exit handler at the front; prepended handlers run first.
    pub fn prepend_exit_handler(&self, f: impl Fn() + Send + Sync + 'static) {
        self.exit_handlers.lock().insert(0, Arc::new(f));
    }

    pub fn exit_handler_count(&self) -> usize {
        self.exit_handlers.lock().len()
    }

    pub fn reset_exit_handlers(&self) {
        self.exit_handlers.lock().clear();
    }

    /// Run the exit-handler chain, flush every handler, then invoke the
    /// configured exit function with `code`.
    ///
    /// Each exit handler runs isolated: a panicking handler is caught,
    /// reported to the error stream as `Run exit handler error: <msg>`,
    /// and the remaining chain still runs. The flush happens even when
    /// zero exit handlers are registered.
    pub fn exit(&self, code: i32) {
        self.run_exit_handlers();
        if let Err(e) = self.flush_all() {
            self.report_line(&format!("[LOGGER ERROR] flush on exit failed: {}", e));
        }
        let exit_func = self.exit_func.read().clone();
        exit_func(code);
    }

    fn run_exit_handlers(&self) {
        let snapshot: Vec<ExitCallback> = self.exit_handlers.lock().clone();
        for callback in snapshot {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| callback()));
            if let Err(payload) = result {
                let message = panic_message(payload.as_ref());
                self.report_line(&LogError::ExitHandlerPanic(message).to_string());
            }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/// A record under construction, bound to its logger. Each terminal call
/// builds a fresh record from the accumulated maps, so sibling calls on
/// the same builder never observe each other's mutations.
pub struct RecordBuilder<'a> {
    logger: &'a Logger,
    channel: Option<String>,
    data: FieldMap,
    fields: FieldMap,
}

impl<'a> RecordBuilder<'a> {
    fn new(logger: &'a Logger) -> Self {
        Self {
            logger,
            channel: None,
            data: FieldMap::new(),
            fields: FieldMap::new(),
        }
    }

    #[must_use]
    pub fn data(mut self, data: FieldMap) -> Self {
        self.data.extend(data);
        self
    }

    #[must_use]
    pub fn fields(mut self, fields: FieldMap) -> Self {
        self.fields.extend(fields);
        self
    }

    #[must_use]
    pub fn field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<crate::core::FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    #[track_caller]
    pub fn log(&self, level: Level, message: impl Into<String>) {
        self.logger.emit(
            level,
            message.into(),
            Some(&self.data),
            Some(&self.fields),
            self.channel.as_deref(),
        );
    }

    #[track_caller]
    pub fn trace(&self, message: impl Into<String>) {
        self.log(Level::Trace, message);
    }

    #[track_caller]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(Level::Debug, message);
    }

    #[track_caller]
    pub fn info(&self, message: impl Into<String>) {
        self.log(Level::Info, message);
    }

    #[track_caller]
    pub fn notice(&self, message: impl Into<String>) {
        self.log(Level::Notice, message);
    }

    #[track_caller]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(Level::Warn, message);
    }

    #[track_caller]
    pub fn error(&self, message: impl Into<String>) {
        self.log(Level::Error, message);
    }
}

/// Builder for constructing a Logger with a fluent API
///
/// # Example
/// ```
/// use logpipe::prelude::*;
///
/// let logger = Logger::builder()
///     .name("api")
///     .report_caller(true)
///     .build();
/// ```
pub struct LoggerBuilder {
    name: String,
    report_caller: bool,
    handlers: Vec<Arc<dyn Handler>>,
    processors: Vec<Arc<dyn Processor>>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            name: "logger".to_string(),
            report_caller: false,
            handlers: Vec::new(),
            processors: Vec::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn report_caller(mut self, enabled: bool) -> Self {
        self.report_caller = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn handler<H: Handler + 'static>(mut self, handler: H) -> Self {
        self.handlers.push(Arc::new(handler));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn shared_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn processor<P: Processor + 'static>(mut self, processor: P) -> Self {
        self.processors.push(Arc::new(processor));
        self
    }

    pub fn build(self) -> Logger {
        let logger = Logger::with_name(self.name);
        logger.set_report_caller(self.report_caller);
        for handler in self.handlers {
            logger.push_handler(handler);
        }
        for processor in self.processors {
            logger.push_processor(processor);
        }
        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::LogError;
    use std::sync::atomic::AtomicUsize;

    /// Counts delivered records; optionally fails every handle call.
    struct CountingHandler {
        min_level: Level,
        seen: AtomicUsize,
        flushed: AtomicUsize,
        fail: bool,
    }

    impl CountingHandler {
        fn new(min_level: Level) -> Self {
            Self {
                min_level,
                seen: AtomicUsize::new(0),
                flushed: AtomicUsize::new(0),
                fail: false,
            }
        }

        fn failing(min_level: Level) -> Self {
            Self {
                fail: true,
                ..Self::new(min_level)
            }
        }
    }

    impl Handler for CountingHandler {
        fn is_handling(&self, level: Level) -> bool {
            self.min_level.should_handle(level)
        }

        fn handle(&self, _record: &Record) -> Result<()> {
            self.seen.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(LogError::format("counting", "forced failure"));
            }
            Ok(())
        }

        fn flush(&self) -> Result<()> {
            self.flushed.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn close(&self) -> Result<()> {
            Ok(())
        }
    }

    fn quiet(logger: &Logger) {
        logger.set_error_output(Box::new(std::io::sink()));
    }

    #[test]
    fn test_no_handler_short_circuit() {
        let logger = Logger::new();
        assert!(!logger.is_handling(Level::Error));
        // Must not panic or block with zero handlers.
        logger.info("dropped on the floor");
    }

    #[test]
    fn test_dispatch_respects_handler_gate() {
        let logger = Logger::new();
        let errors = Arc::new(CountingHandler::new(Level::Error));
        let all = Arc::new(CountingHandler::new(Level::Trace));
        logger.push_handler(errors.clone());
        logger.push_handler(all.clone());

        logger.info("info event");
        logger.error("error event");

        assert_eq!(errors.seen.load(Ordering::SeqCst), 1);
        assert_eq!(all.seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_failing_handler_does_not_block_siblings() {
        let logger = Logger::new();
        quiet(&logger);
        let first = Arc::new(CountingHandler::failing(Level::Trace));
        let second = Arc::new(CountingHandler::new(Level::Trace));
        logger.push_handler(first.clone());
        logger.push_handler(second.clone());

        logger.warn("still delivered");

        assert_eq!(first.seen.load(Ordering::SeqCst), 1);
        assert_eq!(second.seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_processors_run_in_registration_order() {
        let logger = Logger::new();
        let sink = Arc::new(CountingHandler::new(Level::Trace));
        logger.push_handler(sink);
        logger.add_processor(|r: &mut Record| r.add_field("step", "first"));
        logger.add_processor(|r: &mut Record| r.add_field("step", "second"));

        // The second processor overwrites the first; verified through a
        // capturing processor since CountingHandler drops the record.
        let captured = Arc::new(Mutex::new(None));
        let captured_clone = Arc::clone(&captured);
        logger.add_processor(move |r: &mut Record| {
            *captured_clone.lock() = r.fields.get("step").cloned();
        });

        logger.info("x");
        assert_eq!(
            captured.lock().clone(),
            Some(crate::core::FieldValue::from("second"))
        );
    }

    #[test]
    fn test_exit_runs_handlers_in_chain_order() {
        let logger = Logger::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        let o = Arc::clone(&order);
        logger.register_exit_handler(move || o.lock().push("appended"));
        let o = Arc::clone(&order);
        logger.prepend_exit_handler(move || o.lock().push("prepended"));

        logger.set_exit_func(do_nothing_on_exit);
        logger.exit(0);

        assert_eq!(*order.lock(), vec!["prepended", "appended"]);
    }

    #[test]
    fn test_exit_flushes_with_zero_exit_handlers() {
        let logger = Logger::new();
        let sink = Arc::new(CountingHandler::new(Level::Trace));
        logger.push_handler(sink.clone());

        let code = Arc::new(Mutex::new(None));
        let code_clone = Arc::clone(&code);
        logger.set_exit_func(move |c| *code_clone.lock() = Some(c));

        logger.exit(34);

        assert_eq!(*code.lock(), Some(34));
        assert!(sink.flushed.load(Ordering::SeqCst) >= 1);
    }

    #[test]
    fn test_panicking_exit_handler_is_isolated() {
        let logger = Logger::new();
        quiet(&logger);
        let ran_second = Arc::new(AtomicBool::new(false));

        logger.register_exit_handler(|| panic!("test error"));
        let flag = Arc::clone(&ran_second);
        logger.register_exit_handler(move || flag.store(true, Ordering::SeqCst));

        logger.set_exit_func(do_nothing_on_exit);
        logger.exit(0);

        assert!(ran_second.load(Ordering::SeqCst));
    }

    #[test]
    fn test_fatal_invokes_exit_func() {
        let logger = Logger::new();
        let sink = Arc::new(CountingHandler::new(Level::Trace));
        logger.push_handler(sink.clone());

        let code = Arc::new(Mutex::new(None));
        let code_clone = Arc::clone(&code);
        logger.set_exit_func(move |c| *code_clone.lock() = Some(c));

        logger.fatal("unrecoverable");

        assert_eq!(*code.lock(), Some(1));
        assert_eq!(sink.seen.load(Ordering::SeqCst), 1);
        assert!(sink.flushed.load(Ordering::SeqCst) >= 1);
    }

    #[test]
    #[should_panic(expected = "boom")]
    fn test_panic_level_panics_after_flush() {
        let logger = Logger::new();
        logger.push_handler(Arc::new(CountingHandler::new(Level::Trace)));
        logger.panic("boom");
    }

    #[test]
    fn test_flush_timeout_completes() {
        let logger = Logger::new();
        logger.push_handler(Arc::new(CountingHandler::new(Level::Trace)));
        assert!(logger.flush_timeout(Duration::from_secs(1)));
    }

    #[test]
    fn test_flush_daemon_starts_once() {
        let logger = Arc::new(Logger::new());
        assert!(logger.flush_daemon(Duration::from_secs(60)));
        assert!(!logger.flush_daemon(Duration::from_secs(60)));
    }

    #[test]
    fn test_record_builder_sibling_isolation() {
        let logger = Logger::new();
        let captured = Arc::new(Mutex::new(Vec::new()));
        let captured_clone = Arc::clone(&captured);
        logger.push_handler(Arc::new(CountingHandler::new(Level::Trace)));
        logger.add_processor(move |r: &mut Record| {
            captured_clone.lock().push(r.fields.clone());
        });

        let builder = logger.with_fields(crate::field_map! { "base" => 1 });
        builder.info("first");
        builder.info("second");

        let seen = captured.lock();
        assert_eq!(seen.len(), 2);
        // Processor mutation of the first record must not leak into the
        // second: both start from the same base mapping.
        assert_eq!(seen[0], seen[1]);
    }

    #[test]
    fn test_reset_discards_everything() {
        let logger = Logger::new();
        logger.push_handler(Arc::new(CountingHandler::new(Level::Trace)));
        logger.add_processor(|r: &mut Record| r.add_field("x", 1));
        logger.register_exit_handler(|| {});
        logger.set_report_caller(true);

        logger.reset();

        assert_eq!(logger.handler_count(), 0);
        assert_eq!(logger.exit_handler_count(), 0);
        assert!(!logger.reports_caller());
    }
}
