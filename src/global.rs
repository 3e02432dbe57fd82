//! Process-wide default logger
//!
//! A lazily-constructed `Logger` shared by the whole process, reachable
//! only through [`default_logger`]. [`reset`] swaps in a fresh instance
//! wholesale; handler references taken before the reset stay valid and
//! independently closable, they are just no longer reachable from here.

use crate::core::field::FieldMap;
use crate::core::handler::Handler;
use crate::core::level::Level;
use crate::core::logger::Logger;
use crate::core::processor::Processor;
use crate::core::FieldValue;
use crate::handler::ConsoleHandler;
use parking_lot::RwLock;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

static DEFAULT: OnceLock<RwLock<Arc<Logger>>> = OnceLock::new();

fn slot() -> &'static RwLock<Arc<Logger>> {
    DEFAULT.get_or_init(|| RwLock::new(Arc::new(new_default_logger())))
}

fn new_default_logger() -> Logger {
    Logger::builder()
        .name("default")
        .report_caller(true)
        .handler(ConsoleHandler::new(Level::Debug))
        .build()
}

/// Get the process-wide default logger.
pub fn default_logger() -> Arc<Logger> {
    slot().read().clone()
}

/// Replace the default logger with a fresh instance. Full replacement,
/// not incremental teardown.
pub fn reset() {
    *slot().write() = Arc::new(new_default_logger());
}

/// Configure the default logger in place.
pub fn configure(f: impl FnOnce(&Logger)) {
    f(&default_logger());
}

pub fn add_handler<H: Handler + 'static>(handler: H) {
    default_logger().add_handler(handler);
}

pub fn push_handler(handler: Arc<dyn Handler>) {
    default_logger().push_handler(handler);
}

pub fn add_processor<P: Processor + 'static>(processor: P) {
    default_logger().add_processor(processor);
}

pub fn set_exit_func(f: impl Fn(i32) + Send + Sync + 'static) {
    default_logger().set_exit_func(f);
}

pub fn register_exit_handler(f: impl Fn() + Send + Sync + 'static) {
    default_logger().register_exit_handler(f);
}

pub fn prepend_exit_handler(f: impl Fn() + Send + Sync + 'static) {
    default_logger().prepend_exit_handler(f);
}

/// Run the default logger's exit-handler chain, flush, and invoke its
/// exit function with `code`.
pub fn exit(code: i32) {
    default_logger().exit(code);
}

pub fn flush() -> crate::core::Result<()> {
    default_logger().flush_all()
}

pub fn flush_timeout(timeout: Duration) -> bool {
    default_logger().flush_timeout(timeout)
}

pub fn flush_daemon(interval: Duration) -> bool {
    default_logger().flush_daemon(interval)
}

// ----------------------------------------------------------------------
// Chained records against the default logger
// ----------------------------------------------------------------------

/// Start a chained record on the default logger with a data payload.
pub fn with_data(data: FieldMap) -> GlobalRecordBuilder {
    GlobalRecordBuilder::new().data(data)
}

/// Start a chained record on the default logger with fields.
pub fn with_fields(fields: FieldMap) -> GlobalRecordBuilder {
    GlobalRecordBuilder::new().fields(fields)
}

/// Like [`RecordBuilder`](crate::core::RecordBuilder), but owns its
/// handle on the default logger so it can outlive the accessor call.
pub struct GlobalRecordBuilder {
    logger: Arc<Logger>,
    channel: Option<String>,
    data: FieldMap,
    fields: FieldMap,
}

impl GlobalRecordBuilder {
    fn new() -> Self {
        Self {
            logger: default_logger(),
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
        V: Into<FieldValue>,
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
    pub fn debug(&self, message: impl Into<String>) {
        self.log(Level::Debug, message);
    }

    #[track_caller]
    pub fn info(&self, message: impl Into<String>) {
        self.log(Level::Info, message);
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

// ----------------------------------------------------------------------
// Leveled logging on the default logger
// ----------------------------------------------------------------------

#[track_caller]
pub fn log(level: Level, message: impl Into<String>) {
    default_logger().log(level, message);
}

#[track_caller]
pub fn print(message: impl Into<String>) {
    log(Level::Print, message);
}

#[track_caller]
pub fn trace(message: impl Into<String>) {
    log(Level::Trace, message);
}

#[track_caller]
pub fn debug(message: impl Into<String>) {
    log(Level::Debug, message);
}

#[track_caller]
pub fn info(message: impl Into<String>) {
    log(Level::Info, message);
}

#[track_caller]
pub fn notice(message: impl Into<String>) {
    log(Level::Notice, message);
}

#[track_caller]
pub fn warn(message: impl Into<String>) {
    log(Level::Warn, message);
}

#[track_caller]
pub fn error(message: impl Into<String>) {
    log(Level::Error, message);
}

#[track_caller]
pub fn fatal(message: impl Into<String>) {
    log(Level::Fatal, message);
}

#[track_caller]
pub fn panic(message: impl Into<String>) {
    log(Level::Panic, message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_map;
    use crate::format::JsonFormatter;
    use crate::handler::{SharedBuf, WriterSink};

    // Global state is process-wide, so everything that mutates the
    // default logger lives in this single test.
    #[test]
    fn test_default_logger_lifecycle() {
        reset();
        let logger = default_logger();
        assert_eq!(logger.name(), "default");
        assert!(logger.reports_caller());
        assert!(logger.is_handling(Level::Info));

        // Swap the console handler for a capture buffer.
        logger.reset();
        let buf = SharedBuf::new();
        logger.add_handler(
            WriterSink::new(buf.clone(), Level::Info)
                .with_formatter(std::sync::Arc::new(JsonFormatter::new())),
        );

        info("global message");
        with_fields(field_map! { "k" => "v" }).info("chained");

        let out = buf.as_string();
        assert!(out.contains("\"message\":\"global message\""));
        assert!(out.contains("\"k\":\"v\""));

        // Exit goes through the replaceable exit function.
        let recorded = std::sync::Arc::new(parking_lot::Mutex::new(None));
        let recorded_clone = std::sync::Arc::clone(&recorded);
        set_exit_func(move |code| *recorded_clone.lock() = Some(code));
        exit(34);
        assert_eq!(*recorded.lock(), Some(34));

        // A reset leaves previously-taken handles valid but orphaned.
        let before = default_logger();
        reset();
        assert!(!std::sync::Arc::ptr_eq(&before, &default_logger()));
        before.flush_all().expect("orphaned logger still flushes");
    }
}
