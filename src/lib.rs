//! # logpipe
//!
//! Lightweight, extensible structured logging: leveled events flow
//! through pluggable processors and formatters into one or more
//! handlers, with buffering, flushing and graceful-exit semantics.
//!
//! ## Features
//!
//! - **Pluggable pipeline**: handlers, formatters and processors are
//!   small traits composed at setup time
//! - **Level policies**: per-handler thresholds or explicit allow-lists
//! - **Buffered writes**: count/byte-threshold batching decorator
//! - **Exit safety**: panic-isolated exit-handler chain with
//!   flush-on-exit guarantees
//!
//! ## Quick start
//!
//! ```
//! use logpipe::prelude::*;
//!
//! let logger = Logger::builder()
//!     .name("app")
//!     .handler(ConsoleHandler::new(Level::Debug))
//!     .build();
//!
//! logger.info("service started");
//! logger.with_fields(logpipe::field_map! { "user" => "alice" })
//!     .warn("login throttled");
//! ```

pub mod core;
pub mod format;
pub mod global;
pub mod handler;
pub mod macros;
pub mod processors;

pub mod prelude {
    pub use crate::core::{
        do_nothing_on_exit, Caller, FieldMap, FieldValue, Formatter, Handler, Level, LevelPolicy,
        LogError, Logger, LoggerBuilder, Processor, Record, RecordBuilder, Result,
        TimestampFormat, WriterHandler, ALL_LEVELS,
    };
    pub use crate::format::{JsonFormatter, TextFormatter};
    pub use crate::handler::{BufferedHandler, ConsoleHandler, FileHandler, SharedBuf, WriterSink};
    pub use crate::processors::{AddHostname, AddUniqueId, MemoryUsage};
}

pub use crate::core::{
    do_nothing_on_exit, Caller, FieldMap, FieldValue, Formatter, Handler, Level, LevelPolicy,
    LogError, Logger, LoggerBuilder, Processor, Record, RecordBuilder, Result, TimestampFormat,
    WriterHandler, ALL_LEVELS, DANGER_LEVELS, NORMAL_LEVELS,
};
pub use crate::format::{JsonFormatter, TextFormatter};
pub use crate::handler::{BufferedHandler, ConsoleHandler, FileHandler, SharedBuf, WriterSink};
pub use crate::global::default_logger;
