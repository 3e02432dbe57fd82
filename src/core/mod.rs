//! Core pipeline types and contracts

pub mod error;
pub mod field;
pub mod formatter;
pub mod handler;
pub mod level;
pub mod logger;
pub mod processor;
pub mod record;
pub mod timestamp;

pub use error::{LogError, Result};
pub use field::{format_map, map_to_json, FieldMap, FieldValue};
pub use formatter::Formatter;
pub use handler::{Handler, HandlerBase, LevelPolicy, WriterHandler};
pub use level::{Level, ALL_LEVELS, DANGER_LEVELS, NORMAL_LEVELS};
pub use logger::{do_nothing_on_exit, ExitCallback, ExitFunc, Logger, LoggerBuilder, RecordBuilder};
pub use processor::Processor;
pub use record::{Caller, Record, DEFAULT_CHANNEL};
pub use timestamp::TimestampFormat;
