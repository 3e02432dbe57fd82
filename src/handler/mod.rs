//! Handler implementations

pub mod buffered;
pub mod console;
pub mod file;
pub mod writer;

pub use buffered::{BufferedHandler, DEFAULT_FLUSH_INTERVAL};
pub use console::ConsoleHandler;
pub use file::FileHandler;
pub use writer::{SharedBuf, WriterSink};

// Re-export the contracts for convenience
pub use crate::core::{Handler, LevelPolicy, WriterHandler};
