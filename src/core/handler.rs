//! Handler contract and shared handler plumbing
//!
//! A handler is a sink plus a level-acceptance policy. Concrete sinks
//! compose a [`HandlerBase`] (policy + formatter) instead of inheriting
//! shared state; the polymorphic surface stays minimal and variant
//! configuration lives on the concrete constructors.

use crate::core::error::Result;
use crate::core::formatter::Formatter;
use crate::core::level::Level;
use crate::core::record::Record;
use std::sync::Arc;

/// Sink contract: level gate, record delivery and lifecycle.
///
/// Methods take `&self`; a sink that needs write-state owns its own
/// mutex. Locks are never shared across handler instances.
pub trait Handler: Send + Sync {
    fn is_handling(&self, level: Level) -> bool;

    fn handle(&self, record: &Record) -> Result<()>;

    fn flush(&self) -> Result<()>;

    fn close(&self) -> Result<()>;
}

/// Level acceptance policy: a single permissive threshold, or an
/// explicit allow-list of levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelPolicy {
    Threshold(Level),
    List(Vec<Level>),
}

impl LevelPolicy {
    #[must_use]
    pub fn allows(&self, level: Level) -> bool {
        match self {
            LevelPolicy::Threshold(min) => min.should_handle(level),
            LevelPolicy::List(levels) => levels.contains(&level),
        }
    }
}

impl Default for LevelPolicy {
    fn default() -> Self {
        LevelPolicy::Threshold(Level::Info)
    }
}

impl From<Level> for LevelPolicy {
    fn from(level: Level) -> Self {
        LevelPolicy::Threshold(level)
    }
}

impl From<Vec<Level>> for LevelPolicy {
    fn from(levels: Vec<Level>) -> Self {
        LevelPolicy::List(levels)
    }
}

impl From<&[Level]> for LevelPolicy {
    fn from(levels: &[Level]) -> Self {
        LevelPolicy::List(levels.to_vec())
    }
}

/// Level policy and formatter shared by every concrete sink.
#[derive(Clone)]
pub struct HandlerBase {
    pub policy: LevelPolicy,
    pub formatter: Arc<dyn Formatter>,
}

impl HandlerBase {
    pub fn new(policy: impl Into<LevelPolicy>, formatter: Arc<dyn Formatter>) -> Self {
        Self {
            policy: policy.into(),
            formatter,
        }
    }

    #[must_use]
    pub fn is_handling(&self, level: Level) -> bool {
        self.policy.allows(level)
    }

    pub fn format(&self, record: &Record) -> Result<Vec<u8>> {
        self.formatter.format(record)
    }
}

/// A handler that exposes its formatter and a raw byte path to its sink.
///
/// This is the seam the buffered decorator plugs into: it formats through
/// the wrapped handler's formatter and drains its buffer straight to the
/// sink, bypassing per-record handling.
pub trait WriterHandler: Handler {
    fn formatter(&self) -> Arc<dyn Formatter>;

    /// Write already-formatted bytes directly to the underlying sink.
    fn write_bytes(&self, bytes: &[u8]) -> Result<()>;
}
