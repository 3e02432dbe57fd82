//! Severity levels
//!
//! Lower numeric value means more severe. A threshold level accepts
//! every event at least as severe as itself, so `Level::Warn` accepts
//! Warn, Error, Fatal and Panic but rejects Notice and below.

use crate::core::error::LogError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u32)]
pub enum Level {
    /// Logs and then panics with the record message.
    Panic = 100,
    /// Logs and then invokes the logger's exit function with code 1.
    Fatal = 200,
    Error = 300,
    Warn = 400,
    Notice = 500,
    Info = 600,
    Debug = 700,
    Trace = 800,
    /// Unconditional output, least severe.
    Print = 900,
}

/// Every level, most severe first.
pub const ALL_LEVELS: [Level; 9] = [
    Level::Panic,
    Level::Fatal,
    Level::Error,
    Level::Warn,
    Level::Notice,
    Level::Info,
    Level::Debug,
    Level::Trace,
    Level::Print,
];

/// Levels that indicate a problem.
pub const DANGER_LEVELS: [Level; 4] = [Level::Panic, Level::Fatal, Level::Error, Level::Warn];

/// Routine levels.
pub const NORMAL_LEVELS: [Level; 5] = [
    Level::Notice,
    Level::Info,
    Level::Debug,
    Level::Trace,
    Level::Print,
];

impl Level {
    /// True when a handler gated at `self` accepts an event at `event`:
    /// the event must be at least as severe (numerically at most `self`).
    #[must_use]
    pub fn should_handle(self, event: Level) -> bool {
        self as u32 >= event as u32
    }

    /// Canonical uppercase wire name. Warn renders as "WARNING".
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Panic => "PANIC",
            Level::Fatal => "FATAL",
            Level::Error => "ERROR",
            Level::Warn => "WARNING",
            Level::Notice => "NOTICE",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
            Level::Print => "PRINT",
        }
    }

    /// Map a numeric value back to its level, if it is one.
    #[must_use]
    pub fn from_value(value: u32) -> Option<Level> {
        ALL_LEVELS.iter().copied().find(|l| *l as u32 == value)
    }

    /// Name for a numeric value, "UNKNOWN" for unmapped values.
    #[must_use]
    pub fn name_of(value: u32) -> &'static str {
        Level::from_value(value).map_or("UNKNOWN", Level::as_str)
    }

    /// Terminal color for the level token.
    #[cfg(feature = "console")]
    #[must_use]
    pub fn color(self) -> colored::Color {
        use colored::Color;
        match self {
            Level::Panic | Level::Fatal => Color::BrightRed,
            Level::Error => Color::Red,
            Level::Warn => Color::Yellow,
            Level::Notice => Color::Cyan,
            Level::Info => Color::Green,
            Level::Debug => Color::Blue,
            Level::Trace => Color::Magenta,
            Level::Print => Color::White,
        }
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::Info
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LogError;

    /// Case-insensitive. Accepts the canonical names plus the common
    /// short forms; the empty string maps to the default level.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "panic" => Ok(Level::Panic),
            "fatal" => Ok(Level::Fatal),
            "err" | "error" => Ok(Level::Error),
            "warn" | "warning" => Ok(Level::Warn),
            "notice" => Ok(Level::Notice),
            "info" | "" => Ok(Level::Info),
            "debug" => Ok(Level::Debug),
            "trace" => Ok(Level::Trace),
            "print" => Ok(Level::Print),
            _ => Err(LogError::UnknownLevelName(s.to_string())),
        }
    }
}
