//! Formatting macros for leveled logging.
//!
//! These are the printf-style variants of the plain logging methods:
//! arguments go through `format!` before dispatch.
//!
//! # Examples
//!
//! ```
//! use logpipe::prelude::*;
//! use logpipe::infof;
//!
//! let logger = Logger::new();
//!
//! let port = 8080;
//! infof!(logger, "server listening on port {}", port);
//! ```

/// Log a formatted message at an explicit level.
///
/// # Examples
///
/// ```
/// # use logpipe::prelude::*;
/// # let logger = Logger::new();
/// use logpipe::logf;
/// logf!(logger, Level::Info, "simple message");
/// logf!(logger, Level::Error, "error code: {}", 500);
/// ```
#[macro_export]
macro_rules! logf {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

/// Log a formatted message at level Print.
#[macro_export]
macro_rules! printf {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logf!($logger, $crate::core::Level::Print, $($arg)+)
    };
}

/// Log a formatted message at level Trace.
#[macro_export]
macro_rules! tracef {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logf!($logger, $crate::core::Level::Trace, $($arg)+)
    };
}

/// Log a formatted message at level Debug.
#[macro_export]
macro_rules! debugf {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logf!($logger, $crate::core::Level::Debug, $($arg)+)
    };
}

/// Log a formatted message at level Info.
///
/// # Examples
///
/// ```
/// # use logpipe::prelude::*;
/// # let logger = Logger::new();
/// use logpipe::infof;
/// infof!(logger, "processing {} items", 100);
/// ```
#[macro_export]
macro_rules! infof {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logf!($logger, $crate::core::Level::Info, $($arg)+)
    };
}

/// Log a formatted message at level Notice.
#[macro_export]
macro_rules! noticef {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logf!($logger, $crate::core::Level::Notice, $($arg)+)
    };
}

/// Log a formatted message at level Warn.
#[macro_export]
macro_rules! warnf {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logf!($logger, $crate::core::Level::Warn, $($arg)+)
    };
}

/// Log a formatted message at level Error.
#[macro_export]
macro_rules! errorf {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logf!($logger, $crate::core::Level::Error, $($arg)+)
    };
}

/// Log a formatted message at level Fatal, then exit through the
/// logger's configured exit function.
#[macro_export]
macro_rules! fatalf {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logf!($logger, $crate::core::Level::Fatal, $($arg)+)
    };
}

/// Log a formatted message at level Panic, then panic with it.
#[macro_export]
macro_rules! panicf {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logf!($logger, $crate::core::Level::Panic, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Level, Logger, Record};
    use crate::core::error::Result;
    use crate::core::Handler;
    use parking_lot::Mutex;
    use std::sync::Arc;

    struct Capture(Arc<Mutex<Vec<String>>>);

    impl Handler for Capture {
        fn is_handling(&self, _level: Level) -> bool {
            true
        }
        fn handle(&self, record: &Record) -> Result<()> {
            self.0.lock().push(record.message.clone());
            Ok(())
        }
        fn flush(&self) -> Result<()> {
            Ok(())
        }
        fn close(&self) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_logf_formats_arguments() {
        let messages = Arc::new(Mutex::new(Vec::new()));
        let logger = Logger::new();
        logger.add_handler(Capture(Arc::clone(&messages)));

        logf!(logger, Level::Info, "value: {}", 42);
        infof!(logger, "items: {}", 3);
        warnf!(logger, "retry {} of {}", 1, 5);

        let seen = messages.lock();
        assert_eq!(seen.as_slice(), ["value: 42", "items: 3", "retry 1 of 5"]);
    }
}
