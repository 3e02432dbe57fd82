//! Error types for the logging pipeline

pub type Result<T> = std::result::Result<T, LogError>;

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// A formatter failed to serialize a record
    #[error("format error ({formatter}): {message}")]
    Format { formatter: String, message: String },

    /// A sink write or flush failed
    #[error("write error on {sink}: {source}")]
    Write {
        sink: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A level name failed to parse
    #[error("unknown level name: {0:?}")]
    UnknownLevelName(String),

    /// An exit handler panicked; caught, logged and never re-raised
    #[error("Run exit handler error: {0}")]
    ExitHandlerPanic(String),
}

impl LogError {
    /// Create a formatter error
    pub fn format(formatter: impl Into<String>, message: impl Into<String>) -> Self {
        LogError::Format {
            formatter: formatter.into(),
            message: message.into(),
        }
    }

    /// Create a sink write error
    pub fn write(sink: impl Into<String>, source: std::io::Error) -> Self {
        LogError::Write {
            sink: sink.into(),
            source,
        }
    }
}
