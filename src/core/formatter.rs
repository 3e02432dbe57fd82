//! Formatter contract

use crate::core::error::Result;
use crate::core::record::Record;

/// Pure serializer from a record to bytes.
///
/// Implementations must be deterministic: the same record always formats
/// to the same byte sequence.
pub trait Formatter: Send + Sync {
    fn format(&self, record: &Record) -> Result<Vec<u8>>;
}

impl<F> Formatter for F
where
    F: Fn(&Record) -> Result<Vec<u8>> + Send + Sync,
{
    fn format(&self, record: &Record) -> Result<Vec<u8>> {
        self(record)
    }
}
