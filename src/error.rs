//! Data-quality faults raised while preparing a block for mixing.
//!
//! These are recovered locally by the processing cycle: the block is
//! dropped (or passed through, depending on the fault policy), the fault is
//! logged and counted, and the stream keeps running.

use std::fmt;

/// A specialized Result type for block-level faults
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Upstream declared a sample interval that is zero, negative, NaN or infinite
    InvalidSampleInterval { stream_id: String, xdelta: f64 },

    /// Complex-mode block whose interleaved buffer has an odd number of values
    MalformedBlock { stream_id: String, len: usize },

    /// Configuration value out of range
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidSampleInterval { stream_id, xdelta } => {
                write!(f, "invalid sample interval {} on stream {}", xdelta, stream_id)
            }
            Error::MalformedBlock { stream_id, len } => write!(
                f,
                "complex block on stream {} has odd length {}",
                stream_id, len
            ),
            Error::Config(msg) => write!(f, "configuration error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
