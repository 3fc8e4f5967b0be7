//! Error type shared by the window reader and the record criteria.

use std::borrow::Cow;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, OplogError>;

#[derive(Debug, Error)]
pub enum OplogError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A mapped window holds bytes that are not valid UTF-8.
    #[error("window bytes are not valid UTF-8 at offset {offset} ({valid_up_to} bytes decoded)")]
    Decode { offset: u64, valid_up_to: usize },

    #[error("malformed record: {reason}")]
    MalformedRecord { reason: Cow<'static, str> },

    /// End of file was reached while a partial record was still pending.
    #[error("log ends with a truncated record of {len} bytes starting at offset {offset}")]
    TruncatedTrailingRecord { offset: u64, len: usize },

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: Cow<'static, str> },
}

impl From<serde_json::Error> for OplogError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidConfig {
            reason: err.to_string().into(),
        }
    }
}
