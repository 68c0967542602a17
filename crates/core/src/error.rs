//! Error types for the record store
//!
//! Every fallible operation in the workspace returns [`Error`]. Errors are
//! handed back to the immediate caller untouched; nothing is retried, logged
//! or swallowed on the way out.

use std::fmt::Display;
use thiserror::Error;

/// All record store errors.
#[derive(Debug, Error)]
pub enum Error {
    /// File open/read/write or directory creation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored bytes could not be interpreted as the requested type
    ///
    /// Raised for the whole backing file at load time, or for a single record
    /// at read time.
    #[error("decode error: {reason}")]
    Decode {
        /// What went wrong
        reason: String,
    },

    /// A payload could not be serialized
    #[error("encode error: {reason}")]
    Encode {
        /// What went wrong
        reason: String,
    },

    /// Store options could not be parsed or are inconsistent
    #[error("invalid configuration: {reason}")]
    Config {
        /// What went wrong
        reason: String,
    },
}

/// Result type for record store operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build a decode error from any displayable cause
    pub fn decode(reason: impl Display) -> Self {
        Error::Decode {
            reason: reason.to_string(),
        }
    }

    /// Build an encode error from any displayable cause
    pub fn encode(reason: impl Display) -> Self {
        Error::Encode {
            reason: reason.to_string(),
        }
    }

    /// Build a configuration error from any displayable cause
    pub fn config(reason: impl Display) -> Self {
        Error::Config {
            reason: reason.to_string(),
        }
    }

    /// Check if this is an I/O error.
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io(_))
    }

    /// Check if this is a decode error.
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode { .. })
    }

    /// Check if this is an encode error.
    pub fn is_encode(&self) -> bool {
        matches!(self, Error::Encode { .. })
    }

    /// Check if this is a configuration error.
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config { .. })
    }
}
