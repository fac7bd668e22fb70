//! Error types for the Almanac library.
//!
//! Every fallible operation in the core returns a [`CoreResult`]; nothing
//! panics across the crate boundary.

use thiserror::Error;

/// A specialized Result type for Almanac operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The main error type for Almanac operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A datetime field is outside its valid range.
    #[error("Invalid datetime: {message}")]
    InvalidDatetime {
        /// Description of the offending field.
        message: String,
    },

    /// Text did not match the ISO-8601 grammar.
    #[error("Cannot parse '{input}': {reason}")]
    Parse {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A delta was scaled by a factor below one.
    #[error("Invalid scale factor: {factor} (must be at least 1)")]
    InvalidScale {
        /// The rejected factor.
        factor: i64,
    },

    /// A UTC offset is a day or more away from UTC.
    #[error("Invalid UTC offset: {minutes} minutes")]
    InvalidOffset {
        /// The rejected offset in minutes.
        minutes: i64,
    },

    /// Arithmetic left the representable datetime range.
    #[error("Out of range: {message}")]
    OutOfRange {
        /// Description of the overflow.
        message: String,
    },

    /// A binary or JSON payload could not be decoded.
    #[error("Decode error: {reason}")]
    Decode {
        /// Description of the failure.
        reason: String,
    },

    /// Configuration error.
    #[error("Configuration error: {reason}")]
    Config {
        /// Description of the configuration error.
        reason: String,
    },
}

impl CoreError {
    /// Creates an invalid datetime error.
    #[must_use]
    pub fn invalid_datetime(message: impl Into<String>) -> Self {
        Self::InvalidDatetime {
            message: message.into(),
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Creates an out-of-range error.
    #[must_use]
    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::OutOfRange {
            message: message.into(),
        }
    }

    /// Creates a decode error.
    #[must_use]
    pub fn decode(reason: impl Into<String>) -> Self {
        Self::Decode {
            reason: reason.into(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}
