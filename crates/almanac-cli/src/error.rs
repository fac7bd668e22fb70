//! CLI error types.

use almanac_core::CoreError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid datetime text.
    #[error("Invalid datetime: {0}. Use YYYY-MM-DDTHH:MM:SS+HH:MM or YYYY-MM-DD.")]
    InvalidDatetime(String),

    /// Year outside the configured window.
    #[error("Year {year} is outside the configured window {first}..={last}")]
    YearOutOfWindow {
        /// Requested year.
        year: i32,
        /// First allowed year.
        first: i32,
        /// Last allowed year.
        last: i32,
    },

    /// Delta was empty.
    #[error("Missing delta: pass at least one of --years, --months, --days, --hours, --minutes, --seconds")]
    EmptyDelta,

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from the core library.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
