//! Error types for band analysis.

use thiserror::Error;

/// Errors raised by the framer, the band analyzer and the waveform pipeline.
///
/// Both variants are fatal for the invocation that raised them: nothing is
/// clamped or skipped, and no partial waveform is ever returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A rate, factor or derived size is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The samples handed to the analyzer are empty, malformed or the wrong length.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Error::InvalidConfiguration(msg.into())
    }

    pub(crate) fn input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }
}

/// Convenience result type for band analysis.
pub type Result<T> = std::result::Result<T, Error>;
