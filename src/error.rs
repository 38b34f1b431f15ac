//! Error types for nerfuse.

use thiserror::Error;

/// Result type for nerfuse operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for nerfuse operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Invalid or contradictory annotation mode configuration.
    ///
    /// Fatal: surfaced to the caller before any sentence is processed.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// A source returned a span that is empty or exceeds the sentence.
    ///
    /// Fatal for the offending sentence only; the sentence is skipped and
    /// the failure is reported with its index.
    #[error("invalid span [{start}, {end}) for sentence of {len} tokens")]
    InvalidSpan {
        /// Start token index (inclusive).
        start: usize,
        /// End token index (exclusive).
        end: usize,
        /// Token count of the sentence.
        len: usize,
    },

    /// Entity type has no CoNLL 3-letter code.
    ///
    /// Fatal for that entity's line emission; encoding continues with the
    /// remaining tokens of the sentence.
    #[error("entity type {0:?} has no CoNLL code")]
    UnknownType(String),

    /// Token identifiers could not be resolved for a span.
    ///
    /// Indicates a logic defect upstream (fusion should have rejected the
    /// span), so this aborts the whole run.
    #[error("token range out of bounds: {0}")]
    OutOfRange(String),
}

impl Error {
    /// Create a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration(msg.into())
    }

    /// Create an unknown entity type error.
    pub fn unknown_type(entity_type: impl Into<String>) -> Self {
        Error::UnknownType(entity_type.into())
    }

    /// Create an out of range error.
    pub fn out_of_range(msg: impl Into<String>) -> Self {
        Error::OutOfRange(msg.into())
    }
}
