//! Error types for HueConsole

use thiserror::Error;

/// Errors raised by the document buffer and the escape decoder
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocError {
    /// A destructive edit or caret placement outside the editable region
    #[error("invalid offset {offset} (limit {limit}, length {length})")]
    InvalidOffset {
        /// Offending offset, in characters
        offset: usize,
        /// Commit boundary at the time of the call
        limit: usize,
        /// Document length at the time of the call
        length: usize,
    },

    /// An escape sequence that is not part of the color table
    #[error("malformed escape sequence: {0}")]
    MalformedEscape(String),
}

/// Main error type for HueConsole operations
#[derive(Error, Debug)]
pub enum ConsoleError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Document or decoder error
    #[error("Document error: {0}")]
    Document(#[from] DocError),

    /// A submitted line could not be parsed into the requested type
    #[error("Cannot parse '{input}': {reason}")]
    Parse {
        /// The submitted line
        input: String,
        /// Why parsing failed
        reason: String,
    },

    /// The console was dropped while a reader was waiting for input
    #[error("Console input stream closed")]
    Closed,

    /// Generic error
    #[error("Error: {0}")]
    Generic(String),
}
