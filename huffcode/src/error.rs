//! Error types for Huffman coding operations

use std::io;
use thiserror::Error;

/// Errors returned by the frequency, tree and codec layers
#[derive(Error, Debug)]
pub enum Error {
    /// A symbol could not be encoded (not present in the frequency table)
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The codec is not in a state that permits the operation
    #[error("State error: {0}")]
    State(String),

    /// A bit-sequence or serialized tree is malformed
    #[error("Format error: {0}")]
    Format(String),

    /// Configuration could not be parsed or written
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error while reading or writing serialized data
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Create an encoding error
    pub fn encoding<S: Into<String>>(msg: S) -> Self {
        Error::Encoding(msg.into())
    }

    /// Create a state error
    pub fn state<S: Into<String>>(msg: S) -> Self {
        Error::State(msg.into())
    }

    /// Create a format error
    pub fn format<S: Into<String>>(msg: S) -> Self {
        Error::Format(msg.into())
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Whether this error reports malformed input data
    pub fn is_format(&self) -> bool {
        matches!(self, Error::Format(_))
    }
}

/// Result type alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
