//! Error types for image I/O.

use std::io;
use thiserror::Error;

use stretch_core::StretchError;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Unsupported or unrecognised file format.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Decoding error.
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Encoding error.
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Unsupported colour type / bit depth combination.
    #[error("unsupported bit depth: {0}")]
    UnsupportedBitDepth(String),

    /// Decoded buffer rejected by the core image types.
    #[error(transparent)]
    Image(#[from] StretchError),
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
