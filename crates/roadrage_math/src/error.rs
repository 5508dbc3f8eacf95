//! Error types for the math crate
//!
//! Numeric degeneracies (zero scale, zero-length normalization, ...) are
//! never errors; they are resolved in place. Only indexing mistakes and
//! binary decoding failures are reported.

use std::fmt;
use std::io;

/// Error returned by checked element access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    /// Flat index past the end of a vector, quaternion or matrix
    IndexOutOfRange { index: usize, len: usize },
    /// 1-based (row, column) outside of a 4x4 matrix
    ElementOutOfRange { row: usize, col: usize },
}

impl fmt::Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MathError::IndexOutOfRange { index, len } => {
                write!(f, "Index {} out of range (length {})", index, len)
            }
            MathError::ElementOutOfRange { row, col } => {
                write!(f, "Element ({}, {}) out of range, rows and columns go from 1 to 4", row, col)
            }
        }
    }
}

impl std::error::Error for MathError {}

/// Error returned when reading or writing the binary representation
#[derive(Debug)]
pub enum CodecError {
    /// The underlying byte sink or source failed
    Io(io::Error),
    /// A decoded transform's stored inverse does not invert the matrix
    InconsistentInverse,
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::Io(err) => write!(f, "Codec IO error: {}", err),
            CodecError::InconsistentInverse => {
                write!(f, "Decoded matrix and inverse do not multiply to the identity")
            }
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CodecError::Io(err) => Some(err),
            CodecError::InconsistentInverse => None,
        }
    }
}

impl From<io::Error> for CodecError {
    fn from(err: io::Error) -> Self {
        CodecError::Io(err)
    }
}
