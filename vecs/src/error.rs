//! Error types for vector file I/O

use std::path::PathBuf;
use thiserror::Error;
use vecs_core::VecFormat;

/// Errors raised while opening or reading a vector file
#[derive(Debug, Error)]
pub enum ReadError {
    /// The file name does not end in `.fvecs` or `.ivecs`.
    #[error("Unknown file format for {}. Please use .fvecs or .ivecs files.", .path.display())]
    UnsupportedFormat { path: PathBuf },

    /// The file could not be opened or inspected.
    #[error("Failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bytes for the structural scan could not be loaded.
    #[error("Failed to load prefix of {}: {source}", .path.display())]
    Prefix {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The byte source failed for a reason other than running out of data.
    #[error("Error reading vector {index}: {source}")]
    Io {
        index: usize,
        #[source]
        source: std::io::Error,
    },

    /// The data ended partway through a record header.
    #[error("Error reading vector {index}: truncated header ({available} of 4 bytes)")]
    TruncatedHeader { index: usize, available: usize },

    /// A record header declares a negative element count.
    #[error("Error reading vector {index}: negative length {value}")]
    NegativeLength { index: usize, value: i32 },

    /// A record in a uniform file has a different dimension than the first.
    #[error("Dimension mismatch at vector {index}: expected {expected}, found {found}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        found: i32,
    },

    /// Records are narrower than the caller requires.
    #[error("Vector {index} contains only {dim} values, but {required} are needed")]
    TooNarrow {
        index: usize,
        dim: usize,
        required: usize,
    },

    /// The requested element type does not match the file format.
    #[error("{} holds {format} data, not {requested}", .path.display())]
    ElementType {
        path: PathBuf,
        format: VecFormat,
        requested: VecFormat,
    },
}

impl ReadError {
    /// Index of the record being read when the error occurred
    pub fn record_index(&self) -> Option<usize> {
        match self {
            ReadError::Io { index, .. }
            | ReadError::TruncatedHeader { index, .. }
            | ReadError::NegativeLength { index, .. }
            | ReadError::DimensionMismatch { index, .. }
            | ReadError::TooNarrow { index, .. } => Some(*index),
            ReadError::UnsupportedFormat { .. }
            | ReadError::Open { .. }
            | ReadError::Prefix { .. }
            | ReadError::ElementType { .. } => None,
        }
    }
}

/// A convenience `Result` type alias using the crate's `ReadError` type.
pub type Result<T> = std::result::Result<T, ReadError>;
