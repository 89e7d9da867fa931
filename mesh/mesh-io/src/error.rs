//! Error types for STL I/O operations.

use std::collections::TryReserveError;
use std::path::PathBuf;

use mesh_types::ErrorKind;
use thiserror::Error;

/// Result type for STL I/O operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur during STL I/O operations.
#[derive(Debug, Error)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// Output file already exists.
    #[error("output file already exists: {path}")]
    AlreadyExists {
        /// Path that was occupied.
        path: PathBuf,
    },

    /// The data is text STL, which is not supported.
    #[error("text STL is not supported (header starts with \"solid\")")]
    AsciiStl,

    /// The input ended before a field was complete.
    #[error("truncated input: {field} needs {needed} bytes at offset {offset}, {available} available")]
    Truncated {
        /// Field being read.
        field: &'static str,
        /// Byte offset of the field.
        offset: usize,
        /// Bytes the field needs.
        needed: usize,
        /// Bytes remaining at the offset.
        available: usize,
    },

    /// Facet storage could not be allocated.
    #[error("cannot allocate {facets} facets: {source}")]
    OutOfMemory {
        /// Requested facet count.
        facets: usize,
        /// Allocator error.
        #[source]
        source: TryReserveError,
    },

    /// The model has more facets than the 32-bit count field can hold.
    #[error("too many facets for binary STL: {count}")]
    TooManyFacets {
        /// Facet count of the model.
        count: usize,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IoError {
    /// Create a `Truncated` error for `field` at `offset`.
    #[must_use]
    pub const fn truncated(
        field: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    ) -> Self {
        Self::Truncated {
            field,
            offset,
            needed,
            available,
        }
    }

    /// Failure category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::FileNotFound { .. } | Self::Io(_) => ErrorKind::Io,
            Self::AlreadyExists { .. } => ErrorKind::Conflict,
            Self::AsciiStl => ErrorKind::UnsupportedFormat,
            Self::Truncated { .. } => ErrorKind::TruncatedInput,
            Self::OutOfMemory { .. } => ErrorKind::Memory,
            Self::TooManyFacets { .. } => ErrorKind::InvalidArgument,
        }
    }
}
