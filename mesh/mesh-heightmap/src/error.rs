//! Error types for heightmap triangulation.

use std::collections::TryReserveError;
use std::path::PathBuf;

use mesh_types::ErrorKind;
use thiserror::Error;

/// Result type alias for heightmap operations.
pub type HeightmapResult<T> = Result<T, HeightmapError>;

/// Errors that can occur while loading a grid or building a model from it.
#[derive(Debug, Error)]
pub enum HeightmapError {
    /// The grid is smaller than 2x2.
    #[error("invalid grid dimensions {cols}x{rows}: need at least 2x2")]
    InvalidDimensions {
        /// Number of columns.
        cols: usize,
        /// Number of rows.
        rows: usize,
    },

    /// The sample buffer does not hold exactly `cols * rows` values.
    #[error("a {cols}x{rows} grid needs {expected} samples, got {actual}")]
    SampleCount {
        /// Number of columns.
        cols: usize,
        /// Number of rows.
        rows: usize,
        /// Required sample count.
        expected: usize,
        /// Provided sample count.
        actual: usize,
    },

    /// The grid is too large for its sample or facet count to be represented.
    #[error("grid of {cols}x{rows} is too large")]
    GridTooLarge {
        /// Number of columns.
        cols: usize,
        /// Number of rows.
        rows: usize,
    },

    /// A numeric parameter is out of range.
    #[error("invalid {name}: {value} (must be greater than zero)")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },

    /// The origin name is not recognised.
    #[error("unknown grid origin: {0:?} (expected bottom-left or top-left)")]
    UnknownOrigin(String),

    /// The legacy full-grid floor was requested.
    #[error("the full-grid floor is no longer supported; use the fan floor")]
    UnsupportedFloor,

    /// Memory for samples or facets could not be reserved.
    #[error("cannot allocate {count} {what}: {source}")]
    OutOfMemory {
        /// What was being allocated.
        what: &'static str,
        /// Number of elements requested.
        count: usize,
        /// Allocator error.
        #[source]
        source: TryReserveError,
    },

    /// Heightmap file not found.
    #[error("heightmap file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// The heightmap file holds fewer bytes than the grid needs.
    #[error("heightmap file {path} holds {actual} bytes, grid needs {expected}")]
    ShortRead {
        /// File that was read.
        path: PathBuf,
        /// Bytes required.
        expected: usize,
        /// Bytes read.
        actual: usize,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HeightmapError {
    /// Create an invalid parameter error.
    #[must_use]
    pub const fn invalid_parameter(name: &'static str, value: f64) -> Self {
        Self::InvalidParameter { name, value }
    }

    /// Failure category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidDimensions { .. }
            | Self::SampleCount { .. }
            | Self::GridTooLarge { .. }
            | Self::InvalidParameter { .. }
            | Self::UnknownOrigin(_)
            | Self::UnsupportedFloor => ErrorKind::InvalidArgument,
            Self::OutOfMemory { .. } => ErrorKind::Memory,
            Self::FileNotFound { .. } | Self::ShortRead { .. } | Self::Io(_) => ErrorKind::Io,
        }
    }
}
