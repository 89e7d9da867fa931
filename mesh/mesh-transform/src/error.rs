//! Error types for model transformation operations.

use mesh_types::ErrorKind;
use thiserror::Error;

/// Result type for transformation operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// Errors that can occur when setting up a transformation.
///
/// Applying a transformation cannot fail; only parsing its parameters can.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The axis name is not one of `x`, `y`, `z`.
    #[error("unknown rotation axis: {0:?} (expected x, y or z)")]
    UnknownAxis(String),
}

impl TransformError {
    /// Failure category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownAxis(_) => ErrorKind::InvalidArgument,
        }
    }
}
