//! Shared failure taxonomy.

use std::fmt;

/// Category of a failed operation.
///
/// Each crate has its own error enum; all of them map onto one of these
/// kinds through a `kind()` method so callers can decide whether to retry
/// (for example under another path) without matching crate-specific
/// variants. Every kind is terminal for the operation that raised it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing input or out-of-range parameter.
    InvalidArgument,
    /// Open, read, write or short-transfer failure.
    Io,
    /// Allocation failure.
    Memory,
    /// Text-variant STL detected.
    UnsupportedFormat,
    /// Fewer bytes available than a field requires.
    TruncatedInput,
    /// Output path already exists.
    Conflict,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidArgument => "invalid argument",
            Self::Io => "I/O error",
            Self::Memory => "out of memory",
            Self::UnsupportedFormat => "unsupported format",
            Self::TruncatedInput => "truncated input",
            Self::Conflict => "conflict",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names() {
        assert_eq!(ErrorKind::Conflict.to_string(), "conflict");
        assert_eq!(ErrorKind::TruncatedInput.to_string(), "truncated input");
    }
}
