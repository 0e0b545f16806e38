//! Runtime hook error types.

use std::error::Error;
use std::fmt;

/// Errors from [`sort_strided`](crate::sort_strided).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SortError {
    /// The buffer length is not a whole number of elements.
    Misaligned {
        /// Buffer length in bytes.
        len: usize,
        /// Element width in bytes.
        width: usize,
    },
}

impl fmt::Display for SortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Misaligned { len, width } => {
                write!(f, "buffer of {len} bytes is not a multiple of element width {width}")
            }
        }
    }
}

impl Error for SortError {}
