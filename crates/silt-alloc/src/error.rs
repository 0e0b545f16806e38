//! Allocator-specific error types.

use core::error::Error;
use core::fmt;

/// Errors an [`Allocator`](crate::Allocator) can report.
///
/// Only [`OutOfMemory`](AllocError::OutOfMemory) is expected in normal
/// operation. At the C boundary every variant collapses to a null pointer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// The backing allocator could not satisfy the request.
    OutOfMemory {
        /// Number of bytes requested.
        requested: usize,
    },
    /// The request size cannot be expressed as a valid layout.
    InvalidSize {
        /// Number of bytes requested.
        requested: usize,
    },
    /// A pointer that this allocator did not hand out.
    InvalidAddress,
    /// The allocator does not implement the operation.
    Unsupported {
        /// Name of the missing operation.
        operation: &'static str,
    },
    /// A required callback in a host vtable was null.
    MissingCallback {
        /// Name of the vtable slot.
        name: &'static str,
    },
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfMemory { requested } => {
                write!(f, "out of memory: requested {requested} bytes")
            }
            Self::InvalidSize { requested } => {
                write!(f, "invalid allocation size: {requested} bytes")
            }
            Self::InvalidAddress => write!(f, "pointer was not allocated by this allocator"),
            Self::Unsupported { operation } => {
                write!(f, "allocator does not support {operation}")
            }
            Self::MissingCallback { name } => {
                write!(f, "host allocator callback `{name}` is null")
            }
        }
    }
}

impl Error for AllocError {}

/// Errors from validating a [`HeapConfig`](crate::HeapConfig).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Alignment is not a power of two or is below the header's alignment.
    InvalidAlignment {
        /// The rejected alignment.
        alignment: usize,
        /// Smallest accepted alignment.
        minimum: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAlignment { alignment, minimum } => write!(
                f,
                "invalid alignment {alignment}: must be a power of two and at least {minimum}"
            ),
        }
    }
}

impl Error for ConfigError {}
