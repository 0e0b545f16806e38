//! C-compatible status codes.
//!
//! [`SiltStatus`] is a `repr(i32)` enum returned by every export that can
//! fail. The allocator proxies themselves do not return a status: their
//! failure signal is a null pointer.

use silt_alloc::{AllocError, ConfigError};

/// C-compatible status code.
///
/// `Ok` = 0, all errors are negative. Values are ABI-stable.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SiltStatus {
    /// Success.
    Ok = 0,
    /// An argument is null, out of range, or otherwise invalid.
    InvalidArgument = -1,
    /// A required host callback is null.
    MissingCallback = -2,
    /// The allocator could not satisfy the request.
    AllocationFailed = -3,
    /// A pointer the allocator did not hand out.
    InvalidAddress = -4,
    /// The allocator does not support the operation.
    Unsupported = -5,
    /// Configuration validation error.
    ConfigError = -6,
    /// A Rust panic was caught at the FFI boundary.
    Panicked = -128,
}

impl From<&AllocError> for SiltStatus {
    fn from(e: &AllocError) -> Self {
        match e {
            AllocError::OutOfMemory { .. } | AllocError::InvalidSize { .. } => {
                SiltStatus::AllocationFailed
            }
            AllocError::InvalidAddress => SiltStatus::InvalidAddress,
            AllocError::Unsupported { .. } => SiltStatus::Unsupported,
            AllocError::MissingCallback { .. } => SiltStatus::MissingCallback,
        }
    }
}

impl From<&ConfigError> for SiltStatus {
    fn from(_e: &ConfigError) -> Self {
        SiltStatus::ConfigError
    }
}
