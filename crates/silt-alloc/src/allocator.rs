//! The allocator capability the bridge forwards to.

#![allow(unsafe_code)]

use core::ptr::NonNull;

use crate::error::AllocError;

/// A host-controlled allocation context.
///
/// One implementation backs one [`AllocatorHandle`](crate::AllocatorHandle).
/// Methods take `&self`: the bridge performs no locking, so implementations
/// that keep state use interior mutability, and callers serialize all
/// operations on one handle.
pub trait Allocator {
    /// Allocate a fresh block of at least `size` bytes.
    ///
    /// The block's initial contents are unspecified.
    fn allocate(&self, size: usize) -> Result<NonNull<u8>, AllocError>;

    /// Resize the block at `ptr` to `new_size` bytes.
    ///
    /// The first `min(old_size, new_size)` bytes are preserved. The
    /// returned pointer may differ from `ptr`; on success the old pointer
    /// must no longer be used. On failure the original block is untouched.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by `allocate` or `resize` on this same
    /// allocator and not released since.
    unsafe fn resize(&self, ptr: NonNull<u8>, new_size: usize) -> Result<NonNull<u8>, AllocError>;

    /// Return the block at `ptr` to the allocator.
    ///
    /// # Safety
    ///
    /// Same contract as [`resize`](Allocator::resize). `ptr` is dangling
    /// afterwards.
    unsafe fn release(&self, ptr: NonNull<u8>);
}

impl<A: Allocator + ?Sized> Allocator for &A {
    fn allocate(&self, size: usize) -> Result<NonNull<u8>, AllocError> {
        (**self).allocate(size)
    }

    unsafe fn resize(&self, ptr: NonNull<u8>, new_size: usize) -> Result<NonNull<u8>, AllocError> {
        // SAFETY: forwarded verbatim; the caller upholds the contract.
        unsafe { (**self).resize(ptr, new_size) }
    }

    unsafe fn release(&self, ptr: NonNull<u8>) {
        // SAFETY: forwarded verbatim; the caller upholds the contract.
        unsafe { (**self).release(ptr) }
    }
}
