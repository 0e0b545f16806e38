//! C callback allocator: bridges a [`HostAllocatorDef`] vtable to the
//! Rust [`Allocator`] trait.
//!
//! Hosts written in C describe their allocator with three function
//! pointers and a `user_data` word. `user_data` is passed back verbatim
//! on every call and never interpreted.

#![allow(unsafe_code)]

use core::ffi::c_void;
use core::ptr::NonNull;

use crate::allocator::Allocator;
use crate::error::AllocError;

/// Host allocation callback: `(user_data, size) -> ptr_or_null`.
pub type HostAllocFn = unsafe extern "C" fn(user_data: *mut c_void, size: usize) -> *mut c_void;

/// Host resize callback: `(user_data, ptr, new_size) -> ptr_or_null`.
pub type HostResizeFn =
    unsafe extern "C" fn(user_data: *mut c_void, ptr: *mut c_void, new_size: usize) -> *mut c_void;

/// Host release callback: `(user_data, ptr)`.
pub type HostFreeFn = unsafe extern "C" fn(user_data: *mut c_void, ptr: *mut c_void);

/// C-side allocator definition.
///
/// `alloc_fn` and `free_fn` are required. `resize_fn` may be null, in
/// which case every resize request fails.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct HostAllocatorDef {
    /// Opaque host context passed to every callback.
    pub user_data: *mut c_void,
    /// Allocate a fresh block.
    pub alloc_fn: Option<HostAllocFn>,
    /// Resize a block, preserving `min(old, new)` bytes. Optional.
    pub resize_fn: Option<HostResizeFn>,
    /// Release a block.
    pub free_fn: Option<HostFreeFn>,
}

/// Rust-side wrapper implementing [`Allocator`] by delegating to C callbacks.
#[derive(Debug)]
pub struct CallbackAllocator {
    user_data: *mut c_void,
    alloc_fn: HostAllocFn,
    resize_fn: Option<HostResizeFn>,
    free_fn: HostFreeFn,
}

// NOTE: CallbackAllocator is neither `Send` nor `Sync`. `user_data` is an
// opaque host pointer and most C allocator state is not thread-safe; the
// host serializes access to each handle.

impl CallbackAllocator {
    /// Validate a vtable and wrap it.
    ///
    /// Fails with [`AllocError::MissingCallback`] if `alloc_fn` or `free_fn`
    /// is null.
    ///
    /// # Safety
    ///
    /// The callbacks must be safe to call with `def.user_data` for the
    /// whole lifetime of the returned allocator.
    pub unsafe fn from_def(def: &HostAllocatorDef) -> Result<Self, AllocError> {
        let alloc_fn = def
            .alloc_fn
            .ok_or(AllocError::MissingCallback { name: "alloc_fn" })?;
        let free_fn = def
            .free_fn
            .ok_or(AllocError::MissingCallback { name: "free_fn" })?;
        Ok(Self {
            user_data: def.user_data,
            alloc_fn,
            resize_fn: def.resize_fn,
            free_fn,
        })
    }

    /// The host context forwarded to every callback.
    pub fn user_data(&self) -> *mut c_void {
        self.user_data
    }

    /// Whether the host supplied a resize callback.
    pub fn supports_resize(&self) -> bool {
        self.resize_fn.is_some()
    }
}

impl Allocator for CallbackAllocator {
    fn allocate(&self, size: usize) -> Result<NonNull<u8>, AllocError> {
        // SAFETY: callbacks are valid for user_data per the from_def contract.
        let raw = unsafe { (self.alloc_fn)(self.user_data, size) };
        NonNull::new(raw.cast::<u8>()).ok_or(AllocError::OutOfMemory { requested: size })
    }

    unsafe fn resize(&self, ptr: NonNull<u8>, new_size: usize) -> Result<NonNull<u8>, AllocError> {
        let Some(resize_fn) = self.resize_fn else {
            return Err(AllocError::Unsupported {
                operation: "resize",
            });
        };
        // SAFETY: from_def contract, and `ptr` came from this host per the trait contract.
        let raw = unsafe { resize_fn(self.user_data, ptr.as_ptr().cast(), new_size) };
        NonNull::new(raw.cast::<u8>()).ok_or(AllocError::OutOfMemory {
            requested: new_size,
        })
    }

    unsafe fn release(&self, ptr: NonNull<u8>) {
        // SAFETY: from_def contract, and `ptr` came from this host per the trait contract.
        unsafe { (self.free_fn)(self.user_data, ptr.as_ptr().cast()) }
    }
}
