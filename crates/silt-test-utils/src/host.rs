//! A C-vtable host allocator backed by [`MockAllocator`].
//!
//! [`MockHost::def`] fills a [`HostAllocatorDef`] whose `user_data` is the
//! host's own address. Each trampoline records the `user_data` it was
//! handed, so tests can check the handle is forwarded unchanged.

#![allow(unsafe_code)]

use std::cell::RefCell;
use std::ffi::c_void;
use std::ptr::{self, NonNull};

use silt_alloc::{Allocator, HostAllocatorDef};

use crate::mock::MockAllocator;

/// Mock host exposing a [`MockAllocator`] through C callbacks.
///
/// Must stay at a fixed address while any `def()` it produced is in use.
#[derive(Default)]
pub struct MockHost {
    pub mock: MockAllocator,
    user_data_seen: RefCell<Vec<usize>>,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// This host's address, as it appears in `user_data`.
    pub fn address(&self) -> usize {
        self as *const MockHost as usize
    }

    /// Full vtable: alloc, resize and free.
    pub fn def(&self) -> HostAllocatorDef {
        HostAllocatorDef {
            user_data: self as *const MockHost as *mut c_void,
            alloc_fn: Some(host_alloc),
            resize_fn: Some(host_resize),
            free_fn: Some(host_free),
        }
    }

    /// Vtable without a resize callback.
    pub fn def_without_resize(&self) -> HostAllocatorDef {
        HostAllocatorDef {
            resize_fn: None,
            ..self.def()
        }
    }

    /// Every `user_data` value the callbacks received, in call order.
    pub fn user_data_seen(&self) -> Vec<usize> {
        self.user_data_seen.borrow().clone()
    }

    fn note(&self, user_data: *mut c_void) {
        self.user_data_seen.borrow_mut().push(user_data as usize);
    }
}

/// # Safety
///
/// `user_data` must be the address of a live `MockHost`.
unsafe fn host_from<'a>(user_data: *mut c_void) -> &'a MockHost {
    // SAFETY: caller contract.
    unsafe { &*(user_data as *const MockHost) }
}

unsafe extern "C" fn host_alloc(user_data: *mut c_void, size: usize) -> *mut c_void {
    // SAFETY: user_data was set by MockHost::def.
    let host = unsafe { host_from(user_data) };
    host.note(user_data);
    host.mock
        .allocate(size)
        .map_or(ptr::null_mut(), |p| p.as_ptr().cast())
}

unsafe extern "C" fn host_resize(
    user_data: *mut c_void,
    old: *mut c_void,
    new_size: usize,
) -> *mut c_void {
    // SAFETY: user_data was set by MockHost::def.
    let host = unsafe { host_from(user_data) };
    host.note(user_data);
    let Some(old) = NonNull::new(old.cast::<u8>()) else {
        return ptr::null_mut();
    };
    // SAFETY: the mock validates the address itself.
    unsafe { host.mock.resize(old, new_size) }.map_or(ptr::null_mut(), |p| p.as_ptr().cast())
}

unsafe extern "C" fn host_free(user_data: *mut c_void, ptr: *mut c_void) {
    // SAFETY: user_data was set by MockHost::def.
    let host = unsafe { host_from(user_data) };
    host.note(user_data);
    if let Some(ptr) = NonNull::new(ptr.cast::<u8>()) {
        // SAFETY: the mock records unknown addresses instead of touching them.
        unsafe { host.mock.release(ptr) };
    }
}
