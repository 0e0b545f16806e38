//! Allocator exports: the two proxies plus host-owned allocator handles.
//!
//! A C host either installs its own handle (any pointer to a pinned
//! `AllocatorHandle` built on the Rust side), or asks Silt to box one:
//! `silt_host_allocator_create` wraps a callback vtable and
//! `silt_heap_allocator_create` wraps the process heap. Either way the
//! returned handle is the `userdata` for the proxies, is owned by the
//! host, and must be released with `silt_allocator_destroy` after the GUI
//! library has stopped using it.

use std::ffi::c_void;

use silt_alloc::bridge::{alloc_proxy, free_proxy};
use silt_alloc::{
    Allocator, AllocatorHandle, AllocatorPlugin, CallbackAllocator, HeapAllocator, HeapConfig,
    HostAllocatorDef,
};

use crate::status::SiltStatus;

/// Allocate-or-resize proxy. Null `old` allocates; non-null `old` resizes.
///
/// Returns null on failure.
///
/// # Safety
///
/// `handle` must be null or a live allocator handle, `old` must be null or
/// a block from the same handle, and calls on one handle must not overlap.
#[no_mangle]
#[allow(unsafe_code)]
pub unsafe extern "C" fn silt_alloc_proxy(
    handle: *mut c_void,
    old: *mut c_void,
    size: usize,
) -> *mut c_void {
    // SAFETY: forwarded caller contract.
    unsafe { alloc_proxy(handle, old, size) }
}

/// Free proxy. Null `ptr` is a no-op.
///
/// # Safety
///
/// Same contract as [`silt_alloc_proxy`].
#[no_mangle]
#[allow(unsafe_code)]
pub unsafe extern "C" fn silt_free_proxy(handle: *mut c_void, ptr: *mut c_void) {
    // SAFETY: forwarded caller contract.
    unsafe { free_proxy(handle, ptr) }
}

/// Box an allocator behind a handle the host owns.
fn install(allocator: Box<dyn Allocator>) -> *mut c_void {
    let allocator: &'static dyn Allocator = Box::leak(allocator);
    Box::into_raw(Box::new(AllocatorHandle::new(allocator))).cast()
}

/// Wrap a C callback vtable in a new allocator handle, written to `out`.
///
/// `def` is copied; only the callbacks and `user_data` must stay valid
/// until `silt_allocator_destroy`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn silt_host_allocator_create(
    def: *const HostAllocatorDef,
    out: *mut *mut c_void,
) -> i32 {
    ffi_guard!({
        if def.is_null() || out.is_null() {
            return SiltStatus::InvalidArgument as i32;
        }
        // SAFETY: def is non-null and points to a caller-owned definition.
        let def = unsafe { &*def };
        // SAFETY: the host vouches for its callbacks for the handle's lifetime.
        let callbacks = match unsafe { CallbackAllocator::from_def(def) } {
            Ok(c) => c,
            Err(e) => return SiltStatus::from(&e) as i32,
        };
        let handle = install(Box::new(callbacks));
        // SAFETY: out is non-null; caller passes a valid, aligned pointer.
        unsafe { *out = handle };
        SiltStatus::Ok as i32
    })
}

/// Create a process-heap allocator handle with the given payload alignment
/// (0 selects the default of 16), written to `out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn silt_heap_allocator_create(alignment: usize, out: *mut *mut c_void) -> i32 {
    ffi_guard!({
        if out.is_null() {
            return SiltStatus::InvalidArgument as i32;
        }
        let config = if alignment == 0 {
            HeapConfig::default()
        } else {
            HeapConfig::new(alignment)
        };
        let heap = match HeapAllocator::with_config(config) {
            Ok(h) => h,
            Err(e) => return SiltStatus::from(&e) as i32,
        };
        let handle = install(Box::new(heap));
        // SAFETY: out is non-null; caller passes a valid, aligned pointer.
        unsafe { *out = handle };
        SiltStatus::Ok as i32
    })
}

/// Fill `out` with the plugin record (`userdata` + both proxies) for `handle`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn silt_allocator_plugin(handle: *mut c_void, out: *mut AllocatorPlugin) -> i32 {
    ffi_guard!({
        if handle.is_null() || out.is_null() {
            return SiltStatus::InvalidArgument as i32;
        }
        // SAFETY: out is non-null; caller passes a valid, aligned pointer.
        unsafe { *out = AllocatorPlugin::with_userdata(handle) };
        SiltStatus::Ok as i32
    })
}

/// Destroy a handle made by one of the `*_allocator_create` functions.
///
/// Blocks still allocated through the handle are not reclaimed. Destroying
/// a handle twice, or one Silt did not create, is undefined behaviour.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn silt_allocator_destroy(handle: *mut c_void) -> i32 {
    ffi_guard!({
        if handle.is_null() {
            return SiltStatus::InvalidArgument as i32;
        }
        // SAFETY: handle came from `install`, per the function contract.
        let handle = unsafe { Box::from_raw(handle.cast::<AllocatorHandle<'static>>()) };
        let allocator: *const dyn Allocator = handle.allocator();
        drop(handle);
        // SAFETY: leaked from a Box in `install`; the handle referencing it is gone.
        drop(unsafe { Box::from_raw(allocator.cast_mut()) });
        SiltStatus::Ok as i32
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    #[test]
    fn null_arguments_rejected() {
        let mut out = ptr::null_mut();
        assert_eq!(
            silt_host_allocator_create(ptr::null(), &mut out),
            SiltStatus::InvalidArgument as i32
        );
        assert_eq!(
            silt_heap_allocator_create(0, ptr::null_mut()),
            SiltStatus::InvalidArgument as i32
        );
        assert_eq!(
            silt_allocator_destroy(ptr::null_mut()),
            SiltStatus::InvalidArgument as i32
        );
        assert!(out.is_null());
    }

    #[test]
    #[allow(unsafe_code)]
    fn heap_handle_round_trip() {
        let mut handle = ptr::null_mut();
        assert_eq!(
            silt_heap_allocator_create(0, &mut handle),
            SiltStatus::Ok as i32
        );
        assert!(!handle.is_null());

        let p = unsafe { silt_alloc_proxy(handle, ptr::null_mut(), 48) };
        assert!(!p.is_null());
        assert_eq!(p as usize % HeapConfig::DEFAULT_ALIGNMENT, 0);
        unsafe { silt_free_proxy(handle, p) };

        assert_eq!(silt_allocator_destroy(handle), SiltStatus::Ok as i32);
    }

    #[test]
    fn bad_alignment_is_config_error() {
        let mut handle = ptr::null_mut();
        assert_eq!(
            silt_heap_allocator_create(12, &mut handle),
            SiltStatus::ConfigError as i32
        );
        assert!(handle.is_null());
    }

    #[test]
    fn plugin_carries_handle() {
        let mut handle = ptr::null_mut();
        assert_eq!(silt_heap_allocator_create(64, &mut handle), 0);
        let mut plugin = AllocatorPlugin::with_userdata(ptr::null_mut());
        assert_eq!(silt_allocator_plugin(handle, &mut plugin), 0);
        assert_eq!(plugin.userdata, handle);
        assert!(plugin.alloc.is_some() && plugin.free.is_some());
        assert_eq!(silt_allocator_destroy(handle), 0);
    }
}
