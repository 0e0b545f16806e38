//! The proxy bridge: C-ABI allocate/free entry points over an [`Allocator`].
//!
//! The GUI library's allocator slot holds a `userdata` word plus two
//! function pointers. Silt fills the pointers with [`alloc_proxy`] and
//! [`free_proxy`] and sets `userdata` to the address of a pinned
//! [`AllocatorHandle`]. Resize is expressed through `alloc_proxy` with a
//! non-null `old` pointer, realloc-style.
//!
//! The bridge is stateless: it recovers the capability from `userdata` on
//! every call, forwards, and returns. It never retains, caches, validates
//! or frees memory on its own.

#![allow(unsafe_code)]

use core::ffi::c_void;
use core::marker::PhantomPinned;
use core::pin::Pin;
use core::ptr::{self, NonNull};

use crate::allocator::Allocator;
use crate::guard;

/// Allocate-or-resize entry point: `(userdata, old_or_null, size) -> ptr_or_null`.
pub type AllocFn =
    unsafe extern "C" fn(userdata: *mut c_void, old: *mut c_void, size: usize) -> *mut c_void;

/// Free entry point: `(userdata, ptr)`.
pub type FreeFn = unsafe extern "C" fn(userdata: *mut c_void, ptr: *mut c_void);

/// The allocator record handed to the GUI library.
///
/// Layout matches the library's `{ handle userdata; alloc; free; }` struct.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct AllocatorPlugin {
    /// Opaque handle passed back as the first argument of both entry points.
    pub userdata: *mut c_void,
    /// Allocate-or-resize entry point.
    pub alloc: Option<AllocFn>,
    /// Free entry point.
    pub free: Option<FreeFn>,
}

// Three pointer-sized words, no padding.
const _: () = assert!(
    core::mem::size_of::<AllocatorPlugin>() == 3 * core::mem::size_of::<usize>()
);

impl AllocatorPlugin {
    /// A plugin routing through the Silt proxies with the given `userdata`.
    ///
    /// `userdata` must be the address of a live [`AllocatorHandle`] (or null,
    /// which makes every allocation fail) for as long as the library uses it.
    pub fn with_userdata(userdata: *mut c_void) -> Self {
        Self {
            userdata,
            alloc: Some(alloc_proxy),
            free: Some(free_proxy),
        }
    }
}

/// Pinned carrier for an allocator capability.
///
/// Its address is the opaque `userdata` the GUI library passes back. The
/// handle is `!Unpin` so that address stays valid while pinned; the host
/// must keep it alive for as long as the library may allocate.
///
/// ```
/// use core::pin::pin;
/// use silt_alloc::{AllocatorHandle, HeapAllocator};
///
/// let heap = HeapAllocator::new();
/// let handle = pin!(AllocatorHandle::new(&heap));
/// let plugin = handle.as_ref().plugin();
/// let alloc = plugin.alloc.unwrap();
/// let free = plugin.free.unwrap();
/// unsafe {
///     let p = alloc(plugin.userdata, core::ptr::null_mut(), 64);
///     assert!(!p.is_null());
///     free(plugin.userdata, p);
/// }
/// assert_eq!(heap.stats().current_allocated_bytes, 0);
/// ```
pub struct AllocatorHandle<'a> {
    allocator: &'a dyn Allocator,
    _pinned: PhantomPinned,
}

impl<'a> AllocatorHandle<'a> {
    /// Wrap an allocator. Pin the result before taking its address.
    pub fn new(allocator: &'a dyn Allocator) -> Self {
        Self {
            allocator,
            _pinned: PhantomPinned,
        }
    }

    /// The wrapped capability.
    pub fn allocator(&self) -> &'a dyn Allocator {
        self.allocator
    }

    /// The opaque word to hand to the GUI library.
    pub fn userdata(self: Pin<&Self>) -> *mut c_void {
        let this: &Self = self.get_ref();
        this as *const Self as *mut c_void
    }

    /// A complete plugin record for this handle.
    pub fn plugin(self: Pin<&Self>) -> AllocatorPlugin {
        AllocatorPlugin::with_userdata(self.userdata())
    }
}

/// Recover the capability behind `userdata`.
///
/// # Safety
///
/// `userdata` must be null or point to a live `AllocatorHandle`.
unsafe fn allocator_from_userdata<'a>(userdata: *mut c_void) -> Option<&'a dyn Allocator> {
    let handle = userdata.cast_const().cast::<AllocatorHandle<'a>>();
    // SAFETY: non-null userdata points to a live handle per the caller contract.
    unsafe { handle.as_ref() }.map(|h| h.allocator)
}

/// Allocate-or-resize proxy installed in [`AllocatorPlugin::alloc`].
///
/// - `old` null: allocate `size` fresh bytes.
/// - `old` non-null: resize that block to `size`, preserving the first
///   `min(old_size, size)` bytes; the result may be relocated.
///
/// Returns null on failure, or when `userdata` is null. Failure is not
/// logged or retried; the caller decides what it means.
///
/// # Safety
///
/// `userdata` must be null or the address of a live, pinned
/// [`AllocatorHandle`]. A non-null `old` must have been returned by this
/// proxy for the same `userdata` and not freed since. Calls for one
/// `userdata` must not overlap.
pub unsafe extern "C" fn alloc_proxy(
    userdata: *mut c_void,
    old: *mut c_void,
    size: usize,
) -> *mut c_void {
    // SAFETY: forwarded caller contract.
    let Some(allocator) = (unsafe { allocator_from_userdata(userdata) }) else {
        return ptr::null_mut();
    };
    guard::contain("alloc_proxy", ptr::null_mut(), || {
        let block = match NonNull::new(old.cast::<u8>()) {
            None => allocator.allocate(size),
            // SAFETY: `old` came from this allocator per the caller contract.
            Some(old) => unsafe { allocator.resize(old, size) },
        };
        block.map_or(ptr::null_mut(), |p| p.as_ptr().cast::<c_void>())
    })
}

/// Free proxy installed in [`AllocatorPlugin::free`].
///
/// Null `ptr` or null `userdata` is a no-op.
///
/// # Safety
///
/// Same contract as [`alloc_proxy`]; `ptr` is dangling afterwards.
pub unsafe extern "C" fn free_proxy(userdata: *mut c_void, ptr: *mut c_void) {
    // SAFETY: forwarded caller contract.
    let Some(allocator) = (unsafe { allocator_from_userdata(userdata) }) else {
        return;
    };
    let Some(block) = NonNull::new(ptr.cast::<u8>()) else {
        return;
    };
    // SAFETY: `ptr` came from this allocator per the caller contract.
    guard::contain("free_proxy", (), || unsafe { allocator.release(block) });
}
