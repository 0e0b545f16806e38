//! Silt: the environment an embedded immediate-mode GUI library expects,
//! without a libc.
//!
//! This is the facade crate re-exporting the Rust API of the Silt
//! sub-crates. C hosts link `silt-ffi` instead.
//!
//! # Quick start
//!
//! ```rust
//! use core::pin::pin;
//! use silt::prelude::*;
//!
//! // Route the library's memory through the process heap.
//! let heap = HeapAllocator::new();
//! let handle = pin!(AllocatorHandle::new(&heap));
//! let plugin = handle.as_ref().plugin();
//!
//! // What the library does with the plugin record:
//! let alloc = plugin.alloc.unwrap();
//! let free = plugin.free.unwrap();
//! unsafe {
//!     let p = alloc(plugin.userdata, core::ptr::null_mut(), 64);
//!     assert!(!p.is_null());
//!     let p = alloc(plugin.userdata, p, 256);
//!     free(plugin.userdata, p);
//! }
//! assert_eq!(heap.stats().current_allocated_bytes, 0);
//!
//! assert_eq!(floor(-2.5), -3.0);
//!
//! let mut bytes = [3u8, 1, 2];
//! sort_strided(&mut bytes, 1, |a, b| a.cmp(b)).unwrap();
//! assert_eq!(bytes, [1, 2, 3]);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`math`] | `silt-math` | Bit-pattern `floor` and IEEE-754 helpers |
//! | [`alloc`] | `silt-alloc` | Allocator capability, proxies, heap and callback allocators |
//! | [`rt`] | `silt-rt` | Fail-fast assertion hook and strided sort |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Rounding without libm (`silt-math`).
pub use silt_math as math;

/// Allocator capability and the C proxy bridge (`silt-alloc`).
///
/// [`alloc::AllocatorHandle`] is what the GUI library's `userdata` points
/// at; [`alloc::HeapAllocator`] and [`alloc::CallbackAllocator`] are the
/// two stock capabilities.
pub use silt_alloc as alloc;

/// Assertion hook and `qsort` replacement (`silt-rt`).
pub use silt_rt as rt;

/// Common imports for embedding the library from Rust.
pub mod prelude {
    pub use silt_alloc::{
        AllocError, Allocator, AllocatorHandle, AllocatorPlugin, CallbackAllocator,
        HeapAllocator, HeapConfig,
    };
    pub use silt_math::{floor, ifloor};
    pub use silt_rt::{invariant_violated, silt_assert, sort_strided, SortError};
}
