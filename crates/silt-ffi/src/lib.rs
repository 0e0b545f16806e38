//! C ABI exports for the Silt GUI shim.
//!
//! Everything the embedded GUI library links against lives here: `floor`,
//! the two allocator proxies, the assertion hook and `qsort`. Symbols are
//! `silt_`-prefixed; the `libc-symbols` feature also exports unprefixed
//! `floor` and `qsort` for environments with no libm / libc at all.
//!
//! A C header is generated into `include/silt.h` by `build.rs`.
//!
//! `unsafe` is denied crate-wide and allowed per export, since every
//! `#[no_mangle]` item trips the lint.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

/// Run an FFI body returning an `i32` status, mapping a panic to
/// [`SiltStatus::Panicked`](crate::status::SiltStatus::Panicked).
macro_rules! ffi_guard {
    ($body:block) => {
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $body)) {
            Ok(status) => status,
            Err(_) => {
                eprintln!("silt: panic caught at the FFI boundary");
                $crate::status::SiltStatus::Panicked as i32
            }
        }
    };
}

pub mod alloc;
pub mod math;
pub mod rt;
pub mod status;

pub use status::SiltStatus;
