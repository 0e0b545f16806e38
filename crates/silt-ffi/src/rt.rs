//! Runtime hook exports: assertion failure and `qsort`.

use std::ffi::{c_char, c_int, c_void, CStr};

use silt_rt::sort::{qsort_raw, CompareFn};

/// Borrow a C string for a diagnostic, tolerating null and bad UTF-8.
///
/// # Safety
///
/// `s` must be null or a valid NUL-terminated string.
#[allow(unsafe_code)]
unsafe fn lossy(s: *const c_char) -> String {
    if s.is_null() {
        return String::from("<unknown>");
    }
    // SAFETY: non-null and NUL-terminated per the caller contract.
    unsafe { CStr::from_ptr(s) }.to_string_lossy().into_owned()
}

/// Assertion hook for the embedded library. Prints one line and aborts.
///
/// Wire the library's assert macro to this, e.g.
/// `#define NK_ASSERT(e) ((e) ? (void)0 : silt_assert_fail(#e, __FILE__, __LINE__))`.
/// `expr` and `file` may be null.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn silt_assert_fail(expr: *const c_char, file: *const c_char, line: c_int) -> ! {
    // SAFETY: the library passes string literals or null.
    let (expr, file) = unsafe { (lossy(expr), lossy(file)) };
    silt_rt::invariant_violated(&expr, &file, u32::try_from(line).unwrap_or(0))
}

/// Sort `nel` elements of `width` bytes at `base` by `cmp`, in place.
///
/// A null `cmp` or `base` leaves the buffer untouched. A panic during the
/// comparison phase is contained and also leaves the buffer untouched.
///
/// # Safety
///
/// `base` must span `nel * width` writable bytes and `cmp` must accept any
/// two element pointers inside it.
#[no_mangle]
#[allow(unsafe_code)]
pub unsafe extern "C" fn silt_qsort(
    base: *mut c_void,
    nel: usize,
    width: usize,
    cmp: Option<CompareFn>,
) {
    let Some(cmp) = cmp else {
        return;
    };
    // SAFETY: forwarded caller contract.
    let sorted = std::panic::catch_unwind(|| unsafe { qsort_raw(base, nel, width, cmp) });
    if sorted.is_err() {
        eprintln!("silt: panic in silt_qsort contained at the FFI boundary");
    }
}

/// Unprefixed `qsort` for links without a platform libc.
///
/// # Safety
///
/// Same contract as [`silt_qsort`].
#[cfg(feature = "libc-symbols")]
#[no_mangle]
#[allow(unsafe_code)]
pub unsafe extern "C" fn qsort(
    base: *mut c_void,
    nel: usize,
    width: usize,
    cmp: Option<CompareFn>,
) {
    // SAFETY: forwarded caller contract.
    unsafe { silt_qsort(base, nel, width, cmp) }
}
