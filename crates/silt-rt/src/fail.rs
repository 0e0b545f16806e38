//! Fail-fast handling of broken invariants inside the embedded library.
//!
//! Once the library's own consistency check fails, its state cannot be
//! trusted. There is no error path back to the caller: print one line and
//! abort. `abort` neither unwinds nor runs destructors, so no panic hook
//! or `catch_unwind` can intercept it.

/// Report a violated invariant and abort the process.
#[cold]
#[inline(never)]
pub fn invariant_violated(expr: &str, file: &str, line: u32) -> ! {
    eprintln!("silt: invariant violated: `{expr}` at {file}:{line}");
    std::process::abort()
}

/// Abort the process if `cond` is false.
///
/// ```
/// silt_rt::silt_assert!(1 + 1 == 2);
/// ```
#[macro_export]
macro_rules! silt_assert {
    ($cond:expr $(,)?) => {
        if !$cond {
            $crate::fail::invariant_violated(stringify!($cond), file!(), line!())
        }
    };
}
