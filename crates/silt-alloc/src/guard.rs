//! Panic containment for the C-ABI proxies.
//!
//! Unwinding into the GUI library is undefined behaviour. With `std`, a
//! panic from an `Allocator` implementation is caught here, reported once,
//! and turned into the proxy's failure value.

#[cfg(feature = "std")]
pub(crate) fn contain<T>(site: &str, fallback: T, f: impl FnOnce() -> T) -> T {
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(f)) {
        Ok(value) => value,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .copied()
                .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
                .unwrap_or("<non-string panic payload>");
            eprintln!("silt: panic in {site} contained at the FFI boundary: {message}");
            fallback
        }
    }
}

#[cfg(not(feature = "std"))]
pub(crate) fn contain<T>(_site: &str, _fallback: T, f: impl FnOnce() -> T) -> T {
    f()
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    #[test]
    fn passes_value_through() {
        assert_eq!(contain("test", 0, || 7), 7);
    }

    #[test]
    fn panic_yields_fallback() {
        assert_eq!(contain("test", -1, || panic!("boom")), -1);
    }

    #[test]
    fn formatted_panic_yields_fallback() {
        let n = 3;
        assert_eq!(contain("test", None, || -> Option<u8> { panic!("bad {n}") }), None);
    }
}
