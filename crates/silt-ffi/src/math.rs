//! Math exports: the only libm routine the shim reimplements.

/// Largest integral value not greater than `x`. See [`silt_math::floor`].
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn silt_floor(x: f64) -> f64 {
    silt_math::floor(x)
}

/// `floor(x)` as a saturating `int`, for the font rasteriser's `ifloor`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn silt_ifloor(x: f64) -> i32 {
    silt_math::ifloor(x)
}

/// Unprefixed `floor` for links without a platform libm.
#[cfg(feature = "libc-symbols")]
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn floor(x: f64) -> f64 {
    silt_math::floor(x)
}
