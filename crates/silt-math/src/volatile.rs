//! Optimisation barrier for floating-point intermediates.
//!
//! The rounding in `floor` is a side effect of the add/subtract pair, so
//! the intermediate must really be materialised at binary64 precision.
//! A volatile store and reload cannot be folded away.

#![allow(unsafe_code)]

/// Store `x` through a volatile write and read it back.
#[inline(always)]
pub(crate) fn force_eval(x: f64) -> f64 {
    let mut slot = 0.0f64;
    // SAFETY: `slot` is a live, aligned, initialised local for the whole block.
    unsafe {
        core::ptr::write_volatile(&mut slot, x);
        core::ptr::read_volatile(&slot)
    }
}
