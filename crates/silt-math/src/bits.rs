//! Raw binary64 field access.

/// Offset added to the stored exponent field.
pub const EXPONENT_BIAS: u32 = 0x3ff;

/// Number of explicit mantissa bits.
pub const MANTISSA_BITS: u32 = 52;

/// Mask for the 11-bit exponent field after shifting out the mantissa.
pub const EXPONENT_MASK: u64 = 0x7ff;

/// 2^52. Any value of smaller magnitude gains an ulp of exactly 1.0 when
/// offset by this amount, so the adder rounds it to an integer neighbour.
pub const TWO_POW_52: f64 = 4_503_599_627_370_496.0;

/// Biased exponent field of `x` (0 for zeros/subnormals, 0x7ff for inf/NaN).
#[inline]
pub fn biased_exponent(x: f64) -> u32 {
    ((x.to_bits() >> MANTISSA_BITS) & EXPONENT_MASK) as u32
}

/// Whether the sign bit of `x` is set. True for `-0.0` and negative NaNs.
#[inline]
pub fn sign_bit(x: f64) -> bool {
    x.to_bits() >> 63 != 0
}

/// Whether every representable value with this exponent is an integer.
///
/// True for magnitudes `>= 2^52`, infinities and NaN.
#[inline]
pub fn has_no_fraction_bits(x: f64) -> bool {
    biased_exponent(x) >= EXPONENT_BIAS + MANTISSA_BITS
}
