//! Bit-pattern `floor` for binary64.
//!
//! Works by letting the adder do the rounding: for `|x| < 2^52`, the sum
//! `x ± 2^52` has an ulp of exactly 1.0, so the hardware rounds `x` to an
//! adjacent integer. Subtracting the offset back out and then `x` leaves
//! the signed distance `y` from `x` to that neighbour. If the neighbour
//! lies above `x`, one more step down gives the floor.

use crate::bits::{biased_exponent, sign_bit, EXPONENT_BIAS, MANTISSA_BITS, TWO_POW_52};
use crate::volatile::force_eval;

/// Largest integral value not greater than `x`.
///
/// Returns `x` unchanged for zeros (sign preserved), for magnitudes
/// `>= 2^52`, infinities and NaN. Never traps and never calls into libm.
///
/// ```
/// assert_eq!(silt_math::floor(2.7), 2.0);
/// assert_eq!(silt_math::floor(-2.7), -3.0);
/// assert_eq!(silt_math::floor(-0.0).to_bits(), (-0.0f64).to_bits());
/// ```
pub fn floor(x: f64) -> f64 {
    let e = biased_exponent(x);
    if e >= EXPONENT_BIAS + MANTISSA_BITS || x == 0.0 {
        return x;
    }

    let negative = sign_bit(x);
    let y = if negative {
        force_eval(x - TWO_POW_52) + TWO_POW_52 - x
    } else {
        force_eval(x + TWO_POW_52) - TWO_POW_52 - x
    };

    // 0 < |x| < 1: under directed rounding modes the neighbour above can be
    // picked for tiny inputs, so answer directly. `y` is still evaluated to
    // raise the inexact flag.
    if e <= EXPONENT_BIAS - 1 {
        force_eval(y);
        return if negative { -1.0 } else { 0.0 };
    }

    if y > 0.0 {
        x + y - 1.0
    } else {
        x + y
    }
}

/// `floor(x)` as an `i32`, saturating at the `i32` range. NaN maps to 0.
#[inline]
pub fn ifloor(x: f64) -> i32 {
    floor(x) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn same_bits(a: f64, b: f64) -> bool {
        (a.is_nan() && b.is_nan()) || a.to_bits() == b.to_bits()
    }

    #[test]
    fn concrete_cases() {
        assert_eq!(floor(2.7), 2.0);
        assert_eq!(floor(-2.7), -3.0);
        assert_eq!(floor(-0.5), -1.0);
        assert_eq!(floor(0.0), 0.0);
        assert_eq!(floor(5.0), 5.0);
        assert_eq!(floor(-5.0), -5.0);
        assert_eq!(floor(-2.3), -3.0);
        assert_eq!(floor(0.999_999_999_999), 0.0);
    }

    #[test]
    fn zero_sign_is_preserved() {
        assert_eq!(floor(-0.0).to_bits(), (-0.0f64).to_bits());
        assert_eq!(floor(0.0).to_bits(), 0.0f64.to_bits());
    }

    #[test]
    fn small_positive_floors_to_positive_zero() {
        assert_eq!(floor(0.25).to_bits(), 0.0f64.to_bits());
        assert_eq!(floor(f64::MIN_POSITIVE).to_bits(), 0.0f64.to_bits());
        assert_eq!(floor(5e-324).to_bits(), 0.0f64.to_bits());
    }

    #[test]
    fn small_negative_floors_to_minus_one() {
        assert_eq!(floor(-0.25), -1.0);
        assert_eq!(floor(-f64::MIN_POSITIVE), -1.0);
        assert_eq!(floor(-5e-324), -1.0);
    }

    #[test]
    fn specials_pass_through() {
        assert_eq!(floor(f64::INFINITY), f64::INFINITY);
        assert_eq!(floor(f64::NEG_INFINITY), f64::NEG_INFINITY);
        assert!(floor(f64::NAN).is_nan());
        assert_eq!(floor(f64::MAX), f64::MAX);
        assert_eq!(floor(f64::MIN), f64::MIN);
    }

    #[test]
    fn boundary_at_two_pow_52() {
        assert_eq!(floor(TWO_POW_52), TWO_POW_52);
        assert_eq!(floor(-TWO_POW_52), -TWO_POW_52);
        assert_eq!(floor(TWO_POW_52 - 0.5), TWO_POW_52 - 1.0);
        assert_eq!(floor(-(TWO_POW_52 - 0.5)), -TWO_POW_52);
        assert_eq!(floor(TWO_POW_52 + 1.0), TWO_POW_52 + 1.0);
    }

    #[test]
    fn exactly_one_and_minus_one() {
        assert_eq!(floor(1.0), 1.0);
        assert_eq!(floor(-1.0), -1.0);
        assert_eq!(floor(1.5), 1.0);
        assert_eq!(floor(-1.5), -2.0);
    }

    #[test]
    fn ifloor_truncates_toward_negative_infinity() {
        assert_eq!(ifloor(3.9), 3);
        assert_eq!(ifloor(-3.1), -4);
        assert_eq!(ifloor(-0.0), 0);
    }

    #[test]
    fn ifloor_saturates() {
        assert_eq!(ifloor(1e12), i32::MAX);
        assert_eq!(ifloor(-1e12), i32::MIN);
        assert_eq!(ifloor(f64::NAN), 0);
    }

    proptest! {
        #[test]
        fn result_is_integral_lower_bound(x in -4.0e15f64..4.0e15f64) {
            let y = floor(x);
            prop_assert!(y <= x);
            prop_assert!(x - y < 1.0);
            prop_assert_eq!(y, y.trunc());
        }

        #[test]
        fn fractional_inputs(x in -64.0f64..64.0f64) {
            let y = floor(x);
            prop_assert!(y <= x);
            prop_assert!(x - y < 1.0);
            prop_assert_eq!(y, y.trunc());
        }

        #[test]
        fn idempotent(x in proptest::num::f64::NORMAL | proptest::num::f64::SUBNORMAL | proptest::num::f64::ZERO) {
            let once = floor(x);
            prop_assert_eq!(floor(once).to_bits(), once.to_bits());
        }

        #[test]
        fn large_magnitudes_unchanged(x in 4.503_599_627_370_496e15f64..f64::MAX) {
            prop_assert_eq!(floor(x), x);
            prop_assert_eq!(floor(-x), -x);
        }

        #[test]
        fn agrees_with_std(x in proptest::num::f64::ANY) {
            prop_assert!(same_bits(floor(x), x.floor()), "x = {x:e}");
        }
    }
}
