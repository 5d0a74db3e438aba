//! Rounding and bit manipulation on the layout fields.

use super::{carrier_of, nan, unit_mantissa, zero};
use crate::algorithm::kernels::RoundingKernel;
use crate::dtype::{Float, FloatLayout, Real, RoundingMode};

#[inline]
pub(crate) fn abs<T: Float>(x: T) -> T {
    T::from_layout(x.to_layout().with_sign(false))
}

#[inline]
pub(crate) fn copysign<T: Float>(x: T, sign: T) -> T {
    T::from_layout(x.to_layout().with_sign(sign.to_layout().sign()))
}

#[inline]
pub(crate) fn floor<T: Float>(x: T) -> T {
    T::from_layout(x.to_layout().round_integral(RoundingMode::Floor))
}

#[inline]
pub(crate) fn ceil<T: Float>(x: T) -> T {
    T::from_layout(x.to_layout().round_integral(RoundingMode::Ceil))
}

#[inline]
pub(crate) fn trunc<T: Float>(x: T) -> T {
    T::from_layout(x.to_layout().round_integral(RoundingMode::Trunc))
}

pub(crate) fn fractional_part<T: Float>(x: T) -> T {
    low_bits(x, 0)
}

pub(crate) fn mod_2<T: Float>(x: T) -> T {
    low_bits(x, 1)
}

/// Keep the significand bits of weight below `2^bound`.
///
/// `x - 2^bound trunc(x / 2^bound)` is exact, so masking the significand
/// gives it directly. A double-double whose words are too far apart for a
/// 128-bit significand falls back to carrier arithmetic.
fn low_bits<T: Float>(x: T, bound: i32) -> T {
    let layout = x.to_layout();
    if layout.is_nan_or_inf() {
        return nan();
    }
    if layout.is_zero() {
        return zero(false);
    }

    let (sig, exp2, sticky) = layout.significand_with_sticky();
    if sticky {
        let c = carrier_of::<T>(layout);
        let unit = T::Carrier::pow2(bound);
        let whole = (c / unit).round_toward_zero() * unit;
        return T::from_carrier(c - whole);
    }

    let kept = bound - exp2;
    if kept <= 0 {
        return zero(false);
    }
    let fraction = if kept >= 128 {
        sig
    } else {
        sig & ((1u128 << kept) - 1)
    };
    if fraction == 0 {
        return zero(false);
    }
    T::from_layout(T::Layout::from_significand(layout.sign(), fraction, exp2, false))
}

pub(crate) fn base2_mant_and_exp<T: Float>(x: T) -> (T, i32) {
    let layout = x.to_layout();
    if layout.is_nan_or_inf() || layout.is_zero() {
        return (x, 0);
    }
    let (mantissa, exponent) = unit_mantissa(layout);
    (T::from_layout(mantissa.with_sign(layout.sign())), exponent)
}

#[inline]
pub(crate) fn pow2<T: Float>(n: i32) -> T {
    T::from_layout(T::Layout::from_significand(false, 1, n, false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::{DoubleDouble, Extended80, Quad128};

    #[test]
    fn test_fractional_part_keeps_sign() {
        assert_eq!(fractional_part(2.75f64), 0.75);
        assert_eq!(fractional_part(-2.75f32), -0.75);
        let z = fractional_part(-3.0f64);
        assert!(z == 0.0 && z.is_sign_positive());
        assert!(fractional_part(f64::INFINITY).is_nan());
    }

    #[test]
    fn test_mod_2() {
        assert_eq!(mod_2(5.5f64), 1.5);
        assert_eq!(mod_2(-5.5f64), -1.5);
        assert_eq!(mod_2(0.25f32), 0.25);
        assert_eq!(mod_2(1e300f64), 0.0);
    }

    #[test]
    fn test_doubledouble_fraction_beyond_128_bits() {
        // 2^80 + 2^-60 does not fit one 128-bit significand
        let x = DoubleDouble::new(2f64.powi(80), 2f64.powi(-60));
        let f = fractional_part(x);
        assert_eq!(f, DoubleDouble::from_f64(2f64.powi(-60)));
        let y = DoubleDouble::new(3.0, 2f64.powi(-70));
        assert_eq!(fractional_part(y), DoubleDouble::from_f64(2f64.powi(-70)));
    }

    #[test]
    fn test_base2_mant_and_exp() {
        assert_eq!(base2_mant_and_exp(-12.0f64), (-1.5, 3));
        assert_eq!(base2_mant_and_exp(f32::MIN_POSITIVE / 4.0), (1.0, -128));
        assert_eq!(base2_mant_and_exp(0.0f64), (0.0, 0));
        let (m, e) = base2_mant_and_exp(Extended80::from_double(0.375));
        assert_eq!((m.to_double(), e), (1.5, -2));
    }

    #[test]
    fn test_pow2_saturates() {
        assert_eq!(pow2::<f64>(-1074), f64::from_bits(1));
        assert_eq!(pow2::<f64>(-1076), 0.0);
        assert_eq!(pow2::<f32>(128), f32::INFINITY);
        let q: Quad128 = pow2(-16400);
        assert!(q.is_subnormal());
    }

    #[test]
    fn test_copysign_and_abs() {
        assert_eq!(copysign(3.0f64, -0.0), -3.0);
        assert_eq!(abs(-0.0f32).to_bits(), 0);
        let n = copysign(f64::NAN, -1.0);
        assert!(n.is_nan() && n.is_sign_negative());
    }
}
