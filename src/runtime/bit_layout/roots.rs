//! Square root, cube root and hypotenuses.

use super::super::BitLayout;
use super::super::dispatch::hypot_parts;
use super::{argument, carrier_of, nan, rescale, settle, unit_mantissa, with_sign};
use crate::algorithm::kernels::{CbrtKernel, SqrtKernel};
use crate::algorithm::tables::MANTISSA_INDEX_BITS;
use crate::dtype::{Float, FloatLayout, Real};

/// Square root through the mantissa table.
///
/// `x = m 2^e` with `m` in `[1, 2)`. The table kernel gives `sqrt(m)`; an odd
/// exponent folds a factor of two into `m` before the Newton step, so the
/// step always refines `sqrt(m')` with `m'` in `[1, 4)`.
pub(crate) fn sqrt<T: Float>(x: T) -> T {
    let layout = x.to_layout();
    if layout.is_nan() || layout.is_zero() {
        return x;
    }
    if layout.sign() {
        return nan();
    }
    if layout.is_infinite() {
        return x;
    }

    let (mantissa, e) = unit_mantissa(layout);
    let index = mantissa.mantissa_index(MANTISSA_INDEX_BITS);
    let mut m = carrier_of::<T>(mantissa);
    let mut y = T::Carrier::sqrt_reduced(m, index);
    if e.rem_euclid(2) == 1 {
        y = y * T::Carrier::SQRT_2;
        m = m * T::Carrier::TWO;
    }
    rescale(T::Carrier::sqrt_newton(y, m), e.div_euclid(2))
}

/// Cube root through the mantissa table, odd in `x`.
pub(crate) fn cbrt<T: Float>(x: T) -> T {
    let layout = x.to_layout();
    if layout.is_nan_or_inf() || layout.is_zero() {
        return x;
    }

    let (mantissa, e) = unit_mantissa(layout);
    let index = mantissa.mantissa_index(MANTISSA_INDEX_BITS);
    let mut m = carrier_of::<T>(mantissa);
    let mut y = T::Carrier::cbrt_reduced(m, index);
    match e.rem_euclid(3) {
        1 => {
            y = y * T::Carrier::CBRT_2;
            m = m * T::Carrier::TWO;
        }
        2 => {
            y = y * T::Carrier::CBRT_4;
            m = m * T::Carrier::from_i32(4);
        }
        _ => {}
    }
    let root = rescale::<T>(T::Carrier::cbrt_newton(y, m), e.div_euclid(3));
    with_sign(root, layout.sign())
}

/// `sqrt(x^2 + y^2)` with both arguments scaled by the larger exponent.
pub(crate) fn hypot<T: Float>(x: T, y: T) -> T {
    let a = x.to_layout().with_sign(false);
    let b = y.to_layout().with_sign(false);
    if a.is_infinite() || b.is_infinite() {
        return T::from_layout(T::Layout::infinity(false));
    }
    if a.is_nan() || b.is_nan() {
        return nan();
    }
    if b.is_zero() {
        return T::from_layout(a);
    }
    if a.is_zero() {
        return T::from_layout(b);
    }

    let scale = a.exponent_value().max(b.exponent_value());
    let p = carrier_of::<T>(a.scale_exponent(-scale));
    let q = carrier_of::<T>(b.scale_exponent(-scale));
    let sum = p * p + q * q;
    rescale(sqrt::<T::Carrier>(sum), scale)
}

/// `sqrt(x^2 + y^2 + z^2)`, with the same special-value order as [`hypot`].
pub(crate) fn hypot3<T: Float>(x: T, y: T, z: T) -> T {
    settle(x, hypot_parts::<BitLayout, _>(&[argument(x), argument(y), argument(z)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::{DoubleDouble, Extended80, Quad128};

    #[test]
    fn test_sqrt_special_values() {
        assert!(sqrt(-1.0f64).is_nan());
        let z = sqrt(-0.0f64);
        assert!(z == 0.0 && z.is_sign_negative());
        assert_eq!(sqrt(f32::INFINITY), f32::INFINITY);
        assert!(sqrt(f64::NEG_INFINITY).is_nan());
    }

    #[test]
    fn test_sqrt_exact_squares() {
        for k in 1..200u32 {
            let v = (k * k) as f64;
            assert_eq!(sqrt(v), k as f64);
        }
        assert_eq!(sqrt(0.25f32), 0.5);
        assert_eq!(sqrt(f64::from_bits(4)), 2f64.powi(-536));
    }

    #[test]
    fn test_sqrt_doubledouble() {
        let r = sqrt(DoubleDouble::from_f64(2.0));
        let d = r - DoubleDouble::new(1.414_213_562_373_095_1, -9.667_293_313_452_913e-17);
        assert!(d.hi.abs() < 1e-31);
    }

    #[test]
    fn test_sqrt_extended_keeps_range() {
        let x = Extended80::from_parts(false, 16383 + 9000, 0);
        let r = sqrt(x);
        assert_eq!(r.unbiased_exponent(), 4500);
        assert_eq!(r.significand_word(), 1u64 << 63);
        let q = Quad128::from_parts(false, 16383 - 16001, 0);
        let qs = sqrt(q);
        assert_eq!(qs.unbiased_exponent(), -8001);
        assert_eq!(qs.scale_exponent(8001).to_carrier().hi, std::f64::consts::SQRT_2);
    }

    #[test]
    fn test_cbrt() {
        assert_eq!(cbrt(27.0f64), 3.0);
        assert_eq!(cbrt(-8.0f32), -2.0);
        assert_eq!(cbrt(0.125f64), 0.5);
        let z = cbrt(-0.0f64);
        assert!(z == 0.0 && z.is_sign_negative());
        assert_eq!(cbrt(f64::NEG_INFINITY), f64::NEG_INFINITY);
        let r = cbrt(DoubleDouble::from_f64(3.0));
        let d = r - DoubleDouble::new(1.442_249_570_307_408_3, 8.054_912_676_113_687e-17);
        assert!(d.hi.abs() < 1e-31);
    }

    #[test]
    fn test_hypot() {
        assert_eq!(hypot(3.0f64, 4.0), 5.0);
        assert_eq!(hypot(-5.0f32, 12.0), 13.0);
        assert_eq!(hypot(f64::NAN, f64::NEG_INFINITY), f64::INFINITY);
        assert!(hypot(f64::NAN, 1.0).is_nan());
        assert_eq!(hypot(0.0f64, -0.0), 0.0);
        let big = hypot(3e300f64, 4e300);
        assert!((big - 5e300).abs() <= 5e300 * f64::EPSILON);
        let small = hypot(3e-320f64, 4e-320);
        assert!((small - 5e-320).abs() <= f64::from_bits(1));
    }

    #[test]
    fn test_hypot3() {
        assert_eq!(hypot3(2.0f64, -3.0, 6.0), 7.0);
        assert_eq!(hypot3(1.0f32, 4.0, 8.0), 9.0);
        assert_eq!(hypot3(f64::NAN, 1.0, f64::NEG_INFINITY), f64::INFINITY);
        assert!(hypot3(f64::NAN, 1.0, 2.0).is_nan());
        let z = hypot3(-0.0f64, -0.0, -0.0);
        assert!(z == 0.0 && z.is_sign_positive());
        assert_eq!(hypot3(0.0f64, -4.0, 0.0), 4.0);
        let big = hypot3(2e300f64, 3e300, 6e300);
        assert!((big - 7e300).abs() <= 7e300 * f64::EPSILON);
        let x = Extended80::from_parts(false, 16383 + 12000, 0);
        let r = hypot3(x, x, x);
        assert_eq!(r.unbiased_exponent(), 12000);
    }
}
