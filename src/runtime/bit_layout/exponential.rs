//! Exponential, natural logarithm and hyperbolic cosine.

use super::super::dispatch::{self, exp_thresholds};
use super::{argument, carrier_of, nan, rescale, settle, unit_mantissa, zero};
use crate::algorithm::classify::{MagnitudeClass, classify_normalized};
use crate::algorithm::kernels::{ExpKernel, LogKernel};
use crate::dtype::{Float, FloatLayout, Real};
use std::f64::consts::LN_2;

/// `e^x` as `y 2^n` with the power of two applied on the layout, so results
/// overflow and underflow at the storage type's limits rather than the
/// carrier's.
pub(crate) fn exp<T: Float>(x: T) -> T {
    let layout = x.to_layout();
    let thresholds = exp_thresholds(T::Layout::PRECISION);
    match classify_normalized(layout, &thresholds) {
        MagnitudeClass::NaN => return x,
        MagnitudeClass::Infinite if layout.sign() => return zero(false),
        MagnitudeClass::Infinite => return x,
        MagnitudeClass::Zero => return T::from_layout(T::Layout::one(false)),
        MagnitudeClass::Tiny => {
            return T::from_carrier(T::Carrier::ONE + x.to_carrier());
        }
        _ => {}
    }

    let bias = T::Layout::BIAS as f64;
    let c = carrier_of::<T>(layout);
    if c > T::Carrier::from_f64((bias + 1.0) * LN_2) {
        return T::from_layout(T::Layout::infinity(false));
    }
    if c < T::Carrier::from_f64(-(bias + T::Layout::PRECISION as f64 + 1.0) * LN_2) {
        return zero(false);
    }
    let (y, n) = T::Carrier::exp_scaled(c);
    rescale(y, n)
}

/// Natural logarithm with the mantissa renormalized to `[0.75, 1.5)`.
pub(crate) fn log<T: Float>(x: T) -> T {
    let layout = x.to_layout();
    if layout.is_nan() {
        return x;
    }
    if layout.is_zero() {
        return T::from_layout(T::Layout::infinity(true));
    }
    if layout.sign() {
        return nan();
    }
    if layout.is_infinite() {
        return x;
    }

    let (mantissa, mut e) = unit_mantissa(layout);
    let mut m = carrier_of::<T>(mantissa);
    if mantissa.mantissa_index(1) == 1 {
        m = m * T::Carrier::HALF;
        e += 1;
    }
    T::from_carrier(T::Carrier::log_reduced(m, e))
}

/// `cosh(x)`, overflowing at the storage type's limit.
pub(crate) fn cosh<T: Float>(x: T) -> T {
    let outcome = dispatch::cosh(argument(x), T::Layout::PRECISION, T::Layout::BIAS);
    settle(x, outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::{DoubleDouble, Extended80, Quad128};

    #[test]
    fn test_exp_special_values() {
        assert_eq!(exp(0.0f64), 1.0);
        assert_eq!(exp(-0.0f32), 1.0);
        assert_eq!(exp(f64::NEG_INFINITY), 0.0);
        assert_eq!(exp(f64::INFINITY), f64::INFINITY);
        assert!(exp(f32::NAN).is_nan());
        assert_eq!(exp(1e-20f64), 1.0);
    }

    #[test]
    fn test_exp_limits() {
        assert_eq!(exp(710.0f64), f64::INFINITY);
        assert_eq!(exp(-746.0f64), 0.0);
        let sub = exp(-740.0f64);
        assert!(sub > 0.0 && sub < f64::MIN_POSITIVE);
        assert!((exp(709.0f64) / 8.218_407_461_554_972e307 - 1.0).abs() < 4.0 * f64::EPSILON);
        assert_eq!(exp(89.0f32), f32::INFINITY);
    }

    #[test]
    fn test_exp_values() {
        for &x in &[-20.0f64, -1.0, -0.3, 0.001, 0.5, 1.0, 10.0, 300.0] {
            let y = exp(x);
            assert!((y / x.exp() - 1.0).abs() <= 2.0 * f64::EPSILON, "x={x}");
        }
        let e = exp(DoubleDouble::from_f64(-2.0));
        let d = e - DoubleDouble::new(0.135_335_283_236_612_7, -1.042_381_423_288_669e-17);
        assert!(d.hi.abs() < 1e-32);
    }

    #[test]
    fn test_exp_extended_range() {
        // e^11000 overflows f64 but not the extended layout
        let y = exp(Extended80::from_double(11000.0));
        assert!(!y.is_infinite());
        assert_eq!(y.unbiased_exponent(), 15869);
        let q = exp(Quad128::from_double(-11000.0));
        assert!(!q.is_zero());
        assert_eq!(q.unbiased_exponent(), -15870);
    }

    #[test]
    fn test_log_special_values() {
        assert_eq!(log(1.0f64), 0.0);
        assert_eq!(log(0.0f64), f64::NEG_INFINITY);
        assert_eq!(log(-0.0f32), f32::NEG_INFINITY);
        assert!(log(-1.0f64).is_nan());
        assert_eq!(log(f64::INFINITY), f64::INFINITY);
    }

    #[test]
    fn test_log_values() {
        for &x in &[1e-300f64, 0.1, 0.75, 1.4999, 1.5, 2.0, 10.0, 1e300] {
            let y = log(x);
            assert!((y - x.ln()).abs() <= 2.0 * f64::EPSILON * x.ln().abs(), "x={x}");
        }
        let sub = log(f64::from_bits(1));
        assert!((sub + 744.440_071_921_381_3).abs() < 1e-12);
        let l = log(DoubleDouble::from_f64(1.25));
        let d = l - DoubleDouble::new(0.223_143_551_314_209_76, -9.091_270_597_324_799e-18);
        assert!(d.hi.abs() < 1e-32);
        let big = log(Extended80::from_parts(false, 16383 + 16000, 0));
        assert!((big.to_double() - 16000.0 * LN_2).abs() < 1e-9);
    }

    #[test]
    fn test_cosh_values() {
        assert_eq!(cosh(0.0f64), 1.0);
        assert_eq!(cosh(-0.0f32), 1.0);
        assert_eq!(cosh(f64::NEG_INFINITY), f64::INFINITY);
        assert!(cosh(f64::NAN).is_nan());
        assert_eq!(cosh(1e-10f64), 1.0);
        for &x in &[0.5f64, -1.0, 3.0, 20.0, -300.0, 709.0] {
            let want = x.cosh();
            assert!((cosh(x) - want).abs() <= 2.0 * f64::EPSILON * want, "x={x}");
        }
        assert_eq!(cosh(711.0f64), f64::INFINITY);
        assert!((cosh(710.0f64) / 1.116_997_383_080_855_5e308 - 1.0).abs() <= 4.0 * f64::EPSILON);
    }

    #[test]
    fn test_cosh_extended_range() {
        // cosh(11000) = 1.66e4777, about 2^15868
        let r = cosh(Extended80::from_double(11000.0));
        assert_eq!(r.unbiased_exponent(), 15868);
        assert_eq!(cosh(Extended80::from_double(11400.0)), Extended80::infinity(false));
    }
}
