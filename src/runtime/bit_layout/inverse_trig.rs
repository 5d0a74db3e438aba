//! Arcsine, arccosine and the arctangents.
//!
//! Classification reads the storage layout; the evaluation then runs in the
//! wide carrier and rounds once.

use super::super::dispatch::{
    Argument, arccos_from_arcsin, arccos_negative_tail, arccos_thresholds, arcsin_core,
    arcsin_tail, arcsin_thresholds, arctan2_finite, arctan_positive, arctan_thresholds,
    half_pi_minus_twice, odd,
};
use super::roots::sqrt;
use super::{argument, carrier_of, nan, settle, with_sign, zero};
use crate::algorithm::classify::{MagnitudeClass, classify_normalized};
use crate::algorithm::kernels::{Wide, WideKernels, Widen};
use crate::algorithm::tables::arctan_bucket;
use crate::dtype::{Float, FloatLayout, Real};

/// `|x|` in the wide carrier.
#[inline]
fn wide_magnitude<T: Float>(layout: T::Layout) -> Wide<T::Carrier> {
    carrier_of::<T>(layout.with_sign(false)).widen()
}

/// Round a wide result once into storage.
#[inline]
fn store<T: Float>(value: Wide<T::Carrier>) -> T {
    T::from_carrier(T::Carrier::narrow(value))
}

pub(crate) fn arcsin<T: Float>(x: T) -> T {
    let layout = x.to_layout();
    let negative = layout.sign();
    let thresholds = arcsin_thresholds(T::Layout::PRECISION);
    let class = classify_normalized(layout, &thresholds);
    let a = match class {
        MagnitudeClass::NaN | MagnitudeClass::Zero | MagnitudeClass::Tiny => return x,
        MagnitudeClass::Infinite => return nan(),
        MagnitudeClass::Huge => {
            if wide_magnitude::<T>(layout) == <Wide<T::Carrier>>::ONE {
                <Wide<T::Carrier>>::PI_BY_TWO
            } else {
                return nan();
            }
        }
        MagnitudeClass::Large => half_pi_minus_twice(tail_root(wide_magnitude::<T>(layout))),
        _ => arcsin_core(wide_magnitude::<T>(layout), class),
    };
    store(odd(a, negative))
}

pub(crate) fn arccos<T: Float>(x: T) -> T {
    let layout = x.to_layout();
    let negative = layout.sign();
    let thresholds = arccos_thresholds(T::Layout::PRECISION);
    let class = classify_normalized(layout, &thresholds);
    let a = match class {
        MagnitudeClass::NaN => return x,
        MagnitudeClass::Infinite => return nan(),
        MagnitudeClass::Zero | MagnitudeClass::Tiny => <Wide<T::Carrier>>::PI_BY_TWO,
        MagnitudeClass::Huge => {
            if wide_magnitude::<T>(layout) != <Wide<T::Carrier>>::ONE {
                return nan();
            }
            if negative {
                <Wide<T::Carrier>>::PI
            } else {
                return zero(false);
            }
        }
        MagnitudeClass::Large => {
            let r = tail_root(wide_magnitude::<T>(layout));
            if negative {
                arccos_negative_tail(r)
            } else {
                <Wide<T::Carrier>>::TWO * r
            }
        }
        _ => {
            let asin = arcsin_core(wide_magnitude::<T>(layout), class);
            arccos_from_arcsin(odd(asin, negative))
        }
    };
    store(a)
}

/// `asin(sqrt(z))` with `z = (1 - a) / 2`, for `a` in `[1/2, 1)`.
///
/// `1 - a` is exact there, and the square root runs on this path.
fn tail_root<W: WideKernels>(a: W) -> W {
    let z = (W::ONE - a) * W::HALF;
    arcsin_tail(z, sqrt(z))
}

pub(crate) fn arctan<T: Float>(x: T) -> T {
    let layout = x.to_layout();
    let negative = layout.sign();
    let thresholds = arctan_thresholds(T::Layout::PRECISION);
    let class = classify_normalized(layout, &thresholds);
    let a = match class {
        MagnitudeClass::NaN | MagnitudeClass::Zero | MagnitudeClass::Tiny => return x,
        MagnitudeClass::Infinite => <Wide<T::Carrier>>::PI_BY_TWO,
        MagnitudeClass::Mid => {
            let (normal, offset) = layout.normalize();
            let bucket = arctan_bucket(normal.unbiased_exponent() + offset);
            arctan_positive(wide_magnitude::<T>(layout), class, bucket)
        }
        _ => arctan_positive(wide_magnitude::<T>(layout), class, 0),
    };
    store(odd(a, negative))
}

/// Four-quadrant arctangent.
///
/// Special cases are resolved in a fixed order: NaN, both infinite, `x`
/// infinite, `y` infinite, `y` zero, `x` zero. Finite arguments go to the
/// shared core with their exponents kept apart.
pub(crate) fn arctan2<T: Float>(y: T, x: T) -> T {
    let ly = y.to_layout();
    let lx = x.to_layout();
    let y_negative = ly.sign();
    let x_negative = lx.sign();
    if ly.is_nan() || lx.is_nan() {
        return nan();
    }

    let angle = if ly.is_infinite() && lx.is_infinite() {
        if x_negative {
            T::Carrier::THREE_PI_BY_FOUR
        } else {
            T::Carrier::PI_BY_FOUR
        }
    } else if lx.is_infinite() {
        if x_negative {
            T::Carrier::PI
        } else {
            return zero(y_negative);
        }
    } else if ly.is_infinite() {
        T::Carrier::PI_BY_TWO
    } else if ly.is_zero() {
        if x_negative {
            T::Carrier::PI
        } else {
            return zero(y_negative);
        }
    } else if lx.is_zero() {
        T::Carrier::PI_BY_TWO
    } else {
        let (Argument::Finite(sy), Argument::Finite(sx)) = (argument(y), argument(x)) else {
            return nan();
        };
        return settle(y, arctan2_finite(sy, sx, T::Layout::PRECISION));
    };
    with_sign(T::from_carrier(angle), y_negative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::{DoubleDouble, Extended80};
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    const THREE_PI_BY_FOUR: f64 = 2.356_194_490_192_345;

    #[test]
    fn test_arccos_endpoints() {
        assert_eq!(arccos(-1.0f64), PI);
        assert_eq!(arccos(1.0f64), 0.0);
        assert_eq!(arccos(0.0f32), std::f32::consts::FRAC_PI_2);
        assert!(arccos(1.5f64).is_nan());
        assert!(arccos(f64::INFINITY).is_nan());
        assert_eq!(arccos(1e-300f64), FRAC_PI_2);
    }

    #[test]
    fn test_arcsin_endpoints() {
        assert_eq!(arcsin(1.0f64), FRAC_PI_2);
        assert_eq!(arcsin(-1.0f32), -std::f32::consts::FRAC_PI_2);
        assert!(arcsin(-1.0000001f64).is_nan());
        let z = arcsin(-0.0f64);
        assert!(z == 0.0 && z.is_sign_negative());
        assert_eq!(arcsin(1e-10f64), 1e-10);
    }

    #[test]
    fn test_arcsin_arccos_values() {
        for &x in &[-0.99f64, -0.7, -0.5, -0.3, -0.1, 0.01, 0.2, 0.49, 0.5, 0.8, 0.999_999] {
            assert!((arcsin(x) - x.asin()).abs() <= 2.0 * f64::EPSILON, "asin x={x}");
            assert!((arccos(x) - x.acos()).abs() <= 4.0 * f64::EPSILON, "acos x={x}");
        }
        let s = arcsin(DoubleDouble::from_f64(0.4));
        let d = s - DoubleDouble::new(0.411_516_846_067_488_06, -1.877_661_592_332_638_8e-17);
        assert!(d.hi.abs() < 1e-32);
    }

    #[test]
    fn test_arctan_buckets_and_limits() {
        assert_eq!(arctan(f64::INFINITY), FRAC_PI_2);
        assert_eq!(arctan(f64::NEG_INFINITY), -FRAC_PI_2);
        assert_eq!(arctan(1e-20f64), 1e-20);
        for k in -4..6 {
            let edge = 2f64.powi(k);
            for x in [edge, edge * (1.0 - f64::EPSILON / 2.0), edge * (1.0 + f64::EPSILON)] {
                assert!((arctan(x) - x.atan()).abs() <= 2.0 * f64::EPSILON, "x={x}");
                assert_eq!(arctan(-x), -arctan(x));
            }
        }
        let t = arctan(DoubleDouble::from_f64(0.17));
        let d = t - DoubleDouble::new(0.168_390_157_147_529_92, -8.336_262_800_282_273e-18);
        assert!(d.hi.abs() < 1e-32);
    }

    #[test]
    fn test_arctan2_special_cases() {
        assert_eq!(arctan2(0.0f64, 1.0), 0.0);
        assert_eq!(arctan2(1.0f64, 0.0), FRAC_PI_2);
        assert_eq!(arctan2(0.0f64, -1.0), PI);
        assert_eq!(arctan2(-1.0f64, 0.0), -FRAC_PI_2);
        assert_eq!(arctan2(-0.0f64, -0.0), -PI);
        let z = arctan2(-0.0f64, 0.0);
        assert!(z == 0.0 && z.is_sign_negative());
        let inf = f64::INFINITY;
        assert_eq!(arctan2(inf, inf), FRAC_PI_4);
        assert_eq!(arctan2(-inf, inf), -FRAC_PI_4);
        assert_eq!(arctan2(inf, -inf), THREE_PI_BY_FOUR);
        assert_eq!(arctan2(-inf, -inf), -THREE_PI_BY_FOUR);
        assert_eq!(arctan2(1.0f64, -inf), PI);
        assert_eq!(arctan2(-inf, 5.0f64), -FRAC_PI_2);
        assert!(arctan2(f64::NAN, inf).is_nan());
    }

    #[test]
    fn test_single_precision_rounds_once() {
        // |error| stays within 2 units in the last place of f32
        for &x in &[0.12552f32, 0.505_681, 0.514_385, -0.514_385] {
            let want = (x as f64).asin();
            let ulp = f32::EPSILON as f64 * want.abs();
            assert!((arcsin(x) as f64 - want).abs() <= 2.0 * ulp, "asin x={x}");
            let want = (x as f64).acos();
            let ulp = f32::EPSILON as f64 * want.abs();
            assert!((arccos(x) as f64 - want).abs() <= 2.0 * ulp, "acos x={x}");
            let want = (x as f64).atan();
            let ulp = f32::EPSILON as f64 * want.abs();
            assert!((arctan(x) as f64 - want).abs() <= 2.0 * ulp, "atan x={x}");
        }
    }

    #[test]
    fn test_arctan2_keeps_exponents_apart() {
        let big = Extended80::from_parts(false, 16383 + 3000, 0);
        let small = Extended80::from_parts(false, 16383 - 3000, 0);
        // 2^-6000 is far below the double-double range
        let r = arctan2(small, big);
        assert_eq!(r, Extended80::from_parts(false, 16383 - 6000, 0));
        let r = arctan2(big, small);
        assert!((r.to_double() - FRAC_PI_2).abs() <= f64::EPSILON);
    }

    #[test]
    fn test_arctan2_values() {
        for &(y, x) in &[(1.0f64, 1.0), (1.0, -1.0), (-2.0, 3.0), (1e-300, 1e300), (5e307, 1e-300)] {
            assert!((arctan2(y, x) - y.atan2(x)).abs() <= 4.0 * f64::EPSILON, "({y}, {x})");
        }
    }
}
