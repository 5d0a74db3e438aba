//! Error function, Bessel functions, Fresnel integrals and Lambert W in the
//! carrier.

use super::super::Portable;
use super::super::dispatch::{self, FresnelKind, erf_positive, odd};
use super::{argument, settle};
use crate::algorithm::classify::{MagnitudeClass, classify_value};
use crate::algorithm::kernels::Kernels;
use crate::dtype::{Float, FloatLayout, Real};

/// `erf(x)`. Beyond `2^1021` it is `+-1`; below `2^-958` it is
/// `2x / sqrt(pi)` with the exponent applied in storage.
pub(crate) fn erf<T: Float>(x: T) -> T {
    let (c, n) = x.to_carrier_scaled();
    if n > 0 {
        T::from_carrier(odd(T::Carrier::ONE, c < T::Carrier::ZERO))
    } else if n < 0 {
        T::from_carrier_scaled(c * T::Carrier::TWO_BY_SQRT_PI, n)
    } else {
        T::from_carrier(erf_carrier(c))
    }
}

fn erf_carrier<C: Kernels>(x: C) -> C {
    let negative = x < C::ZERO;
    match classify_value(x, &C::ERF_THRESHOLDS) {
        MagnitudeClass::NaN | MagnitudeClass::Zero => x,
        MagnitudeClass::Infinite => odd(C::ONE, negative),
        MagnitudeClass::Tiny => x * C::TWO_BY_SQRT_PI,
        class => odd(erf_positive(x.abs(), class), negative),
    }
}

pub(crate) fn bessel_i0<T: Float>(x: T) -> T {
    let outcome =
        dispatch::bessel_i0::<Portable, _>(argument(x), T::Layout::PRECISION, T::Layout::BIAS);
    settle(x, outcome)
}

pub(crate) fn bessel_j0<T: Float>(x: T) -> T {
    settle(x, dispatch::bessel_j0::<Portable, _>(argument(x), T::Layout::PRECISION))
}

#[inline]
fn fresnel<T: Float>(kind: FresnelKind, x: T) -> T {
    settle(x, dispatch::fresnel(kind, argument(x), T::Layout::PRECISION))
}

pub(crate) fn fresnel_cos<T: Float>(x: T) -> T {
    fresnel(FresnelKind::Cos, x)
}

pub(crate) fn fresnel_sin<T: Float>(x: T) -> T {
    fresnel(FresnelKind::Sin, x)
}

pub(crate) fn normalized_fresnel_cos<T: Float>(x: T) -> T {
    fresnel(FresnelKind::NormalizedCos, x)
}

pub(crate) fn normalized_fresnel_sin<T: Float>(x: T) -> T {
    fresnel(FresnelKind::NormalizedSin, x)
}

pub(crate) fn lambert_w<T: Float>(x: T) -> T {
    settle(x, dispatch::lambert_w::<Portable, _>(argument(x), T::Layout::PRECISION))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::{DoubleDouble, Extended80, Quad128};

    #[test]
    fn test_erf() {
        assert_eq!(erf(f64::NEG_INFINITY), -1.0);
        assert_eq!(erf(7.0f32), 1.0);
        let z = erf(-0.0f64);
        assert!(z == 0.0 && z.is_sign_negative());
        assert!(erf(f32::NAN).is_nan());
        for &(x, want) in &[(0.1f64, 0.112_462_916_018_284_9), (1.0, 0.842_700_792_949_714_9)] {
            assert!((erf(x) - want).abs() <= 2.0 * f64::EPSILON);
            assert_eq!(erf(-x), -erf(x));
        }
        let tiny = 1e-200f64;
        assert_eq!(erf(tiny), tiny * std::f64::consts::FRAC_2_SQRT_PI);
        let y = erf(DoubleDouble::from_f64(1.0));
        let d = y - DoubleDouble::new(0.842_700_792_949_714_9, -2.480_101_178_911_860_2e-17);
        assert!(d.hi.abs() < 1e-32);
    }

    #[test]
    fn test_erf_beyond_the_carrier() {
        let big = Extended80::from_parts(true, 16383 + 1500, 0);
        assert_eq!(erf(big).to_double(), -1.0);
        let tiny = Quad128::from_parts(false, 16383 - 5000, 0);
        let y = erf(tiny);
        assert_eq!(y.unbiased_exponent(), -5000);
        let m = y.scale_exponent(5000).to_double();
        assert!((m - std::f64::consts::FRAC_2_SQRT_PI).abs() <= f64::EPSILON);
    }

    #[test]
    fn test_series_functions() {
        assert_eq!(bessel_i0(-0.0f64), 1.0);
        assert!((bessel_i0(1.0f64) - 1.266_065_877_752_008_4).abs() <= 2.0 * f64::EPSILON);
        assert!((bessel_j0(1.0f32) - 0.765_197_7).abs() <= f32::EPSILON);
        assert_eq!(bessel_j0(f64::NEG_INFINITY), 0.0);
        let c = normalized_fresnel_cos(1.0f64);
        assert!((c - 0.779_893_400_376_822_8).abs() <= 2.0 * f64::EPSILON);
        let s = fresnel_sin(-1.0f64);
        assert!((s + 0.310_268_301_723_381_1).abs() <= 2.0 * f64::EPSILON);
        assert_eq!(normalized_fresnel_sin(f64::INFINITY), 0.5);
        assert!((fresnel_cos(f32::INFINITY) - 0.626_657_1).abs() <= f32::EPSILON);
        assert!((lambert_w(1.0f64) - 0.567_143_290_409_783_9).abs() <= 2.0 * f64::EPSILON);
        assert!(lambert_w(-0.5f64).is_nan());
    }
}
