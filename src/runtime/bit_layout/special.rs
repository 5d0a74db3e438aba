//! Error function, Bessel functions, Fresnel integrals and Lambert W.

use super::super::BitLayout;
use super::super::dispatch::{self, FresnelKind, erf_positive, odd};
use super::{argument, carrier_of, rescale, settle, unit_mantissa, with_sign};
use crate::algorithm::classify::{MagnitudeClass, classify_normalized};
use crate::algorithm::kernels::ErfKernel;
use crate::dtype::{Float, FloatLayout, Real};

/// `erf(x)`, odd in `x` and saturating to `+-1`.
///
/// Below the Tiny bound `erf(x) = 2x / sqrt(pi)` to working precision. That
/// product is formed on the unit mantissa and rescaled on the layout, so
/// subnormal arguments keep every significant bit.
pub(crate) fn erf<T: Float>(x: T) -> T {
    let layout = x.to_layout();
    let negative = layout.sign();
    let class = classify_normalized(layout, &T::Carrier::ERF_THRESHOLDS);
    match class {
        MagnitudeClass::NaN | MagnitudeClass::Zero => x,
        MagnitudeClass::Infinite => T::from_layout(T::Layout::one(negative)),
        MagnitudeClass::Tiny => {
            let (mantissa, e) = unit_mantissa(layout);
            let scaled = carrier_of::<T>(mantissa) * T::Carrier::TWO_BY_SQRT_PI;
            with_sign(rescale::<T>(scaled, e), negative)
        }
        _ => {
            let a = carrier_of::<T>(layout.with_sign(false));
            T::from_carrier(odd(erf_positive(a, class), negative))
        }
    }
}

pub(crate) fn bessel_i0<T: Float>(x: T) -> T {
    let outcome =
        dispatch::bessel_i0::<BitLayout, _>(argument(x), T::Layout::PRECISION, T::Layout::BIAS);
    settle(x, outcome)
}

pub(crate) fn bessel_j0<T: Float>(x: T) -> T {
    settle(x, dispatch::bessel_j0::<BitLayout, _>(argument(x), T::Layout::PRECISION))
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
    settle(x, dispatch::lambert_w::<BitLayout, _>(argument(x), T::Layout::PRECISION))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::{DoubleDouble, Extended80, Quad128};

    const ERF_VALUES: [(f64, f64); 6] = [
        (0.1, 0.112_462_916_018_284_9),
        (0.5, 0.520_499_877_813_046_5),
        (1.0, 0.842_700_792_949_714_9),
        (1.5, 0.966_105_146_475_310_7),
        (2.5, 0.999_593_047_982_555),
        (4.0, 0.999_999_984_582_742_1),
    ];

    #[test]
    fn test_erf_special_values() {
        assert_eq!(erf(f64::INFINITY), 1.0);
        assert_eq!(erf(f32::NEG_INFINITY), -1.0);
        assert!(erf(f64::NAN).is_nan());
        let z = erf(-0.0f64);
        assert!(z == 0.0 && z.is_sign_negative());
        assert_eq!(erf(10.0f64), 1.0);
        assert_eq!(erf(-30.0f32), -1.0);
    }

    #[test]
    fn test_erf_values() {
        for &(x, want) in &ERF_VALUES {
            assert!((erf(x) - want).abs() <= 2.0 * f64::EPSILON, "x={x}");
            assert_eq!(erf(-x), -erf(x));
        }
        let single = erf(0.5f32);
        assert!((single - 0.520_499_9).abs() <= 2.0 * f32::EPSILON);
    }

    #[test]
    fn test_erf_tiny_arguments() {
        let x = 1e-300f64;
        let want = x * std::f64::consts::FRAC_2_SQRT_PI;
        assert!((erf(x) - want).abs() <= want * f64::EPSILON);
        let sub = f64::from_bits(1_000_000);
        let y = erf(sub);
        assert!(y > sub && y < 1.2 * sub);
        assert_eq!(erf(-sub), -y);
    }

    #[test]
    fn test_erf_doubledouble() {
        let y = erf(DoubleDouble::from_f64(1.0));
        let d = y - DoubleDouble::new(0.842_700_792_949_714_9, -2.480_101_178_911_860_2e-17);
        assert!(d.hi.abs() < 1e-32);
    }

    #[test]
    fn test_bessel_special_values() {
        assert_eq!(bessel_i0(0.0f64), 1.0);
        assert_eq!(bessel_i0(f64::NEG_INFINITY), f64::INFINITY);
        assert_eq!(bessel_j0(-0.0f32), 1.0);
        assert_eq!(bessel_j0(f64::INFINITY), 0.0);
        assert!(bessel_i0(f32::NAN).is_nan());
        assert!(bessel_j0(f64::NAN).is_nan());
        assert_eq!(bessel_i0(800.0f64), f64::INFINITY);
    }

    #[test]
    fn test_bessel_values() {
        let i0 = bessel_i0(2.5f32);
        assert!((i0 - 3.289_839_1).abs() <= 2.0 * f32::EPSILON * 3.3);
        let j0 = bessel_j0(2.5f64);
        assert!((j0 + 0.048_383_776_468_197_99).abs() <= 4.0 * f64::EPSILON * 0.05);
        // I0(800) = 6.0e345 is in range for the extended layout
        let big = bessel_i0(Extended80::from_double(800.0));
        assert_eq!(big.unbiased_exponent(), 1148);
    }

    #[test]
    fn test_fresnel_paths() {
        let c = fresnel_cos(2.0f64);
        assert!((c - 0.461_461_462_433_216_4).abs() <= 2.0 * f64::EPSILON);
        let s = fresnel_sin(-2.0f64);
        assert!((s + 0.804_776_489_343_756_1).abs() <= 2.0 * f64::EPSILON);
        assert_eq!(normalized_fresnel_cos(f64::INFINITY), 0.5);
        assert_eq!(normalized_fresnel_sin(f32::NEG_INFINITY), -0.5);
        let z = fresnel_sin(-0.0f64);
        assert!(z == 0.0 && z.is_sign_negative());
        let q = normalized_fresnel_sin(Quad128::from_double(0.75));
        assert!((q.to_double() - 0.208_877_111_233_383_57).abs() <= f64::EPSILON);
    }

    #[test]
    fn test_lambert_w_paths() {
        assert_eq!(lambert_w(0.0f64), 0.0);
        assert_eq!(lambert_w(f64::INFINITY), f64::INFINITY);
        assert!(lambert_w(-1.0f64).is_nan());
        let w = lambert_w(2.0f32);
        assert!((w - 0.852_605_5).abs() <= 2.0 * f32::EPSILON);
        let e = 2.718_281_828_459_045f64;
        assert!((lambert_w(e) - 1.0).abs() <= 2.0 * f64::EPSILON);
        // W(x) = ln x - ln ln x + ... for x = 2^10000
        let far = lambert_w(Extended80::from_parts(false, 16383 + 10000, 0));
        assert!((far.to_double() - 6922.629_254_672_907).abs() < 1e-9);
    }
}
