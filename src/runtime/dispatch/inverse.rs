//! Kernel selection and symmetry tails of the inverse trigonometric
//! functions.
//!
//! These run in the wide carrier: a single-precision argument is widened
//! once it is classified and the result is rounded once at the end.

use super::{Outcome, Split, arctan_thresholds, odd};
use crate::algorithm::classify::MagnitudeClass;
use crate::algorithm::kernels::{Kernels, Wide, WideKernels};
use crate::algorithm::tables::{arctan_bucket, arctan_node_value, arctan_reduction};
use crate::dtype::Real;

/// `atan(a)` for `a >= 0` in the Small, Mid or Huge class.
///
/// `bucket` is only read for Mid arguments.
pub(in crate::runtime) fn arctan_positive<W: WideKernels>(
    a: W,
    class: MagnitudeClass,
    bucket: usize,
) -> W {
    match class {
        MagnitudeClass::Mid => {
            let t = arctan_reduction(a, bucket);
            let (hi, lo) = arctan_node_value::<W>(bucket);
            (lo + W::arctan_kernel(t)) + hi
        }
        MagnitudeClass::Huge => {
            (W::PI_BY_TWO_TAIL - W::arctan_kernel(W::ONE / a)) + W::PI_BY_TWO
        }
        _ => W::arctan_kernel(a),
    }
}

/// Fold a first-quadrant angle `a = atan(|y/x|)` into the quadrant of `x`.
#[inline]
pub(in crate::runtime) fn arctan2_quadrant<W: WideKernels>(a: W, x_negative: bool) -> W {
    if x_negative {
        // pi - a, with the tail of pi kept: PI = 2 PI_BY_TWO exactly
        W::PI + (W::PI_BY_TWO_TAIL + W::PI_BY_TWO_TAIL - a)
    } else {
        a
    }
}

/// `atan2(y, x)` for finite nonzero `x` and `y`.
///
/// The quotient is formed from the two mantissas and the exponents are
/// subtracted separately, so arguments far outside the carrier's range
/// still give the right angle. A positive `x` with a tiny ratio returns the
/// ratio itself with its power of two pending.
pub(in crate::runtime) fn arctan2_finite<C: Kernels>(
    y: Split<C>,
    x: Split<C>,
    precision: u32,
) -> Outcome<C> {
    let mut q = y.mantissa.widen() / x.mantissa.widen();
    let mut d = y.exponent - x.exponent;
    if q < <Wide<C>>::ONE {
        q = q * <Wide<C>>::TWO;
        d -= 1;
    }

    let thresholds = arctan_thresholds(precision);
    let guard = precision as i32 + 4;
    let angle = if d < thresholds.tiny && !x.negative {
        return Outcome::Scaled(C::narrow(odd(q, y.negative)), d);
    } else if d < -guard {
        <Wide<C>>::ZERO
    } else if d > guard {
        <Wide<C>>::PI_BY_TWO
    } else {
        let a = q.mul_pow2(d);
        match thresholds.bucket(d) {
            MagnitudeClass::Tiny => a,
            MagnitudeClass::Mid => arctan_positive(a, MagnitudeClass::Mid, arctan_bucket(d)),
            class => arctan_positive(a, class, 0),
        }
    };
    Outcome::value(C::narrow(odd(arctan2_quadrant(angle, x.negative), y.negative)))
}

/// `asin(a)` for `a` in `[0, 1/2)`, Small or Mid class.
pub(in crate::runtime) fn arcsin_core<W: WideKernels>(a: W, class: MagnitudeClass) -> W {
    let t = a * a;
    let q = if class == MagnitudeClass::Small {
        W::arcsin_series(t)
    } else {
        W::arcsin_rational(t)
    };
    a + a * (t * q)
}

/// `r = asin(sqrt(z))` for the tail `z = (1 - a) / 2`, given `s = sqrt(z)`.
///
/// Then `asin(a) = pi/2 - 2r` and `acos(a) = 2r`.
#[inline]
pub(in crate::runtime) fn arcsin_tail<W: WideKernels>(z: W, s: W) -> W {
    s + s * (z * W::arcsin_rational(z))
}

/// `pi/2 - 2r`, keeping the tail of `pi/2`.
#[inline]
pub(in crate::runtime) fn half_pi_minus_twice<W: WideKernels>(r: W) -> W {
    W::PI_BY_TWO - (W::TWO * r - W::PI_BY_TWO_TAIL)
}

/// `acos(x)` for `|x| < 1/2` from `asin(x)`.
#[inline]
pub(in crate::runtime) fn arccos_from_arcsin<W: WideKernels>(asin: W) -> W {
    W::PI_BY_TWO - (asin - W::PI_BY_TWO_TAIL)
}

/// `acos(-a) = pi - 2r` for the negative tail.
#[inline]
pub(in crate::runtime) fn arccos_negative_tail<W: WideKernels>(r: W) -> W {
    W::PI + (W::TWO * W::PI_BY_TWO_TAIL - W::TWO * r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::DoubleDouble;

    fn split(negative: bool, mantissa: f64, exponent: i32) -> Split<f64> {
        Split {
            negative,
            mantissa,
            exponent,
        }
    }

    #[test]
    fn test_arctan_huge_reflection() {
        let a = arctan_positive(100.0f64, MagnitudeClass::Huge, 0);
        assert!((a - 100f64.atan()).abs() <= 2.0 * f64::EPSILON);
        let b = arctan_positive(1.5f64, MagnitudeClass::Mid, 3);
        assert!((b - 1.5f64.atan()).abs() <= 2.0 * f64::EPSILON);
    }

    #[test]
    fn test_quadrant_fold_keeps_pi_tail() {
        let a = arctan2_quadrant(DoubleDouble::ZERO, true);
        assert_eq!(a.hi, std::f64::consts::PI);
        assert!((a.lo - 1.224_646_799_147_353_2e-16).abs() < 1e-31);
        assert_eq!(arctan2_quadrant(0.25f64, false), 0.25);
    }

    #[test]
    fn test_arctan2_finite_far_apart_exponents() {
        // y/x = 2^-3000: returned as the ratio with the exponent pending
        let out = arctan2_finite(split(true, 1.0, -1500), split(false, 1.0, 1500), 53);
        assert_eq!(out, Outcome::Scaled(-1.0, -3000));
        let out = arctan2_finite(split(false, 1.0, -1500), split(true, 1.0, 1500), 53);
        assert_eq!(out, Outcome::value(std::f64::consts::PI));
        let Outcome::Scaled(v, 0) = arctan2_finite(split(true, 1.5, 2000), split(true, 1.0, 0), 53)
        else {
            panic!("scaled")
        };
        assert!((v + std::f64::consts::FRAC_PI_2).abs() <= f64::EPSILON);
        // the mantissa quotient below one moves into the exponent
        let out = arctan2_finite(split(false, 1.0, -100), split(false, 1.5, 0), 53);
        let Outcome::Scaled(v, n) = out else {
            panic!("{out:?}")
        };
        assert_eq!(n, -101);
        assert!((v - 4.0 / 3.0).abs() <= f64::EPSILON);
    }

    #[test]
    fn test_arctan2_finite_single_rounds_once() {
        let Outcome::Scaled(v, 0) = arctan2_finite(
            Split {
                negative: false,
                mantissa: 1.004_16f32,
                exponent: -3,
            },
            Split {
                negative: false,
                mantissa: 1.0f32,
                exponent: 0,
            },
            24,
        ) else {
            panic!("scaled")
        };
        let want = (1.004_16f32 as f64 / 8.0).atan();
        assert!((v as f64 - want).abs() <= want * f32::EPSILON as f64);
    }

    #[test]
    fn test_arccos_tails() {
        // acos(x) for x = 0.75 through z = 1/8
        let z = 0.125f64;
        let r = arcsin_tail(z, z.sqrt());
        assert!((2.0 * r - 0.75f64.acos()).abs() <= 2.0 * f64::EPSILON);
        let neg = arccos_negative_tail(r);
        assert!((neg - (-0.75f64).acos()).abs() <= 4.0 * f64::EPSILON);
        let asin = half_pi_minus_twice(r);
        assert!((asin - 0.75f64.asin()).abs() <= 2.0 * f64::EPSILON);
    }
}
