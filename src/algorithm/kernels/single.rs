//! `f32` kernels.
//!
//! Coefficients are rounded to single precision; each polynomial carries one
//! or two terms beyond what the interval strictly needs so that evaluation
//! error, not truncation, dominates. The inverse trigonometric and the
//! transcendental special functions run in `f64` through [`Widen`] and round
//! once at the end.

use super::{
    CbrtKernel, ErfKernel, ExpKernel, LogKernel, RoundingKernel, SqrtKernel, Widen,
    exp_table_index, odd_tiny_exponent,
};
use crate::algorithm::classify::Thresholds;
use crate::algorithm::polynomial::{horner, pade};
use crate::dtype::Real;

// ============================================================================
// Roots
// ============================================================================

/// Binomial series of `sqrt(1 + u) - 1`, divided by `u`
const SQRT_TAYLOR: [f32; 2] = [
    0.5,
    -0.125,
];

/// Binomial series of `cbrt(1 + u) - 1`, divided by `u`
const CBRT_TAYLOR: [f32; 2] = [
    0.33333334,
    -0.11111111,
];

/// Numerator of the [2/2] Padé approximant of `sqrt(1.5 + d)`
const SQRT_PADE_NUM: [f32; 3] = [
    1.2247449,
    1.0206207,
    0.17010346,
];

/// Denominator, constant term first
const SQRT_PADE_DEN: [f32; 3] = [
    1.0,
    0.5,
    0.027777778,
];

/// Numerator of the [2/2] Padé approximant of `cbrt(1.5 + d)`
const CBRT_PADE_NUM: [f32; 3] = [
    1.1447142,
    0.8903333,
    0.13190123,
];

/// Denominator, constant term first
const CBRT_PADE_DEN: [f32; 3] = [
    1.0,
    0.5555556,
    0.041152265,
];

// ============================================================================
// Exponential and logarithm
// ============================================================================

/// `ln2/64` truncated to 10 bits, so `k * LN2_BY_64_HI` is exact for `|k| < 2^14`
const LN2_BY_64_HI: f32 = 0.010_818_481_445_312_5;
/// `ln2/64 - LN2_BY_64_HI`
const LN2_BY_64_LO: f32 = 1.194_325_1e-5;

/// `(e^r - 1) / r` truncated after `r^2`
const EXPM1_TAYLOR: [f32; 3] = [
    1.0,
    0.5,
    0.16666667,
];

/// `ln 2` truncated to 16 bits
const LN2_HI: f32 = 0.693_145_751_953_125;
/// `ln 2 - LN2_HI`
const LN2_LO: f32 = 1.428_606_8e-6;

/// `1/3, 1/5, ...` for `atanh(a) = a + a^3/3 + ...`
const ATANH_SERIES: [f32; 4] = [
    0.33333334,
    0.2,
    0.14285715,
    0.11111111,
];

// ============================================================================
// Error function
// ============================================================================

/// Maclaurin coefficients of `erf(x)/x - 1` in `x^2`
const ERF_SERIES: [f32; 5] = [
    0.12837917,
    -0.37612638,
    0.11283792,
    -0.026866172,
    0.005223978,
];

/// Minimax fit of `erf(x)/x - 1` in `t = x^2` on `[1/64, 1]`
const ERF_MID: [f32; 6] = [
    0.12837908,
    -0.37612256,
    0.112798415,
    -0.026704391,
    0.0049112327,
    -0.0005610117,
];

/// Minimax fit of `erf(1.5 + z)` on `|z| <= 1/2`
const ERF_LARGE: [f32; 9] = [
    0.96610516,
    0.11893007,
    -0.17839542,
    0.13876355,
    -0.04459925,
    -0.015033717,
    0.01933218,
    -0.0038337458,
    -0.0023994646,
];

/// Minimax fit of `x e^(x^2) erfc(x)` in `u = 1/x^2` on `[1/16, 1/4]`
const ERFC_ASYMPTOTIC: [f32; 6] = [
    0.56416607,
    -0.28086415,
    0.39631987,
    -0.73111284,
    1.1094191,
    -0.8588427,
];

/// `erf(x)` rounds to one in single precision from here on
const ERF_SATURATION: f32 = 4.0;

impl RoundingKernel for f32 {
    fn round_toward_zero(self) -> f32 {
        const TWO_POW_23: f32 = 8_388_608.0;
        let a = Real::abs(self);
        // NaN, infinities and values past 2^p are already integral
        if a >= TWO_POW_23 || a.is_nan() {
            return self;
        }
        let mut r = (a + TWO_POW_23) - TWO_POW_23;
        if r > a {
            r -= 1.0;
        }
        r.with_sign_of(self)
    }
}

impl SqrtKernel for f32 {
    #[inline]
    fn sqrt_near_one(u: f32) -> f32 {
        1.0 + u * horner(&SQRT_TAYLOR, u)
    }

    #[inline]
    fn sqrt_pade(m: f32) -> f32 {
        pade(&SQRT_PADE_NUM, &SQRT_PADE_DEN, m, 1.5)
    }
}

impl CbrtKernel for f32 {
    #[inline]
    fn cbrt_near_one(u: f32) -> f32 {
        1.0 + u * horner(&CBRT_TAYLOR, u)
    }

    #[inline]
    fn cbrt_pade(m: f32) -> f32 {
        pade(&CBRT_PADE_NUM, &CBRT_PADE_DEN, m, 1.5)
    }
}

impl ExpKernel for f32 {
    #[inline]
    fn exp_reduce(x: f32) -> (i32, f32) {
        let k = exp_table_index(x as f64);
        let kf = k as f32;
        (k, (x - kf * LN2_BY_64_HI) - kf * LN2_BY_64_LO)
    }

    #[inline]
    fn expm1_kernel(r: f32) -> f32 {
        r * horner(&EXPM1_TAYLOR, r)
    }
}

impl LogKernel for f32 {
    #[inline]
    fn atanh_kernel(a: f32) -> f32 {
        let s = a * a;
        a + a * (s * horner(&ATANH_SERIES, s))
    }

    #[inline]
    fn ln2_multiple(e: i32) -> (f32, f32) {
        let e = e as f32;
        (e * LN2_HI, e * LN2_LO)
    }
}

impl Widen for f32 {
    type Wide = f64;

    #[inline]
    fn widen(self) -> f64 {
        self as f64
    }

    #[inline]
    fn narrow(wide: f64) -> f32 {
        wide as f32
    }
}

impl ErfKernel for f32 {
    const ERF_THRESHOLDS: Thresholds = Thresholds::new(odd_tiny_exponent(24), -3, 0, 1);

    #[inline]
    fn erf_small(x: f32) -> f32 {
        x + x * horner(&ERF_SERIES, x * x)
    }

    #[inline]
    fn erf_mid(x: f32) -> f32 {
        x + x * horner(&ERF_MID, x * x)
    }

    #[inline]
    fn erf_large(x: f32) -> f32 {
        horner(&ERF_LARGE, x - 1.5)
    }

    fn erf_huge(x: f32) -> f32 {
        if x >= ERF_SATURATION {
            return 1.0;
        }
        let x2 = x * x;
        let erfc = f32::exp_in_range(-x2) / x * horner(&ERFC_ASYMPTOTIC, 1.0 / x2);
        1.0 - erfc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(a: f32, b: f64) -> f64 {
        ((a as f64 - b) / b).abs()
    }

    #[test]
    fn test_rounding_kernel() {
        assert_eq!(2.75f32.round_toward_zero(), 2.0);
        assert_eq!((-2.75f32).round_toward_zero(), -2.0);
        assert_eq!((-2.5f32).round_down(), -3.0);
        assert_eq!(2.25f32.round_up(), 3.0);
        assert!((-0.25f32).round_toward_zero().is_sign_negative());
        assert_eq!(1.0e20f32.round_toward_zero(), 1.0e20);
        assert_eq!(8_388_607.5f32.round_toward_zero(), 8_388_607.0);
    }

    #[test]
    fn test_root_seeds() {
        let u = 1.0 / 256.0;
        assert!(rel(f32::sqrt_near_one(u), (1.0 + u as f64).sqrt()) < 1e-7);
        assert!(rel(f32::cbrt_near_one(u), (1.0 + u as f64).cbrt()) < 1e-7);
        assert!(rel(f32::sqrt_pade(1.9), 1.9f64.sqrt()) < 1e-4);
        assert!(rel(f32::cbrt_pade(1.0), 1.0) < 1e-4);
    }

    #[test]
    fn test_exp_and_log_kernels() {
        let (y, n) = f32::exp_scaled(10.0);
        assert!(rel(y.mul_pow2(n), 10f64.exp()) < 2e-7);
        assert!(rel(f32::log_reduced(1.25, 3), 10f64.ln()) < 2e-7);
    }

    #[test]
    fn test_widen_round_trip() {
        let x = 0.505_681_f32;
        assert_eq!(f32::narrow(x.widen()), x);
        assert_eq!(f32::narrow(std::f64::consts::FRAC_PI_2), std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn test_erf_pieces() {
        assert!(rel(f32::erf_small(0.1), 0.112_462_916_018_284_9) < 2e-7);
        assert!(rel(f32::erf_mid(0.75), 0.711_155_633_653_515_1) < 2e-7);
        assert!(rel(f32::erf_large(1.5), 0.966_105_146_475_310_8) < 2e-7);
        assert!(rel(f32::erf_huge(2.5), 0.999_593_047_982_555) < 1e-7);
        assert_eq!(f32::erf_huge(4.0), 1.0);
    }
}
