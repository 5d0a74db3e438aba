//! Per-carrier approximation kernels.
//!
//! Each function family has a kernel trait implemented once per carrier
//! (`f32`, `f64`, [`DoubleDouble`](crate::dtype::DoubleDouble)). A kernel is
//! pure and valid only on its documented interval; the dispatchers in
//! [`runtime`](crate::runtime) are responsible for reducing arguments into
//! that interval. Coefficient tables live next to the implementation that
//! uses them and are never shared across precisions.
//!
//! # Kernel Summary
//!
//! | Kernel | Interval | `f32` | `f64` | double-double |
//! |--------|----------|-------|-------|---------------|
//! | [`SqrtKernel`] | `u` in `[0, 1/128)` | binomial, 2 terms | binomial, 4 terms | `f64` seed + Newton |
//! | [`CbrtKernel`] | `u` in `[0, 1/128)` | binomial, 2 terms | binomial, 4 terms | `f64` seed + Newton |
//! | [`ExpKernel`] | `\|r\| <= ln2/128` | Taylor, 3 terms | Taylor, 5 terms | Taylor, 11 terms |
//! | [`LogKernel`] | `\|a\| <= 1/5` | atanh series, 4 terms | 11 terms | 23 terms |
//! | [`ArctanKernel`] | `\|t\| <= 0.1765` | via `f64` | minimax, degree 7 | Maclaurin, 22 terms |
//! | [`ArcsinKernel`] | `t` in `[0, 1/4]` | via `f64` | rational 4/4 | rational 9/8 |
//! | [`TrigKernel`] | `\|r\| <= 1/4` | via `f64` | Maclaurin in `r` | nested Maclaurin, 16 levels |
//! | [`ErfKernel`] | piecewise | minimax | minimax | series + continued fraction |
//!
//! The inverse trigonometric and the series-based special functions run in
//! the [`Wide`] carrier of the storage carrier: `f32` arguments are widened
//! to `f64` once and the result is rounded once, which keeps them inside
//! two units in the last place. Bessel, Fresnel and Lambert W series are
//! summed in double-double for every carrier (see
//! [`series`](crate::algorithm::series)).

mod double;
mod doubledouble;
mod single;

use super::classify::Thresholds;
use super::tables::{self, EXP2_ENTRIES};
use crate::dtype::{DoubleDouble, Float, Real};

/// `64 / ln 2`, used to pick the exponential table entry
const INV_LN2_BY_64: f64 = 92.332_482_616_893_66;

/// Arithmetic rounding to integral values.
///
/// Implementations use only additions and comparisons, so they serve the
/// portable path.
pub trait RoundingKernel: Real {
    /// Round toward zero. NaN and infinities pass through; zero keeps its sign.
    fn round_toward_zero(self) -> Self;

    /// Round toward negative infinity.
    #[inline]
    fn round_down(self) -> Self {
        let t = self.round_toward_zero();
        if t > self { t - Self::ONE } else { t }
    }

    /// Round toward positive infinity.
    #[inline]
    fn round_up(self) -> Self {
        let t = self.round_toward_zero();
        if t < self { t + Self::ONE } else { t }
    }
}

/// Square root near one.
pub trait SqrtKernel: Real {
    /// `sqrt(1 + u)` for `u` in `[0, 1/128)`, accurate enough that one
    /// Newton step reaches the carrier's precision.
    fn sqrt_near_one(u: Self) -> Self;

    /// `sqrt(m)` for `m` in `[1, 2)` from a Padé approximant centered at 1.5.
    fn sqrt_pade(m: Self) -> Self;

    /// `sqrt(m)` for `m` in `[1, 2)` through the mantissa table.
    #[inline]
    fn sqrt_reduced(m: Self, index: usize) -> Self {
        let u = tables::mantissa_reduction(m, index);
        Self::sqrt_near_one(u) * Self::from_f64(tables::SQRT_NODES[index])
    }

    /// One Newton step `y' = (y + m/y) / 2` toward `sqrt(m)`.
    #[inline]
    fn sqrt_newton(y: Self, m: Self) -> Self {
        Self::HALF * (y + m / y)
    }
}

/// Cube root near one.
pub trait CbrtKernel: Real {
    /// `cbrt(1 + u)` for `u` in `[0, 1/128)`, accurate enough that one
    /// Newton step reaches the carrier's precision.
    fn cbrt_near_one(u: Self) -> Self;

    /// `cbrt(m)` for `m` in `[1, 2)` from a Padé approximant centered at 1.5.
    fn cbrt_pade(m: Self) -> Self;

    /// `cbrt(m)` for `m` in `[1, 2)` through the mantissa table.
    #[inline]
    fn cbrt_reduced(m: Self, index: usize) -> Self {
        let u = tables::mantissa_reduction(m, index);
        Self::cbrt_near_one(u) * Self::from_f64(tables::CBRT_NODES[index])
    }

    /// One Newton step `y' = y - (y^3 - m) / (3 y^2)` toward `cbrt(m)`.
    #[inline]
    fn cbrt_newton(y: Self, m: Self) -> Self {
        let y2 = y * y;
        y - (y2 * y - m) / (Self::THREE * y2)
    }
}

/// Exponential after table reduction.
pub trait ExpKernel: Real {
    /// Split `x` into `k = round(64 x / ln 2)` and `r = x - k ln2/64`.
    ///
    /// Requires `|64 x / ln 2| < 2^21`.
    fn exp_reduce(x: Self) -> (i32, Self);

    /// `e^r - 1` for `|r| <= ln2/128`.
    fn expm1_kernel(r: Self) -> Self;

    /// `e^x` as `(y, n)` with `e^x = y * 2^n` and `y` in `[0.99, 2)`.
    fn exp_scaled(x: Self) -> (Self, i32) {
        let (k, r) = Self::exp_reduce(x);
        let j = k.rem_euclid(EXP2_ENTRIES) as usize;
        let n = k.div_euclid(EXP2_ENTRIES);
        let (lead, tail) = tables::exp2_entry::<Self>(j);
        let p = Self::expm1_kernel(r);
        (lead + ((lead + tail) * p + tail), n)
    }

    /// `e^x` for arguments whose result stays inside the carrier's range.
    #[inline]
    fn exp_in_range(x: Self) -> Self {
        let (y, n) = Self::exp_scaled(x);
        y.mul_pow2(n)
    }
}

/// Logarithm of a renormalized mantissa.
pub trait LogKernel: Real {
    /// `atanh(a)` for `|a| <= 1/5`.
    fn atanh_kernel(a: Self) -> Self;

    /// `e * ln 2` as a leading value and a correction.
    fn ln2_multiple(e: i32) -> (Self, Self);

    /// `e ln 2 + log(m)` for `m` in `[0.75, 1.5)`, through
    /// `log(m) = 2 atanh(s / (2 + s))` with `s = m - 1`.
    #[inline]
    fn log_reduced(m: Self, e: i32) -> Self {
        let s = m - Self::ONE;
        let a = s / (Self::TWO + s);
        let (hi, lo) = Self::ln2_multiple(e);
        hi + (lo + Self::TWO * Self::atanh_kernel(a))
    }
}

/// Arctangent of a reduced argument.
pub trait ArctanKernel: Real {
    /// `atan(t)` for `|t| <= 0.1765`.
    fn arctan_kernel(t: Self) -> Self;
}

/// Arcsine quotient `(asin(x) - x) / x^3` as a function of `t = x^2`.
pub trait ArcsinKernel: Real {
    /// Maclaurin series, valid for `t < 1/64`.
    fn arcsin_series(t: Self) -> Self;

    /// Rational or minimax fit, valid for `t` in `[0, 1/4]`.
    fn arcsin_rational(t: Self) -> Self;
}

/// `sin(pi r)` and `cos(pi r)` on the reduced interval.
pub trait TrigKernel: Real {
    /// `pi/180`
    const PI_BY_180: Self;

    /// `sin(pi r)` for `|r| <= 1/4`.
    fn sin_pi_kernel(r: Self) -> Self;

    /// `cos(pi r)` for `|r| <= 1/4`.
    fn cos_pi_kernel(r: Self) -> Self;
}

/// Exchange with the double-double carrier the special-function series
/// are summed in.
pub trait SeriesKernel: Real {
    /// Exact widening to double-double.
    fn to_series(self) -> DoubleDouble;

    /// Round a double-double result to this carrier.
    fn from_series(value: DoubleDouble) -> Self;
}

/// Error function pieces for positive arguments.
pub trait ErfKernel: ExpKernel {
    /// Exponent bounds of the pieces. Tiny arguments never reach a kernel.
    const ERF_THRESHOLDS: Thresholds;

    /// `erf(x)` for `x` in the Small class.
    fn erf_small(x: Self) -> Self;

    /// `erf(x)` for `x` in the Mid class.
    fn erf_mid(x: Self) -> Self;

    /// `erf(x)` for `x` in the Large class.
    fn erf_large(x: Self) -> Self;

    /// `erf(x)` for `x` in the Huge class, saturating to one.
    fn erf_huge(x: Self) -> Self;
}

/// Every kernel a carrier provides.
///
/// Carriers are their own storage type, so the bit-layout dispatchers can
/// recurse into the carrier when a function needs another function's result
/// (the arcsine tail needs a square root, `hypot` and `arctan2` reduce into
/// carrier-range calls).
pub trait Kernels:
    Float<Carrier = Self>
    + RoundingKernel
    + SqrtKernel
    + CbrtKernel
    + ExpKernel
    + LogKernel
    + ErfKernel
    + Widen
{
}

impl<T> Kernels for T where
    T: Float<Carrier = T>
        + RoundingKernel
        + SqrtKernel
        + CbrtKernel
        + ExpKernel
        + LogKernel
        + ErfKernel
        + Widen
{
}

/// Carrier with the kernels of the inverse trigonometric, periodic and
/// series-based special functions.
pub trait WideKernels: Kernels + ArctanKernel + ArcsinKernel + TrigKernel + SeriesKernel {}

impl<T> WideKernels for T where
    T: Kernels + ArctanKernel + ArcsinKernel + TrigKernel + SeriesKernel
{
}

/// Carrier a function evaluates in when the storage carrier alone cannot
/// hold its error below two units in the last place.
///
/// `f64` and double-double are their own wide carrier.
pub trait Widen: Real {
    /// The wider carrier
    type Wide: WideKernels;

    /// Exact widening.
    fn widen(self) -> Self::Wide;

    /// Round a wide result back to this carrier.
    fn narrow(wide: Self::Wide) -> Self;
}

/// Wide carrier of `C`.
pub type Wide<C> = <C as Widen>::Wide;

/// `round(64 x / ln 2)` with ties away from zero.
#[inline]
pub(crate) fn exp_table_index(x: f64) -> i32 {
    let t = x * INV_LN2_BY_64;
    if t < 0.0 {
        (t - 0.5) as i32
    } else {
        (t + 0.5) as i32
    }
}

/// `(sin(pi t), cos(pi t))` for `t` in `[0, 2]`.
///
/// `t = n/2 + f` with `n = round(2t)` and `|f| <= 1/4`. The subtraction is
/// exact, so the kernels see the reduced argument unrounded.
pub(crate) fn sin_cos_half_turns<C: TrigKernel + RoundingKernel>(t: C) -> (C, C) {
    let n = (t * C::TWO + C::HALF).round_down();
    let f = t - n * C::HALF;
    sin_cos_quadrant(n.to_i32(), f)
}

/// `(sin, cos)` of `pi (n/2 + f)` for `|f| <= 1/4`.
pub(crate) fn sin_cos_quadrant<C: TrigKernel>(n: i32, f: C) -> (C, C) {
    let s = C::sin_pi_kernel(f);
    let c = C::cos_pi_kernel(f);
    match n.rem_euclid(4) {
        0 => (s, c),
        1 => (c, -s),
        2 => (-s, -c),
        _ => (-c, s),
    }
}

/// Tiny bound shared by the odd kernels: below `2^-(p/2 + 1)` the cubic
/// term no longer reaches the last bit.
#[inline]
pub(crate) const fn odd_tiny_exponent(precision: u32) -> i32 {
    -((precision / 2) as i32 + 1)
}
