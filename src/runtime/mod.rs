//! Evaluation paths
//!
//! Every function has two interchangeable implementations behind the
//! [`MathPath`] trait:
//!
//! - [`BitLayout`] reads the argument's sign, exponent and mantissa fields,
//!   indexes reduction tables with mantissa bits and rescales results by
//!   rewriting the exponent. Extended and quadruple layouts keep their full
//!   exponent range.
//! - [`Portable`] uses comparisons and carrier arithmetic only. It never
//!   inspects an encoding, so it runs anywhere the carrier's arithmetic does.
//!
//! Both paths route through the same kernels and must agree within the
//! sampled bound checked by [`validation`](crate::validation).
//!
//! # Architecture
//!
//! ```text
//! MathPath (strategy identity)
//! ├── BitLayout   layout predicates, classify_normalized, mantissa tables
//! └── Portable    Real predicates, classify_value, Padé on [1, 2)
//!         │
//!         └── dispatch (shared thresholds, restoration tails, and the
//!                       Argument -> Outcome cores of the periodic and
//!                       series-based functions)
//! ```
//!
//! [`DefaultPath`] is the path the crate-level functions in
//! [`ops`](crate::ops) use. It is chosen at build time by the `portable`
//! feature and is never a runtime switch.

mod bit_layout;
mod dispatch;
mod portable;

pub(crate) use dispatch::{
    arccos_thresholds, arcsin_thresholds, arctan_thresholds, exp_thresholds, flat_exponent,
};

use crate::dtype::Float;

/// Strategy implementing every function of the library.
///
/// `MathPath` uses static dispatch only: implementors are zero-sized markers
/// and every method is an associated function generic over the storage type.
///
/// # Example
///
/// ```
/// use numr_libm::runtime::{BitLayout, MathPath, Portable};
///
/// let fast = BitLayout::sqrt(2.0f64);
/// let portable = Portable::sqrt(2.0f64);
/// assert!((fast - portable).abs() <= f64::EPSILON * 2.0);
/// ```
pub trait MathPath: Copy + Send + Sync + 'static {
    /// Human-readable name of this path
    const NAME: &'static str;

    // ------------------------------------------------------------------------
    // Rounding and bits
    // ------------------------------------------------------------------------

    /// `|x|`.
    fn abs<T: Float>(x: T) -> T;

    /// Magnitude of `x` with the sign of `sign`.
    fn copysign<T: Float>(x: T, sign: T) -> T;

    /// Largest integral value not greater than `x`.
    fn floor<T: Float>(x: T) -> T;

    /// Smallest integral value not less than `x`.
    fn ceil<T: Float>(x: T) -> T;

    /// Integral part of `x`, rounded toward zero.
    fn trunc<T: Float>(x: T) -> T;

    /// `x - trunc(x)`, carrying the sign of `x`. NaN and infinities give NaN.
    fn fractional_part<T: Float>(x: T) -> T;

    /// `x - 2 trunc(x / 2)`. NaN and infinities give NaN.
    fn mod_2<T: Float>(x: T) -> T;

    /// `(m, e)` with `|m|` in `[1, 2)`, `m` carrying the sign of `x` and
    /// `x = m 2^e`. NaN, infinities and zeros return `(x, 0)`.
    fn base2_mant_and_exp<T: Float>(x: T) -> (T, i32);

    /// `2^n`, saturating to `+inf` and `+0`.
    fn pow2<T: Float>(n: i32) -> T;

    // ------------------------------------------------------------------------
    // Roots
    // ------------------------------------------------------------------------

    /// Square root. Negative arguments other than `-0` give NaN.
    fn sqrt<T: Float>(x: T) -> T;

    /// Cube root.
    fn cbrt<T: Float>(x: T) -> T;

    /// `sqrt(x^2 + y^2)` without intermediate overflow. An infinite argument
    /// wins over NaN.
    fn hypot<T: Float>(x: T, y: T) -> T;

    /// `sqrt(x^2 + y^2 + z^2)`, with the special values of [`hypot`](Self::hypot).
    fn hypot3<T: Float>(x: T, y: T, z: T) -> T;

    // ------------------------------------------------------------------------
    // Exponential
    // ------------------------------------------------------------------------

    /// `e^x`.
    fn exp<T: Float>(x: T) -> T;

    /// Natural logarithm. Negative arguments give NaN, zeros give `-inf`.
    fn log<T: Float>(x: T) -> T;

    /// Hyperbolic cosine.
    fn cosh<T: Float>(x: T) -> T;

    // ------------------------------------------------------------------------
    // Periodic
    // ------------------------------------------------------------------------

    /// `sin(pi x)`. Integers give a zero with the sign of `x`.
    fn sinpi<T: Float>(x: T) -> T;

    /// `cos(pi x)`. Half-integers give `+0`.
    fn cospi<T: Float>(x: T) -> T;

    /// Sine of `x` degrees.
    fn sind<T: Float>(x: T) -> T;

    /// Cosine of `x` degrees.
    fn cosd<T: Float>(x: T) -> T;

    // ------------------------------------------------------------------------
    // Inverse trigonometric
    // ------------------------------------------------------------------------

    /// Arcsine on `[-1, 1]`, NaN outside.
    fn arcsin<T: Float>(x: T) -> T;

    /// Arccosine on `[-1, 1]`, NaN outside.
    fn arccos<T: Float>(x: T) -> T;

    /// Arctangent.
    fn arctan<T: Float>(x: T) -> T;

    /// Four-quadrant arctangent of `y / x`.
    fn arctan2<T: Float>(y: T, x: T) -> T;

    // ------------------------------------------------------------------------
    // Special
    // ------------------------------------------------------------------------

    /// Error function.
    fn erf<T: Float>(x: T) -> T;

    /// Modified Bessel function of the first kind, order zero.
    fn bessel_i0<T: Float>(x: T) -> T;

    /// Bessel function of the first kind, order zero.
    fn bessel_j0<T: Float>(x: T) -> T;

    /// `∫₀ˣ cos(t²) dt`.
    fn fresnel_cos<T: Float>(x: T) -> T;

    /// `∫₀ˣ sin(t²) dt`.
    fn fresnel_sin<T: Float>(x: T) -> T;

    /// `∫₀ˣ cos(pi t²/2) dt`.
    fn normalized_fresnel_cos<T: Float>(x: T) -> T;

    /// `∫₀ˣ sin(pi t²/2) dt`.
    fn normalized_fresnel_sin<T: Float>(x: T) -> T;

    /// Principal branch of the Lambert W function. NaN below `-1/e`.
    fn lambert_w<T: Float>(x: T) -> T;
}

/// Bit-layout driven path.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BitLayout;

/// Comparison-only path.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Portable;

/// The build's default path.
///
/// `BitLayout` unless the `portable` feature is enabled.
#[cfg(not(feature = "portable"))]
pub type DefaultPath = BitLayout;

/// The build's default path.
#[cfg(feature = "portable")]
pub type DefaultPath = Portable;

macro_rules! impl_math_path {
    ($path:ty, $name:literal, $module:ident) => {
        impl MathPath for $path {
            const NAME: &'static str = $name;

            #[inline]
            fn abs<T: Float>(x: T) -> T {
                $module::rounding::abs(x)
            }

            #[inline]
            fn copysign<T: Float>(x: T, sign: T) -> T {
                $module::rounding::copysign(x, sign)
            }

            #[inline]
            fn floor<T: Float>(x: T) -> T {
                $module::rounding::floor(x)
            }

            #[inline]
            fn ceil<T: Float>(x: T) -> T {
                $module::rounding::ceil(x)
            }

            #[inline]
            fn trunc<T: Float>(x: T) -> T {
                $module::rounding::trunc(x)
            }

            #[inline]
            fn fractional_part<T: Float>(x: T) -> T {
                $module::rounding::fractional_part(x)
            }

            #[inline]
            fn mod_2<T: Float>(x: T) -> T {
                $module::rounding::mod_2(x)
            }

            #[inline]
            fn base2_mant_and_exp<T: Float>(x: T) -> (T, i32) {
                $module::rounding::base2_mant_and_exp(x)
            }

            #[inline]
            fn pow2<T: Float>(n: i32) -> T {
                $module::rounding::pow2(n)
            }

            #[inline]
            fn sqrt<T: Float>(x: T) -> T {
                $module::roots::sqrt(x)
            }

            #[inline]
            fn cbrt<T: Float>(x: T) -> T {
                $module::roots::cbrt(x)
            }

            #[inline]
            fn hypot<T: Float>(x: T, y: T) -> T {
                $module::roots::hypot(x, y)
            }

            #[inline]
            fn hypot3<T: Float>(x: T, y: T, z: T) -> T {
                $module::roots::hypot3(x, y, z)
            }

            #[inline]
            fn exp<T: Float>(x: T) -> T {
                $module::exponential::exp(x)
            }

            #[inline]
            fn log<T: Float>(x: T) -> T {
                $module::exponential::log(x)
            }

            #[inline]
            fn cosh<T: Float>(x: T) -> T {
                $module::exponential::cosh(x)
            }

            #[inline]
            fn sinpi<T: Float>(x: T) -> T {
                $module::periodic::sinpi(x)
            }

            #[inline]
            fn cospi<T: Float>(x: T) -> T {
                $module::periodic::cospi(x)
            }

            #[inline]
            fn sind<T: Float>(x: T) -> T {
                $module::periodic::sind(x)
            }

            #[inline]
            fn cosd<T: Float>(x: T) -> T {
                $module::periodic::cosd(x)
            }

            #[inline]
            fn arcsin<T: Float>(x: T) -> T {
                $module::inverse_trig::arcsin(x)
            }

            #[inline]
            fn arccos<T: Float>(x: T) -> T {
                $module::inverse_trig::arccos(x)
            }

            #[inline]
            fn arctan<T: Float>(x: T) -> T {
                $module::inverse_trig::arctan(x)
            }

            #[inline]
            fn arctan2<T: Float>(y: T, x: T) -> T {
                $module::inverse_trig::arctan2(y, x)
            }

            #[inline]
            fn erf<T: Float>(x: T) -> T {
                $module::special::erf(x)
            }

            #[inline]
            fn bessel_i0<T: Float>(x: T) -> T {
                $module::special::bessel_i0(x)
            }

            #[inline]
            fn bessel_j0<T: Float>(x: T) -> T {
                $module::special::bessel_j0(x)
            }

            #[inline]
            fn fresnel_cos<T: Float>(x: T) -> T {
                $module::special::fresnel_cos(x)
            }

            #[inline]
            fn fresnel_sin<T: Float>(x: T) -> T {
                $module::special::fresnel_sin(x)
            }

            #[inline]
            fn normalized_fresnel_cos<T: Float>(x: T) -> T {
                $module::special::normalized_fresnel_cos(x)
            }

            #[inline]
            fn normalized_fresnel_sin<T: Float>(x: T) -> T {
                $module::special::normalized_fresnel_sin(x)
            }

            #[inline]
            fn lambert_w<T: Float>(x: T) -> T {
                $module::special::lambert_w(x)
            }
        }
    };
}

impl_math_path!(BitLayout, "bit-layout", bit_layout);
impl_math_path!(Portable, "portable", portable);
