//! Rounding and bit-level helpers.

use crate::dtype::{Float, LDouble};
use crate::runtime::{DefaultPath, MathPath};

unary_ops! {
    /// `|x|`. The sign of a NaN is cleared as well.
    abs;
    /// Largest integral value not greater than `x`.
    floor;
    /// Smallest integral value not less than `x`.
    ceil;
    /// `x` rounded toward zero.
    trunc;
    /// `x - trunc(x)`, with the sign of `x`. A zero result is `+0`; NaN and
    /// infinities give NaN.
    fractional_part;
    /// `x - 2 trunc(x / 2)`, in `(-2, 2)` with the sign of `x`.
    mod_2;
}

binary_ops! {
    /// Magnitude of `x` with the sign of `sign`.
    copysign(x, sign);
}

/// Split `x` into `(m, e)` with `|m|` in `[1, 2)` and `x = m 2^e`.
///
/// NaN, infinities and zeros come back unchanged with `e = 0`.
///
/// ```
/// use numr_libm::ops::base2_mant_and_exp;
///
/// assert_eq!(base2_mant_and_exp(-12.0f64), (-1.5, 3));
/// ```
#[inline]
pub fn base2_mant_and_exp<T: Float>(x: T) -> (T, i32) {
    DefaultPath::base2_mant_and_exp(x)
}

/// [`base2_mant_and_exp`] for `f32`.
#[inline]
pub fn base2_mant_and_exp_f32(x: f32) -> (f32, i32) {
    base2_mant_and_exp(x)
}

/// [`base2_mant_and_exp`] for `f64`.
#[inline]
pub fn base2_mant_and_exp_f64(x: f64) -> (f64, i32) {
    base2_mant_and_exp(x)
}

/// [`base2_mant_and_exp`] for the build's long double.
#[inline]
pub fn base2_mant_and_exp_ld(x: LDouble) -> (LDouble, i32) {
    base2_mant_and_exp(x)
}

/// `2^n`, exact wherever the result is representable (subnormals included)
/// and saturating to `+inf` or `+0` outside.
#[inline]
pub fn pow2<T: Float>(n: i32) -> T {
    DefaultPath::pow2(n)
}

/// [`pow2`] for `f32`.
#[inline]
pub fn pow2_f32(n: i32) -> f32 {
    pow2(n)
}

/// [`pow2`] for `f64`.
#[inline]
pub fn pow2_f64(n: i32) -> f64 {
    pow2(n)
}

/// [`pow2`] for the build's long double.
#[inline]
pub fn pow2_ld(n: i32) -> LDouble {
    pow2(n)
}
