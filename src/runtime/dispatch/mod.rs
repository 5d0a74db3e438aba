//! Routing shared by both paths.
//!
//! The two paths differ in how they detect special values, classify and
//! reduce an argument. Once an argument is split into sign, unit mantissa
//! and exponent, the kernel selection, the reductions of the periodic
//! functions and the symmetry tails are identical, and live here.
//!
//! A path hands a core an [`Argument`] and gets back an [`Outcome`]: a
//! carrier value with a pending power of two, which the path applies the
//! way it applies every other rescale.

mod inverse;
mod periodic;
mod special;

pub(super) use inverse::{
    arccos_from_arcsin, arccos_negative_tail, arcsin_core, arcsin_tail, arctan2_finite,
    arctan2_quadrant, arctan_positive, half_pi_minus_twice,
};
pub(super) use periodic::{cosd, cospi, sind, sinpi};
pub(super) use special::{FresnelKind, bessel_i0, bessel_j0, cosh, fresnel, hypot_parts, lambert_w};

use crate::algorithm::classify::{MagnitudeClass, Thresholds};
use crate::algorithm::kernels::{Kernels, odd_tiny_exponent};
use crate::algorithm::tables::{ARCTAN_END_EXPONENT, ARCTAN_FIRST_EXPONENT};

/// `exp`: only a Tiny class, below which `e^x` rounds to `1 + x`.
pub(crate) const fn exp_thresholds(precision: u32) -> Thresholds {
    Thresholds::new(odd_tiny_exponent(precision), i32::MAX, i32::MAX, i32::MAX)
}

/// `arctan`: Small takes the kernel directly, Mid uses the exponent
/// buckets, Huge reflects through `pi/2 - atan(1/x)`.
pub(crate) const fn arctan_thresholds(precision: u32) -> Thresholds {
    Thresholds::new(
        odd_tiny_exponent(precision),
        ARCTAN_FIRST_EXPONENT,
        ARCTAN_END_EXPONENT,
        ARCTAN_END_EXPONENT,
    )
}

/// `arcsin`: series below 1/8, rational below 1/2, tail below 1.
pub(crate) const fn arcsin_thresholds(precision: u32) -> Thresholds {
    Thresholds::new(odd_tiny_exponent(precision), -3, -1, 0)
}

/// `arccos`: below `2^-(p+2)` the result rounds to `pi/2`.
pub(crate) const fn arccos_thresholds(precision: u32) -> Thresholds {
    Thresholds::new(-(precision as i32) - 2, -3, -1, 0)
}

/// Exponent below which an even function rounds to its value at zero and
/// the cubic term of `sin(pi x)` drops out.
#[inline]
pub(crate) const fn flat_exponent(precision: u32) -> i32 {
    -((precision / 2) as i32 + 2)
}

/// Finite nonzero argument as `(-1)^negative mantissa 2^exponent`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(super) struct Split<C> {
    pub negative: bool,
    /// In `[1, 2)`, exact
    pub mantissa: C,
    pub exponent: i32,
}

impl<C: Kernels> Split<C> {
    /// `|x|` in the carrier. Requires the exponent inside the carrier's range.
    #[inline]
    pub fn magnitude(&self) -> C {
        self.mantissa.mul_pow2(self.exponent)
    }

    /// `x` in the carrier. Requires the exponent inside the carrier's range.
    #[inline]
    pub fn value(&self) -> C {
        odd(self.magnitude(), self.negative)
    }
}

/// A storage argument as the cores see it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(super) enum Argument<C> {
    NaN,
    Infinite { negative: bool },
    Zero { negative: bool },
    Finite(Split<C>),
}

/// Result of a core, settled into storage by the calling path.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(super) enum Outcome<C> {
    /// The argument itself
    Input,
    NaN,
    Zero { negative: bool },
    Infinite { negative: bool },
    /// `value 2^n`
    Scaled(C, i32),
}

impl<C: Kernels> Outcome<C> {
    /// A carrier value with nothing left to scale.
    #[inline]
    pub fn value(value: C) -> Self {
        Outcome::Scaled(value, 0)
    }

    /// One, the value of the even functions at zero.
    #[inline]
    pub fn one() -> Self {
        Outcome::Scaled(C::ONE, 0)
    }
}

/// `erf(a)` for `a > 0` in the Small class or above.
pub(super) fn erf_positive<C: Kernels>(a: C, class: MagnitudeClass) -> C {
    match class {
        MagnitudeClass::Small => C::erf_small(a),
        MagnitudeClass::Mid => C::erf_mid(a),
        MagnitudeClass::Large => C::erf_large(a),
        _ => C::erf_huge(a),
    }
}

/// Apply the sign of an odd function's argument.
#[inline]
pub(super) fn odd<C: crate::dtype::Real>(value: C, negative: bool) -> C {
    if negative { -value } else { value }
}
