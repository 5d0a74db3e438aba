//! Rounding through carrier arithmetic.
//!
//! A value outside the carrier's range is either above `2^1021`, and so
//! integral and even for every storage precision, or below `2^-958`, where
//! only its sign matters to the rounding functions.

use super::{mant_and_exp, signed};
use crate::algorithm::kernels::{Kernels, RoundingKernel};
use crate::dtype::{Float, Real};

#[inline]
pub(crate) fn abs<T: Float>(x: T) -> T {
    let (c, n) = x.to_carrier_scaled();
    T::from_carrier_scaled(c.abs(), n)
}

#[inline]
pub(crate) fn copysign<T: Float>(x: T, sign: T) -> T {
    let (c, n) = x.to_carrier_scaled();
    let (s, _) = sign.to_carrier_scaled();
    T::from_carrier_scaled(c.with_sign_of(s), n)
}

/// Apply an integral rounding to a storage value.
///
/// Huge values are already integral. A tiny value rounds like any value of
/// its sign inside `(0, 1)`, here `c / 4`.
fn integral<T: Float>(x: T, round: impl FnOnce(T::Carrier) -> T::Carrier) -> T {
    let (c, n) = x.to_carrier_scaled();
    if n > 0 {
        x
    } else if n < 0 {
        T::from_carrier(round(c.mul_pow2(-2)))
    } else {
        T::from_carrier(round(c))
    }
}

#[inline]
pub(crate) fn floor<T: Float>(x: T) -> T {
    integral(x, RoundingKernel::round_down)
}

#[inline]
pub(crate) fn ceil<T: Float>(x: T) -> T {
    integral(x, RoundingKernel::round_up)
}

#[inline]
pub(crate) fn trunc<T: Float>(x: T) -> T {
    integral(x, RoundingKernel::round_toward_zero)
}

pub(crate) fn fractional_part<T: Float>(x: T) -> T {
    remainder_of(x, T::Carrier::ONE)
}

pub(crate) fn mod_2<T: Float>(x: T) -> T {
    remainder_of(x, T::Carrier::TWO)
}

/// Remainder against a unit of one or two. Huge values are multiples of
/// both and give `+0`; tiny ones are their own remainder.
fn remainder_of<T: Float>(x: T, unit: T::Carrier) -> T {
    let (c, n) = x.to_carrier_scaled();
    if n > 0 {
        T::from_carrier(T::Carrier::ZERO)
    } else if n < 0 {
        x
    } else {
        T::from_carrier(remainder(c, unit))
    }
}

/// `c - unit trunc(c / unit)` for a power-of-two `unit`, exact, with a zero
/// result reported as `+0`.
fn remainder<C: Kernels>(c: C, unit: C) -> C {
    if !c.is_finite() {
        return C::NAN;
    }
    let r = c - (c / unit).round_toward_zero() * unit;
    if r == C::ZERO { C::ZERO } else { r }
}

pub(crate) fn base2_mant_and_exp<T: Float>(x: T) -> (T, i32) {
    let (c, n) = x.to_carrier_scaled();
    if !c.is_finite() || c == T::Carrier::ZERO {
        return (x, 0);
    }
    let (m, e) = mant_and_exp(c.abs());
    (T::from_carrier(signed(m, c < T::Carrier::ZERO)), e + n)
}

#[inline]
pub(crate) fn pow2<T: Float>(n: i32) -> T {
    T::from_carrier_scaled(T::Carrier::ONE, n)
}
