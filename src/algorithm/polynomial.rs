//! Closed-form kernel evaluators.
//!
//! Every approximation in the library reduces to one of three shapes:
//!
//! - **Polynomial**: Horner evaluation of a truncated Maclaurin/Taylor series
//!   or of a minimax fit. An alternating series truncated after `k` terms has
//!   absolute error below `|x|^(2k+1) / (2k+1)`.
//! - **Rational**: the quotient of two Horner-evaluated polynomials in a
//!   transformed variable, fitted offline.
//! - **Padé**: a rational approximant centered on an expansion point, used
//!   where a short numerator/denominator pair beats a single polynomial of
//!   equal degree.
//!
//! Coefficients are always stored constant term first. This module only
//! evaluates; fitting happens offline.

use crate::dtype::Real;

/// Evaluate `c[0] + c[1] x + ... + c[n] x^n`.
///
/// An empty slice evaluates to zero.
#[inline]
pub fn horner<T: Real>(coeffs: &[T], x: T) -> T {
    let mut acc = T::ZERO;
    for &c in coeffs.iter().rev() {
        acc = acc * x + c;
    }
    acc
}

/// Evaluate `num(x) / den(x)`.
#[inline]
pub fn rational<T: Real>(num: &[T], den: &[T], x: T) -> T {
    horner(num, x) / horner(den, x)
}

/// Evaluate a Padé approximant expanded around `center`.
#[inline]
pub fn pade<T: Real>(num: &[T], den: &[T], x: T, center: T) -> T {
    rational(num, den, x - center)
}

/// Evaluate a polynomial whose `f64` coefficients are rounded into `T`.
#[inline]
pub fn horner_f64<T: Real>(coeffs: &[f64], x: T) -> T {
    let mut acc = T::ZERO;
    for &c in coeffs.iter().rev() {
        acc = acc * x + T::from_f64(c);
    }
    acc
}
