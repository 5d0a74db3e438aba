//! `sin(pi x)`, `cos(pi x)` and the degree-based sine and cosine.
//!
//! The argument is reduced exactly in the storage carrier: the mantissa is
//! doubled one bit at a time, subtracting the period whenever it is
//! exceeded, until no fractional bits remain. From there the rest of the
//! exponent is a modular power of two. The reduced value goes to the wide
//! carrier's kernels.

use super::{Argument, Outcome, flat_exponent, odd};
use crate::algorithm::kernels::{
    Kernels, SeriesKernel, TrigKernel, Wide, sin_cos_half_turns, sin_cos_quadrant,
};
use crate::dtype::{DoubleDouble, Real};

/// `2^k mod modulus`.
fn pow_mod_two(mut k: u32, modulus: u32) -> u64 {
    let m = modulus as u64;
    let mut result = 1 % m;
    let mut base = 2 % m;
    while k > 0 {
        if k & 1 == 1 {
            result = result * base % m;
        }
        base = base * base % m;
        k >>= 1;
    }
    result
}

/// `(m 2^e) mod modulus` in `[0, modulus)` for `m` in `[1, 2)`, exact.
///
/// A zero remainder is `+0`.
pub(super) fn reduce_modulo<C: Kernels>(m: C, e: i32, modulus: u32) -> C {
    // 2^top <= modulus < 2^(top + 1)
    let top = 31 - modulus.leading_zeros() as i32;
    if e < top {
        return m.mul_pow2(e);
    }

    let period = C::from_i32(modulus as i32);
    let mut r = m.mul_pow2(top);
    let mut k = e - top;
    loop {
        if r >= period {
            r = r - period;
        }
        if k == 0 {
            break;
        }
        if r.round_toward_zero() == r {
            let n = r.to_i32() as u64 * pow_mod_two(k as u32, modulus) % modulus as u64;
            return C::from_i32(n as i32);
        }
        r = r * C::TWO;
        k -= 1;
    }
    if r == C::ZERO { C::ZERO } else { r }
}

/// Replace a negative zero with `+0`.
#[inline]
fn positive_zero<W: Real>(v: W) -> W {
    if v == W::ZERO { W::ZERO } else { v }
}

/// `sin(pi x)`, odd. Integers give a zero with the sign of `x`.
pub(in crate::runtime) fn sinpi<C: Kernels>(x: Argument<C>, precision: u32) -> Outcome<C> {
    let s = match x {
        Argument::NaN | Argument::Infinite { .. } => return Outcome::NaN,
        Argument::Zero { .. } => return Outcome::Input,
        Argument::Finite(s) => s,
    };
    if s.exponent < flat_exponent(precision) {
        let v = <Wide<C>>::from_series(s.mantissa.widen().to_series() * DoubleDouble::PI);
        return Outcome::Scaled(C::narrow(odd(v, s.negative)), s.exponent);
    }
    let t = reduce_modulo(s.mantissa, s.exponent, 2).widen();
    let (sin, _) = sin_cos_half_turns(t);
    Outcome::value(C::narrow(odd(positive_zero(sin), s.negative)))
}

/// `cos(pi x)`, even. Half-integers give `+0`.
pub(in crate::runtime) fn cospi<C: Kernels>(x: Argument<C>) -> Outcome<C> {
    let s = match x {
        Argument::NaN | Argument::Infinite { .. } => return Outcome::NaN,
        Argument::Zero { .. } => return Outcome::one(),
        Argument::Finite(s) => s,
    };
    let t = reduce_modulo(s.mantissa, s.exponent, 2).widen();
    let (_, cos) = sin_cos_half_turns(t);
    Outcome::value(C::narrow(positive_zero(cos)))
}

/// `(sin, cos)` of `r` degrees for `r` in `[0, 360)`.
///
/// `r` is brought within 45 degrees of a multiple of 90 by an exact
/// subtraction; only the final division by 180 rounds.
fn sin_cos_degrees<C: Kernels>(r: C) -> (Wide<C>, Wide<C>) {
    let below = |bound: i32| r < C::from_i32(bound);
    let n = if below(45) {
        0
    } else if below(135) {
        1
    } else if below(225) {
        2
    } else if below(315) {
        3
    } else {
        4
    };
    let d = r - C::from_i32(90 * n);
    let f = d.widen() / <Wide<C>>::from_i32(180);
    sin_cos_quadrant(n, f)
}

/// `sin(x)` for `x` in degrees, odd.
pub(in crate::runtime) fn sind<C: Kernels>(x: Argument<C>, precision: u32) -> Outcome<C> {
    let s = match x {
        Argument::NaN | Argument::Infinite { .. } => return Outcome::NaN,
        Argument::Zero { .. } => return Outcome::Input,
        Argument::Finite(s) => s,
    };
    if s.exponent < flat_exponent(precision) {
        let v = s.mantissa.widen() * <Wide<C>>::PI_BY_180;
        return Outcome::Scaled(C::narrow(odd(v, s.negative)), s.exponent);
    }
    let (sin, _) = sin_cos_degrees(reduce_modulo(s.mantissa, s.exponent, 360));
    Outcome::value(C::narrow(odd(positive_zero(sin), s.negative)))
}

/// `cos(x)` for `x` in degrees, even.
pub(in crate::runtime) fn cosd<C: Kernels>(x: Argument<C>) -> Outcome<C> {
    let s = match x {
        Argument::NaN | Argument::Infinite { .. } => return Outcome::NaN,
        Argument::Zero { .. } => return Outcome::one(),
        Argument::Finite(s) => s,
    };
    let (_, cos) = sin_cos_degrees(reduce_modulo(s.mantissa, s.exponent, 360));
    Outcome::value(C::narrow(positive_zero(cos)))
}

#[cfg(test)]
mod tests {
    use super::super::Split;
    use super::*;

    fn finite<C>(negative: bool, mantissa: C, exponent: i32) -> Argument<C> {
        Argument::Finite(Split {
            negative,
            mantissa,
            exponent,
        })
    }

    fn value(outcome: Outcome<f64>) -> f64 {
        match outcome {
            Outcome::Scaled(v, n) => v.mul_pow2(n),
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn test_reduce_modulo() {
        assert_eq!(reduce_modulo(1.5f64, 0, 2), 1.5);
        assert_eq!(reduce_modulo(1.5f64, 1, 2), 1.0);
        assert_eq!(reduce_modulo(1.5f64, -3, 360), 0.1875);
        // 721.5 = 1.4091796875 2^9
        assert_eq!(reduce_modulo(1.409_179_687_5f64, 9, 360), 1.5);
        assert_eq!(reduce_modulo(1.0f64, 100, 360), 16.0);
        assert_eq!(reduce_modulo(1.25f64, 1000, 360), 200.0);
        assert_eq!(reduce_modulo(1.0f32, 40, 2), 0.0);
        let wide = reduce_modulo(DoubleDouble::from_f64(1.5), 5000, 360);
        assert_eq!(wide, DoubleDouble::from_f64(24.0));
    }

    #[test]
    fn test_sinpi_cospi() {
        let s = value(sinpi(finite(false, 1.5f64, -1), 53));
        assert!((s - 0.707_106_781_186_547_6).abs() <= f64::EPSILON);
        // sin(pi n) keeps the sign of n, cos(pi (n + 1/2)) is +0
        let z = value(sinpi(finite(true, 1.5f64, 1), 53));
        assert!(z == 0.0 && z.is_sign_negative());
        let z = value(cospi(finite(true, 1.0f64, -1)));
        assert!(z == 0.0 && z.is_sign_positive());
        assert_eq!(value(cospi(finite(false, 1.0f64, 0))), -1.0);
        // 3 2^49 + 1/4, a quarter past an even integer
        let s = value(sinpi(finite(false, 1.5 + f64::EPSILON, 50), 53));
        assert!((s - 0.707_106_781_186_547_6).abs() <= f64::EPSILON);
        assert_eq!(sinpi(Argument::<f64>::Zero { negative: true }, 53), Outcome::Input);
        assert_eq!(cospi(Argument::<f64>::Infinite { negative: false }), Outcome::NaN);
    }

    #[test]
    fn test_sinpi_tiny_keeps_exponent() {
        let Outcome::Scaled(v, n) = sinpi(finite(true, 1.0f64, -2000), 53) else {
            panic!("scaled")
        };
        assert_eq!(n, -2000);
        assert_eq!(v, -std::f64::consts::PI);
    }

    #[test]
    fn test_degrees() {
        assert_eq!(value(sind(finite(true, 1.054_687_5f64, 8), 53)), 1.0);
        let z = value(cosd(finite(false, 1.406_25f64, 6)));
        assert!(z == 0.0 && z.is_sign_positive());
        let s = value(sind(finite(false, 1.875f64, 4), 53));
        assert!((s - 0.5).abs() <= f64::EPSILON);
        let c = value(cosd(finite(false, 1.875f64, 5)));
        assert!((c - 0.5).abs() <= f64::EPSILON);
        // 1e22 mod 360 = 280
        let s = value(sind(finite(false, 1e22 / f64::pow2(73), 73), 53));
        assert!((s + 0.984_807_753_012_208_1).abs() <= 2.0 * f64::EPSILON);
        let c = value(cosd(finite(false, 1e22 / f64::pow2(73), 73)));
        assert!((c - 0.173_648_177_666_930_35).abs() <= 2.0 * f64::EPSILON);
        let tiny = value(sind(finite(false, 1.0f64, -70), 53));
        assert!((tiny / f64::pow2(-70) - 0.017_453_292_519_943_295).abs() <= f64::EPSILON);
    }

    #[test]
    fn test_single_reduces_in_storage_precision() {
        let Outcome::Scaled(v, 0) = sind(finite(false, 1.5f32, 10), 24) else {
            panic!("scaled")
        };
        // 1536 degrees = 96 degrees
        assert!((v - 0.994_521_9).abs() <= f32::EPSILON);
    }
}
