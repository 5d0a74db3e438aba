//! Integration tests for rounding and bit-level functions
//!
//! Tests verify, on both paths and every storage type:
//! - floor/ceil/trunc ordering and idempotence
//! - fractional_part and mod_2 against their definitions
//! - base2_mant_and_exp / pow2 reconstruction
//! - signed zeros, infinities and NaN

mod common;

use numr_libm::dtype::{DoubleDouble, Float, LDouble};
use numr_libm::ops::*;
use numr_libm::runtime::{BitLayout, MathPath, Portable};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_f64s(seed: u64, n: usize, scale: f64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.random_range(-scale..scale)).collect()
}

// ============================================================================
// floor / ceil / trunc
// ============================================================================

#[test]
fn test_floor_examples() {
    assert_eq!(floor(-2.5f64), -3.0);
    assert_eq!(floor(2.5f32), 2.0);
    assert_eq!(ceil(-2.5f64), -2.0);
    assert_eq!(trunc(-2.5f64), -2.0);
    assert_eq!(floor(-0.25f64), -1.0);
    assert!(ceil(-0.25f64).is_sign_negative());
    assert!(trunc(-0.75f32).is_sign_negative());
}

fn check_floor_ordering<P: MathPath>() {
    for x in random_f64s(1, 20_000, 1e6) {
        let f = P::floor(x);
        assert!(f <= x && x < f + 1.0, "floor({x}) = {f}");
        assert_eq!(P::floor(f), f, "floor is idempotent at {x}");
        let c = P::ceil(x);
        assert!(c - 1.0 < x && x <= c, "ceil({x}) = {c}");
        let t = P::trunc(x);
        assert_eq!(t, if x < 0.0 { c } else { f });
        assert_eq!(f, x.floor());
    }
}

#[test]
fn test_floor_ordering_on_both_paths() {
    check_floor_ordering::<BitLayout>();
    check_floor_ordering::<Portable>();
}

#[test]
fn test_rounding_large_values_are_integral() {
    let big = 2f64.powi(60) + 4096.0;
    assert_eq!(floor(big), big);
    assert_eq!(ceil(-big), -big);
    assert_eq!(floor(f32::MAX), f32::MAX);
    assert_eq!(floor(f64::INFINITY), f64::INFINITY);
    assert!(ceil(f64::NAN).is_nan());
}

#[test]
fn test_floor_doubledouble_uses_low_word() {
    // 2^60 - 0.5 as a double-double
    let x = DoubleDouble::new(2f64.powi(60), -0.5);
    let f = BitLayout::floor(x);
    assert_eq!(f, DoubleDouble::new(2f64.powi(60), -1.0));
    assert_eq!(Portable::floor(x), f);
    assert_eq!(BitLayout::ceil(x), DoubleDouble::new(2f64.powi(60), 0.0));
}

// ============================================================================
// fractional_part / mod_2
// ============================================================================

#[test]
fn test_fractional_part_examples() {
    assert_eq!(fractional_part(2.75f64), 0.75);
    assert_eq!(fractional_part(-2.75f64), -0.75);
    assert_eq!(fractional_part(3.0f32), 0.0);
    assert!(fractional_part(f64::INFINITY).is_nan());
    assert_eq!(mod_2(5.5f64), 1.5);
    assert_eq!(mod_2(-5.5f64), -1.5);
    assert_eq!(mod_2(4.0f32), 0.0);
}

#[test]
fn test_fractional_part_matches_definition() {
    for x in random_f64s(2, 20_000, 1e9) {
        let expected = x - x.trunc();
        assert_eq!(BitLayout::fractional_part(x), expected, "at {x}");
        assert_eq!(Portable::fractional_part(x), expected, "at {x}");
        let m = x - 2.0 * (x / 2.0).trunc();
        assert_eq!(BitLayout::mod_2(x), m, "mod_2 at {x}");
        assert_eq!(Portable::mod_2(x), m, "mod_2 at {x}");
    }
}

// ============================================================================
// abs / copysign
// ============================================================================

#[test]
fn test_abs_and_copysign() {
    assert_eq!(abs(-3.5f64), 3.5);
    assert!(!abs(-0.0f32).is_sign_negative());
    assert_eq!(abs(f64::NEG_INFINITY), f64::INFINITY);
    assert_eq!(copysign(2.0f64, -0.0), -2.0);
    assert_eq!(copysign(-2.0f32, 1.0), 2.0);
    assert!(copysign(0.0f64, -1.0).is_sign_negative());
    let ld = copysign_ld(LDouble::from_double(1.5), LDouble::from_double(-1.0));
    assert_eq!(ld.to_double(), -1.5);
}

// ============================================================================
// base2_mant_and_exp / pow2
// ============================================================================

#[test]
fn test_mant_and_exp_examples() {
    assert_eq!(base2_mant_and_exp(12.0f64), (1.5, 3));
    assert_eq!(base2_mant_and_exp(-0.375f32), (-1.5, -2));
    assert_eq!(base2_mant_and_exp(1.0f64), (1.0, 0));
    assert_eq!(base2_mant_and_exp(f64::from_bits(1)), (1.0, -1074));
    assert_eq!(base2_mant_and_exp(0.0f64).0, 0.0);
}

fn check_mant_and_exp<P: MathPath, T: Float>(values: &[f64]) {
    for &v in values {
        let x = T::from_double(v);
        let (m, e) = P::base2_mant_and_exp(x);
        let md = m.to_double().abs();
        assert!((1.0..2.0).contains(&md), "{}: mantissa of {v} is {md}", P::NAME);
        let back = m.to_double() * P::pow2::<f64>(e);
        assert_eq!(back, x.to_double(), "{}: reconstruction of {v}", P::NAME);
    }
}

#[test]
fn test_mant_and_exp_reconstructs() {
    let mut values = random_f64s(3, 5_000, 1e30);
    values.extend([1e-300, -3e-310, 7.0, f64::MAX, f64::MIN_POSITIVE]);
    check_mant_and_exp::<BitLayout, f64>(&values);
    check_mant_and_exp::<Portable, f64>(&values);
    let small: Vec<f64> = values
        .iter()
        .map(|v| (v * 1e-25) as f32 as f64)
        .filter(|v| v.is_finite() && *v != 0.0)
        .collect();
    check_mant_and_exp::<BitLayout, f32>(&small);
    check_mant_and_exp::<Portable, f32>(&small);
    check_mant_and_exp::<BitLayout, DoubleDouble>(&values[..1000]);
    check_mant_and_exp::<Portable, DoubleDouble>(&values[..1000]);
}

#[test]
fn test_pow2_range() {
    assert_eq!(pow2::<f64>(10), 1024.0);
    assert_eq!(pow2::<f64>(-1074), f64::from_bits(1));
    assert_eq!(pow2::<f64>(1024), f64::INFINITY);
    assert_eq!(pow2::<f64>(-1080), 0.0);
    assert_eq!(pow2::<f32>(-149), f32::from_bits(1));
    assert_eq!(pow2_f32(128), f32::INFINITY);
    for n in -1074..=1023 {
        let expected = if n < -1022 {
            f64::from_bits(1u64 << (n + 1074))
        } else {
            f64::from_bits(((n + 1023) as u64) << 52)
        };
        assert_eq!(pow2::<f64>(n), expected, "2^{n}");
        assert_eq!(Portable::pow2::<f64>(n), expected, "portable 2^{n}");
    }
}
