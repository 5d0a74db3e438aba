//! Integration tests for arcsin, arccos, arctan and arctan2

mod common;

use common::{assert_close, assert_ulps, linspace};
use numr_libm::dtype::{DoubleDouble, Real};
use numr_libm::ops::*;
use numr_libm::runtime::{BitLayout, MathPath, Portable};
use numr_libm::validation::{SamplingConfig, UnaryFunction, compare_with_reference};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

const THREE_FRAC_PI_4: f64 = 2.356_194_490_192_345;

// ============================================================================
// arccos / arcsin
// ============================================================================

#[test]
fn test_arccos_endpoints() {
    assert_eq!(arccos(-1.0f64), PI);
    let z = arccos(1.0f64);
    assert!(z == 0.0 && z.is_sign_positive());
    assert!(arccos(1.5f64).is_nan());
    assert!(arccos(-1.0000001f32).is_nan());
    assert_eq!(arccos(0.0f64), FRAC_PI_2);
    assert_eq!(arccos_f32(-1.0), std::f32::consts::PI);
}

fn check_cos_of_arccos<P: MathPath>() {
    for x in linspace(-1.0, 1.0, 20_001) {
        let angle = P::arccos(x);
        assert!((0.0..=PI).contains(&angle), "{}: arccos({x}) = {angle}", P::NAME);
        assert_close(angle.cos(), x, 0.0, 4.0 * f64::EPSILON, "cos(arccos(x))");
        assert_ulps(angle, x.acos(), 3.0, "arccos");
    }
}

#[test]
fn test_cos_of_arccos_on_both_paths() {
    check_cos_of_arccos::<BitLayout>();
    check_cos_of_arccos::<Portable>();
}

#[test]
fn test_arcsin_is_odd() {
    for x in linspace(0.0, 1.0, 5_001) {
        assert_eq!(arcsin(-x), -arcsin(x));
        assert_ulps(arcsin(x), x.asin(), 3.0, "arcsin");
    }
    assert_eq!(arcsin(1.0f64), FRAC_PI_2);
    assert_eq!(arcsin(1e-300f64), 1e-300);
    let z = arcsin(-0.0f32);
    assert!(z == 0.0 && z.is_sign_negative());
    assert!(arcsin(f64::INFINITY).is_nan());
}

// ============================================================================
// arctan / arctan2
// ============================================================================

#[test]
fn test_arctan_limits() {
    assert_eq!(arctan(f64::INFINITY), FRAC_PI_2);
    assert_eq!(arctan(f64::NEG_INFINITY), -FRAC_PI_2);
    assert_eq!(arctan(1e300f64), FRAC_PI_2);
    assert_ulps(arctan(1.0f64), FRAC_PI_4, 1.0, "atan(1)");
    assert_eq!(arctan(1e-200f64), 1e-200);
    assert!(arctan(f64::NAN).is_nan());
}

#[test]
fn test_arctan2_axes() {
    assert_eq!(arctan2(0.0f64, 1.0), 0.0);
    assert_eq!(arctan2(1.0f64, 0.0), FRAC_PI_2);
    assert_eq!(arctan2(0.0f64, -1.0), PI);
    assert_eq!(arctan2(-1.0f64, 0.0), -FRAC_PI_2);
    assert_eq!(arctan2(-0.0f64, -1.0), -PI);
    assert_eq!(arctan2(0.0f64, -0.0), PI);
    assert!(arctan2(-0.0f64, 0.0).is_sign_negative());
    assert!(arctan2(f64::NAN, 1.0).is_nan());
}

#[test]
fn test_arctan2_infinite_quadrants() {
    let inf = f64::INFINITY;
    for (y, x, expected) in [
        (inf, inf, FRAC_PI_4),
        (inf, -inf, THREE_FRAC_PI_4),
        (-inf, inf, -FRAC_PI_4),
        (-inf, -inf, -THREE_FRAC_PI_4),
    ] {
        assert_eq!(BitLayout::arctan2(y, x), expected);
        assert_eq!(Portable::arctan2(y, x), expected);
    }
    assert_eq!(arctan2(5.0f64, inf), 0.0);
    assert_eq!(arctan2(5.0f64, -inf), PI);
    assert_eq!(arctan2(-inf, 2.0f64), -FRAC_PI_2);
}

#[test]
fn test_arctan2_matches_host() {
    for y in linspace(-3.0, 3.0, 61) {
        for x in linspace(-2.5, 2.5, 51) {
            if x == 0.0 && y == 0.0 {
                continue;
            }
            assert_ulps(arctan2(y, x), y.atan2(x), 3.0, "arctan2");
        }
    }
    assert_ulps(arctan2(1e-300f64, 1e300), 0.0, 0.0, "tiny quotient");
}

#[test]
fn test_inverse_trig_against_reference() {
    common::init_logging();
    let config = SamplingConfig::default().with_samples(200_000);
    for (function, reference) in [
        (UnaryFunction::Arcsin, f64::asin as fn(f64) -> f64),
        (UnaryFunction::Arccos, f64::acos),
        (UnaryFunction::Arctan, f64::atan),
    ] {
        let report =
            compare_with_reference::<BitLayout, f64, _>(function, reference, &config).unwrap();
        report.check(3.0).unwrap();
        let report =
            compare_with_reference::<Portable, f32, _>(function, reference, &config).unwrap();
        report.check(2.0).unwrap();
    }
}

#[test]
fn test_doubledouble_arctan_one() {
    let quarter_pi = DoubleDouble::PI_BY_FOUR;
    assert_ulps(arctan(DoubleDouble::ONE), quarter_pi, 2.0, "atan(1)");
    let half_pi = arcsin(DoubleDouble::ONE);
    assert_ulps(half_pi, DoubleDouble::PI_BY_TWO, 1.0, "asin(1)");
    assert_ulps(arccos(-DoubleDouble::ONE), DoubleDouble::PI, 1.0, "acos(-1)");
}

#[test]
fn test_single_precision_rounds_once() {
    // arguments where rounding each kernel step to f32 drifts past one ULP
    for x in [0.12552f32, 0.505681, -0.514385, 0.514385, 0.937_5] {
        let x64 = x as f64;
        for (name, bit, portable, host) in [
            ("arcsin", BitLayout::arcsin(x), Portable::arcsin(x), x64.asin()),
            ("arccos", BitLayout::arccos(x), Portable::arccos(x), x64.acos()),
            ("arctan", BitLayout::arctan(x), Portable::arctan(x), x64.atan()),
        ] {
            assert_ulps(bit, host as f32, 1.0, name);
            assert_ulps(portable, host as f32, 1.0, name);
        }
    }
    let config = SamplingConfig::default().with_samples(100_000);
    let report =
        compare_with_reference::<BitLayout, f32, _>(UnaryFunction::Arcsin, f64::asin, &config)
            .unwrap();
    report.check(1.0).unwrap();
}
