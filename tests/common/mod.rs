//! Common test utilities
#![allow(dead_code)]

use numr_libm::dtype::Float;
use numr_libm::validation::ulp_distance;
use std::sync::Once;

static LOGGING: Once = Once::new();

/// Route `log` output through env_logger once per test binary.
///
/// Set `RUST_LOG=numr_libm=debug` to see per-chunk sampling progress.
pub fn init_logging() {
    LOGGING.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Assert `actual` is within `ulps` units in the last place of `expected`.
pub fn assert_ulps<T: Float>(actual: T, expected: T, ulps: f64, msg: &str) {
    let distance = ulp_distance(actual, expected);
    assert!(
        distance <= ulps,
        "{}: {:?} vs {:?} ({} ULP, allowed {})",
        msg,
        actual,
        expected,
        distance,
        ulps
    );
}

/// Assert two f64 values are close within tolerance
///
/// Uses the formula: |a - b| <= atol + rtol * |b|
pub fn assert_close(a: f64, b: f64, rtol: f64, atol: f64, msg: &str) {
    let diff = (a - b).abs();
    let tol = atol + rtol * b.abs();
    assert!(
        diff <= tol,
        "{}: {} vs {} (diff={}, tol={})",
        msg,
        a,
        b,
        diff,
        tol
    );
}

/// Assert two f64 slices are close within tolerance, element by element
pub fn assert_allclose_f64(a: &[f64], b: &[f64], rtol: f64, atol: f64, msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        assert_close(*x, *y, rtol, atol, &format!("{msg}: element {i}"));
    }
}

/// Evenly spaced points on `[lo, hi]`, both ends included
pub fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    let step = (hi - lo) / (n - 1) as f64;
    (0..n).map(|i| lo + step * i as f64).collect()
}
