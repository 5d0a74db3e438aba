//! Distances in units in the last place.

use crate::dtype::{Float, FloatLayout, Real};

/// Bits both evaluation paths can resolve for `T`.
///
/// Wide layouts compute in double-double, so their results carry at most the
/// carrier's precision.
#[inline]
pub fn effective_precision<T: Float>() -> u32 {
    T::Layout::PRECISION.min(T::Carrier::PRECISION)
}

/// Exponent of the smallest gap both evaluation paths can produce.
///
/// Below it results are quantized to this gap rather than to a fraction of
/// their own magnitude. A storage type whose exponent range exceeds its
/// carrier's keeps its own subnormal gap, since both paths carry the
/// exponent beside the carrier. Otherwise the carrier's smallest gap also
/// counts: that of its leading word, an `f64` subnormal for double-double.
pub fn quantum_floor<T: Float>() -> i32 {
    let layout = 2 - T::Layout::BIAS - T::Layout::PRECISION as i32;
    if T::Layout::BIAS > T::Carrier::MAX_EXPONENT {
        return layout;
    }
    let word = T::Carrier::PRECISION.min(f64::MANTISSA_DIGITS) as i32;
    let carrier = T::Carrier::MIN_EXPONENT + 1 - word;
    layout.max(carrier)
}

/// Distance between `a` and `b` in ULPs of the larger magnitude.
///
/// The ULP of a value with binary exponent `e` is
/// `2^max(e - p + 1, quantum_floor)` with `p` the [`effective_precision`].
/// Two NaNs are at distance 0 whatever their signs, as are two zeros.
/// A NaN against a number, or an infinity against anything else, is at
/// infinite distance.
///
/// ```
/// use numr_libm::validation::ulp_distance;
///
/// assert_eq!(ulp_distance(1.0f64, 1.0 + f64::EPSILON), 1.0);
/// assert_eq!(ulp_distance(-0.0f32, 0.0), 0.0);
/// assert_eq!(ulp_distance(f64::NAN, 1.0), f64::INFINITY);
/// ```
pub fn ulp_distance<T: Float>(a: T, b: T) -> f64 {
    let la = a.to_layout();
    let lb = b.to_layout();
    match (la.is_nan(), lb.is_nan()) {
        (true, true) => return 0.0,
        (true, false) | (false, true) => return f64::INFINITY,
        _ => {}
    }
    if la.is_zero() && lb.is_zero() {
        return 0.0;
    }
    if la == lb {
        return 0.0;
    }
    if la.is_infinite() || lb.is_infinite() {
        return f64::INFINITY;
    }

    let exponent = match (la.is_zero(), lb.is_zero()) {
        (true, _) => lb.exponent_value(),
        (_, true) => la.exponent_value(),
        _ => la.exponent_value().max(lb.exponent_value()),
    };
    let precision = effective_precision::<T>() as i32;
    let quantum = (exponent - precision + 1).max(quantum_floor::<T>());
    let sa = T::from_layout(la.scale_exponent(-quantum)).to_carrier();
    let sb = T::from_layout(lb.scale_exponent(-quantum)).to_carrier();
    (sa - sb).abs().to_f64()
}
