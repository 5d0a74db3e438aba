//! Exponential, natural logarithm and hyperbolic cosine in the carrier.

use super::super::dispatch::{self, exp_thresholds};
use super::{argument, mant_and_exp, settle};
use crate::algorithm::classify::{MagnitudeClass, classify_value};
use crate::algorithm::kernels::{ExpKernel, Kernels};
use crate::dtype::{Float, FloatLayout, Real};
use std::f64::consts::LN_2;

/// `e^x` as `y 2^n`, with the overflow and underflow bounds taken from the
/// storage layout and `2^n` applied in storage.
pub(crate) fn exp<T: Float>(x: T) -> T {
    let (c, n) = x.to_carrier_scaled();
    if n != 0 {
        // |x| is beyond 2^1021 or below 2^-958
        return if n < 0 {
            T::from_carrier(T::Carrier::ONE)
        } else if c < T::Carrier::ZERO {
            T::from_carrier(T::Carrier::ZERO)
        } else {
            T::from_carrier(T::Carrier::INFINITY)
        };
    }
    match classify_value(c, &exp_thresholds(T::Layout::PRECISION)) {
        MagnitudeClass::NaN => return x,
        MagnitudeClass::Infinite if c < T::Carrier::ZERO => {
            return T::from_carrier(T::Carrier::ZERO);
        }
        MagnitudeClass::Infinite => return x,
        MagnitudeClass::Zero => return T::from_carrier(T::Carrier::ONE),
        MagnitudeClass::Tiny => return T::from_carrier(T::Carrier::ONE + c),
        _ => {}
    }

    let bias = T::Layout::BIAS as f64;
    if c > T::Carrier::from_f64((bias + 1.0) * LN_2) {
        return T::from_carrier(T::Carrier::INFINITY);
    }
    if c < T::Carrier::from_f64(-(bias + T::Layout::PRECISION as f64 + 1.0) * LN_2) {
        return T::from_carrier(T::Carrier::ZERO);
    }
    let (y, k) = T::Carrier::exp_scaled(c);
    T::from_carrier_scaled(y, k)
}

/// Natural logarithm with the mantissa renormalized to `[0.75, 1.5)` and
/// the pending exponent added to the mantissa's.
pub(crate) fn log<T: Float>(x: T) -> T {
    let (c, n) = x.to_carrier_scaled();
    T::from_carrier(log_carrier(c, n))
}

/// `ln(x 2^n)`.
fn log_carrier<C: Kernels>(x: C, n: i32) -> C {
    if x.is_nan() {
        return x;
    }
    if x == C::ZERO {
        return C::NEG_INFINITY;
    }
    if x < C::ZERO {
        return C::NAN;
    }
    if x.is_infinite() {
        return x;
    }

    let (mut m, mut e) = mant_and_exp(x);
    if m >= C::from_f64(1.5) {
        m = m * C::HALF;
        e += 1;
    }
    C::log_reduced(m, e + n)
}

/// `cosh(x)`, overflowing at the storage type's limit.
pub(crate) fn cosh<T: Float>(x: T) -> T {
    let outcome = dispatch::cosh(argument(x), T::Layout::PRECISION, T::Layout::BIAS);
    settle(x, outcome)
}
