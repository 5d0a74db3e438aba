//! Bit-layout path.
//!
//! Dispatchers decompose the argument through [`Float::Layout`], classify it
//! with [`classify_normalized`](crate::algorithm::classify::classify_normalized)
//! and compute in [`Float::Carrier`]. Reduction to `[1, 2)` and the final
//! power-of-two rescale are exponent-field rewrites on the layout, so the
//! carrier only ever sees moderate values and the wide layouts keep their
//! full exponent range.

pub(super) mod exponential;
pub(super) mod inverse_trig;
pub(super) mod periodic;
pub(super) mod roots;
pub(super) mod rounding;
pub(super) mod special;

use super::dispatch::{Argument, Outcome, Split};
use crate::dtype::{Float, FloatLayout};

/// Positive mantissa in `[1, 2)` and true binary exponent of a finite
/// nonzero layout. Subnormals are normalized first.
#[inline]
fn unit_mantissa<L: FloatLayout>(layout: L) -> (L, i32) {
    let (normal, offset) = layout.normalize();
    let exponent = normal.unbiased_exponent() + offset;
    let mantissa = normal.with_sign(false).with_exponent(L::BIAS as u32);
    (mantissa, exponent)
}

/// Carrier value of a layout.
#[inline]
fn carrier_of<T: Float>(layout: T::Layout) -> T::Carrier {
    T::from_layout(layout).to_carrier()
}

/// Round a carrier result into storage and multiply it by `2^n` on the layout.
#[inline]
fn rescale<T: Float>(value: T::Carrier, n: i32) -> T {
    T::from_layout(T::from_carrier(value).to_layout().scale_exponent(n))
}

/// Split an argument for the shared cores, reading the layout fields.
fn argument<T: Float>(x: T) -> Argument<T::Carrier> {
    let layout = x.to_layout();
    let negative = layout.sign();
    if layout.is_nan() {
        Argument::NaN
    } else if layout.is_infinite() {
        Argument::Infinite { negative }
    } else if layout.is_zero() {
        Argument::Zero { negative }
    } else {
        let (mantissa, exponent) = unit_mantissa(layout);
        Argument::Finite(Split {
            negative,
            mantissa: carrier_of::<T>(mantissa),
            exponent,
        })
    }
}

/// Store a core's outcome, applying any pending power of two on the layout.
fn settle<T: Float>(x: T, outcome: Outcome<T::Carrier>) -> T {
    match outcome {
        Outcome::Input => x,
        Outcome::NaN => nan(),
        Outcome::Zero { negative } => zero(negative),
        Outcome::Infinite { negative } => T::from_layout(T::Layout::infinity(negative)),
        Outcome::Scaled(value, n) => rescale(value, n),
    }
}

/// Canonical NaN of the storage type.
#[inline]
fn nan<T: Float>() -> T {
    T::from_layout(T::Layout::nan())
}

/// Signed zero of the storage type.
#[inline]
fn zero<T: Float>(negative: bool) -> T {
    T::from_layout(T::Layout::zero(negative))
}

/// Negate through the sign bit when `negative` is set.
#[inline]
fn with_sign<T: Float>(value: T, negative: bool) -> T {
    if negative {
        let layout = value.to_layout();
        T::from_layout(layout.with_sign(!layout.sign()))
    } else {
        value
    }
}
