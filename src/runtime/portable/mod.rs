//! Portable path.
//!
//! Every function converts its argument to [`Float::Carrier`] and works with
//! comparisons and carrier arithmetic alone. Special values are detected
//! with [`Real`] predicates, magnitudes are classified with
//! [`classify_value`](crate::algorithm::classify::classify_value) and the
//! mantissa reduction divides by powers of two until the value lands in
//! `[1, 2)`. Roots are seeded from Padé approximants instead of the mantissa
//! tables.
//!
//! Extended and quadruple arguments beyond the carrier's range arrive
//! through [`Float::to_carrier_scaled`] as a carrier value with a pending
//! power of two. The exponent is carried beside the carrier and applied by
//! [`Float::from_carrier_scaled`] at the end, so results overflow and
//! underflow at the storage type's limits.

pub(super) mod exponential;
pub(super) mod inverse_trig;
pub(super) mod periodic;
pub(super) mod roots;
pub(super) mod rounding;
pub(super) mod special;

use super::dispatch::{Argument, Outcome, Split};
use crate::dtype::{Float, Real};

/// Descending power-of-two steps for the mantissa search. Steps the carrier
/// cannot represent are skipped.
const POWER_STEPS: [i32; 11] = [1024, 512, 256, 128, 64, 32, 16, 8, 4, 2, 1];

/// `(m, e)` with `m` in `[1, 2)` and `a = m 2^e`, for finite `a > 0`.
///
/// Every step multiplies by a power of two, so `m` is exact.
fn mant_and_exp<C: Real>(a: C) -> (C, i32) {
    let mut m = a;
    let mut e = 0;
    for &k in &POWER_STEPS {
        if k > C::MAX_EXPONENT {
            continue;
        }
        let bound = C::pow2(k);
        while m >= bound {
            m = m * C::pow2(-k);
            e += k;
        }
    }
    for &k in &POWER_STEPS {
        if k > C::MAX_EXPONENT {
            continue;
        }
        let bound = C::pow2(1 - k);
        while m < bound {
            m = m * C::pow2(k);
            e -= k;
        }
    }
    (m, e)
}

/// Split an argument for the shared cores with comparisons alone.
fn argument<T: Float>(x: T) -> Argument<T::Carrier> {
    let (c, n) = x.to_carrier_scaled();
    let negative = c.is_sign_negative();
    if c.is_nan() {
        Argument::NaN
    } else if c.is_infinite() {
        Argument::Infinite { negative }
    } else if c == T::Carrier::ZERO {
        Argument::Zero { negative }
    } else {
        let (mantissa, e) = mant_and_exp(c.abs());
        Argument::Finite(Split {
            negative,
            mantissa,
            exponent: e + n,
        })
    }
}

/// Store a core's outcome, applying any pending power of two in storage.
fn settle<T: Float>(x: T, outcome: Outcome<T::Carrier>) -> T {
    match outcome {
        Outcome::Input => x,
        Outcome::NaN => T::from_carrier(T::Carrier::NAN),
        Outcome::Zero { negative } => T::from_carrier(signed(T::Carrier::ZERO, negative)),
        Outcome::Infinite { negative } => {
            T::from_carrier(signed(T::Carrier::INFINITY, negative))
        }
        Outcome::Scaled(value, n) => T::from_carrier_scaled(value, n),
    }
}

/// Negate when `negative` is set.
#[inline]
fn signed<C: Real>(value: C, negative: bool) -> C {
    if negative { -value } else { value }
}
