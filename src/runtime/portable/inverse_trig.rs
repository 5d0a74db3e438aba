//! Arcsine, arccosine and the arctangents in the wide carrier.

use super::super::dispatch::{
    Argument, arccos_from_arcsin, arccos_negative_tail, arccos_thresholds, arcsin_core,
    arcsin_tail, arcsin_thresholds, arctan2_finite, arctan_positive, arctan_thresholds,
    half_pi_minus_twice, odd,
};
use super::roots::sqrt_carrier;
use super::{argument, settle};
use crate::algorithm::classify::{MagnitudeClass, classify_value};
use crate::algorithm::kernels::{Kernels, Wide, WideKernels, Widen};
use crate::algorithm::tables::arctan_bucket_of;
use crate::dtype::{Float, FloatLayout, Real};

/// Round a wide result once into storage.
#[inline]
fn store<T: Float>(value: Wide<T::Carrier>) -> T {
    T::from_carrier(T::Carrier::narrow(value))
}

/// A pending exponent means `|x| > 2^1021` (NaN) or `|x| < 2^-958` (`x`).
pub(crate) fn arcsin<T: Float>(x: T) -> T {
    match x.to_carrier_scaled() {
        (_, n) if n > 0 => T::from_carrier(T::Carrier::NAN),
        (_, n) if n < 0 => x,
        (c, _) => arcsin_carrier(c, T::Layout::PRECISION).map_or(x, store::<T>),
    }
}

pub(crate) fn arccos<T: Float>(x: T) -> T {
    match x.to_carrier_scaled() {
        (_, n) if n > 0 => T::from_carrier(T::Carrier::NAN),
        (_, n) if n < 0 => store(<Wide<T::Carrier>>::PI_BY_TWO),
        (c, _) => store(arccos_carrier(c, T::Layout::PRECISION)),
    }
}

pub(crate) fn arctan<T: Float>(x: T) -> T {
    match x.to_carrier_scaled() {
        (c, n) if n > 0 => store(odd(<Wide<T::Carrier>>::PI_BY_TWO, c < T::Carrier::ZERO)),
        (_, n) if n < 0 => x,
        (c, _) => arctan_carrier(c, T::Layout::PRECISION).map_or(x, store::<T>),
    }
}

/// `asin(x)` in the wide carrier, or `None` when the argument is its own
/// result.
fn arcsin_carrier<C: Kernels>(x: C, precision: u32) -> Option<Wide<C>> {
    let class = classify_value(x, &arcsin_thresholds(precision));
    let a = x.abs().widen();
    let asin = match class {
        MagnitudeClass::NaN | MagnitudeClass::Zero | MagnitudeClass::Tiny => return None,
        MagnitudeClass::Infinite => <Wide<C>>::NAN,
        MagnitudeClass::Huge if a == <Wide<C>>::ONE => <Wide<C>>::PI_BY_TWO,
        MagnitudeClass::Huge => <Wide<C>>::NAN,
        MagnitudeClass::Large => half_pi_minus_twice(tail_root(a)),
        _ => arcsin_core(a, class),
    };
    Some(odd(asin, x < C::ZERO))
}

fn arccos_carrier<C: Kernels>(x: C, precision: u32) -> Wide<C> {
    let class = classify_value(x, &arccos_thresholds(precision));
    let negative = x < C::ZERO;
    let a = x.abs().widen();
    match class {
        MagnitudeClass::NaN | MagnitudeClass::Infinite => <Wide<C>>::NAN,
        MagnitudeClass::Zero | MagnitudeClass::Tiny => <Wide<C>>::PI_BY_TWO,
        MagnitudeClass::Huge if a != <Wide<C>>::ONE => <Wide<C>>::NAN,
        MagnitudeClass::Huge if negative => <Wide<C>>::PI,
        MagnitudeClass::Huge => <Wide<C>>::ZERO,
        MagnitudeClass::Large if negative => arccos_negative_tail(tail_root(a)),
        MagnitudeClass::Large => <Wide<C>>::TWO * tail_root(a),
        _ => arccos_from_arcsin(odd(arcsin_core(a, class), negative)),
    }
}

/// `asin(sqrt((1 - a) / 2))` for `a` in `[1/2, 1)`.
fn tail_root<W: WideKernels>(a: W) -> W {
    let z = (W::ONE - a) * W::HALF;
    arcsin_tail(z, sqrt_carrier(z))
}

/// `atan(x)` in the wide carrier, or `None` when the argument is its own
/// result.
fn arctan_carrier<C: Kernels>(x: C, precision: u32) -> Option<Wide<C>> {
    let class = classify_value(x, &arctan_thresholds(precision));
    let a = x.abs().widen();
    let atan = match class {
        MagnitudeClass::NaN | MagnitudeClass::Zero | MagnitudeClass::Tiny => return None,
        MagnitudeClass::Infinite => <Wide<C>>::PI_BY_TWO,
        MagnitudeClass::Mid => arctan_positive(a, class, arctan_bucket_of(a)),
        _ => arctan_positive(a, class, 0),
    };
    Some(odd(atan, x < C::ZERO))
}

/// Same special-case order as the bit-layout path. Finite arguments go to
/// the shared core with their exponents kept apart.
pub(crate) fn arctan2<T: Float>(y: T, x: T) -> T {
    let (sy, sx) = (argument(y), argument(x));
    let (y_negative, x_negative) = (is_negative(&sy), is_negative(&sx));

    let angle = match (sy, sx) {
        (Argument::NaN, _) | (_, Argument::NaN) => T::Carrier::NAN,
        (Argument::Infinite { .. }, Argument::Infinite { .. }) => {
            if x_negative {
                T::Carrier::THREE_PI_BY_FOUR
            } else {
                T::Carrier::PI_BY_FOUR
            }
        }
        (_, Argument::Infinite { .. }) | (Argument::Zero { .. }, _) => {
            if x_negative {
                T::Carrier::PI
            } else {
                T::Carrier::ZERO
            }
        }
        (Argument::Infinite { .. }, _) | (_, Argument::Zero { .. }) => T::Carrier::PI_BY_TWO,
        (Argument::Finite(fy), Argument::Finite(fx)) => {
            return settle(y, arctan2_finite(fy, fx, T::Layout::PRECISION));
        }
    };
    T::from_carrier(odd(angle, y_negative))
}

#[inline]
fn is_negative<C>(x: &Argument<C>) -> bool {
    match x {
        Argument::NaN => false,
        Argument::Infinite { negative } | Argument::Zero { negative } => *negative,
        Argument::Finite(s) => s.negative,
    }
}
