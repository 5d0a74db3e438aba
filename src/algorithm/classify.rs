//! Magnitude classification.
//!
//! Each dispatcher derives a [`MagnitudeClass`] for its argument before
//! choosing a kernel. The boundaries are function-specific, so the classifier
//! is parameterized by [`Thresholds`] supplied at the call site rather than a
//! fixed global mapping.

use crate::dtype::{FloatLayout, Real};

/// Magnitude class of one argument, derived per call and never stored.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MagnitudeClass {
    /// Positive or negative zero
    Zero,
    /// Nonzero with a zero exponent field
    Subnormal,
    /// Below the function's tiny bound
    Tiny,
    /// Below the small bound
    Small,
    /// Below the mid bound
    Mid,
    /// Below the large bound
    Large,
    /// At or above the large bound
    Huge,
    /// Positive or negative infinity
    Infinite,
    /// Any NaN
    NaN,
}

impl MagnitudeClass {
    /// True for finite nonzero classes.
    #[inline]
    pub fn is_finite_nonzero(self) -> bool {
        !matches!(self, Self::Zero | Self::Infinite | Self::NaN)
    }
}

/// Exponent bounds separating the finite magnitude classes.
///
/// All bounds are unbiased binary exponents. A finite nonzero value whose
/// exponent is `e` is Tiny if `e < tiny`, Small if `e < small`, Mid if
/// `e < mid`, Large if `e < large` and Huge otherwise. Bounds must be
/// non-decreasing; a class is skipped by repeating a bound.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Thresholds {
    /// Upper bound of Tiny
    pub tiny: i32,
    /// Upper bound of Small
    pub small: i32,
    /// Upper bound of Mid
    pub mid: i32,
    /// Upper bound of Large
    pub large: i32,
}

impl Thresholds {
    /// Create thresholds from the four class bounds.
    pub const fn new(tiny: i32, small: i32, mid: i32, large: i32) -> Self {
        Self {
            tiny,
            small,
            mid,
            large,
        }
    }

    /// Class of a finite nonzero value with binary exponent `exponent`.
    #[inline]
    pub fn bucket(&self, exponent: i32) -> MagnitudeClass {
        if exponent < self.tiny {
            MagnitudeClass::Tiny
        } else if exponent < self.small {
            MagnitudeClass::Small
        } else if exponent < self.mid {
            MagnitudeClass::Mid
        } else if exponent < self.large {
            MagnitudeClass::Large
        } else {
            MagnitudeClass::Huge
        }
    }
}

/// Classify from the exponent and mantissa fields.
///
/// Subnormals report [`MagnitudeClass::Subnormal`]; the caller normalizes and
/// re-enters through [`classify_normalized`].
#[inline]
pub fn classify<L: FloatLayout>(x: L, thresholds: &Thresholds) -> MagnitudeClass {
    if x.is_nan() {
        MagnitudeClass::NaN
    } else if x.is_infinite() {
        MagnitudeClass::Infinite
    } else if x.is_zero() {
        MagnitudeClass::Zero
    } else if x.is_subnormal() {
        MagnitudeClass::Subnormal
    } else {
        thresholds.bucket(x.unbiased_exponent())
    }
}

/// Classify with subnormals placed by their true exponent.
#[inline]
pub fn classify_normalized<L: FloatLayout>(x: L, thresholds: &Thresholds) -> MagnitudeClass {
    match classify(x, thresholds) {
        MagnitudeClass::Subnormal => thresholds.bucket(x.exponent_value()),
        class => class,
    }
}

/// Classify a carrier value with comparisons against powers of two.
///
/// Agrees with [`classify_normalized`] on every finite value; subnormals are
/// placed by magnitude like any other value.
pub fn classify_value<C: Real>(x: C, thresholds: &Thresholds) -> MagnitudeClass {
    if x.is_nan() {
        return MagnitudeClass::NaN;
    }
    if x.is_infinite() {
        return MagnitudeClass::Infinite;
    }
    let a = x.abs();
    if a == C::ZERO {
        MagnitudeClass::Zero
    } else if a < C::pow2(thresholds.tiny) {
        MagnitudeClass::Tiny
    } else if a < C::pow2(thresholds.small) {
        MagnitudeClass::Small
    } else if a < C::pow2(thresholds.mid) {
        MagnitudeClass::Mid
    } else if a < C::pow2(thresholds.large) {
        MagnitudeClass::Large
    } else {
        MagnitudeClass::Huge
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::{Double, DoubleDouble, Single};

    const ARCTAN_LIKE: Thresholds = Thresholds::new(-27, -3, 4, 4);

    #[test]
    fn test_special_classes() {
        let t = ARCTAN_LIKE;
        assert_eq!(classify(Double::from_f64(f64::NAN), &t), MagnitudeClass::NaN);
        assert_eq!(classify(Double::from_f64(-f64::INFINITY), &t), MagnitudeClass::Infinite);
        assert_eq!(classify(Double::from_f64(-0.0), &t), MagnitudeClass::Zero);
        assert_eq!(classify(Single::from_f32(1e-40), &t), MagnitudeClass::Subnormal);
        assert_eq!(classify_normalized(Single::from_f32(1e-40), &t), MagnitudeClass::Tiny);
    }

    #[test]
    fn test_bucket_boundaries() {
        let t = ARCTAN_LIKE;
        let below = |e: i32| Double::from_f64(2f64.powi(e)).next_toward_zero();
        assert_eq!(classify(below(-3), &t), MagnitudeClass::Small);
        assert_eq!(classify(Double::from_f64(0.125), &t), MagnitudeClass::Mid);
        assert_eq!(classify(below(4), &t), MagnitudeClass::Mid);
        // an empty Large class falls straight through to Huge
        assert_eq!(classify(Double::from_f64(16.0), &t), MagnitudeClass::Huge);
        assert_eq!(classify(below(-27), &t), MagnitudeClass::Tiny);
    }

    #[test]
    fn test_classify_value_agrees_with_layout() {
        let t = Thresholds::new(-20, -3, 0, 1);
        for x in [1e-300, 3e-7, 0.124_999, 0.125, 0.5, 0.999, 1.0, 1.5, 2.0, 1e10, 5e-324] {
            let layout = classify_normalized(Double::from_f64(x), &t);
            assert_eq!(classify_value(x, &t), layout, "x={x}");
            assert_eq!(classify_value(-x, &t), layout, "x={x}");
        }
        let just_below_one = DoubleDouble::new(1.0, -1e-20);
        assert_eq!(classify_value(just_below_one, &t), MagnitudeClass::Mid);
        assert_eq!(classify_normalized(just_below_one, &t), MagnitudeClass::Mid);
    }
}
