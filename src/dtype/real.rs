//! Arithmetic carriers.
//!
//! Every function computes in one of three carriers: `f32`, `f64` or
//! [`DoubleDouble`]. [`Real`] is the contract they share. It is deliberately
//! narrow: field arithmetic, ordering, a set of named constants and
//! predicates that need nothing beyond comparisons. The portable evaluation
//! path is written entirely against this trait.

use super::doubledouble::DoubleDouble;
use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Arithmetic carrier shared by the kernels and the portable path.
pub trait Real:
    Copy
    + PartialEq
    + PartialOrd
    + fmt::Debug
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Zero
    + One
{
    /// `0`
    const ZERO: Self;
    /// `1`
    const ONE: Self;
    /// `2`
    const TWO: Self;
    /// `3`
    const THREE: Self;
    /// `1/2`
    const HALF: Self;
    /// Quiet NaN
    const NAN: Self;
    /// `+inf`
    const INFINITY: Self;
    /// `-inf`
    const NEG_INFINITY: Self;
    /// Smallest positive normal value
    const MIN_POSITIVE: Self;
    /// Largest finite value
    const MAX: Self;
    /// `π`
    const PI: Self;
    /// `π/2`
    const PI_BY_TWO: Self;
    /// `π/2 - PI_BY_TWO`, the part of `π/2` the carrier drops
    const PI_BY_TWO_TAIL: Self;
    /// `π/4`
    const PI_BY_FOUR: Self;
    /// `3π/4`
    const THREE_PI_BY_FOUR: Self;
    /// `ln 2`
    const LN_2: Self;
    /// `√2`
    const SQRT_2: Self;
    /// `∛2`
    const CBRT_2: Self;
    /// `∛4`
    const CBRT_4: Self;
    /// `2/√π`
    const TWO_BY_SQRT_PI: Self;

    /// Significant bits carried
    const PRECISION: u32;
    /// Largest exponent of a finite value
    const MAX_EXPONENT: i32;
    /// Exponent of [`Real::MIN_POSITIVE`]
    const MIN_EXPONENT: i32;

    /// Round an `f64` into the carrier.
    fn from_f64(x: f64) -> Self;

    /// Round the carrier to `f64`.
    fn to_f64(self) -> f64;

    /// Exact conversion of a small integer.
    fn from_i32(n: i32) -> Self;

    /// Truncate toward zero, saturating at the `i32` range. NaN maps to 0.
    fn to_i32(self) -> i32;

    // ------------------------------------------------------------------------
    // Comparison-only predicates
    // ------------------------------------------------------------------------

    /// NaN test through self-inequality.
    #[inline]
    fn is_nan(self) -> bool {
        #[allow(clippy::eq_op)]
        let unordered = self != self;
        unordered
    }

    /// Infinity test through equality with the two infinities.
    #[inline]
    fn is_infinite(self) -> bool {
        self == Self::INFINITY || self == Self::NEG_INFINITY
    }

    /// Neither NaN nor infinite.
    #[inline]
    fn is_finite(self) -> bool {
        !self.is_nan() && !self.is_infinite()
    }

    /// Magnitude. `-0` maps to `+0`, NaN passes through.
    #[inline]
    fn abs(self) -> Self {
        if self <= Self::ZERO {
            Self::ZERO - self
        } else {
            self
        }
    }

    /// Sign test that distinguishes `-0` through the sign of its reciprocal.
    /// NaN reports `false`.
    #[inline]
    fn is_sign_negative(self) -> bool {
        self < Self::ZERO || (self == Self::ZERO && Self::ONE / self < Self::ZERO)
    }

    /// `2^n`, exact over the whole range including subnormals.
    /// Saturates to `+inf` and `+0`.
    fn pow2(n: i32) -> Self {
        if n > Self::MAX_EXPONENT {
            return Self::INFINITY;
        }
        if n < Self::MIN_EXPONENT - Self::PRECISION as i32 {
            return Self::ZERO;
        }
        if n < Self::MIN_EXPONENT {
            return power_of_two::<Self>(Self::MIN_EXPONENT)
                * power_of_two::<Self>(n - Self::MIN_EXPONENT);
        }
        power_of_two(n)
    }

    /// `self * 2^n` in steps that keep every factor representable.
    fn mul_pow2(self, n: i32) -> Self {
        let mut x = self;
        let mut n = n;
        while n > Self::MAX_EXPONENT {
            x = x * Self::pow2(Self::MAX_EXPONENT);
            n -= Self::MAX_EXPONENT;
        }
        while n < Self::MIN_EXPONENT {
            x = x * Self::pow2(Self::MIN_EXPONENT);
            n -= Self::MIN_EXPONENT;
        }
        x * Self::pow2(n)
    }

    /// `self` with the sign of `sign`, as far as comparisons can tell.
    #[inline]
    fn with_sign_of(self, sign: Self) -> Self {
        let magnitude = self.abs();
        if sign.is_sign_negative() {
            -magnitude
        } else {
            magnitude
        }
    }
}

/// Binary exponentiation of 2 (or 1/2) for normal-range exponents.
fn power_of_two<T: Real>(n: i32) -> T {
    let (mut base, mut k) = if n < 0 {
        (T::HALF, n.unsigned_abs())
    } else {
        (T::TWO, n as u32)
    };
    let mut result = T::ONE;
    while k > 0 {
        if k & 1 == 1 {
            result = result * base;
        }
        k >>= 1;
        if k > 0 {
            base = base * base;
        }
    }
    result
}

macro_rules! impl_real_primitive {
    ($t:ident, $precision:expr, $tail:expr) => {
        impl Real for $t {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const TWO: Self = 2.0;
            const THREE: Self = 3.0;
            const HALF: Self = 0.5;
            const NAN: Self = $t::NAN;
            const INFINITY: Self = $t::INFINITY;
            const NEG_INFINITY: Self = $t::NEG_INFINITY;
            const MIN_POSITIVE: Self = $t::MIN_POSITIVE;
            const MAX: Self = $t::MAX;
            const PI: Self = std::$t::consts::PI;
            const PI_BY_TWO: Self = std::$t::consts::FRAC_PI_2;
            const PI_BY_TWO_TAIL: Self = $tail;
            const PI_BY_FOUR: Self = std::$t::consts::FRAC_PI_4;
            const THREE_PI_BY_FOUR: Self = 2.356_194_490_192_345;
            const LN_2: Self = std::$t::consts::LN_2;
            const SQRT_2: Self = std::$t::consts::SQRT_2;
            const CBRT_2: Self = 1.259_921_049_894_873_2;
            const CBRT_4: Self = 1.587_401_051_968_199_6;
            const TWO_BY_SQRT_PI: Self = std::$t::consts::FRAC_2_SQRT_PI;

            const PRECISION: u32 = $precision;
            const MAX_EXPONENT: i32 = $t::MAX_EXP - 1;
            const MIN_EXPONENT: i32 = $t::MIN_EXP - 1;

            #[inline]
            fn from_f64(x: f64) -> Self {
                x as $t
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_i32(n: i32) -> Self {
                n as $t
            }

            #[inline]
            fn to_i32(self) -> i32 {
                self as i32
            }
        }
    };
}

impl_real_primitive!(f32, 24, -4.371_139e-8);
impl_real_primitive!(f64, 53, 6.123_233_995_736_766e-17);

impl Real for DoubleDouble {
    const ZERO: Self = DoubleDouble::new(0.0, 0.0);
    const ONE: Self = DoubleDouble::new(1.0, 0.0);
    const TWO: Self = DoubleDouble::new(2.0, 0.0);
    const THREE: Self = DoubleDouble::new(3.0, 0.0);
    const HALF: Self = DoubleDouble::new(0.5, 0.0);
    const NAN: Self = DoubleDouble::new(f64::NAN, 0.0);
    const INFINITY: Self = DoubleDouble::new(f64::INFINITY, 0.0);
    const NEG_INFINITY: Self = DoubleDouble::new(f64::NEG_INFINITY, 0.0);
    const MIN_POSITIVE: Self = DoubleDouble::new(f64::MIN_POSITIVE, 0.0);
    const MAX: Self = DoubleDouble::new(f64::MAX, 0.0);
    const PI: Self = DoubleDouble::new(3.141_592_653_589_793, 1.224_646_799_147_353_2e-16);
    const PI_BY_TWO: Self = DoubleDouble::new(1.570_796_326_794_896_6, 6.123_233_995_736_766e-17);
    const PI_BY_TWO_TAIL: Self = DoubleDouble::new(-1.497_384_904_859_169_8e-33, 0.0);
    const PI_BY_FOUR: Self = DoubleDouble::new(0.785_398_163_397_448_3, 3.061_616_997_868_383e-17);
    const THREE_PI_BY_FOUR: Self =
        DoubleDouble::new(2.356_194_490_192_345, 9.184_850_993_605_148e-17);
    const LN_2: Self = DoubleDouble::new(0.693_147_180_559_945_3, 2.319_046_813_846_299_6e-17);
    const SQRT_2: Self = DoubleDouble::new(1.414_213_562_373_095_1, -9.667_293_313_452_913e-17);
    const CBRT_2: Self = DoubleDouble::new(1.259_921_049_894_873_2, -2.589_933_375_300_507e-17);
    const CBRT_4: Self = DoubleDouble::new(1.587_401_051_968_199_6, -1.086_900_819_419_782_3e-16);
    const TWO_BY_SQRT_PI: Self =
        DoubleDouble::new(1.128_379_167_095_512_6, 1.533_545_961_316_588e-17);

    const PRECISION: u32 = 106;
    const MAX_EXPONENT: i32 = 1023;
    const MIN_EXPONENT: i32 = -1022;

    #[inline]
    fn from_f64(x: f64) -> Self {
        DoubleDouble::from_f64(x)
    }

    #[inline]
    fn to_f64(self) -> f64 {
        DoubleDouble::to_f64(self)
    }

    #[inline]
    fn from_i32(n: i32) -> Self {
        DoubleDouble::from_f64(n as f64)
    }

    fn to_i32(self) -> i32 {
        let whole = self.hi as i32;
        if (whole as f64) != self.hi {
            return whole;
        }
        if self.hi > 0.0 && self.lo < 0.0 {
            whole.saturating_sub(1)
        } else if self.hi < 0.0 && self.lo > 0.0 {
            whole.saturating_add(1)
        } else {
            whole
        }
    }
}
