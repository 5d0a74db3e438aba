//! The bit-layout model shared by every floating-point word type.
//!
//! A [`FloatLayout`] is an immutable view of one physical encoding. It exposes
//! the three IEEE-754 fields, rebuilds a word from them, and offers the narrow
//! mutators the dispatchers use for power-of-two scaling and sign handling.
//!
//! | Layout | Exponent bits | Fraction bits | Bias | Precision |
//! |--------|---------------|---------------|------|-----------|
//! | [`Single`](super::Single) | 8 | 23 | 127 | 24 |
//! | [`Double`](super::Double) | 11 | 52 | 1023 | 53 |
//! | [`Extended80`](super::Extended80) | 15 | 63 (+ explicit integer bit) | 16383 | 64 |
//! | [`Quad128`](super::Quad128) | 15 | 112 | 16383 | 113 |
//! | [`DoubleDouble`](super::DoubleDouble) | 11 (of `hi`) | 52 (of `hi`) | 1023 | 106 |
//!
//! Decomposition never rounds: `from_bits(to_bits(w)) == w` for every layout.
//! The only rounding operation is [`FloatLayout::from_significand`], which
//! builds a layout from an arbitrary integer significand with round-to-nearest-even.

use super::LayoutKind;
use crate::error::{Error, Result};
use std::fmt;

/// Direction used by [`FloatLayout::round_integral`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    /// Round toward negative infinity
    Floor,
    /// Round toward positive infinity
    Ceil,
    /// Round toward zero
    Trunc,
}

/// A physical floating-point encoding.
///
/// Implementors provide raw-word access and the field accessors; every other
/// operation has a generic default written against those fields.
pub trait FloatLayout: Copy + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Raw storage word
    type Bits: Copy + Eq + fmt::Debug;

    /// Which layout this is
    const KIND: LayoutKind;
    /// Width of the biased exponent field
    const EXPONENT_BITS: u32;
    /// Width of the stored fraction field (excluding any integer bit)
    const MANTISSA_BITS: u32;
    /// Exponent bias
    const BIAS: i32;
    /// Significant bits carried by a normal value
    const PRECISION: u32;
    /// Size of the physical encoding in bytes
    const BYTES: usize;
    /// Biased exponent reserved for infinities and NaNs
    const MAX_EXPONENT: u32 = (1 << Self::EXPONENT_BITS) - 1;

    /// Reinterpret a raw word.
    fn from_bits(bits: Self::Bits) -> Self;

    /// Raw word of this value.
    fn to_bits(self) -> Self::Bits;

    /// Sign bit (`true` for negative).
    fn sign(self) -> bool;

    /// Biased exponent field.
    fn exponent(self) -> u32;

    /// Fraction field, right-aligned.
    fn mantissa(self) -> u128;

    /// Build a value from its three fields. Out-of-range field bits are dropped.
    fn from_parts(sign: bool, exponent: u32, mantissa: u128) -> Self;

    /// Write the physical little-endian image into `out` (`out.len() == BYTES`).
    fn encode_le(self, out: &mut [u8]);

    /// Read the physical little-endian image (`bytes.len() == BYTES`).
    fn decode_le(bytes: &[u8]) -> Self;

    // ------------------------------------------------------------------------
    // Field mutators
    // ------------------------------------------------------------------------

    /// Replace the biased exponent field, leaving sign and mantissa untouched.
    #[inline]
    fn with_exponent(self, exponent: u32) -> Self {
        Self::from_parts(self.sign(), exponent, self.mantissa())
    }

    /// Replace the sign bit, leaving exponent and mantissa untouched.
    #[inline]
    fn with_sign(self, sign: bool) -> Self {
        Self::from_parts(sign, self.exponent(), self.mantissa())
    }

    // ------------------------------------------------------------------------
    // Predicates
    // ------------------------------------------------------------------------

    /// Exponent with the bias removed. Subnormals report `-BIAS`.
    #[inline]
    fn unbiased_exponent(self) -> i32 {
        self.exponent() as i32 - Self::BIAS
    }

    /// True for infinities and NaNs.
    #[inline]
    fn is_nan_or_inf(self) -> bool {
        self.exponent() == Self::MAX_EXPONENT
    }

    /// True for any NaN encoding.
    #[inline]
    fn is_nan(self) -> bool {
        self.is_nan_or_inf() && self.mantissa() != 0
    }

    /// True for positive or negative infinity.
    #[inline]
    fn is_infinite(self) -> bool {
        self.is_nan_or_inf() && self.mantissa() == 0
    }

    /// True for positive or negative zero.
    #[inline]
    fn is_zero(self) -> bool {
        self.exponent() == 0 && self.mantissa() == 0
    }

    /// True for nonzero values with a zero exponent field.
    #[inline]
    fn is_subnormal(self) -> bool {
        self.exponent() == 0 && self.mantissa() != 0
    }

    // ------------------------------------------------------------------------
    // Special values
    // ------------------------------------------------------------------------

    /// Signed zero.
    #[inline]
    fn zero(sign: bool) -> Self {
        Self::from_parts(sign, 0, 0)
    }

    /// Signed one.
    #[inline]
    fn one(sign: bool) -> Self {
        Self::from_parts(sign, Self::BIAS as u32, 0)
    }

    /// Signed infinity.
    #[inline]
    fn infinity(sign: bool) -> Self {
        Self::from_parts(sign, Self::MAX_EXPONENT, 0)
    }

    /// Canonical quiet NaN.
    #[inline]
    fn nan() -> Self {
        Self::from_parts(false, Self::MAX_EXPONENT, 1u128 << (Self::MANTISSA_BITS - 1))
    }

    // ------------------------------------------------------------------------
    // Significand access
    // ------------------------------------------------------------------------

    /// Top `bits` bits of the fraction field, used to index reduction tables.
    #[inline]
    fn mantissa_index(self, bits: u32) -> usize {
        (self.mantissa() >> (Self::MANTISSA_BITS - bits)) as usize
    }

    /// Integer significand and the power of two of its last bit.
    ///
    /// For a finite value, `|x| = sig * 2^exp2`.
    #[inline]
    fn significand(self) -> (u128, i32) {
        let shift = Self::BIAS + Self::MANTISSA_BITS as i32;
        if self.exponent() == 0 {
            (self.mantissa(), 1 - shift)
        } else {
            (
                self.mantissa() | (1u128 << Self::MANTISSA_BITS),
                self.exponent() as i32 - shift,
            )
        }
    }

    /// [`FloatLayout::significand`] plus a flag for nonzero bits below `2^exp2`.
    ///
    /// Only layouts whose value can exceed 128 significant bits ever set it.
    #[inline]
    fn significand_with_sticky(self) -> (u128, i32, bool) {
        let (sig, exp2) = self.significand();
        (sig, exp2, false)
    }

    /// True binary exponent `floor(log2|x|)` of a finite nonzero value,
    /// subnormals included.
    #[inline]
    fn exponent_value(self) -> i32 {
        let (sig, exp2) = self.significand();
        exp2 + (127 - sig.leading_zeros() as i32)
    }

    /// Round `sig * 2^exp2` (plus a fraction below the last bit when `sticky`)
    /// to this layout with round-to-nearest-even.
    ///
    /// Produces subnormals, signed zero on total underflow and signed infinity
    /// on overflow.
    #[inline]
    fn from_significand(sign: bool, sig: u128, exp2: i32, sticky: bool) -> Self {
        round_significand(sign, sig, exp2, sticky)
    }

    /// Multiply by `2^n` exactly, rounding only when the result is subnormal.
    fn scale_exponent(self, n: i32) -> Self {
        if self.is_nan_or_inf() || self.is_zero() {
            return self;
        }
        let (sig, exp2) = self.significand();
        Self::from_significand(self.sign(), sig, exp2.saturating_add(n), false)
    }

    /// Bring a subnormal into normal range.
    ///
    /// Returns the scaled value and the exponent offset that undoes the
    /// scaling (`x = normalized * 2^offset`). Normal values return offset 0.
    fn normalize(self) -> (Self, i32) {
        if self.is_subnormal() {
            let shift = Self::PRECISION as i32;
            (self.scale_exponent(shift), -shift)
        } else {
            (self, 0)
        }
    }

    /// Round to an integral value by masking fraction bits.
    fn round_integral(self, mode: RoundingMode) -> Self {
        if self.is_nan_or_inf() || self.is_zero() {
            return self;
        }
        let sign = self.sign();
        let away = match mode {
            RoundingMode::Floor => sign,
            RoundingMode::Ceil => !sign,
            RoundingMode::Trunc => false,
        };
        let e = self.unbiased_exponent();
        if e < 0 {
            return if away {
                Self::one(sign)
            } else {
                Self::zero(sign)
            };
        }
        if e >= Self::MANTISSA_BITS as i32 {
            return self;
        }

        let unit = 1u128 << (Self::MANTISSA_BITS - e as u32);
        let mask = unit - 1;
        let mantissa = self.mantissa();
        if mantissa & mask == 0 {
            return self;
        }

        let kept = mantissa & !mask;
        if !away {
            return Self::from_parts(sign, self.exponent(), kept);
        }
        let bumped = kept + unit;
        if bumped >> Self::MANTISSA_BITS != 0 {
            Self::from_parts(sign, self.exponent() + 1, 0)
        } else {
            Self::from_parts(sign, self.exponent(), bumped)
        }
    }

    // ------------------------------------------------------------------------
    // Byte images
    // ------------------------------------------------------------------------

    /// Physical little-endian encoding.
    fn to_le_bytes(self) -> Vec<u8> {
        let mut out = vec![0u8; Self::BYTES];
        self.encode_le(&mut out);
        out
    }

    /// Decode a physical little-endian encoding.
    fn from_le_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::BYTES {
            return Err(Error::InvalidLength {
                layout: Self::KIND,
                expected: Self::BYTES,
                got: bytes.len(),
            });
        }
        Ok(Self::decode_le(bytes))
    }
}

/// Generic round-to-nearest-even packing used by [`FloatLayout::from_significand`].
///
/// `sticky` is only meaningful when `sig` carries more bits than the layout
/// keeps; callers supply enough guard bits for that to hold.
pub(crate) fn round_significand<L: FloatLayout>(
    sign: bool,
    sig: u128,
    exp2: i32,
    sticky: bool,
) -> L {
    if sig == 0 {
        return L::zero(sign);
    }
    let top = 127 - sig.leading_zeros() as i64;
    let mantissa_bits = L::MANTISSA_BITS as i64;

    let mut biased = exp2 as i64 + top + L::BIAS as i64;
    let mut shift = top - mantissa_bits;
    if biased < 1 {
        shift += 1 - biased;
        biased = 0;
    }

    let mut kept = if shift > 0 {
        if shift > 128 {
            return L::zero(sign);
        }
        if shift == 128 {
            // every bit sits below the rounding point; only a value above
            // half of the smallest subnormal rounds up to it
            let half = 1u128 << 127;
            return if sig > half || (sig == half && sticky) {
                L::from_parts(sign, 0, 1)
            } else {
                L::zero(sign)
            };
        }
        let s = shift as u32;
        let kept = sig >> s;
        let rem = sig & ((1u128 << s) - 1);
        let half = 1u128 << (s - 1);
        if rem > half || (rem == half && (sticky || kept & 1 == 1)) {
            kept + 1
        } else {
            kept
        }
    } else {
        sig << (-shift) as u32
    };

    if kept >> (mantissa_bits + 1) != 0 {
        kept >>= 1;
        biased += 1;
    } else if biased == 0 && kept >> mantissa_bits != 0 {
        biased = 1;
    }
    if biased >= L::MAX_EXPONENT as i64 {
        return L::infinity(sign);
    }
    L::from_parts(sign, biased as u32, kept & ((1u128 << mantissa_bits) - 1))
}
