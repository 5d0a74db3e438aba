//! IEEE-754 binary64 word.

use super::LayoutKind;
use super::layout::FloatLayout;
use bytemuck::{Pod, Zeroable};
use std::fmt;

/// IEEE-754 double precision, viewed as its raw word.
///
/// Format: 1 sign + 11 exponent + 52 fraction bits, bias 1023.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Double(pub u64);

// Safety: Double is a transparent wrapper around u64, which is Pod
unsafe impl Pod for Double {}
unsafe impl Zeroable for Double {}

impl Double {
    const SIGN_MASK: u64 = 0x8000_0000_0000_0000;
    const EXPONENT_MASK: u64 = 0x7FF;
    const FRACTION_MASK: u64 = 0x000F_FFFF_FFFF_FFFF;

    /// View an `f64` as its word.
    #[inline]
    pub fn from_f64(value: f64) -> Self {
        Self(value.to_bits())
    }

    /// Reinterpret the word as an `f64`.
    #[inline]
    pub fn to_f64(self) -> f64 {
        f64::from_bits(self.0)
    }

    /// Next representable value toward zero. Zero, infinities and NaNs are
    /// returned unchanged.
    #[inline]
    pub fn next_toward_zero(self) -> Self {
        if self.0 & !Self::SIGN_MASK == 0 || self.is_nan_or_inf() {
            self
        } else {
            Self(self.0 - 1)
        }
    }
}

impl FloatLayout for Double {
    type Bits = u64;

    const KIND: LayoutKind = LayoutKind::Double;
    const EXPONENT_BITS: u32 = 11;
    const MANTISSA_BITS: u32 = 52;
    const BIAS: i32 = 1023;
    const PRECISION: u32 = 53;
    const BYTES: usize = 8;

    #[inline]
    fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    #[inline]
    fn to_bits(self) -> u64 {
        self.0
    }

    #[inline]
    fn sign(self) -> bool {
        self.0 & Self::SIGN_MASK != 0
    }

    #[inline]
    fn exponent(self) -> u32 {
        ((self.0 >> 52) & Self::EXPONENT_MASK) as u32
    }

    #[inline]
    fn mantissa(self) -> u128 {
        (self.0 & Self::FRACTION_MASK) as u128
    }

    #[inline]
    fn from_parts(sign: bool, exponent: u32, mantissa: u128) -> Self {
        Self(
            ((sign as u64) << 63)
                | ((exponent as u64 & Self::EXPONENT_MASK) << 52)
                | (mantissa as u64 & Self::FRACTION_MASK),
        )
    }

    fn encode_le(self, out: &mut [u8]) {
        out.copy_from_slice(&self.0.to_le_bytes());
    }

    fn decode_le(bytes: &[u8]) -> Self {
        let mut word = [0u8; 8];
        word.copy_from_slice(bytes);
        Self(u64::from_le_bytes(word))
    }
}

impl From<f64> for Double {
    #[inline]
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl From<Double> for f64 {
    #[inline]
    fn from(value: Double) -> Self {
        value.to_f64()
    }
}

impl fmt::Debug for Double {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Double({:#018x} = {:e})", self.0, self.to_f64())
    }
}

/// Multiply an `f64` by `2^n` through its layout.
#[inline]
pub(crate) fn scale_f64(value: f64, n: i32) -> f64 {
    Double::from_f64(value).scale_exponent(n).to_f64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::RoundingMode;

    #[test]
    fn test_fields() {
        let w = Double::from_f64(0.75);
        assert!(!w.sign());
        assert_eq!(w.unbiased_exponent(), -1);
        assert_eq!(w.mantissa(), 1 << 51);
        assert_eq!(w.mantissa_index(7), 64);
    }

    #[test]
    fn test_with_exponent_scales_by_power_of_two() {
        let w = Double::from_f64(-3.25);
        let scaled = w.with_exponent(1023 + 10);
        assert_eq!(scaled.to_f64(), -3.25 / 2.0 * 1024.0);
        assert_eq!(scaled.with_exponent(w.exponent()), w);
    }

    #[test]
    fn test_scale_exponent_into_subnormals() {
        let w = Double::from_f64(1.5);
        assert_eq!(w.scale_exponent(-1074).to_f64(), f64::from_bits(2));
        assert_eq!(w.scale_exponent(-1076).to_f64(), 0.0);
        assert_eq!(w.scale_exponent(1024).to_f64(), f64::INFINITY);
        let tiny = Double::from_f64(f64::from_bits(3));
        assert_eq!(tiny.scale_exponent(1).to_f64(), f64::from_bits(6));
    }

    #[test]
    fn test_from_significand_rounds_to_even() {
        // 2^53 + 1 is a tie between 2^53 and 2^53 + 2
        let w = Double::from_significand(false, (1u128 << 53) + 1, 0, false);
        assert_eq!(w.to_f64(), 9007199254740992.0);
        let w = Double::from_significand(false, (1u128 << 53) + 1, 0, true);
        assert_eq!(w.to_f64(), 9007199254740994.0);
        let w = Double::from_significand(true, (1u128 << 53) + 3, 0, false);
        assert_eq!(w.to_f64(), -9007199254740996.0);
    }

    #[test]
    fn test_round_integral() {
        let floor = |x: f64| {
            Double::from_f64(x)
                .round_integral(RoundingMode::Floor)
                .to_f64()
        };
        assert_eq!(floor(-2.5), -3.0);
        assert_eq!(floor(2.5), 2.0);
        assert_eq!(floor(-0.25), -1.0);
        assert_eq!(floor(-1.0), -1.0);
        assert_eq!(floor(-1.75), -2.0);
        let ceil = Double::from_f64(-0.25).round_integral(RoundingMode::Ceil);
        assert_eq!(ceil.to_f64().to_bits(), (-0.0f64).to_bits());
        let trunc = Double::from_f64(-7.999).round_integral(RoundingMode::Trunc);
        assert_eq!(trunc.to_f64(), -7.0);
    }

    #[test]
    fn test_next_toward_zero() {
        assert_eq!(Double::from_f64(1.0).next_toward_zero().to_f64(), 1.0 - f64::EPSILON / 2.0);
        assert_eq!(Double::from_f64(-2.0).next_toward_zero().to_f64(), -2.0 + f64::EPSILON);
        assert_eq!(Double::from_f64(0.0).next_toward_zero().to_f64(), 0.0);
    }
}
