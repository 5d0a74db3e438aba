//! x87 80-bit extended precision word.

use super::LayoutKind;
use super::layout::FloatLayout;
use bytemuck::{Pod, Zeroable};
use std::fmt;

/// x87 extended precision.
///
/// Format: 1 sign + 15 exponent + 1 explicit integer bit + 63 fraction bits,
/// bias 16383. The word lives in the low 80 bits of a `u128`: bits 0..64 hold
/// the full significand (integer bit at 63), bits 64..79 the biased exponent
/// and bit 79 the sign.
///
/// The integer bit is derived from the exponent when a word is built from
/// fields, so unnormals and pseudo-denormals only appear through
/// [`FloatLayout::from_bits`].
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Extended80(pub u128);

// Safety: Extended80 is a transparent wrapper around u128, which is Pod
unsafe impl Pod for Extended80 {}
unsafe impl Zeroable for Extended80 {}

impl Extended80 {
    const SIGN_BIT: u32 = 79;
    const EXPONENT_MASK: u128 = 0x7FFF;
    const INTEGER_BIT: u128 = 1 << 63;
    const FRACTION_MASK: u128 = (1 << 63) - 1;
    const WORD_MASK: u128 = (1 << 80) - 1;

    /// Full 64-bit significand, explicit integer bit included.
    #[inline]
    pub fn significand_word(self) -> u64 {
        self.0 as u64
    }

    /// True when the explicit integer bit is set.
    #[inline]
    pub fn integer_bit(self) -> bool {
        self.0 & Self::INTEGER_BIT != 0
    }
}

impl FloatLayout for Extended80 {
    type Bits = u128;

    const KIND: LayoutKind = LayoutKind::Extended80;
    const EXPONENT_BITS: u32 = 15;
    const MANTISSA_BITS: u32 = 63;
    const BIAS: i32 = 16383;
    const PRECISION: u32 = 64;
    const BYTES: usize = 10;

    #[inline]
    fn from_bits(bits: u128) -> Self {
        Self(bits & Self::WORD_MASK)
    }

    #[inline]
    fn to_bits(self) -> u128 {
        self.0
    }

    #[inline]
    fn sign(self) -> bool {
        (self.0 >> Self::SIGN_BIT) & 1 == 1
    }

    #[inline]
    fn exponent(self) -> u32 {
        ((self.0 >> 64) & Self::EXPONENT_MASK) as u32
    }

    #[inline]
    fn mantissa(self) -> u128 {
        self.0 & Self::FRACTION_MASK
    }

    #[inline]
    fn from_parts(sign: bool, exponent: u32, mantissa: u128) -> Self {
        let exponent = exponent as u128 & Self::EXPONENT_MASK;
        let integer = if exponent != 0 { Self::INTEGER_BIT } else { 0 };
        Self(
            ((sign as u128) << Self::SIGN_BIT)
                | (exponent << 64)
                | integer
                | (mantissa & Self::FRACTION_MASK),
        )
    }

    fn encode_le(self, out: &mut [u8]) {
        out.copy_from_slice(&self.0.to_le_bytes()[..10]);
    }

    fn decode_le(bytes: &[u8]) -> Self {
        let mut word = [0u8; 16];
        word[..10].copy_from_slice(bytes);
        Self(u128::from_le_bytes(word))
    }
}

impl fmt::Debug for Extended80 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Extended80({}{:#06x}:{:#018x})",
            if self.sign() { "-" } else { "+" },
            self.exponent(),
            self.significand_word()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_has_explicit_integer_bit() {
        let one = Extended80::one(false);
        assert_eq!(one.to_bits(), 0x3FFF_8000_0000_0000_0000);
        assert!(one.integer_bit());
        assert_eq!(one.significand(), (1u128 << 63, -63));
    }

    #[test]
    fn test_subnormal_has_no_integer_bit() {
        let w = Extended80::from_parts(true, 0, 5);
        assert!(!w.integer_bit());
        assert!(w.is_subnormal());
        assert_eq!(w.exponent_value(), -16382 - 63 + 2);
    }

    #[test]
    fn test_byte_image_is_ten_bytes() {
        let w = Extended80::from_parts(true, 0x4000, 1 << 62);
        let bytes = w.to_le_bytes();
        assert_eq!(bytes.len(), 10);
        assert_eq!(bytes[9], 0xC0);
        assert_eq!(bytes[8], 0x00);
        assert_eq!(bytes[7], 0xC0);
        assert_eq!(Extended80::from_le_bytes(&bytes).unwrap(), w);
        assert!(Extended80::from_le_bytes(&bytes[..8]).is_err());
    }

    #[test]
    fn test_nan_and_infinity() {
        assert!(Extended80::nan().is_nan());
        assert_eq!(Extended80::nan().significand_word(), 0xC000_0000_0000_0000);
        let inf = Extended80::infinity(true);
        assert!(inf.is_infinite());
        assert!(inf.sign());
    }
}
