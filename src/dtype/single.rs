//! IEEE-754 binary32 word.

use super::LayoutKind;
use super::layout::FloatLayout;
use bytemuck::{Pod, Zeroable};
use std::fmt;

/// IEEE-754 single precision, viewed as its raw word.
///
/// Format: 1 sign + 8 exponent + 23 fraction bits, bias 127.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Single(pub u32);

// Safety: Single is a transparent wrapper around u32, which is Pod
unsafe impl Pod for Single {}
unsafe impl Zeroable for Single {}

impl Single {
    const SIGN_MASK: u32 = 0x8000_0000;
    const EXPONENT_MASK: u32 = 0xFF;
    const FRACTION_MASK: u32 = 0x007F_FFFF;

    /// View an `f32` as its word.
    #[inline]
    pub fn from_f32(value: f32) -> Self {
        Self(value.to_bits())
    }

    /// Reinterpret the word as an `f32`.
    #[inline]
    pub fn to_f32(self) -> f32 {
        f32::from_bits(self.0)
    }
}

impl FloatLayout for Single {
    type Bits = u32;

    const KIND: LayoutKind = LayoutKind::Single;
    const EXPONENT_BITS: u32 = 8;
    const MANTISSA_BITS: u32 = 23;
    const BIAS: i32 = 127;
    const PRECISION: u32 = 24;
    const BYTES: usize = 4;

    #[inline]
    fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    #[inline]
    fn to_bits(self) -> u32 {
        self.0
    }

    #[inline]
    fn sign(self) -> bool {
        self.0 & Self::SIGN_MASK != 0
    }

    #[inline]
    fn exponent(self) -> u32 {
        (self.0 >> 23) & Self::EXPONENT_MASK
    }

    #[inline]
    fn mantissa(self) -> u128 {
        (self.0 & Self::FRACTION_MASK) as u128
    }

    #[inline]
    fn from_parts(sign: bool, exponent: u32, mantissa: u128) -> Self {
        Self(
            ((sign as u32) << 31)
                | ((exponent & Self::EXPONENT_MASK) << 23)
                | (mantissa as u32 & Self::FRACTION_MASK),
        )
    }

    fn encode_le(self, out: &mut [u8]) {
        out.copy_from_slice(&self.0.to_le_bytes());
    }

    fn decode_le(bytes: &[u8]) -> Self {
        let mut word = [0u8; 4];
        word.copy_from_slice(bytes);
        Self(u32::from_le_bytes(word))
    }
}

impl From<f32> for Single {
    #[inline]
    fn from(value: f32) -> Self {
        Self::from_f32(value)
    }
}

impl From<Single> for f32 {
    #[inline]
    fn from(value: Single) -> Self {
        value.to_f32()
    }
}

impl fmt::Debug for Single {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Single({:#010x} = {:e})", self.0, self.to_f32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields() {
        let w = Single::from_f32(-1.5);
        assert!(w.sign());
        assert_eq!(w.exponent(), 127);
        assert_eq!(w.mantissa(), 1 << 22);
        assert_eq!(Single::from_parts(true, 127, 1 << 22), w);
    }

    #[test]
    fn test_special_values() {
        assert!(Single::from_f32(f32::NAN).is_nan());
        assert!(Single::from_f32(f32::NEG_INFINITY).is_infinite());
        assert!(Single::from_f32(-0.0).is_zero());
        assert!(Single::from_f32(f32::MIN_POSITIVE / 4.0).is_subnormal());
        assert_eq!(Single::nan().to_f32().to_bits(), 0x7FC0_0000);
    }

    #[test]
    fn test_exponent_value_of_subnormal() {
        let w = Single::from_f32(f32::from_bits(1));
        assert_eq!(w.exponent_value(), -149);
        let (n, offset) = w.normalize();
        assert!(!n.is_subnormal());
        assert_eq!(n.exponent_value() + offset, -149);
    }
}
