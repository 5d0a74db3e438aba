//! IEEE-754 binary128 word.

use super::LayoutKind;
use super::layout::FloatLayout;
use bytemuck::{Pod, Zeroable};
use std::fmt;

/// IEEE-754 quadruple precision.
///
/// Format: 1 sign + 15 exponent + 112 fraction bits, bias 16383.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Quad128(pub u128);

// Safety: Quad128 is a transparent wrapper around u128, which is Pod
unsafe impl Pod for Quad128 {}
unsafe impl Zeroable for Quad128 {}

impl Quad128 {
    const SIGN_MASK: u128 = 1 << 127;
    const EXPONENT_MASK: u128 = 0x7FFF;
    const FRACTION_MASK: u128 = (1 << 112) - 1;
}

impl FloatLayout for Quad128 {
    type Bits = u128;

    const KIND: LayoutKind = LayoutKind::Quad128;
    const EXPONENT_BITS: u32 = 15;
    const MANTISSA_BITS: u32 = 112;
    const BIAS: i32 = 16383;
    const PRECISION: u32 = 113;
    const BYTES: usize = 16;

    #[inline]
    fn from_bits(bits: u128) -> Self {
        Self(bits)
    }

    #[inline]
    fn to_bits(self) -> u128 {
        self.0
    }

    #[inline]
    fn sign(self) -> bool {
        self.0 & Self::SIGN_MASK != 0
    }

    #[inline]
    fn exponent(self) -> u32 {
        ((self.0 >> 112) & Self::EXPONENT_MASK) as u32
    }

    #[inline]
    fn mantissa(self) -> u128 {
        self.0 & Self::FRACTION_MASK
    }

    #[inline]
    fn from_parts(sign: bool, exponent: u32, mantissa: u128) -> Self {
        Self(
            ((sign as u128) << 127)
                | ((exponent as u128 & Self::EXPONENT_MASK) << 112)
                | (mantissa & Self::FRACTION_MASK),
        )
    }

    fn encode_le(self, out: &mut [u8]) {
        out.copy_from_slice(&self.0.to_le_bytes());
    }

    fn decode_le(bytes: &[u8]) -> Self {
        let mut word = [0u8; 16];
        word.copy_from_slice(bytes);
        Self(u128::from_le_bytes(word))
    }
}

impl fmt::Debug for Quad128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Quad128({:#034x})", self.0)
    }
}
