//! Floating-point layouts and arithmetic carriers
//!
//! This module provides the five physical encodings the library understands,
//! the [`FloatLayout`] view that decomposes them into IEEE-754 fields, and the
//! [`Real`] / [`Float`] traits that connect storage to computation.

mod convert;
mod double;
mod doubledouble;
mod extended;
mod float;
mod layout;
mod quad;
mod real;
mod single;

pub use convert::convert_layout;
pub use double::Double;
pub(crate) use double::scale_f64;
pub use doubledouble::DoubleDouble;
pub(crate) use doubledouble::{fast_two_sum, two_prod};
pub use extended::Extended80;
pub(crate) use float::DIRECT_EXPONENTS;
pub use float::{Float, LDouble};
pub use layout::{FloatLayout, RoundingMode};
pub use quad::Quad128;
pub use real::Real;
pub use single::Single;

use std::fmt;

/// Identifies a physical floating-point encoding.
///
/// # Discriminant Values (Serialization Stability)
///
/// The discriminant values are stable: Single=0, Double=1, Extended80=2,
/// Quad128=3, DoubleDouble=4.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
#[repr(u8)]
pub enum LayoutKind {
    /// IEEE-754 binary32
    Single = 0,
    /// IEEE-754 binary64
    Double = 1,
    /// x87 80-bit extended precision (explicit integer bit)
    Extended80 = 2,
    /// IEEE-754 binary128
    Quad128 = 3,
    /// Unevaluated sum of two binary64 words
    DoubleDouble = 4,
}

impl LayoutKind {
    /// Size of the physical encoding in bytes
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            Self::Single => 4,
            Self::Double => 8,
            Self::Extended80 => 10,
            Self::Quad128 | Self::DoubleDouble => 16,
        }
    }

    /// Significant bits of a normal value
    #[inline]
    pub const fn precision(self) -> u32 {
        match self {
            Self::Single => 24,
            Self::Double => 53,
            Self::Extended80 => 64,
            Self::Quad128 => 113,
            Self::DoubleDouble => 106,
        }
    }

    /// Short name for display (e.g., "f32", "dd128")
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Single => "f32",
            Self::Double => "f64",
            Self::Extended80 => "x80",
            Self::Quad128 => "f128",
            Self::DoubleDouble => "dd128",
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}
