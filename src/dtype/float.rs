//! Storage types accepted by the public functions.

use super::convert::convert_layout;
use super::layout::FloatLayout;
use super::real::Real;
use super::{Double, DoubleDouble, Extended80, Quad128, Single};
use crate::algorithm::kernels::Kernels;
use std::fmt;

/// Binary exponents a wide value keeps when it converts into its
/// double-double carrier directly. Below the range the carrier's subnormals
/// would drop significand bits; above it a doubling would overflow.
pub(crate) const DIRECT_EXPONENTS: (i32, i32) = (-958, 1021);

/// A value the library can take and return.
///
/// Each storage type names the physical [`FloatLayout`] the bit-layout path
/// inspects and the [`Real`] carrier every kernel computes in. Narrow types
/// compute in their own precision; the 80- and 128-bit layouts compute in
/// double-double.
pub trait Float: Copy + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Physical encoding
    type Layout: FloatLayout;
    /// Arithmetic carrier
    type Carrier: Kernels;

    /// View the value as its layout.
    fn to_layout(self) -> Self::Layout;

    /// Rebuild the value from its layout.
    fn from_layout(layout: Self::Layout) -> Self;

    /// Widen (or round) into the carrier.
    fn to_carrier(self) -> Self::Carrier;

    /// Round a carrier result into storage.
    fn from_carrier(value: Self::Carrier) -> Self;

    /// Split into `(c, n)` with `self = c 2^n` and `c` inside the carrier's
    /// range.
    ///
    /// `n` is zero whenever the value converts directly. Otherwise `|c|` is
    /// in `[1, 2)` and `n` is the value's binary exponent. Zeros, infinities
    /// and NaN always convert directly.
    #[inline]
    fn to_carrier_scaled(self) -> (Self::Carrier, i32) {
        (self.to_carrier(), 0)
    }

    /// Round `value 2^n` into storage, saturating at the storage type's
    /// limits rather than the carrier's.
    #[inline]
    fn from_carrier_scaled(value: Self::Carrier, n: i32) -> Self {
        Self::from_carrier(value.mul_pow2(n))
    }

    /// Round an `f64` into storage.
    #[inline]
    fn from_double(x: f64) -> Self {
        Self::from_carrier(Self::Carrier::from_f64(x))
    }

    /// Nearest `f64`.
    #[inline]
    fn to_double(self) -> f64 {
        self.to_carrier().to_f64()
    }
}

macro_rules! impl_float_primitive {
    ($t:ty, $layout:ty, $from:ident, $to:ident) => {
        impl Float for $t {
            type Layout = $layout;
            type Carrier = $t;

            #[inline]
            fn to_layout(self) -> $layout {
                <$layout>::$from(self)
            }

            #[inline]
            fn from_layout(layout: $layout) -> Self {
                layout.$to()
            }

            #[inline]
            fn to_carrier(self) -> Self {
                self
            }

            #[inline]
            fn from_carrier(value: Self) -> Self {
                value
            }
        }
    };
}

impl_float_primitive!(f32, Single, from_f32, to_f32);
impl_float_primitive!(f64, Double, from_f64, to_f64);

impl Float for DoubleDouble {
    type Layout = DoubleDouble;
    type Carrier = DoubleDouble;

    #[inline]
    fn to_layout(self) -> Self {
        self
    }

    #[inline]
    fn from_layout(layout: Self) -> Self {
        layout
    }

    #[inline]
    fn to_carrier(self) -> Self {
        self
    }

    #[inline]
    fn from_carrier(value: Self) -> Self {
        value
    }
}

macro_rules! impl_float_wide {
    ($t:ty) => {
        impl Float for $t {
            type Layout = $t;
            type Carrier = DoubleDouble;

            #[inline]
            fn to_layout(self) -> Self {
                self
            }

            #[inline]
            fn from_layout(layout: Self) -> Self {
                layout
            }

            #[inline]
            fn to_carrier(self) -> DoubleDouble {
                convert_layout(self)
            }

            #[inline]
            fn from_carrier(value: DoubleDouble) -> Self {
                convert_layout(value)
            }

            fn to_carrier_scaled(self) -> (DoubleDouble, i32) {
                if self.is_nan_or_inf() || self.is_zero() {
                    return (self.to_carrier(), 0);
                }
                let e = self.exponent_value();
                let (low, high) = DIRECT_EXPONENTS;
                if (low..=high).contains(&e) {
                    (self.to_carrier(), 0)
                } else {
                    (self.scale_exponent(-e).to_carrier(), e)
                }
            }

            #[inline]
            fn from_carrier_scaled(value: DoubleDouble, n: i32) -> Self {
                Self::from_carrier(value).scale_exponent(n)
            }
        }
    };
}

impl_float_wide!(Extended80);
impl_float_wide!(Quad128);

/// The build's long double.
///
/// Selected by the `ldouble-*` cargo features: `ldouble-extended80` wins over
/// `ldouble-quad128`, which wins over the default `ldouble-doubledouble`.
#[cfg(feature = "ldouble-extended80")]
pub type LDouble = Extended80;

/// The build's long double.
#[cfg(all(feature = "ldouble-quad128", not(feature = "ldouble-extended80")))]
pub type LDouble = Quad128;

/// The build's long double.
#[cfg(not(any(feature = "ldouble-extended80", feature = "ldouble-quad128")))]
pub type LDouble = DoubleDouble;
