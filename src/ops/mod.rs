//! Crate-level math functions
//!
//! Every function is generic over [`Float`](crate::dtype::Float) and forwards
//! to [`DefaultPath`](crate::runtime::DefaultPath). Monomorphic wrappers carry
//! the precision in their name, so callers that cannot name generics (or
//! bindings layered on top) get one symbol per function and precision.
//!
//! ```text
//! ops::sqrt::<T>(x)
//!   ├── sqrt_f32 / sqrt_f64 / sqrt_ld   (typed wrappers)
//!   └── DefaultPath::sqrt               (BitLayout or Portable)
//! ```
//!
//! # Function families
//!
//! | Family | Functions |
//! |---|---|
//! | [`rounding`] | `abs`, `copysign`, `floor`, `ceil`, `trunc`, `fractional_part`, `mod_2`, `base2_mant_and_exp`, `pow2` |
//! | [`elementary`] | `sqrt`, `cbrt`, `hypot`, `hypot3`, `exp`, `log`, `cosh` |
//! | [`periodic`] | `sinpi`, `cospi`, `sind`, `cosd` |
//! | [`inverse_trig`] | `arcsin`, `arccos`, `arctan`, `arctan2` |
//! | [`special`] | `erf`, `bessel_i0`, `bessel_j0`, `fresnel_cos`, `fresnel_sin`, `normalized_fresnel_cos`, `normalized_fresnel_sin`, `lambert_w` |
//!
//! Failures are reported through the returned value only: NaN for domain
//! errors, signed infinity on overflow and signed zero on underflow.
//!
//! ```
//! use numr_libm::ops::{arctan2, floor_f64, sqrt};
//!
//! assert_eq!(sqrt(9.0f32), 3.0);
//! assert_eq!(floor_f64(-2.5), -3.0);
//! assert_eq!(arctan2(1.0f64, 0.0), std::f64::consts::FRAC_PI_2);
//! ```

/// Define `name<T: Float>(x: T) -> T` forwarding to the default path, plus
/// its `_f32`, `_f64` and `_ld` wrappers.
macro_rules! unary_ops {
    ($($(#[$doc:meta])* $name:ident;)*) => {
        $(
            $(#[$doc])*
            #[inline]
            pub fn $name<T: crate::dtype::Float>(x: T) -> T {
                <crate::runtime::DefaultPath as crate::runtime::MathPath>::$name(x)
            }

            paste::paste! {
                #[doc = concat!("[`", stringify!($name), "`] for `f32`.")]
                #[inline]
                pub fn [<$name _f32>](x: f32) -> f32 {
                    $name(x)
                }

                #[doc = concat!("[`", stringify!($name), "`] for `f64`.")]
                #[inline]
                pub fn [<$name _f64>](x: f64) -> f64 {
                    $name(x)
                }

                #[doc = concat!("[`", stringify!($name), "`] for the build's long double.")]
                #[inline]
                pub fn [<$name _ld>](x: crate::dtype::LDouble) -> crate::dtype::LDouble {
                    $name(x)
                }
            }
        )*
    };
}

/// Two-argument counterpart of `unary_ops!`.
macro_rules! binary_ops {
    ($($(#[$doc:meta])* $name:ident($a:ident, $b:ident);)*) => {
        $(
            $(#[$doc])*
            #[inline]
            pub fn $name<T: crate::dtype::Float>($a: T, $b: T) -> T {
                <crate::runtime::DefaultPath as crate::runtime::MathPath>::$name($a, $b)
            }

            paste::paste! {
                #[doc = concat!("[`", stringify!($name), "`] for `f32`.")]
                #[inline]
                pub fn [<$name _f32>]($a: f32, $b: f32) -> f32 {
                    $name($a, $b)
                }

                #[doc = concat!("[`", stringify!($name), "`] for `f64`.")]
                #[inline]
                pub fn [<$name _f64>]($a: f64, $b: f64) -> f64 {
                    $name($a, $b)
                }

                #[doc = concat!("[`", stringify!($name), "`] for the build's long double.")]
                #[inline]
                pub fn [<$name _ld>](
                    $a: crate::dtype::LDouble,
                    $b: crate::dtype::LDouble,
                ) -> crate::dtype::LDouble {
                    $name($a, $b)
                }
            }
        )*
    };
}

/// Three-argument counterpart of `unary_ops!`.
macro_rules! ternary_ops {
    ($($(#[$doc:meta])* $name:ident($a:ident, $b:ident, $c:ident);)*) => {
        $(
            $(#[$doc])*
            #[inline]
            pub fn $name<T: crate::dtype::Float>($a: T, $b: T, $c: T) -> T {
                <crate::runtime::DefaultPath as crate::runtime::MathPath>::$name($a, $b, $c)
            }

            paste::paste! {
                #[doc = concat!("[`", stringify!($name), "`] for `f32`.")]
                #[inline]
                pub fn [<$name _f32>]($a: f32, $b: f32, $c: f32) -> f32 {
                    $name($a, $b, $c)
                }

                #[doc = concat!("[`", stringify!($name), "`] for `f64`.")]
                #[inline]
                pub fn [<$name _f64>]($a: f64, $b: f64, $c: f64) -> f64 {
                    $name($a, $b, $c)
                }

                #[doc = concat!("[`", stringify!($name), "`] for the build's long double.")]
                #[inline]
                pub fn [<$name _ld>](
                    $a: crate::dtype::LDouble,
                    $b: crate::dtype::LDouble,
                    $c: crate::dtype::LDouble,
                ) -> crate::dtype::LDouble {
                    $name($a, $b, $c)
                }
            }
        )*
    };
}

pub mod elementary;
pub mod inverse_trig;
pub mod periodic;
pub mod rounding;
pub mod special;

pub use elementary::*;
pub use inverse_trig::*;
pub use periodic::*;
pub use rounding::*;
pub use special::*;
