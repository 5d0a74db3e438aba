//! # numr-libm
//!
//! **Elementary and special functions for `f32`, `f64` and long double, with
//! no platform math library underneath.**
//!
//! Every function is computed from bit decomposition, range reduction and
//! fixed-degree approximations written in this crate, so results are the
//! same on every target with IEEE-754 `f32`/`f64` arithmetic.
//!
//! ## Why numr-libm?
//!
//! - **Reproducible**: no calls into the host `libm`, no FMA-dependent paths
//! - **Five layouts**: binary32, binary64, x87 extended, binary128 and
//!   double-double behind one [`FloatLayout`](dtype::FloatLayout) model
//! - **Two paths**: a bit-layout path and a comparison-only portable path,
//!   validated against each other by sampling
//! - **Total**: every input yields a value; NaN, signed infinity or signed
//!   zero report domain errors, overflow and underflow
//!
//! ## Functions
//!
//! - **Rounding and bits**: `abs`, `copysign`, `floor`, `ceil`, `trunc`,
//!   `fractional_part`, `mod_2`, `base2_mant_and_exp`, `pow2`
//! - **Roots**: `sqrt`, `cbrt`, `hypot`, `hypot3`
//! - **Exponential**: `exp`, `log`, `cosh`
//! - **Periodic**: `sinpi`, `cospi`, `sind`, `cosd`
//! - **Inverse trigonometric**: `arcsin`, `arccos`, `arctan`, `arctan2`
//! - **Special**: `erf`, `bessel_i0`, `bessel_j0`, the plain and normalized
//!   Fresnel integrals, `lambert_w`
//!
//! ## Quick Start
//!
//! ```rust
//! use numr_libm::prelude::*;
//!
//! assert_eq!(sqrt(2.25f64), 1.5);
//! assert_eq!(arccos_f64(-1.0), std::f64::consts::PI);
//!
//! let x = LDouble::from_double(0.5);
//! let y = erf(x);
//! assert!((y.to_double() - 0.520_499_877_813_046_5).abs() < 1e-15);
//! ```
//!
//! ## Feature Flags
//!
//! - `ldouble-doubledouble` (default): `LDouble` is [`DoubleDouble`](dtype::DoubleDouble)
//! - `ldouble-extended80`: `LDouble` is [`Extended80`](dtype::Extended80)
//! - `ldouble-quad128`: `LDouble` is [`Quad128`](dtype::Quad128)
//! - `portable`: the crate-level functions use the [`Portable`](runtime::Portable) path
//! - `rayon` (default): parallel sampling in [`validation`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::excessive_precision)]
#![allow(clippy::module_inception)]

pub mod algorithm;
pub mod dtype;
pub mod error;
pub mod ops;
pub mod runtime;
pub mod validation;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::dtype::{DoubleDouble, Float, LDouble, Real};
    pub use crate::error::{Error, Result};
    pub use crate::ops::*;
    pub use crate::runtime::{BitLayout, DefaultPath, MathPath, Portable};
}
