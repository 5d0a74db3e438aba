//! The functions validation knows how to sample.
//!
//! Each function carries its sampling [`Domain`] and the binary exponents
//! where its dispatcher switches kernels, so boundary inputs land exactly on
//! every class edge.

use super::ulp::{effective_precision, quantum_floor};
use crate::algorithm::kernels::ErfKernel;
use crate::dtype::{DIRECT_EXPONENTS, Double, Float, FloatLayout, Real};
use crate::runtime::{
    MathPath, arccos_thresholds, arcsin_thresholds, arctan_thresholds, exp_thresholds,
    flat_exponent,
};
use std::f64::consts::LN_2;
use std::fmt;

/// Where inputs of one function are drawn from.
///
/// Half of the random inputs have log-uniform magnitudes with binary
/// exponents in `[min_exponent, max_exponent]`; the other half are uniform on
/// `[lo, hi]`, clamped to the finite `f64` range. Every input lies in
/// `[lo, hi]`, which is unbounded for storage types wider than `f64`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Domain {
    /// Smallest input
    pub lo: f64,
    /// Largest input
    pub hi: f64,
    /// Smallest binary exponent of a log-uniform magnitude
    pub min_exponent: i32,
    /// Largest binary exponent of a log-uniform magnitude
    pub max_exponent: i32,
}

impl Domain {
    /// Every finite value of the storage type, or only the positive ones.
    pub fn full<T: Float>(signed: bool) -> Self {
        let (min_exponent, max_exponent) = exponent_span::<T>();
        let hi = if wider_than_carrier::<T>() {
            f64::INFINITY
        } else {
            T::Carrier::MAX.to_f64().min(f64::MAX)
        };
        Self {
            lo: if signed { -hi } else { 0.0 },
            hi,
            min_exponent,
            max_exponent,
        }
    }

    /// The interval `[lo, hi]`, with log-uniform magnitudes below
    /// `max(|lo|, |hi|)`.
    pub fn interval<T: Float>(lo: f64, hi: f64) -> Self {
        let (min_exponent, _) = exponent_span::<T>();
        let top = lo.abs().max(hi.abs());
        let max_exponent = Double::from_f64(top).exponent_value();
        Self {
            lo,
            hi,
            min_exponent,
            max_exponent,
        }
    }

    /// Whether `x` lies in `[lo, hi]`.
    #[inline]
    pub fn contains(&self, x: f64) -> bool {
        self.lo <= x && x <= self.hi
    }
}

/// Exponents of finite inputs: the storage type's whole range, subnormals
/// included.
fn exponent_span<T: Float>() -> (i32, i32) {
    (quantum_floor::<T>(), T::Layout::BIAS)
}

/// Whether the storage type's exponent range exceeds its carrier's.
#[inline]
fn wider_than_carrier<T: Float>() -> bool {
    T::Layout::BIAS > T::Carrier::MAX_EXPONENT
}

/// Exponents around the edges of the carrier's range, where a wide value
/// switches between direct and scaled conversion. Empty when storage and
/// carrier share a range.
fn carrier_edges<T: Float>() -> Vec<i32> {
    if !wider_than_carrier::<T>() {
        return Vec::new();
    }
    let (low, high) = DIRECT_EXPONENTS;
    let top = T::Carrier::MAX_EXPONENT;
    vec![low - 1, low, high, high + 1, top, top + 1]
}

/// One-argument functions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnaryFunction {
    /// `|x|`
    Abs,
    /// Round down
    Floor,
    /// Round up
    Ceil,
    /// Round toward zero
    Trunc,
    /// `x - trunc(x)`
    FractionalPart,
    /// `x - 2 trunc(x/2)`
    Mod2,
    /// Mantissa and exponent split
    Base2MantAndExp,
    /// Square root
    Sqrt,
    /// Cube root
    Cbrt,
    /// Exponential
    Exp,
    /// Natural logarithm
    Log,
    /// Hyperbolic cosine
    Cosh,
    /// `sin(pi x)`
    Sinpi,
    /// `cos(pi x)`
    Cospi,
    /// Sine in degrees
    Sind,
    /// Cosine in degrees
    Cosd,
    /// Arcsine
    Arcsin,
    /// Arccosine
    Arccos,
    /// Arctangent
    Arctan,
    /// Error function
    Erf,
    /// Modified Bessel function `I0`
    BesselI0,
    /// Bessel function `J0`
    BesselJ0,
    /// `∫₀ˣ cos(t²) dt`
    FresnelCos,
    /// `∫₀ˣ sin(t²) dt`
    FresnelSin,
    /// `∫₀ˣ cos(pi t²/2) dt`
    NormalizedFresnelCos,
    /// `∫₀ˣ sin(pi t²/2) dt`
    NormalizedFresnelSin,
    /// Lambert W, principal branch
    LambertW,
}

impl UnaryFunction {
    /// Every one-argument function.
    pub const ALL: [UnaryFunction; 27] = [
        Self::Abs,
        Self::Floor,
        Self::Ceil,
        Self::Trunc,
        Self::FractionalPart,
        Self::Mod2,
        Self::Base2MantAndExp,
        Self::Sqrt,
        Self::Cbrt,
        Self::Exp,
        Self::Log,
        Self::Cosh,
        Self::Sinpi,
        Self::Cospi,
        Self::Sind,
        Self::Cosd,
        Self::Arcsin,
        Self::Arccos,
        Self::Arctan,
        Self::Erf,
        Self::BesselI0,
        Self::BesselJ0,
        Self::FresnelCos,
        Self::FresnelSin,
        Self::NormalizedFresnelCos,
        Self::NormalizedFresnelSin,
        Self::LambertW,
    ];

    /// Name of the function in the public API.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Abs => "abs",
            Self::Floor => "floor",
            Self::Ceil => "ceil",
            Self::Trunc => "trunc",
            Self::FractionalPart => "fractional_part",
            Self::Mod2 => "mod_2",
            Self::Base2MantAndExp => "base2_mant_and_exp",
            Self::Sqrt => "sqrt",
            Self::Cbrt => "cbrt",
            Self::Exp => "exp",
            Self::Log => "log",
            Self::Cosh => "cosh",
            Self::Sinpi => "sinpi",
            Self::Cospi => "cospi",
            Self::Sind => "sind",
            Self::Cosd => "cosd",
            Self::Arcsin => "arcsin",
            Self::Arccos => "arccos",
            Self::Arctan => "arctan",
            Self::Erf => "erf",
            Self::BesselI0 => "bessel_i0",
            Self::BesselJ0 => "bessel_j0",
            Self::FresnelCos => "fresnel_cos",
            Self::FresnelSin => "fresnel_sin",
            Self::NormalizedFresnelCos => "normalized_fresnel_cos",
            Self::NormalizedFresnelSin => "normalized_fresnel_sin",
            Self::LambertW => "lambert_w",
        }
    }

    /// Evaluate on path `P`.
    ///
    /// The second component is the exponent of [`base2_mant_and_exp`] and
    /// zero for every other function.
    ///
    /// [`base2_mant_and_exp`]: crate::ops::base2_mant_and_exp
    pub fn evaluate<P: MathPath, T: Float>(self, x: T) -> (T, i32) {
        let value = match self {
            Self::Abs => P::abs(x),
            Self::Floor => P::floor(x),
            Self::Ceil => P::ceil(x),
            Self::Trunc => P::trunc(x),
            Self::FractionalPart => P::fractional_part(x),
            Self::Mod2 => P::mod_2(x),
            Self::Base2MantAndExp => return P::base2_mant_and_exp(x),
            Self::Sqrt => P::sqrt(x),
            Self::Cbrt => P::cbrt(x),
            Self::Exp => P::exp(x),
            Self::Log => P::log(x),
            Self::Cosh => P::cosh(x),
            Self::Sinpi => P::sinpi(x),
            Self::Cospi => P::cospi(x),
            Self::Sind => P::sind(x),
            Self::Cosd => P::cosd(x),
            Self::Arcsin => P::arcsin(x),
            Self::Arccos => P::arccos(x),
            Self::Arctan => P::arctan(x),
            Self::Erf => P::erf(x),
            Self::BesselI0 => P::bessel_i0(x),
            Self::BesselJ0 => P::bessel_j0(x),
            Self::FresnelCos => P::fresnel_cos(x),
            Self::FresnelSin => P::fresnel_sin(x),
            Self::NormalizedFresnelCos => P::normalized_fresnel_cos(x),
            Self::NormalizedFresnelSin => P::normalized_fresnel_sin(x),
            Self::LambertW => P::lambert_w(x),
        };
        (value, 0)
    }

    /// Sampling domain for storage type `T`.
    pub fn domain<T: Float>(self) -> Domain {
        let (min_exponent, max_exponent) = exponent_span::<T>();
        match self {
            Self::Sqrt | Self::Log => Domain::full::<T>(false),
            Self::Arcsin | Self::Arccos => Domain::interval::<T>(-1.0, 1.0),
            Self::Erf => Domain::interval::<T>(-20.0, 20.0),
            Self::Exp => {
                let lo = (min_exponent - 1) as f64 * LN_2;
                let hi = (max_exponent + 1) as f64 * LN_2;
                Domain::interval::<T>(lo, hi)
            }
            Self::Cosh => {
                let hi = (max_exponent + 2) as f64 * LN_2;
                Domain::interval::<T>(-hi, hi)
            }
            Self::BesselI0 => {
                let hi = (max_exponent + 16) as f64 * LN_2;
                Domain::interval::<T>(-hi, hi)
            }
            Self::LambertW => Domain {
                lo: -0.375,
                ..Domain::full::<T>(true)
            },
            _ => Domain::full::<T>(true),
        }
    }

    /// Binary exponents at which the dispatcher changes class or kernel.
    ///
    /// Storage types wider than their carrier also get the exponents where
    /// conversion into the carrier switches to a scaled value.
    pub fn boundary_exponents<T: Float>(self) -> Vec<i32> {
        let precision = T::Layout::PRECISION;
        let p = precision as i32;
        let thresholds = match self {
            Self::Exp => exp_thresholds(precision),
            Self::Arcsin => arcsin_thresholds(precision),
            Self::Arccos => arccos_thresholds(precision),
            Self::Arctan => arctan_thresholds(precision),
            Self::Erf => T::Carrier::ERF_THRESHOLDS,
            Self::Floor
            | Self::Ceil
            | Self::Trunc
            | Self::FractionalPart
            | Self::Mod2 => {
                let p = effective_precision::<T>() as i32;
                return with_carrier_edges::<T>(vec![-1, 0, 1, 2, p - 2, p - 1, p]);
            }
            Self::Abs | Self::Base2MantAndExp | Self::Sqrt | Self::Cbrt | Self::Log => {
                let (lo, hi) = exponent_span::<T>();
                let mut edges = vec![lo, T::Carrier::MIN_EXPONENT, -1, 0, 1, 2, hi];
                edges.retain(|&e| e >= lo);
                return with_carrier_edges::<T>(edges);
            }
            Self::Cosh | Self::BesselI0 => {
                let edges = vec![flat_exponent(precision), -1, 0, 1, 2, 3, 4, 5, 14, 15];
                return with_carrier_edges::<T>(edges);
            }
            Self::Sinpi | Self::Cospi | Self::Sind | Self::Cosd => {
                let edges = vec![flat_exponent(precision), -2, -1, 0, 1, 6, 7, 8, p - 1, p, p + 1];
                return with_carrier_edges::<T>(edges);
            }
            Self::BesselJ0 => {
                let edges = vec![flat_exponent(precision), 0, 1, 2, 5, 6, 2 * p + 12, 2 * p + 13];
                return with_carrier_edges::<T>(edges);
            }
            Self::FresnelCos
            | Self::FresnelSin
            | Self::NormalizedFresnelCos
            | Self::NormalizedFresnelSin => {
                let edges = vec![-(p / 4 + 1), -1, 0, 1, p + 1, p + 2];
                return with_carrier_edges::<T>(edges);
            }
            Self::LambertW => {
                let edges = vec![-(p + 4), -(p + 3), -2, -1, 0, 1, 2];
                return with_carrier_edges::<T>(edges);
            }
        };
        let mut edges = vec![
            thresholds.tiny,
            thresholds.small,
            thresholds.mid,
            thresholds.large,
        ];
        if self == Self::Arctan {
            edges.extend(thresholds.small..thresholds.mid);
        }
        edges.retain(|&e| e != i32::MAX);
        with_carrier_edges::<T>(edges)
    }
}

/// Add [`carrier_edges`], sorted and without repeats.
fn with_carrier_edges<T: Float>(mut edges: Vec<i32>) -> Vec<i32> {
    edges.extend(carrier_edges::<T>());
    edges.sort_unstable();
    edges.dedup();
    edges
}

impl fmt::Display for UnaryFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Two-argument functions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryFunction {
    /// Sign transfer
    Copysign,
    /// `sqrt(x^2 + y^2)`
    Hypot,
    /// Four-quadrant arctangent of `y/x`
    Arctan2,
}

impl BinaryFunction {
    /// Every two-argument function.
    pub const ALL: [BinaryFunction; 3] = [Self::Copysign, Self::Hypot, Self::Arctan2];

    /// Name of the function in the public API.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Copysign => "copysign",
            Self::Hypot => "hypot",
            Self::Arctan2 => "arctan2",
        }
    }

    /// Evaluate on path `P`. Arguments are in API order.
    pub fn evaluate<P: MathPath, T: Float>(self, a: T, b: T) -> T {
        match self {
            Self::Copysign => P::copysign(a, b),
            Self::Hypot => P::hypot(a, b),
            Self::Arctan2 => P::arctan2(a, b),
        }
    }

    /// Sampling domain of each argument.
    pub fn domain<T: Float>(self) -> Domain {
        Domain::full::<T>(true)
    }

    /// Binary exponents used for boundary arguments.
    pub fn boundary_exponents<T: Float>(self) -> Vec<i32> {
        let (lo, hi) = exponent_span::<T>();
        with_carrier_edges::<T>(vec![lo, -1, 0, 1, hi])
    }
}

impl fmt::Display for BinaryFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Three-argument functions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TernaryFunction {
    /// `sqrt(x^2 + y^2 + z^2)`
    Hypot3,
}

impl TernaryFunction {
    /// Every three-argument function.
    pub const ALL: [TernaryFunction; 1] = [Self::Hypot3];

    /// Name of the function in the public API.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hypot3 => "hypot3",
        }
    }

    /// Evaluate on path `P`.
    pub fn evaluate<P: MathPath, T: Float>(self, a: T, b: T, c: T) -> T {
        match self {
            Self::Hypot3 => P::hypot3(a, b, c),
        }
    }

    /// Sampling domain of each argument.
    pub fn domain<T: Float>(self) -> Domain {
        Domain::full::<T>(true)
    }

    /// Binary exponents used for boundary arguments.
    pub fn boundary_exponents<T: Float>(self) -> Vec<i32> {
        let (lo, hi) = exponent_span::<T>();
        with_carrier_edges::<T>(vec![lo, -1, 0, 1, hi])
    }
}

impl fmt::Display for TernaryFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::{DoubleDouble, Extended80, Quad128};
    use crate::runtime::{BitLayout, Portable};

    #[test]
    fn test_domains() {
        let d = UnaryFunction::Arccos.domain::<f64>();
        assert_eq!((d.lo, d.hi, d.max_exponent), (-1.0, 1.0, 0));
        assert_eq!(d.min_exponent, -1074);
        let s = UnaryFunction::Sqrt.domain::<f32>();
        assert_eq!(s.lo, 0.0);
        assert_eq!(s.hi, f32::MAX as f64);
        let q = UnaryFunction::Cbrt.domain::<Quad128>();
        assert_eq!(q.min_exponent, -16494);
        assert_eq!(q.max_exponent, 16383);
        assert!(q.contains(1e300) && q.hi.is_infinite());
        let e = UnaryFunction::Exp.domain::<f64>();
        assert!(e.lo < -745.0 && e.hi > 709.7 && e.contains(0.0));
        let c = UnaryFunction::Cosh.domain::<Extended80>();
        assert!(c.lo < -11356.0 && c.hi > 11356.0);
        let w = UnaryFunction::LambertW.domain::<f32>();
        assert_eq!((w.lo, w.hi), (-0.375, f32::MAX as f64));
    }

    #[test]
    fn test_boundary_exponents() {
        assert_eq!(
            UnaryFunction::Arctan.boundary_exponents::<f64>(),
            vec![-27, -3, -2, -1, 0, 1, 2, 3, 4]
        );
        assert_eq!(UnaryFunction::Arcsin.boundary_exponents::<f32>(), vec![-13, -3, -1, 0]);
        assert_eq!(UnaryFunction::Exp.boundary_exponents::<DoubleDouble>(), vec![-54]);
        assert_eq!(
            UnaryFunction::Floor.boundary_exponents::<f32>(),
            vec![-1, 0, 1, 2, 22, 23, 24]
        );
        assert_eq!(
            UnaryFunction::Sinpi.boundary_exponents::<f64>(),
            vec![-28, -2, -1, 0, 1, 6, 7, 8, 52, 53, 54]
        );
    }

    #[test]
    fn test_wide_storage_crosses_the_carrier_range() {
        let edges = UnaryFunction::Log.boundary_exponents::<Extended80>();
        for e in [-959, -958, 1021, 1022, 1023, 1024] {
            assert!(edges.contains(&e), "{e}");
        }
        assert_eq!(edges.first(), Some(&-16445));
        assert_eq!(edges.last(), Some(&16383));
        let edges = UnaryFunction::Sind.boundary_exponents::<Quad128>();
        assert!(edges.contains(&1024) && edges.windows(2).all(|w| w[0] < w[1]));
        assert!(!UnaryFunction::Sind.boundary_exponents::<f64>().contains(&1024));
    }

    #[test]
    fn test_evaluate_routes_to_path() {
        assert_eq!(UnaryFunction::Sqrt.evaluate::<BitLayout, f64>(9.0), (3.0, 0));
        assert_eq!(UnaryFunction::Base2MantAndExp.evaluate::<Portable, f64>(-6.0), (-1.5, 2));
        assert_eq!(BinaryFunction::Hypot.evaluate::<Portable, f32>(3.0, 4.0), 5.0);
        assert_eq!(BinaryFunction::Copysign.evaluate::<BitLayout, f64>(1.0, -2.0), -1.0);
        assert_eq!(UnaryFunction::Mod2.to_string(), "mod_2");
        assert_eq!(UnaryFunction::Cosd.evaluate::<BitLayout, f64>(180.0), (-1.0, 0));
        assert_eq!(UnaryFunction::Sinpi.evaluate::<Portable, f32>(0.5), (1.0, 0));
        assert_eq!(TernaryFunction::Hypot3.evaluate::<Portable, f64>(2.0, 3.0, 6.0), 7.0);
        assert_eq!(UnaryFunction::ALL.len(), 27);
    }
}
