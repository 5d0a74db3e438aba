//! Cores of the hyperbolic cosine, the three-argument hypotenuse and the
//! double-double special functions.
//!
//! The Bessel, Fresnel and Lambert W cores sum their series in
//! double-double whatever the storage type and round once. The square
//! roots and logarithms they need come from the calling path, so each path
//! stays self-contained.

use super::{Argument, Outcome, flat_exponent, odd};
use crate::algorithm::kernels::{ExpKernel, Kernels, SeriesKernel, Wide, sin_cos_half_turns};
use crate::algorithm::series::{
    E, FRAC_1_SQRT_2PI, PI_BY_6, RCPR_E, SQRT_2_BY_PI, SQRT_PI_BY_8, bessel_i0_asymptotic,
    bessel_i0_series, bessel_j0_hankel, bessel_j0_recurrence, bessel_j0_series, fresnel_fraction,
    fresnel_series, half_turns, lambert_w_halley, lambert_w_near_branch, lambert_w_newton,
    square_words,
};
use crate::dtype::{DoubleDouble, Real};
use crate::runtime::MathPath;

/// Round a double-double result into the storage carrier.
#[inline]
fn narrow_series<C: Kernels>(v: DoubleDouble) -> C {
    C::narrow(<Wide<C>>::from_series(v))
}

/// Argument at which the large-argument expansions of `I0` and `J0` reach
/// `2^-(precision + 6)`.
#[inline]
fn asymptotic_from(precision: u32) -> f64 {
    0.375 * precision as f64 + 2.0
}

/// `cosh(x)`, even.
///
/// `bias` is the storage layout's exponent bias, which places the overflow
/// bound at the storage type's range rather than the carrier's.
pub(in crate::runtime) fn cosh<C: Kernels>(
    x: Argument<C>,
    precision: u32,
    bias: i32,
) -> Outcome<C> {
    let s = match x {
        Argument::NaN => return Outcome::NaN,
        Argument::Infinite { .. } => return Outcome::Infinite { negative: false },
        Argument::Zero { .. } => return Outcome::one(),
        Argument::Finite(s) => s,
    };
    if s.exponent < flat_exponent(precision) {
        return Outcome::one();
    }
    if s.exponent >= 15 {
        return Outcome::Infinite { negative: false };
    }

    let a = s.magnitude().widen();
    let ln2 = <Wide<C>>::LN_2;
    if a > ln2 * <Wide<C>>::from_i32(bias + 2) {
        return Outcome::Infinite { negative: false };
    }
    if a > ln2 * <Wide<C>>::from_i32(precision as i32 / 2 + 2) {
        // e^-a is below the last bit of e^a
        let (y, n) = <Wide<C>>::exp_scaled(a);
        return Outcome::Scaled(C::narrow(y), n - 1);
    }
    let y = <Wide<C>>::exp_in_range(a);
    Outcome::value(C::narrow((y + <Wide<C>>::ONE / y) * <Wide<C>>::HALF))
}

/// `sqrt(sum x_i^2)` with every part scaled by the largest exponent. An
/// infinite part wins over NaN.
pub(in crate::runtime) fn hypot_parts<P: MathPath, C: Kernels>(
    parts: &[Argument<C>],
) -> Outcome<C> {
    if parts.iter().any(|p| matches!(p, Argument::Infinite { .. })) {
        return Outcome::Infinite { negative: false };
    }
    if parts.iter().any(|p| matches!(p, Argument::NaN)) {
        return Outcome::NaN;
    }
    let top = parts
        .iter()
        .filter_map(|p| match p {
            Argument::Finite(s) => Some(s.exponent),
            _ => None,
        })
        .max();
    let Some(top) = top else {
        return Outcome::Zero { negative: false };
    };

    let mut sum = <Wide<C>>::ZERO;
    for part in parts {
        if let Argument::Finite(s) = part {
            let v = s.mantissa.widen().mul_pow2(s.exponent - top);
            sum = sum + v * v;
        }
    }
    Outcome::Scaled(C::narrow(P::sqrt(sum)), top)
}

/// Modified Bessel function `I0(x)`, even.
pub(in crate::runtime) fn bessel_i0<P: MathPath, C: Kernels>(
    x: Argument<C>,
    precision: u32,
    bias: i32,
) -> Outcome<C> {
    let s = match x {
        Argument::NaN => return Outcome::NaN,
        Argument::Infinite { .. } => return Outcome::Infinite { negative: false },
        Argument::Zero { .. } => return Outcome::one(),
        Argument::Finite(s) => s,
    };
    if s.exponent < flat_exponent(precision) {
        return Outcome::one();
    }
    if s.exponent >= 15 {
        return Outcome::Infinite { negative: false };
    }

    let a = s.mantissa.widen().to_series().mul_pow2(s.exponent);
    if a > DoubleDouble::LN_2.mul_f64((bias + 16) as f64) {
        return Outcome::Infinite { negative: false };
    }
    if a.hi < asymptotic_from(precision) {
        return Outcome::value(narrow_series(bessel_i0_series(a, precision)));
    }
    // e^a / sqrt(2 pi a) sum u_k, with e^a kept as y 2^n
    let (y, n) = DoubleDouble::exp_scaled(a);
    let v = y * FRAC_1_SQRT_2PI * bessel_i0_asymptotic(a, precision) / P::sqrt(a);
    Outcome::Scaled(narrow_series(v), n)
}

/// Bessel function of the first kind `J0(x)`, even.
///
/// Beyond the Hankel bound the phase `x - pi/4` is reduced against `1/pi`
/// from the exact mantissa and exponent, and the amplitude `sqrt(2/(pi x))`
/// keeps half the exponent pending, so arguments past the carrier's range
/// are handled like any other.
pub(in crate::runtime) fn bessel_j0<P: MathPath, C: Kernels>(
    x: Argument<C>,
    precision: u32,
) -> Outcome<C> {
    let s = match x {
        Argument::NaN => return Outcome::NaN,
        Argument::Infinite { .. } => return Outcome::Zero { negative: false },
        Argument::Zero { .. } => return Outcome::one(),
        Argument::Finite(s) => s,
    };
    if s.exponent < flat_exponent(precision) {
        return Outcome::one();
    }

    let m = s.mantissa.widen().to_series();
    let e = s.exponent;
    if e < 6 {
        let a = m.mul_pow2(e);
        if a.hi <= 2.0 {
            return Outcome::value(narrow_series(bessel_j0_series(a, precision)));
        }
        if a.hi < asymptotic_from(precision) {
            return Outcome::value(narrow_series(bessel_j0_recurrence(a, precision)));
        }
    }

    let (p, q) = if e > 2 * precision as i32 + 12 {
        (DoubleDouble::ONE, DoubleDouble::ZERO)
    } else {
        bessel_j0_hankel(m.mul_pow2(e), precision)
    };
    let mut t = half_turns(&[m.hi, m.lo], e, true) - DoubleDouble::from_f64(0.25);
    if t < DoubleDouble::ZERO {
        t = t + DoubleDouble::TWO;
    }
    let (sin, cos) = sin_cos_half_turns(t);
    let amplitude = SQRT_2_BY_PI / P::sqrt(m.mul_pow2(e.rem_euclid(2)));
    let v = amplitude * (p * cos - q * sin);
    Outcome::Scaled(narrow_series(v), -e.div_euclid(2))
}

/// Which Fresnel integral to evaluate.
///
/// The plain integrals are `∫₀ˣ cos(t²) dt` and `∫₀ˣ sin(t²) dt`; the
/// normalized ones integrate `cos(pi t²/2)` and `sin(pi t²/2)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(in crate::runtime) enum FresnelKind {
    Cos,
    Sin,
    NormalizedCos,
    NormalizedSin,
}

impl FresnelKind {
    #[inline]
    fn normalized(self) -> bool {
        matches!(self, Self::NormalizedCos | Self::NormalizedSin)
    }

    #[inline]
    fn sine(self) -> bool {
        matches!(self, Self::Sin | Self::NormalizedSin)
    }

    /// Value at `+inf`
    #[inline]
    fn limit(self) -> DoubleDouble {
        if self.normalized() {
            DoubleDouble::HALF
        } else {
            SQRT_PI_BY_8
        }
    }
}

/// Fresnel integrals, odd.
///
/// Below `z = a x^2 = 3/2` the Maclaurin series converges quickly; above it
/// the complementary error function's continued fraction does. The phase
/// `z` of the continued fraction is reduced exactly from the square of the
/// mantissa, so large arguments keep their accuracy.
pub(in crate::runtime) fn fresnel<C: Kernels>(
    kind: FresnelKind,
    x: Argument<C>,
    precision: u32,
) -> Outcome<C> {
    let s = match x {
        Argument::NaN => return Outcome::NaN,
        Argument::Zero { .. } => return Outcome::Input,
        Argument::Infinite { negative } => {
            return Outcome::value(narrow_series(odd(kind.limit(), negative)));
        }
        Argument::Finite(s) => s,
    };
    let m = s.mantissa.widen().to_series();
    let e = s.exponent;

    if e < -((precision / 4) as i32 + 1) {
        if !kind.sine() {
            return Outcome::Input;
        }
        // S(x) = (a/3) x^3
        let third = if kind.normalized() {
            PI_BY_6
        } else {
            DoubleDouble::ONE / DoubleDouble::THREE
        };
        let v = m * m * m * third;
        return Outcome::Scaled(narrow_series(odd(v, s.negative)), 3 * e);
    }
    if e >= precision as i32 + 2 {
        return Outcome::value(narrow_series(odd(kind.limit(), s.negative)));
    }

    let a = m.mul_pow2(e);
    let z = if kind.normalized() {
        a * a * DoubleDouble::PI_BY_TWO
    } else {
        a * a
    };
    let (c, sn) = if z.hi < 1.5 {
        fresnel_series(a, z, precision)
    } else {
        // z / pi is x^2 / pi for the plain integrals and x^2 / 2 normalized
        let words = square_words(m);
        let t = if kind.normalized() {
            half_turns(&words, 2 * e - 1, false)
        } else {
            half_turns(&words, 2 * e, true)
        };
        fresnel_fraction(a, z, sin_cos_half_turns(t), kind.limit(), precision)
    };
    let v = if kind.sine() { sn } else { c };
    Outcome::value(narrow_series(odd(v, s.negative)))
}

/// Principal branch `W0(x)` of the Lambert W function.
///
/// `x + 1/e` is formed in the storage carrier first, so an argument that
/// rounds to `-1/e` there returns exactly `-1` and anything below gives
/// NaN. Near the branch point the iteration runs on `W + 1`, away from it
/// on `W` itself, and for `x >= 3` on `W + ln W = ln x`.
pub(in crate::runtime) fn lambert_w<P: MathPath, C: Kernels>(
    x: Argument<C>,
    precision: u32,
) -> Outcome<C> {
    let s = match x {
        Argument::NaN => return Outcome::NaN,
        Argument::Infinite { negative: true } => return Outcome::NaN,
        Argument::Infinite { negative: false } | Argument::Zero { .. } => return Outcome::Input,
        Argument::Finite(s) => s,
    };
    if s.exponent < -(precision as i32 + 3) {
        return Outcome::Input;
    }

    let m = s.mantissa.widen().to_series();
    let w = if s.negative {
        if s.exponent >= 0 {
            return Outcome::NaN;
        }
        let d = s.value() + narrow_series::<C>(RCPR_E);
        if d < C::ZERO {
            return Outcome::NaN;
        }
        if d == C::ZERO {
            return Outcome::value(-C::ONE);
        }
        let x = -m.mul_pow2(s.exponent);
        if x < DoubleDouble::from_f64(-0.25) {
            let ed = E * (x + RCPR_E);
            let p = P::sqrt(ed.mul_f64(2.0));
            lambert_w_near_branch(ed, p, precision) - DoubleDouble::ONE
        } else {
            lambert_w_halley(x, precision)
        }
    } else if s.exponent >= 2 || m.mul_pow2(s.exponent) >= DoubleDouble::THREE {
        let log_x = P::log(m) + DoubleDouble::LN_2.mul_f64(s.exponent as f64);
        lambert_w_newton(log_x, precision, P::log::<DoubleDouble>)
    } else {
        lambert_w_halley(m.mul_pow2(s.exponent), precision)
    };
    Outcome::value(narrow_series(w))
}
