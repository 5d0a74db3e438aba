//! Square root, cube root and hypotenuses from Padé seeds.

use super::super::Portable;
use super::super::dispatch::hypot_parts;
use super::{argument, mant_and_exp, settle, signed};
use crate::algorithm::kernels::Kernels;
use crate::dtype::{Float, Real};

/// A pending exponent `n` is split into `n mod 2` folded into the carrier
/// and `n div 2` applied to the root.
pub(crate) fn sqrt<T: Float>(x: T) -> T {
    let (c, n) = x.to_carrier_scaled();
    if c < T::Carrier::ZERO {
        return T::from_carrier(T::Carrier::NAN);
    }
    let root = sqrt_carrier(c.mul_pow2(n.rem_euclid(2)));
    T::from_carrier_scaled(root, n.div_euclid(2))
}

pub(crate) fn cbrt<T: Float>(x: T) -> T {
    let (c, n) = x.to_carrier_scaled();
    let root = cbrt_carrier(c.mul_pow2(n.rem_euclid(3)));
    T::from_carrier_scaled(root, n.div_euclid(3))
}

pub(crate) fn hypot<T: Float>(x: T, y: T) -> T {
    settle(x, hypot_parts::<Portable, _>(&[argument(x), argument(y)]))
}

pub(crate) fn hypot3<T: Float>(x: T, y: T, z: T) -> T {
    settle(x, hypot_parts::<Portable, _>(&[argument(x), argument(y), argument(z)]))
}

/// `sqrt(m 2^e)` as `sqrt(m) 2^(e/2)`, with an odd `e` folded into `m`
/// before the Newton step.
pub(super) fn sqrt_carrier<C: Kernels>(x: C) -> C {
    if x.is_nan() || x == C::ZERO {
        return x;
    }
    if x < C::ZERO {
        return C::NAN;
    }
    if x.is_infinite() {
        return x;
    }

    let (mut m, e) = mant_and_exp(x);
    let mut y = C::sqrt_pade(m);
    if e.rem_euclid(2) == 1 {
        y = y * C::SQRT_2;
        m = m * C::TWO;
    }
    C::sqrt_newton(y, m).mul_pow2(e.div_euclid(2))
}

fn cbrt_carrier<C: Kernels>(x: C) -> C {
    if !x.is_finite() || x == C::ZERO {
        return x;
    }

    let (mut m, e) = mant_and_exp(x.abs());
    let mut y = C::cbrt_pade(m);
    match e.rem_euclid(3) {
        1 => {
            y = y * C::CBRT_2;
            m = m * C::TWO;
        }
        2 => {
            y = y * C::CBRT_4;
            m = m * C::from_i32(4);
        }
        _ => {}
    }
    let root = C::cbrt_newton(y, m).mul_pow2(e.div_euclid(3));
    signed(root, x < C::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::{DoubleDouble, Extended80, FloatLayout, Quad128};

    #[test]
    fn test_sqrt() {
        for k in 1..200u32 {
            assert_eq!(sqrt((k * k) as f64), k as f64);
        }
        assert!(sqrt(-2.0f32).is_nan());
        let z = sqrt(-0.0f64);
        assert!(z == 0.0 && z.is_sign_negative());
        assert_eq!(sqrt(f64::INFINITY), f64::INFINITY);
        assert_eq!(sqrt(f64::from_bits(4)), 2f64.powi(-536));
        for &x in &[2.0f64, 3.0, 0.1, 1e300, 7e-310] {
            assert!((sqrt(x) - x.sqrt()).abs() <= x.sqrt() * f64::EPSILON, "x={x}");
        }
        let r = sqrt(DoubleDouble::from_f64(2.0));
        let d = r - DoubleDouble::new(1.414_213_562_373_095_1, -9.667_293_313_452_913e-17);
        assert!(d.hi.abs() < 1e-31);
    }

    #[test]
    fn test_cbrt() {
        assert_eq!(cbrt(27.0f64), 3.0);
        assert_eq!(cbrt(-8.0f32), -2.0);
        assert_eq!(cbrt(f64::NEG_INFINITY), f64::NEG_INFINITY);
        let z = cbrt(-0.0f32);
        assert!(z == 0.0 && z.is_sign_negative());
        for &x in &[2.0f64, -3.0, 0.1, 1e300, 7e-310] {
            assert!((cbrt(x) - x.cbrt()).abs() <= x.cbrt().abs() * 2.0 * f64::EPSILON, "x={x}");
        }
    }

    #[test]
    fn test_hypot() {
        assert_eq!(hypot(3.0f64, 4.0), 5.0);
        assert_eq!(hypot(-3.0f32, 4.0), 5.0);
        assert!((hypot(5.0f32, -12.0) - 13.0).abs() <= 13.0 * f32::EPSILON);
        assert_eq!(hypot(f64::INFINITY, f64::NAN), f64::INFINITY);
        assert!(hypot(1.0f64, f64::NAN).is_nan());
        assert_eq!(hypot(-0.0f64, 0.0), 0.0);
        assert_eq!(hypot(0.0f64, -7.5), 7.5);
        let big = hypot(3e300f64, 4e300);
        assert!((big - 5e300).abs() <= 5e300 * 2.0 * f64::EPSILON);
    }

    #[test]
    fn test_hypot3() {
        assert_eq!(hypot3(2.0f64, -3.0, 6.0), 7.0);
        assert_eq!(hypot3(f32::NAN, f32::INFINITY, 1.0), f32::INFINITY);
        assert!(hypot3(1.0f64, 2.0, f64::NAN).is_nan());
        let z = hypot3(-0.0f64, 0.0, -0.0);
        assert!(z == 0.0 && z.is_sign_positive());
    }

    #[test]
    fn test_roots_beyond_the_carrier() {
        let x = Extended80::from_parts(false, 16383 + 2001, 0);
        let r = sqrt(x);
        assert_eq!(r.unbiased_exponent(), 1000);
        assert_eq!(r.scale_exponent(-1000).to_double(), std::f64::consts::SQRT_2);
        assert!(sqrt(Extended80::from_parts(true, 16383 + 2001, 0)).is_nan());
        let q = Quad128::from_parts(true, 16383 - 3000, 0);
        assert_eq!(cbrt(q), Quad128::from_parts(true, 16383 - 1000, 0));
        let h = hypot(x, x);
        assert_eq!(h.unbiased_exponent(), 2001);
    }
}
