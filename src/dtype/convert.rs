//! Conversion between physical layouts.

use super::layout::FloatLayout;

/// Convert a value between two layouts with a single round-to-nearest-even.
///
/// NaNs keep their sign and become the target's canonical quiet NaN.
/// Values outside the target's range saturate to signed infinity or flush
/// through the subnormals to signed zero.
pub fn convert_layout<A: FloatLayout, B: FloatLayout>(value: A) -> B {
    let sign = value.sign();
    if value.is_nan() {
        return B::nan().with_sign(sign);
    }
    if value.is_infinite() {
        return B::infinity(sign);
    }
    if value.is_zero() {
        return B::zero(sign);
    }
    let (sig, exp2, sticky) = value.significand_with_sticky();
    B::from_significand(sign, sig, exp2, sticky)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::{Double, DoubleDouble, Extended80, Quad128, Single};

    #[test]
    fn test_double_to_single_rounds_once() {
        let x = Double::from_f64(1.0 + 2f64.powi(-24) + 2f64.powi(-40));
        let y: Single = convert_layout(x);
        assert_eq!(y.to_f32(), 1.0 + f32::EPSILON);
        let z: Single = convert_layout(Double::from_f64(1e300));
        assert!(z.is_infinite());
    }

    #[test]
    fn test_doubledouble_to_extended_keeps_low_word() {
        let x = DoubleDouble::new(1.0, 2f64.powi(-60));
        let e: Extended80 = convert_layout(x);
        assert_eq!(e.significand_word(), (1u64 << 63) | 8);
        let back: DoubleDouble = convert_layout(e);
        assert_eq!(back, x);
    }

    #[test]
    fn test_quad_rounds_into_doubledouble() {
        // 1 + 2^-110 fits the low word, so the round trip is exact
        let q = Quad128::from_parts(false, 16383, 1 << 2);
        let dd: DoubleDouble = convert_layout(q);
        assert_eq!(dd.hi, 1.0);
        assert_eq!(dd.lo, 2f64.powi(-110));
        let back: Quad128 = convert_layout(dd);
        assert_eq!(back, q);
    }

    #[test]
    fn test_special_values_cross_layouts() {
        let n: Quad128 = convert_layout(Single::from_f32(-f32::NAN));
        assert!(n.is_nan());
        assert!(n.sign());
        let z: Extended80 = convert_layout(Double::from_f64(-0.0));
        assert!(z.is_zero() && z.sign());
        let big = Extended80::from_parts(false, 16383 + 2000, 0);
        let inf: DoubleDouble = convert_layout(big);
        assert_eq!(inf.hi, f64::INFINITY);
    }
}
