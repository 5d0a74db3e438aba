//! Inverse trigonometric functions.

unary_ops! {
    /// Arcsine on `[-1, 1]`, odd; NaN outside the domain.
    arcsin;
    /// Arccosine on `[-1, 1]` with `arccos(1) = +0` and `arccos(-1) = pi`;
    /// NaN outside the domain.
    arccos;
    /// Arctangent, saturating to `±pi/2`.
    arctan;
}

binary_ops! {
    /// Angle of the point `(x, y)` in `[-pi, pi]`.
    ///
    /// Signed zeros select the quadrant: `arctan2(±0, -0) = ±pi` and
    /// `arctan2(±0, +0) = ±0`. Two infinite arguments give `±pi/4` or
    /// `±3pi/4`.
    arctan2(y, x);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    #[test]
    fn test_typed_wrappers_forward() {
        assert_eq!(arccos_f64(-1.0), PI);
        assert_eq!(arcsin_f32(1.0), std::f32::consts::FRAC_PI_2);
        assert_eq!(arctan_f64(f64::INFINITY), FRAC_PI_2);
        assert_eq!(arctan2_f64(1.0, 1.0), FRAC_PI_4);
        assert!(arccos_f32(1.5).is_nan());
    }
}
