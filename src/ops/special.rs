//! Special functions.

unary_ops! {
    /// Error function `erf(x) = 2/sqrt(pi) ∫₀ˣ e^(-t²) dt`.
    ///
    /// Odd in `x`, with `erf(±inf) = ±1`. Arguments beyond the point where
    /// `erfc` drops below half an ulp of one return exactly `±1`.
    erf;
    /// Modified Bessel function `I0(x) = sum (x/2)^(2k) / (k!)^2`.
    ///
    /// Even, `I0(0) = 1` and `I0(±inf) = +inf`.
    bessel_i0;
    /// Bessel function `J0(x) = sum (-1)^k (x/2)^(2k) / (k!)^2`.
    ///
    /// Even, `J0(0) = 1` and `J0(±inf) = +0`.
    bessel_j0;
    /// Fresnel integral `∫₀ˣ cos(t²) dt`, odd, tending to `sqrt(pi/8)`.
    fresnel_cos;
    /// Fresnel integral `∫₀ˣ sin(t²) dt`, odd, tending to `sqrt(pi/8)`.
    fresnel_sin;
    /// Normalized Fresnel integral `∫₀ˣ cos(pi t²/2) dt`, tending to `1/2`.
    normalized_fresnel_cos;
    /// Normalized Fresnel integral `∫₀ˣ sin(pi t²/2) dt`, tending to `1/2`.
    normalized_fresnel_sin;
    /// Principal branch `W0(x)` of the Lambert W function, solving
    /// `W e^W = x` with `W >= -1`.
    ///
    /// `W(-1/e) = -1`; arguments below `-1/e` and `-inf` give NaN.
    lambert_w;
}
