//! Sine and cosine in half-turns and in degrees.
//!
//! Arguments are reduced exactly, so integers, half-integers and multiples
//! of 90 degrees land on exact zeros and ones at every magnitude.

unary_ops! {
    /// `sin(pi x)`, odd. Integers give a zero with the sign of `x`;
    /// infinities give NaN.
    sinpi;
    /// `cos(pi x)`, even. Half-integers give `+0`; infinities give NaN.
    cospi;
    /// Sine of `x` degrees, odd.
    sind;
    /// Cosine of `x` degrees, even. Odd multiples of 90 give `+0`.
    cosd;
}
