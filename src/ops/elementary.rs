//! Roots, exponential, logarithm and hyperbolic cosine.

unary_ops! {
    /// Square root. `sqrt(-0) = -0`; other negative arguments give NaN.
    sqrt;
    /// Cube root, odd in `x`.
    cbrt;
    /// `e^x`. Overflows to `+inf` and underflows to `+0`.
    exp;
    /// Natural logarithm. `log(±0) = -inf`; negative arguments give NaN.
    log;
    /// Hyperbolic cosine, even, overflowing to `+inf`.
    cosh;
}

binary_ops! {
    /// `sqrt(x^2 + y^2)` without intermediate overflow or underflow. An
    /// infinite argument gives `+inf` even when the other is NaN.
    hypot(x, y);
}

ternary_ops! {
    /// `sqrt(x^2 + y^2 + z^2)` with the special values of [`hypot`]. All
    /// zero arguments give `+0`.
    hypot3(x, y, z);
}
