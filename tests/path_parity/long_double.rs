//! Parity for the long double layouts
//!
//! Double-double storage covers the carrier's whole range. Extended and
//! quadruple storage is sampled over the whole storage range: beyond the
//! double-double carrier's exponents the portable path carries the power of
//! two next to the carrier value, and the boundary values include the
//! exponents where that switch happens.

mod doubledouble {
    use numr_libm::dtype::DoubleDouble;

    parity_tests!(DoubleDouble, 1_000_000);
}

mod extended80 {
    use numr_libm::dtype::Extended80;

    parity_tests!(Extended80, 250_000);
}

mod quad128 {
    use numr_libm::dtype::Quad128;

    parity_tests!(Quad128, 250_000);
}
