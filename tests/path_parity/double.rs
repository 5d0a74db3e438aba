//! `f64` parity, including subnormal inputs and results

parity_tests!(f64, 1_000_000);
