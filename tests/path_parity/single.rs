//! `f32` parity, including subnormal inputs and results

parity_tests!(f32, 1_000_000);
