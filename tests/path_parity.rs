//! Parity between the bit-layout and portable paths
//!
//! Every function is sampled on at least one million random finite inputs
//! per storage type, plus every class-boundary value with its neighbours and
//! the special values. The rounding family must agree exactly; the other
//! functions within the default sampling bound.
//!
//! Run with `RUST_LOG=numr_libm=info` to see the per-function summaries.

mod common;

use numr_libm::dtype::Float;
use numr_libm::runtime::{BitLayout, Portable};
use numr_libm::validation::{
    BinaryFunction, SamplingConfig, TernaryFunction, UnaryFunction, compare_binary, compare_pow2,
    compare_ternary, compare_unary,
};

/// Functions whose paths must return identical values.
const EXACT: [UnaryFunction; 7] = [
    UnaryFunction::Abs,
    UnaryFunction::Floor,
    UnaryFunction::Ceil,
    UnaryFunction::Trunc,
    UnaryFunction::FractionalPart,
    UnaryFunction::Mod2,
    UnaryFunction::Base2MantAndExp,
];

fn config(samples: usize) -> SamplingConfig {
    common::init_logging();
    SamplingConfig::default().with_samples(samples)
}

fn check_unary<T: Float>(function: UnaryFunction, samples: usize) {
    let config = config(samples);
    let bound = if EXACT.contains(&function) {
        0.0
    } else {
        config.max_ulps
    };
    let report = compare_unary::<BitLayout, Portable, T>(function, &config).unwrap();
    assert!(report.samples >= samples);
    if let Err(e) = report.check(bound) {
        panic!("{e}");
    }
}

fn check_binary<T: Float>(function: BinaryFunction, samples: usize) {
    let config = config(samples);
    let bound = match function {
        BinaryFunction::Copysign => 0.0,
        _ => config.max_ulps,
    };
    let report = compare_binary::<BitLayout, Portable, T>(function, &config).unwrap();
    assert!(report.samples >= samples);
    if let Err(e) = report.check(bound) {
        panic!("{e}");
    }
}

fn check_ternary<T: Float>(function: TernaryFunction, samples: usize) {
    let config = config(samples);
    let report = compare_ternary::<BitLayout, Portable, T>(function, &config).unwrap();
    assert!(report.samples >= samples);
    if let Err(e) = report.check(config.max_ulps) {
        panic!("{e}");
    }
}

fn check_pow2<T: Float>() {
    common::init_logging();
    let report = compare_pow2::<BitLayout, Portable, T>();
    if let Err(e) = report.check(0.0) {
        panic!("{e}");
    }
}

/// One `#[test]` per function for a storage type.
macro_rules! parity_tests {
    ($t:ty, $samples:expr) => {
        parity_tests!(@unary $t, $samples;
            test_abs => Abs,
            test_floor => Floor,
            test_ceil => Ceil,
            test_trunc => Trunc,
            test_fractional_part => FractionalPart,
            test_mod_2 => Mod2,
            test_base2_mant_and_exp => Base2MantAndExp,
            test_sqrt => Sqrt,
            test_cbrt => Cbrt,
            test_exp => Exp,
            test_log => Log,
            test_cosh => Cosh,
            test_sinpi => Sinpi,
            test_cospi => Cospi,
            test_sind => Sind,
            test_cosd => Cosd,
            test_arcsin => Arcsin,
            test_arccos => Arccos,
            test_arctan => Arctan,
            test_erf => Erf,
            test_bessel_i0 => BesselI0,
            test_bessel_j0 => BesselJ0,
            test_fresnel_cos => FresnelCos,
            test_fresnel_sin => FresnelSin,
            test_normalized_fresnel_cos => NormalizedFresnelCos,
            test_normalized_fresnel_sin => NormalizedFresnelSin,
            test_lambert_w => LambertW,
        );
        parity_tests!(@binary $t, $samples;
            test_copysign => Copysign,
            test_hypot => Hypot,
            test_arctan2 => Arctan2,
        );

        #[test]
        fn test_hypot3() {
            crate::check_ternary::<$t>(
                numr_libm::validation::TernaryFunction::Hypot3,
                $samples,
            );
        }

        #[test]
        fn test_pow2_exhaustive() {
            crate::check_pow2::<$t>();
        }
    };
    (@unary $t:ty, $samples:expr; $($test:ident => $function:ident,)*) => {
        $(
            #[test]
            fn $test() {
                crate::check_unary::<$t>(
                    numr_libm::validation::UnaryFunction::$function,
                    $samples,
                );
            }
        )*
    };
    (@binary $t:ty, $samples:expr; $($test:ident => $function:ident,)*) => {
        $(
            #[test]
            fn $test() {
                crate::check_binary::<$t>(
                    numr_libm::validation::BinaryFunction::$function,
                    $samples,
                );
            }
        )*
    };
}

#[path = "path_parity/single.rs"]
mod single;

#[path = "path_parity/double.rs"]
mod double;

#[path = "path_parity/long_double.rs"]
mod long_double;
