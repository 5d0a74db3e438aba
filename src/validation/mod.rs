//! Sampled validation of the two evaluation paths.
//!
//! Error bounds in this crate are empirical. This module measures them: it
//! draws inputs for a function (log-uniform magnitudes, uniform values and
//! every class-boundary value with its neighbours), evaluates two paths or a
//! path and a reference, and reports the distance in ULPs.
//!
//! # Example
//!
//! ```
//! use numr_libm::runtime::{BitLayout, Portable};
//! use numr_libm::validation::{SamplingConfig, UnaryFunction, compare_unary};
//!
//! let config = SamplingConfig::default().with_samples(10_000);
//! let report = compare_unary::<BitLayout, Portable, f64>(UnaryFunction::Sqrt, &config)?;
//! report.check(config.max_ulps)?;
//! # Ok::<(), numr_libm::error::Error>(())
//! ```
//!
//! Summaries are logged at `info`, per-chunk progress at `debug` and bound
//! violations at `warn`.

mod config;
mod functions;
mod parity;
mod sampler;
mod ulp;

pub use config::{DEFAULT_SEED, SamplingConfig};
pub use functions::{BinaryFunction, Domain, TernaryFunction, UnaryFunction};
pub use parity::{
    Input, ParityReport, Sample, check_paths, compare_binary, compare_pow2, compare_ternary,
    compare_unary, compare_with_reference,
};
pub use sampler::{CHUNK_SIZE, boundary_values, chunk_rng, random_value, special_values};
pub use ulp::{effective_precision, quantum_floor, ulp_distance};
