//! Sampled comparison of two evaluations.

use super::config::SamplingConfig;
use super::functions::{BinaryFunction, TernaryFunction, UnaryFunction};
use super::sampler::{Tally, boundary_values, random_value, special_values, sweep};
use super::ulp::{quantum_floor, ulp_distance};
use crate::dtype::{Float, FloatLayout, LayoutKind};
use crate::error::{Error, Result};
use crate::runtime::{BitLayout, MathPath, Portable};
use std::fmt;

/// Arguments of one evaluation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Input<T> {
    /// One argument
    Unary(T),
    /// Two arguments in API order
    Binary(T, T),
    /// Three arguments in API order
    Ternary(T, T, T),
    /// Exponent passed to `pow2`
    Integer(i32),
}

impl<T: fmt::Debug> fmt::Display for Input<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unary(x) => write!(f, "{x:?}"),
            Self::Binary(a, b) => write!(f, "({a:?}, {b:?})"),
            Self::Ternary(a, b, c) => write!(f, "({a:?}, {b:?}, {c:?})"),
            Self::Integer(n) => write!(f, "{n}"),
        }
    }
}

/// One compared evaluation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sample<T> {
    /// Arguments
    pub input: Input<T>,
    /// Result of the first evaluation
    pub lhs: T,
    /// Result of the second evaluation
    pub rhs: T,
    /// Distance between the results in ULPs
    pub ulps: f64,
}

impl<T: fmt::Debug> fmt::Display for Sample<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {:?} vs {:?} ({} ULP)",
            self.input, self.lhs, self.rhs, self.ulps
        )
    }
}

/// Outcome of comparing two evaluations of one function.
#[derive(Clone, Debug)]
pub struct ParityReport<T> {
    /// Function name
    pub function: &'static str,
    /// Name of the first evaluation
    pub lhs: &'static str,
    /// Name of the second evaluation
    pub rhs: &'static str,
    /// Storage layout
    pub layout: LayoutKind,
    /// Number of evaluated inputs
    pub samples: usize,
    /// Largest observed distance in ULPs
    pub max_ulps: f64,
    /// Mean distance in ULPs
    pub mean_ulps: f64,
    /// Input with the largest distance
    pub worst: Option<Sample<T>>,
}

impl<T: Float> ParityReport<T> {
    fn from_tally(
        function: &'static str,
        lhs: &'static str,
        rhs: &'static str,
        tally: Tally<T>,
    ) -> Self {
        let max_ulps = tally.max_ulps();
        let mean_ulps = if tally.samples == 0 {
            0.0
        } else {
            tally.sum / tally.samples as f64
        };
        let report = Self {
            function,
            lhs,
            rhs,
            layout: T::Layout::KIND,
            samples: tally.samples,
            max_ulps,
            mean_ulps,
            worst: tally.worst,
        };
        log::info!("{report}");
        report
    }

    /// Whether the largest distance is at most `bound`.
    pub fn is_within(&self, bound: f64) -> bool {
        self.max_ulps <= bound
    }

    /// Fail with [`Error::ParityViolation`] when the largest distance
    /// exceeds `bound`.
    pub fn check(&self, bound: f64) -> Result<()> {
        if self.is_within(bound) {
            return Ok(());
        }
        let input = self
            .worst
            .as_ref()
            .map_or_else(String::new, |s| s.input.to_string());
        log::warn!("{self} exceeds {bound} ULP");
        Err(Error::ParityViolation {
            function: self.function,
            lhs: self.lhs,
            rhs: self.rhs,
            ulps: self.max_ulps,
            bound,
            input,
        })
    }
}

impl<T: Float> fmt::Display for ParityReport<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {} vs {}: {} inputs, max {} ULP, mean {:.3e} ULP",
            self.function,
            self.layout,
            self.lhs,
            self.rhs,
            self.samples,
            self.max_ulps,
            self.mean_ulps
        )?;
        if let Some(worst) = &self.worst {
            if worst.ulps > 0.0 {
                write!(f, ", worst {worst}")?;
            }
        }
        Ok(())
    }
}

fn unary_inputs<T: Float>(function: UnaryFunction) -> Vec<T> {
    let domain = function.domain::<T>();
    let mut inputs = special_values::<T>();
    inputs.extend(boundary_values::<T>(
        &function.boundary_exponents::<T>(),
        &domain,
    ));
    inputs
}

fn binary_inputs<T: Float>(function: BinaryFunction) -> Vec<(T, T)> {
    let domain = function.domain::<T>();
    let mut values = special_values::<T>();
    values.extend(boundary_values::<T>(
        &function.boundary_exponents::<T>(),
        &domain,
    ));
    values
        .iter()
        .flat_map(|&a| values.iter().map(move |&b| (a, b)))
        .collect()
}

/// Every pair of special and boundary values, with the third argument
/// cycling through the same list.
fn ternary_inputs<T: Float>(function: TernaryFunction) -> Vec<(T, T, T)> {
    let domain = function.domain::<T>();
    let mut values = special_values::<T>();
    values.extend(boundary_values::<T>(
        &function.boundary_exponents::<T>(),
        &domain,
    ));
    let n = values.len();
    let mut inputs = Vec::with_capacity(n * n);
    for (i, &a) in values.iter().enumerate() {
        for (j, &b) in values.iter().enumerate() {
            inputs.push((a, b, values[(i + j) % n]));
        }
    }
    inputs
}

/// Compare paths `P` and `Q` on one function of one argument.
///
/// For [`UnaryFunction::Base2MantAndExp`] differing exponents count as an
/// infinite distance.
pub fn compare_unary<P: MathPath, Q: MathPath, T: Float>(
    function: UnaryFunction,
    config: &SamplingConfig,
) -> Result<ParityReport<T>> {
    config.validate()?;
    let domain = function.domain::<T>();
    let tally = sweep(
        function.name(),
        config,
        &unary_inputs::<T>(function),
        |rng| random_value::<T, _>(rng, &domain),
        |x| {
            let (lhs, lhs_exp) = function.evaluate::<P, T>(x);
            let (rhs, rhs_exp) = function.evaluate::<Q, T>(x);
            let ulps = if lhs_exp == rhs_exp {
                ulp_distance(lhs, rhs)
            } else {
                f64::INFINITY
            };
            Sample {
                input: Input::Unary(x),
                lhs,
                rhs,
                ulps,
            }
        },
    );
    Ok(ParityReport::from_tally(function.name(), P::NAME, Q::NAME, tally))
}

/// Compare paths `P` and `Q` on one function of two arguments.
pub fn compare_binary<P: MathPath, Q: MathPath, T: Float>(
    function: BinaryFunction,
    config: &SamplingConfig,
) -> Result<ParityReport<T>> {
    config.validate()?;
    let domain = function.domain::<T>();
    let tally = sweep(
        function.name(),
        config,
        &binary_inputs::<T>(function),
        |rng| {
            let a = random_value::<T, _>(rng, &domain);
            let b = random_value::<T, _>(rng, &domain);
            (a, b)
        },
        |(a, b)| {
            let lhs = function.evaluate::<P, T>(a, b);
            let rhs = function.evaluate::<Q, T>(a, b);
            Sample {
                input: Input::Binary(a, b),
                lhs,
                rhs,
                ulps: ulp_distance(lhs, rhs),
            }
        },
    );
    Ok(ParityReport::from_tally(function.name(), P::NAME, Q::NAME, tally))
}

/// Compare paths `P` and `Q` on one function of three arguments.
pub fn compare_ternary<P: MathPath, Q: MathPath, T: Float>(
    function: TernaryFunction,
    config: &SamplingConfig,
) -> Result<ParityReport<T>> {
    config.validate()?;
    let domain = function.domain::<T>();
    let tally = sweep(
        function.name(),
        config,
        &ternary_inputs::<T>(function),
        |rng| {
            let a = random_value::<T, _>(rng, &domain);
            let b = random_value::<T, _>(rng, &domain);
            let c = random_value::<T, _>(rng, &domain);
            (a, b, c)
        },
        |(a, b, c)| {
            let lhs = function.evaluate::<P, T>(a, b, c);
            let rhs = function.evaluate::<Q, T>(a, b, c);
            Sample {
                input: Input::Ternary(a, b, c),
                lhs,
                rhs,
                ulps: ulp_distance(lhs, rhs),
            }
        },
    );
    Ok(ParityReport::from_tally(function.name(), P::NAME, Q::NAME, tally))
}

/// Compare `pow2` on paths `P` and `Q` for every exponent of a finite
/// power of two in the storage type.
pub fn compare_pow2<P: MathPath, Q: MathPath, T: Float>() -> ParityReport<T> {
    let top = T::Layout::BIAS;
    let mut tally = Tally::new();
    for n in quantum_floor::<T>()..=top {
        let lhs = P::pow2::<T>(n);
        let rhs = Q::pow2::<T>(n);
        tally.record(Sample {
            input: Input::Integer(n),
            lhs,
            rhs,
            ulps: ulp_distance(lhs, rhs),
        });
    }
    ParityReport::from_tally("pow2", P::NAME, Q::NAME, tally)
}

/// Compare path `P` against an `f64` reference on one function of one
/// argument.
///
/// The reference sees each input rounded to `f64` and its result is rounded
/// back to `T`, so only storage types no wider than `f64` get a meaningful
/// comparison. The exponent of [`UnaryFunction::Base2MantAndExp`] is not
/// compared.
pub fn compare_with_reference<P, T, F>(
    function: UnaryFunction,
    reference: F,
    config: &SamplingConfig,
) -> Result<ParityReport<T>>
where
    P: MathPath,
    T: Float,
    F: Fn(f64) -> f64 + Sync,
{
    config.validate()?;
    let domain = function.domain::<T>();
    let tally = sweep(
        function.name(),
        config,
        &unary_inputs::<T>(function),
        |rng| random_value::<T, _>(rng, &domain),
        |x| {
            let (lhs, _) = function.evaluate::<P, T>(x);
            let rhs = T::from_double(reference(x.to_double()));
            Sample {
                input: Input::Unary(x),
                lhs,
                rhs,
                ulps: ulp_distance(lhs, rhs),
            }
        },
    );
    Ok(ParityReport::from_tally(function.name(), P::NAME, "reference", tally))
}

/// Compare the bit-layout and portable paths on every function for storage
/// type `T`.
///
/// Returns one report per function; call [`ParityReport::check`] on each
/// to enforce `config.max_ulps`.
pub fn check_paths<T: Float>(config: &SamplingConfig) -> Result<Vec<ParityReport<T>>> {
    config.validate()?;
    let mut reports = Vec::with_capacity(
        UnaryFunction::ALL.len() + BinaryFunction::ALL.len() + TernaryFunction::ALL.len() + 1,
    );
    for function in UnaryFunction::ALL {
        reports.push(compare_unary::<BitLayout, Portable, T>(function, config)?);
    }
    for function in BinaryFunction::ALL {
        reports.push(compare_binary::<BitLayout, Portable, T>(function, config)?);
    }
    for function in TernaryFunction::ALL {
        reports.push(compare_ternary::<BitLayout, Portable, T>(function, config)?);
    }
    reports.push(compare_pow2::<BitLayout, Portable, T>());
    Ok(reports)
}
