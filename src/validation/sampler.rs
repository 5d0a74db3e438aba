//! Input generation and chunked evaluation.
//!
//! Random inputs are drawn in fixed-size chunks, each from its own
//! [`StdRng`] seeded with the run seed and the chunk index. A run is
//! therefore reproducible whether the chunks execute sequentially or on
//! rayon's pool.

use super::config::SamplingConfig;
use super::functions::Domain;
use super::parity::Sample;
use super::ulp::{effective_precision, quantum_floor};
use crate::dtype::{Float, FloatLayout};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Random inputs per chunk.
pub const CHUNK_SIZE: usize = 1 << 14;

/// Generator of chunk `chunk` in a run seeded with `seed`.
pub fn chunk_rng(seed: u64, chunk: usize) -> StdRng {
    StdRng::seed_from_u64(seed ^ (chunk as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15))
}

/// Draw one input from `domain`.
///
/// Half of the draws are log-uniform in magnitude with a full-precision
/// random mantissa; the rest are uniform over `[lo, hi]` clamped to the
/// finite `f64` range and then rounded to `T`.
pub fn random_value<T: Float, R: Rng + ?Sized>(rng: &mut R, domain: &Domain) -> T {
    if rng.random_bool(0.5) {
        if let Some(x) = log_uniform(rng, domain) {
            return x;
        }
    }
    let lo = domain.lo.max(-f64::MAX);
    let hi = domain.hi.min(f64::MAX);
    let u: f64 = rng.random();
    let x = (lo * (1.0 - u) + hi * u).clamp(lo, hi);
    T::from_double(x)
}

fn log_uniform<T: Float, R: Rng + ?Sized>(rng: &mut R, domain: &Domain) -> Option<T> {
    let negative = match (domain.lo < 0.0, domain.hi > 0.0) {
        (true, true) => rng.random_bool(0.5),
        (true, false) => true,
        (false, true) => false,
        (false, false) => return None,
    };
    let p = effective_precision::<T>();
    let exponent = rng.random_range(domain.min_exponent..=domain.max_exponent);
    let bits: u128 = rng.random();
    let sig = (bits >> (128 - p)) | (1u128 << (p - 1));
    let layout = T::Layout::from_significand(negative, sig, exponent - (p as i32 - 1), false);
    let x = T::from_layout(layout);
    let limit = if negative { -domain.lo } else { domain.hi };
    (x.to_double().abs() <= limit).then_some(x)
}

/// `±2^k` and the nearest values on either side, for every `k` in
/// `exponents`, restricted to `domain`.
///
/// Neighbours are taken on the grid of [`effective_precision`] bits.
pub fn boundary_values<T: Float>(exponents: &[i32], domain: &Domain) -> Vec<T> {
    let p = effective_precision::<T>();
    let top = 1u128 << (p - 1);
    let mut values = Vec::with_capacity(exponents.len() * 6);
    for &k in exponents {
        let shift = k - (p as i32 - 1);
        for (sig, exp2) in [(top, shift), (top + 1, shift), ((top << 1) - 1, shift - 1)] {
            for negative in [false, true] {
                let layout = T::Layout::from_significand(negative, sig, exp2, false);
                let x = T::from_layout(layout);
                if domain.contains(x.to_double()) {
                    values.push(x);
                }
            }
        }
    }
    values
}

/// Signed zeros, infinities, a NaN and the smallest subnormals.
pub fn special_values<T: Float>() -> Vec<T> {
    let mut values = vec![
        T::from_layout(T::Layout::zero(false)),
        T::from_layout(T::Layout::zero(true)),
        T::from_layout(T::Layout::infinity(false)),
        T::from_layout(T::Layout::infinity(true)),
        T::from_layout(T::Layout::nan()),
    ];
    let floor = quantum_floor::<T>();
    for negative in [false, true] {
        values.push(T::from_layout(T::Layout::from_significand(
            negative, 1, floor, false,
        )));
    }
    values
}

/// Running statistics of one comparison.
#[derive(Clone, Debug)]
pub(crate) struct Tally<T> {
    pub samples: usize,
    pub sum: f64,
    pub worst: Option<Sample<T>>,
}

impl<T: Float> Tally<T> {
    pub fn new() -> Self {
        Self {
            samples: 0,
            sum: 0.0,
            worst: None,
        }
    }

    pub fn record(&mut self, sample: Sample<T>) {
        self.samples += 1;
        self.sum += sample.ulps;
        let replace = match &self.worst {
            Some(worst) => sample.ulps > worst.ulps,
            None => true,
        };
        if replace {
            self.worst = Some(sample);
        }
    }

    /// Combine two tallies; on equal distances the left worst sample wins.
    pub fn merge(mut self, other: Self) -> Self {
        self.samples += other.samples;
        self.sum += other.sum;
        if let Some(sample) = other.worst {
            let replace = match &self.worst {
                Some(worst) => sample.ulps > worst.ulps,
                None => true,
            };
            if replace {
                self.worst = Some(sample);
            }
        }
        self
    }

    pub fn max_ulps(&self) -> f64 {
        self.worst.as_ref().map_or(0.0, |s| s.ulps)
    }
}

/// Evaluate `boundary` and `config.samples` drawn inputs.
pub(crate) fn sweep<T, I, D, M>(
    name: &str,
    config: &SamplingConfig,
    boundary: &[I],
    draw: D,
    measure: M,
) -> Tally<T>
where
    T: Float,
    I: Copy + Send + Sync,
    D: Fn(&mut StdRng) -> I + Sync,
    M: Fn(I) -> Sample<T> + Sync,
{
    let mut tally = Tally::new();
    if config.include_boundaries {
        for &input in boundary {
            tally.record(measure(input));
        }
        log::debug!(
            "{name}: {} boundary inputs, max {} ULP",
            boundary.len(),
            tally.max_ulps()
        );
    }

    let chunks = config.samples.div_ceil(CHUNK_SIZE);
    let run_chunk = |chunk: usize| {
        let mut rng = chunk_rng(config.seed, chunk);
        let len = CHUNK_SIZE.min(config.samples - chunk * CHUNK_SIZE);
        let mut part = Tally::new();
        for _ in 0..len {
            part.record(measure(draw(&mut rng)));
        }
        log::debug!("{name}: chunk {chunk} ({len} inputs), max {} ULP", part.max_ulps());
        part
    };

    #[cfg(feature = "rayon")]
    let random = (0..chunks)
        .into_par_iter()
        .map(run_chunk)
        .reduce(Tally::new, Tally::merge);

    #[cfg(not(feature = "rayon"))]
    let random = (0..chunks).map(run_chunk).fold(Tally::new(), Tally::merge);

    tally.merge(random)
}
