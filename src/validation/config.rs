//! Sampling configuration.

use crate::error::{Error, Result};

/// Seed used when none is given.
pub const DEFAULT_SEED: u64 = 0x6e75_6d72_6c69_626d;

/// How many inputs to draw and how far results may drift apart.
///
/// ```
/// use numr_libm::validation::SamplingConfig;
///
/// let config = SamplingConfig::default().with_samples(10_000).with_seed(7);
/// assert!(config.validate().is_ok());
/// assert!(config.with_max_ulps(-1.0).validate().is_err());
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SamplingConfig {
    /// Number of random inputs, boundary inputs excluded
    pub samples: usize,
    /// Seed of the input generator
    pub seed: u64,
    /// Largest accepted distance in ULPs
    pub max_ulps: f64,
    /// Whether to also evaluate every class-boundary input and its neighbours
    pub include_boundaries: bool,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            samples: 1_000_000,
            seed: DEFAULT_SEED,
            max_ulps: 4.0,
            include_boundaries: true,
        }
    }
}

impl SamplingConfig {
    /// Set the number of random inputs
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Set the generator seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the accepted distance
    pub fn with_max_ulps(mut self, max_ulps: f64) -> Self {
        self.max_ulps = max_ulps;
        self
    }

    /// Enable or disable boundary inputs
    pub fn with_boundaries(mut self, include: bool) -> Self {
        self.include_boundaries = include;
        self
    }

    /// Check that the configuration can drive a run.
    pub fn validate(&self) -> Result<()> {
        if self.samples == 0 && !self.include_boundaries {
            return Err(Error::invalid_argument(
                "samples",
                "no random samples and boundaries disabled",
            ));
        }
        if !self.max_ulps.is_finite() || self.max_ulps < 0.0 {
            return Err(Error::invalid_argument(
                "max_ulps",
                format!("must be finite and non-negative, got {}", self.max_ulps),
            ));
        }
        Ok(())
    }
}
