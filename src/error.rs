//! Error types for numr-libm
//!
//! Numeric functions never fail: every input maps to a defined value (NaN,
//! a signed infinity or a saturation constant). Errors only arise at the
//! edges of the crate, when decoding byte images and when configuring or
//! evaluating sampled validation.

use crate::dtype::LayoutKind;
use thiserror::Error;

/// Result type alias using numr-libm's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur outside the numeric functions
#[derive(Error, Debug)]
pub enum Error {
    /// Byte image has the wrong length for its layout
    #[error("Invalid byte length for {layout}: expected {expected}, got {got}")]
    InvalidLength {
        /// Layout being decoded
        layout: LayoutKind,
        /// Encoded size of the layout
        expected: usize,
        /// Length of the supplied slice
        got: usize,
    },

    /// Invalid argument provided to a configuration
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Two evaluations disagreed by more than the configured bound
    #[error(
        "{function}: {lhs} and {rhs} differ by {ulps} ULP (bound {bound}) at input {input}"
    )]
    ParityViolation {
        /// Function under test
        function: &'static str,
        /// First evaluation
        lhs: &'static str,
        /// Second evaluation
        rhs: &'static str,
        /// Worst observed distance
        ulps: f64,
        /// Configured bound
        bound: f64,
        /// Input at which the worst distance was observed
        input: String,
    },
}

impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument(arg: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }
}
