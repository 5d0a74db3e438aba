//! Approximation building blocks shared by both evaluation paths
//!
//! Everything in this module is pure and carrier-generic: classification of an
//! argument's magnitude, polynomial and rational evaluation, the per-carrier
//! kernels with their coefficient tables, and the reduction tables that bring
//! arguments into a kernel's interval.
//!
//! # Layering
//!
//! ```text
//! runtime::{BitLayout, Portable}      (special cases, reduction, restoration)
//!        │
//!        ├── classify                 (argument -> MagnitudeClass)
//!        ├── tables                   (mantissa nodes, arctan buckets, 2^(j/64))
//!        ├── kernels                  (per-carrier approximations)
//!        │       └── polynomial       (Horner, rational, Padé)
//!        └── series                   (double-double Bessel, Fresnel, Lambert W)
//! ```
//!
//! Kernels never see special values and never rescale; that is the
//! dispatcher's job. A kernel is only ever called on its documented interval.

pub mod classify;
pub mod kernels;
pub mod polynomial;
pub mod series;
pub mod tables;

pub use classify::{MagnitudeClass, Thresholds};
pub use kernels::Kernels;
