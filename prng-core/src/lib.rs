#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod chi_square;
pub mod generator;
pub mod histogram;
pub mod render;

pub use chi_square::{chi_square_statistic, ChiSquareOutcome, ChiSquareTest};
#[cfg(feature = "std")]
pub use generator::LibraryGenerator;
pub use generator::{LcgGenerator, UniformGenerator};
pub use histogram::Histogram;
pub use render::{render_histogram, RenderOptions};

/// Sample count used when nothing else is configured
pub const DEFAULT_SAMPLE_COUNT: usize = 10_000;

/// Bucket width used when nothing else is configured
pub const DEFAULT_INTERVAL_SIZE: f64 = 0.1;

/// Significance level the critical value is derived from by default
pub const DEFAULT_SIGNIFICANCE: f64 = 0.05;

/// Longest bar the renderer draws by default
pub const DEFAULT_BAR_WIDTH: usize = 50;

/// Upper bound on the number of tested buckets a run may ask for
pub const MAX_BINS: usize = 1_000_000;

/// Errors raised by the bucketing and testing stages
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("interval size must be a positive finite number, got {0}")]
    InvalidIntervalSize(f64),
    #[error("at least one bin is required")]
    NoBins,
    #[error("cannot test an empty sample")]
    EmptySample,
    #[error("significance level must lie strictly between 0 and 1, got {0}")]
    InvalidSignificance(f64),
    #[error("at least two bins are needed to have a degree of freedom")]
    NoDegreesOfFreedom,
    #[error("critical value must be a positive finite number, got {0}")]
    InvalidCriticalValue(f64),
}

pub type Result<T> = core::result::Result<T, Error>;

pub(crate) fn floor(x: f64) -> f64 {
    #[cfg(feature = "std")]
    {
        x.floor()
    }
    #[cfg(not(feature = "std"))]
    {
        libm::floor(x)
    }
}

pub(crate) fn round(x: f64) -> f64 {
    #[cfg(feature = "std")]
    {
        x.round()
    }
    #[cfg(not(feature = "std"))]
    {
        libm::round(x)
    }
}
