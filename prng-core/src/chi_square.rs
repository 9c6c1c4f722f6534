//! Pearson chi-square goodness-of-fit test against a uniform distribution.

use alloc::vec::Vec;
use core::fmt;

#[cfg(feature = "std")]
use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::histogram::check_interval_size;
use crate::{Error, Histogram, Result};

/// `sum((observed - expected)^2 / expected)` over all buckets
pub fn chi_square_statistic(observed: &[u64], expected: f64) -> f64 {
    observed
        .iter()
        .map(|&count| {
            let diff = count as f64 - expected;
            diff * diff / expected
        })
        .sum()
}

/// Upper `significance` quantile of the chi-square distribution
#[cfg(feature = "std")]
pub fn critical_value(degrees_of_freedom: usize, significance: f64) -> Result<f64> {
    if !(significance > 0.0 && significance < 1.0) {
        return Err(Error::InvalidSignificance(significance));
    }
    if degrees_of_freedom == 0 {
        return Err(Error::NoDegreesOfFreedom);
    }
    let distribution =
        ChiSquared::new(degrees_of_freedom as f64).map_err(|_| Error::NoDegreesOfFreedom)?;
    Ok(distribution.inverse_cdf(1.0 - significance))
}

/// Uniformity test over `num_bins` equal-width buckets
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChiSquareTest {
    num_bins: usize,
    interval_size: f64,
    critical_value: f64,
}

impl ChiSquareTest {
    pub fn with_critical_value(
        num_bins: usize,
        interval_size: f64,
        critical_value: f64,
    ) -> Result<Self> {
        check_interval_size(interval_size)?;
        if num_bins == 0 {
            return Err(Error::NoBins);
        }
        if !(critical_value.is_finite() && critical_value > 0.0) {
            return Err(Error::InvalidCriticalValue(critical_value));
        }
        Ok(Self {
            num_bins,
            interval_size,
            critical_value,
        })
    }

    /// Derive the critical value from `significance` and `num_bins - 1`
    /// degrees of freedom.
    #[cfg(feature = "std")]
    pub fn with_significance(num_bins: usize, interval_size: f64, significance: f64) -> Result<Self> {
        check_interval_size(interval_size)?;
        if num_bins == 0 {
            return Err(Error::NoBins);
        }
        let critical_value = critical_value(num_bins - 1, significance)?;
        log::debug!(
            "critical value {:.4} for {} degrees of freedom at significance {}",
            critical_value,
            num_bins - 1,
            significance
        );
        Self::with_critical_value(num_bins, interval_size, critical_value)
    }

    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    pub fn interval_size(&self) -> f64 {
        self.interval_size
    }

    pub fn critical_value(&self) -> f64 {
        self.critical_value
    }

    pub fn degrees_of_freedom(&self) -> usize {
        self.num_bins - 1
    }

    /// Bucket `samples` and compare the counts with a flat expectation of
    /// `samples.len() / num_bins` per bucket.
    pub fn evaluate(&self, samples: &[f64]) -> Result<ChiSquareOutcome> {
        if samples.is_empty() {
            return Err(Error::EmptySample);
        }

        let mut observed = Histogram::with_bins(self.interval_size, self.num_bins)?;
        observed.extend(samples);

        let expected = samples.len() as f64 / self.num_bins as f64;
        let statistic = chi_square_statistic(observed.counts(), expected);

        Ok(ChiSquareOutcome {
            statistic,
            critical_value: self.critical_value,
            degrees_of_freedom: self.degrees_of_freedom(),
            expected,
            observed: observed.counts().to_vec(),
            p_value: p_value(statistic, self.degrees_of_freedom()),
            passed: statistic < self.critical_value,
        })
    }
}

#[cfg(feature = "std")]
fn p_value(statistic: f64, degrees_of_freedom: usize) -> Option<f64> {
    ChiSquared::new(degrees_of_freedom as f64)
        .ok()
        .map(|distribution| distribution.sf(statistic))
}

#[cfg(not(feature = "std"))]
fn p_value(_statistic: f64, _degrees_of_freedom: usize) -> Option<f64> {
    None
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChiSquareOutcome {
    pub statistic: f64,
    pub critical_value: f64,
    pub degrees_of_freedom: usize,
    /// Expected count per bucket
    pub expected: f64,
    pub observed: Vec<u64>,
    /// Survival function at `statistic`; unavailable without `std`
    pub p_value: Option<f64>,
    pub passed: bool,
}

impl fmt::Display for ChiSquareOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Chi-square test {} (chi-square = {:.4}, critical value = {:.4})",
            if self.passed { "passed" } else { "failed" },
            self.statistic,
            self.critical_value
        )
    }
}
