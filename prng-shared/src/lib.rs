#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use alloc::vec::Vec;

use prng_core::ChiSquareOutcome;
use serde::{Deserialize, Serialize};

/// Slack allowed when checking that the interval size divides 1 evenly
const DIVISIBILITY_TOLERANCE: f64 = 1e-9;

/// Which generator produced a sample sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorKind {
    Lcg,
    Library,
}

impl GeneratorKind {
    /// Order in which generators are run and reported
    pub const ALL: [GeneratorKind; 2] = [GeneratorKind::Lcg, GeneratorKind::Library];

    pub fn label(&self) -> &'static str {
        match self {
            GeneratorKind::Lcg => "Linear congruential generator (multiplier 5^13, modulus 2^31):",
            GeneratorKind::Library => "Library generator (StdRng with uniform [0, 1) distribution):",
        }
    }
}

/// Parameters of one validation run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSettings {
    pub sample_count: usize,
    pub interval_size: f64,
    /// Significance level the critical value is derived from
    pub significance: f64,
    /// Explicit critical value, takes precedence over `significance`
    pub critical_value: Option<f64>,
    pub bar_width: usize,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            sample_count: prng_core::DEFAULT_SAMPLE_COUNT,
            interval_size: prng_core::DEFAULT_INTERVAL_SIZE,
            significance: prng_core::DEFAULT_SIGNIFICANCE,
            critical_value: None,
            bar_width: prng_core::DEFAULT_BAR_WIDTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingsError {
    #[error("sample count must be greater than zero")]
    ZeroSamples,
    #[error("interval size must lie in (0, 0.5], got {0}")]
    IntervalSize(f64),
    #[error("interval size {0} does not split [0, 1) into equal buckets")]
    UnevenInterval(f64),
    #[error("interval size {0} needs more than {max} buckets", max = prng_core::MAX_BINS)]
    TooManyBins(f64),
    #[error("significance level must lie strictly between 0 and 1, got {0}")]
    Significance(f64),
    #[error("critical value must be a positive finite number, got {0}")]
    CriticalValue(f64),
    #[error("bar width must be greater than zero")]
    ZeroBarWidth,
}

impl RunSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.sample_count == 0 {
            return Err(SettingsError::ZeroSamples);
        }
        if !(self.interval_size.is_finite() && self.interval_size > 0.0 && self.interval_size <= 0.5)
        {
            return Err(SettingsError::IntervalSize(self.interval_size));
        }
        let buckets = 1.0 / self.interval_size;
        if buckets > prng_core::MAX_BINS as f64 + 0.5 {
            return Err(SettingsError::TooManyBins(self.interval_size));
        }
        if libm::fabs(buckets - libm::round(buckets)) > DIVISIBILITY_TOLERANCE * buckets {
            return Err(SettingsError::UnevenInterval(self.interval_size));
        }
        if !(self.significance > 0.0 && self.significance < 1.0) {
            return Err(SettingsError::Significance(self.significance));
        }
        if let Some(critical_value) = self.critical_value {
            if !(critical_value.is_finite() && critical_value > 0.0) {
                return Err(SettingsError::CriticalValue(critical_value));
            }
        }
        if self.bar_width == 0 {
            return Err(SettingsError::ZeroBarWidth);
        }
        Ok(())
    }

    /// Number of equal-width buckets covering `[0, 1)`
    pub fn tested_bins(&self) -> usize {
        libm::round(1.0 / self.interval_size) as usize
    }
}

/// Result of validating one generator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratorReport {
    pub generator: GeneratorKind,
    /// Histogram counts, including the padding bucket past 1.0
    pub histogram: Vec<u64>,
    pub chi_square: f64,
    pub critical_value: f64,
    pub degrees_of_freedom: usize,
    pub expected_per_bin: f64,
    pub p_value: Option<f64>,
    pub passed: bool,
}

impl GeneratorReport {
    pub fn new(generator: GeneratorKind, histogram: &[u64], outcome: &ChiSquareOutcome) -> Self {
        Self {
            generator,
            histogram: histogram.to_vec(),
            chi_square: outcome.statistic,
            critical_value: outcome.critical_value,
            degrees_of_freedom: outcome.degrees_of_freedom,
            expected_per_bin: outcome.expected,
            p_value: outcome.p_value,
            passed: outcome.passed,
        }
    }
}

/// Everything a run produced, in report order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunReport {
    pub settings: RunSettings,
    pub lcg_seed: i32,
    pub library_seed: u64,
    pub generators: Vec<GeneratorReport>,
}

impl RunReport {
    #[cfg(feature = "std")]
    pub fn to_json(&self) -> Result<alloc::string::String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn all_passed(&self) -> bool {
        self.generators.iter().all(|report| report.passed)
    }
}
