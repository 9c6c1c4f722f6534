use alloc::vec;
use alloc::vec::Vec;

use crate::{floor, Error, Result};

/// Fixed-width buckets over `[0, 1)`. Bucket `i` covers `[i * size, (i + 1) * size)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    interval_size: f64,
    counts: Vec<u64>,
}

impl Histogram {
    /// Empty histogram sized for `interval_size`.
    ///
    /// Allocates `floor(1 / interval_size) + 1` buckets so a trailing partial
    /// interval still has a slot when `1 / interval_size` is not integral.
    pub fn new(interval_size: f64) -> Result<Self> {
        check_interval_size(interval_size)?;
        let num_bins = (floor(1.0 / interval_size) as usize)
            .checked_add(1)
            .ok_or(Error::InvalidIntervalSize(interval_size))?;
        Ok(Self {
            interval_size,
            counts: vec![0; num_bins],
        })
    }

    /// Empty histogram with an explicit number of buckets
    pub fn with_bins(interval_size: f64, num_bins: usize) -> Result<Self> {
        check_interval_size(interval_size)?;
        if num_bins == 0 {
            return Err(Error::NoBins);
        }
        Ok(Self {
            interval_size,
            counts: vec![0; num_bins],
        })
    }

    pub fn from_counts(interval_size: f64, counts: Vec<u64>) -> Result<Self> {
        check_interval_size(interval_size)?;
        if counts.is_empty() {
            return Err(Error::NoBins);
        }
        Ok(Self {
            interval_size,
            counts,
        })
    }

    /// Bucket every sample. Out-of-range values are dropped silently.
    pub fn build(samples: &[f64], interval_size: f64) -> Result<Self> {
        let mut histogram = Self::new(interval_size)?;
        histogram.extend(samples);
        Ok(histogram)
    }

    /// Count one value. Returns the bucket it landed in, or `None` when it
    /// falls outside every bucket (negative, too large or NaN).
    pub fn record(&mut self, value: f64) -> Option<usize> {
        let index = floor(value / self.interval_size);
        if index >= 0.0 && index < self.counts.len() as f64 {
            let index = index as usize;
            self.counts[index] += 1;
            Some(index)
        } else {
            None
        }
    }

    pub fn extend(&mut self, samples: &[f64]) {
        for &value in samples {
            self.record(value);
        }
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn num_bins(&self) -> usize {
        self.counts.len()
    }

    pub fn interval_size(&self) -> f64 {
        self.interval_size
    }

    /// Number of samples that landed in a bucket
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Start and end of bucket `index`
    pub fn bounds(&self, index: usize) -> (f64, f64) {
        let start = index as f64 * self.interval_size;
        (start, (index + 1) as f64 * self.interval_size)
    }
}

pub(crate) fn check_interval_size(interval_size: f64) -> Result<()> {
    if interval_size.is_finite() && interval_size > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidIntervalSize(interval_size))
    }
}
