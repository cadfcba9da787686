//! Prior distribution over the hidden sum

use super::CountTable;
use crate::core::SumDomain;

/// Probability of each sum before any observation, indexed by sum
#[derive(Debug, Clone, PartialEq)]
pub struct Prior {
    domain: SumDomain,
    probabilities: Vec<f64>,
    log_probabilities: Vec<f64>,
}

impl Prior {
    /// Normalize a count table by the total number of outcomes
    ///
    /// Zero-count sums get probability `0.0` and log-probability `-inf`.
    #[must_use]
    pub fn from_counts(counts: &CountTable) -> Self {
        let total = counts.total() as f64;

        let probabilities: Vec<f64> = counts
            .as_slice()
            .iter()
            .map(|&ways| ways as f64 / total)
            .collect();

        let log_probabilities = probabilities.iter().map(|&p| safe_ln(p)).collect();

        Self {
            domain: counts.domain(),
            probabilities,
            log_probabilities,
        }
    }

    #[must_use]
    pub const fn domain(&self) -> SumDomain {
        self.domain
    }

    /// Prior probability of `sum` (zero outside the table)
    #[must_use]
    pub fn probability(&self, sum: usize) -> f64 {
        self.probabilities.get(sum).copied().unwrap_or(0.0)
    }

    /// Natural log of the prior probability of `sum`
    #[must_use]
    pub fn log_probability(&self, sum: usize) -> f64 {
        self.log_probabilities
            .get(sum)
            .copied()
            .unwrap_or(f64::NEG_INFINITY)
    }

    #[must_use]
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    #[must_use]
    pub fn log_probabilities(&self) -> &[f64] {
        &self.log_probabilities
    }
}

/// Natural log mapping zero to negative infinity
#[inline]
pub(crate) fn safe_ln(p: f64) -> f64 {
    if p > 0.0 { p.ln() } else { f64::NEG_INFINITY }
}
