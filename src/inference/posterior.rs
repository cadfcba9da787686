//! Posterior distribution and MAP extraction

use crate::core::SumDomain;

/// Relative tolerance under which two posterior values count as tied
///
/// Ties resolve to the smallest sum. Without a tolerance, the last-bit
/// rounding of a product or log-sum could decide between mirror sums that are
/// equally likely in exact arithmetic.
pub const TIE_TOLERANCE: f64 = 1e-9;

/// Normalized posterior over the attainable sums
#[derive(Debug, Clone, PartialEq)]
pub struct Posterior {
    domain: SumDomain,
    probabilities: Vec<f64>,
    map_sum: usize,
    log_evidence: f64,
}

impl Posterior {
    pub(crate) const fn new(
        domain: SumDomain,
        probabilities: Vec<f64>,
        map_sum: usize,
        log_evidence: f64,
    ) -> Self {
        Self {
            domain,
            probabilities,
            map_sum,
            log_evidence,
        }
    }

    #[must_use]
    pub const fn domain(&self) -> SumDomain {
        self.domain
    }

    /// Posterior probability of `sum` (zero outside the domain)
    #[must_use]
    pub fn probability(&self, sum: usize) -> f64 {
        self.domain
            .offset(sum)
            .map_or(0.0, |offset| self.probabilities[offset])
    }

    /// Probabilities for `domain.lower()..=domain.upper()`, in order
    #[must_use]
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// `(sum, probability)` pairs in ascending sum order
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.domain.sums().zip(self.probabilities.iter().copied())
    }

    /// Maximum-a-posteriori sum
    #[must_use]
    pub const fn map_sum(&self) -> usize {
        self.map_sum
    }

    #[must_use]
    pub fn map_probability(&self) -> f64 {
        self.probability(self.map_sum)
    }

    /// Natural log of the marginal probability of the observed sequence
    #[must_use]
    pub const fn log_evidence(&self) -> f64 {
        self.log_evidence
    }

    /// Sum of all probabilities (1.0 up to rounding)
    #[must_use]
    pub fn total(&self) -> f64 {
        self.probabilities.iter().sum()
    }
}

/// Index of the first value within `TIE_TOLERANCE` (relative) of the maximum
///
/// Returns `None` when no value is strictly positive.
pub(crate) fn first_max_linear(values: &[f64]) -> Option<usize> {
    let max = values.iter().copied().fold(0.0, f64::max);
    if max <= 0.0 {
        return None;
    }
    let threshold = max * (1.0 - TIE_TOLERANCE);
    values.iter().position(|&v| v >= threshold)
}

/// Index of the first log-value within `TIE_TOLERANCE` (absolute) of the maximum
///
/// Returns `None` when every value is `-inf` or NaN.
pub(crate) fn first_max_log(values: &[f64]) -> Option<usize> {
    let max = max_log(values)?;
    let threshold = max - TIE_TOLERANCE;
    values.iter().position(|&v| v >= threshold)
}

/// Largest finite-or-`+inf` value, ignoring NaN; `None` if all are `-inf`
pub(crate) fn max_log(values: &[f64]) -> Option<f64> {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (max > f64::NEG_INFINITY).then_some(max)
}
