//! Observation (emission) model
//!
//! For a hypothesized original sum `r`, a fresh roll of the same dice lands
//! higher, equal, or lower than `r`:
//! - P(H|r) = Σ prior[j] for j > r
//! - P(E|r) = prior[r]
//! - P(L|r) = Σ prior[j] for j < r
//!
//! The tables cover every `r` in `[0, upper]`, including unreachable sums
//! below the domain. Tails are computed from exact integer counts, so mirror
//! sums (e.g. 6 and 8 on 2d6) receive bit-identical probabilities.

use super::prior::safe_ln;
use super::{CountTable, Prior};
use crate::core::{Observation, SumDomain};

/// Linear-probability lookup table, indexed by symbol and reference sum
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationModel {
    domain: SumDomain,
    higher: Vec<f64>,
    equal: Vec<f64>,
    lower: Vec<f64>,
}

/// Log-probability lookup table; zero probabilities are stored as `-inf`
#[derive(Debug, Clone, PartialEq)]
pub struct LogObservationModel {
    domain: SumDomain,
    higher: Vec<f64>,
    equal: Vec<f64>,
    lower: Vec<f64>,
}

impl ObservationModel {
    #[must_use]
    pub fn from_counts(counts: &CountTable, prior: &Prior) -> Self {
        let total = counts.total() as f64;
        let len = counts.domain().table_len();

        let mut higher = Vec::with_capacity(len);
        let mut equal = Vec::with_capacity(len);
        let mut lower = Vec::with_capacity(len);

        let mut below = 0u64;
        for (sum, &ways) in counts.as_slice().iter().enumerate() {
            let above = counts.total() - below - ways;

            higher.push(above as f64 / total);
            equal.push(prior.probability(sum));
            lower.push(below as f64 / total);

            below += ways;
        }

        Self {
            domain: counts.domain(),
            higher,
            equal,
            lower,
        }
    }

    #[must_use]
    pub const fn domain(&self) -> SumDomain {
        self.domain
    }

    /// P(`symbol` | original sum = `sum`)
    #[inline]
    #[must_use]
    pub fn probability(&self, symbol: Observation, sum: usize) -> f64 {
        self.column(symbol)[sum]
    }

    /// The full sum-indexed column for one symbol
    #[must_use]
    pub fn column(&self, symbol: Observation) -> &[f64] {
        match symbol {
            Observation::Higher => &self.higher,
            Observation::Equal => &self.equal,
            Observation::Lower => &self.lower,
        }
    }
}

impl LogObservationModel {
    /// Take logs of the linear model, reusing the log prior for `E`
    #[must_use]
    pub fn from_linear(linear: &ObservationModel, prior: &Prior) -> Self {
        let log_column = |column: &[f64]| column.iter().map(|&p| safe_ln(p)).collect::<Vec<_>>();

        let equal = (0..linear.domain.table_len())
            .map(|sum| prior.log_probability(sum))
            .collect();

        Self {
            domain: linear.domain,
            higher: log_column(&linear.higher),
            equal,
            lower: log_column(&linear.lower),
        }
    }

    #[must_use]
    pub const fn domain(&self) -> SumDomain {
        self.domain
    }

    /// ln P(`symbol` | original sum = `sum`)
    #[inline]
    #[must_use]
    pub fn log_probability(&self, symbol: Observation, sum: usize) -> f64 {
        self.column(symbol)[sum]
    }

    #[must_use]
    pub fn column(&self, symbol: Observation) -> &[f64] {
        match symbol {
            Observation::Higher => &self.higher,
            Observation::Equal => &self.equal,
            Observation::Lower => &self.lower,
        }
    }
}
