//! Model inspection command
//!
//! Collects the count table, prior, and observation lookup table for display.

use crate::core::{DiceConfig, Observation, SumDomain};
use crate::model::DiceModel;

/// One line of the lookup table
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub sum: usize,
    pub count: u64,
    pub prior: f64,
    /// P(H|sum), P(E|sum), P(L|sum)
    pub observation: [f64; 3],
    /// ln of the above, `-inf` for zero
    pub log_observation: [f64; 3],
}

/// Everything `table` prints
pub struct ModelSummary {
    pub config: DiceConfig,
    pub domain: SumDomain,
    pub outcomes: u64,
    pub rows: Vec<TableRow>,
    /// Expected value of the sum under the prior
    pub mean: f64,
}

/// Gather the model's tables over the attainable domain
#[must_use]
pub fn summarize_model(model: &DiceModel) -> ModelSummary {
    let counts = model.counts();
    let prior = model.prior();
    let observations = model.observations();
    let log_observations = model.log_observations();

    let rows: Vec<TableRow> = model
        .domain()
        .sums()
        .map(|sum| TableRow {
            sum,
            count: counts.count(sum),
            prior: prior.probability(sum),
            observation: Observation::ALL.map(|symbol| observations.probability(symbol, sum)),
            log_observation: Observation::ALL
                .map(|symbol| log_observations.log_probability(symbol, sum)),
        })
        .collect();

    let mean = rows.iter().map(|row| row.sum as f64 * row.prior).sum();

    ModelSummary {
        config: *model.config(),
        domain: model.domain(),
        outcomes: counts.total(),
        rows,
        mean,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::build_model;

    #[test]
    fn summary_covers_domain() {
        let model = build_model(2, 6).unwrap();
        let summary = summarize_model(&model);

        assert_eq!(summary.rows.len(), 11);
        assert_eq!(summary.rows[0].sum, 2);
        assert_eq!(summary.rows[5].count, 6);
        assert_eq!(summary.outcomes, 36);
        assert!((summary.mean - 7.0).abs() < 1e-9);
    }

    #[test]
    fn rows_partition_probability() {
        let model = build_model(3, 4).unwrap();

        for row in summarize_model(&model).rows {
            let total: f64 = row.observation.iter().sum();
            assert!((total - 1.0).abs() < 1e-9, "sum {}", row.sum);
        }
    }

    #[test]
    fn extremes_have_infinite_log_tails() {
        let model = build_model(2, 6).unwrap();
        let summary = summarize_model(&model);

        let first = &summary.rows[0];
        let last = summary.rows.last().unwrap();
        assert_eq!(first.log_observation[2], f64::NEG_INFINITY);
        assert_eq!(last.log_observation[0], f64::NEG_INFINITY);
    }
}
