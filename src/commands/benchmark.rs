//! Benchmark command
//!
//! Simulates hidden rolls and their observation sequences, then measures how
//! often each engine recovers the hidden sum and whether the engines agree.

use crate::core::{DiceConfig, Observation, ObservationSequence};
use crate::error::ObservationError;
use crate::inference::cross_validate;
use crate::model::DiceModel;
use anyhow::{Result, ensure};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::time::{Duration, Instant};
use tracing::info;

/// Configuration for a benchmark run
pub struct BenchmarkConfig {
    /// Number of simulated hidden rolls
    pub rounds: usize,
    /// Observations generated per hidden roll
    pub observations: usize,
    /// Base seed; each round uses `seed + round`
    pub seed: Option<u64>,
}

impl BenchmarkConfig {
    #[must_use]
    pub const fn new(rounds: usize, observations: usize) -> Self {
        Self {
            rounds,
            observations,
            seed: None,
        }
    }
}

/// Result of a benchmark run
pub struct BenchmarkResult {
    pub rounds: usize,
    pub observations: usize,
    pub seed: u64,
    /// Rounds where the log-domain MAP equals the hidden sum
    pub log_domain_correct: usize,
    /// Rounds where the direct MAP equals the hidden sum
    pub direct_correct: usize,
    /// Rounds where both engines produced the same MAP
    pub agreements: usize,
    /// Rounds where only the direct engine failed
    pub direct_underflows: usize,
    /// Rounds where the log-domain engine found the sequence unobservable
    pub unobservable: usize,
    /// |MAP - hidden sum| for the log-domain engine
    pub error_distribution: FxHashMap<usize, usize>,
    pub duration: Duration,
    pub rounds_per_second: f64,
}

impl BenchmarkResult {
    #[must_use]
    pub fn log_domain_accuracy(&self) -> f64 {
        ratio(self.log_domain_correct, self.rounds)
    }

    #[must_use]
    pub fn direct_accuracy(&self) -> f64 {
        ratio(self.direct_correct, self.rounds)
    }

    #[must_use]
    pub fn agreement_rate(&self) -> f64 {
        ratio(self.agreements, self.rounds)
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// Roll every die once and return the total
pub fn roll_sum<R: Rng + ?Sized>(rng: &mut R, config: &DiceConfig) -> usize {
    (0..config.num_dice())
        .map(|_| rng.random_range(1..=config.num_sides()))
        .sum()
}

/// Compare `len` fresh rolls against `hidden_sum`
///
/// # Errors
/// Returns `ObservationError::EmptySequence` if `len` is zero.
pub fn simulate_sequence<R: Rng + ?Sized>(
    rng: &mut R,
    config: &DiceConfig,
    hidden_sum: usize,
    len: usize,
) -> Result<ObservationSequence, ObservationError> {
    let symbols = (0..len)
        .map(|_| match roll_sum(rng, config).cmp(&hidden_sum) {
            std::cmp::Ordering::Greater => Observation::Higher,
            std::cmp::Ordering::Equal => Observation::Equal,
            std::cmp::Ordering::Less => Observation::Lower,
        })
        .collect();

    ObservationSequence::from_symbols(symbols)
}

struct RoundOutcome {
    log_domain_map: Option<usize>,
    direct_map: Option<usize>,
    hidden_sum: usize,
    agrees: bool,
    direct_underflowed: bool,
}

/// Run the benchmark against `model`
///
/// # Errors
///
/// Returns an error if `observations` is zero.
pub fn run_benchmark(model: &DiceModel, config: &BenchmarkConfig) -> Result<BenchmarkResult> {
    ensure!(
        config.observations > 0,
        "each round needs at least one observation"
    );

    let seed = config.seed.unwrap_or_else(|| rand::rng().random());
    info!(
        rounds = config.rounds,
        observations = config.observations,
        seed,
        dice = %model.config(),
        "starting benchmark"
    );

    let start = Instant::now();

    let outcomes: Vec<RoundOutcome> = (0..config.rounds)
        .into_par_iter()
        .map(|round| -> Result<RoundOutcome, ObservationError> {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(round as u64));
            let hidden_sum = roll_sum(&mut rng, model.config());
            let sequence =
                simulate_sequence(&mut rng, model.config(), hidden_sum, config.observations)?;
            let agreement = cross_validate(model, &sequence);

            Ok(RoundOutcome {
                log_domain_map: agreement.log_domain.as_ref().ok().map(|p| p.map_sum()),
                direct_map: agreement.direct.as_ref().ok().map(|p| p.map_sum()),
                hidden_sum,
                agrees: agreement.map_agrees(),
                direct_underflowed: agreement.direct_underflowed(),
            })
        })
        .collect::<Result<_, _>>()?;

    let duration = start.elapsed();

    let mut result = BenchmarkResult {
        rounds: config.rounds,
        observations: config.observations,
        seed,
        log_domain_correct: 0,
        direct_correct: 0,
        agreements: 0,
        direct_underflows: 0,
        unobservable: 0,
        error_distribution: FxHashMap::default(),
        duration,
        rounds_per_second: config.rounds as f64 / duration.as_secs_f64().max(f64::EPSILON),
    };

    for outcome in &outcomes {
        if outcome.agrees {
            result.agreements += 1;
        }
        if outcome.direct_underflowed {
            result.direct_underflows += 1;
        }
        if outcome.direct_map == Some(outcome.hidden_sum) {
            result.direct_correct += 1;
        }
        match outcome.log_domain_map {
            Some(map) => {
                if map == outcome.hidden_sum {
                    result.log_domain_correct += 1;
                }
                *result
                    .error_distribution
                    .entry(map.abs_diff(outcome.hidden_sum))
                    .or_insert(0) += 1;
            }
            None => result.unobservable += 1,
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::build_model;

    fn seeded(rounds: usize, observations: usize) -> BenchmarkConfig {
        let mut config = BenchmarkConfig::new(rounds, observations);
        config.seed = Some(42);
        config
    }

    #[test]
    fn rolls_stay_in_domain() {
        let dice = DiceConfig::new(3, 6).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..1000 {
            assert!(dice.domain().contains(roll_sum(&mut rng, &dice)));
        }
    }

    #[test]
    fn simulated_sequences_have_requested_length() {
        let dice = DiceConfig::new(2, 6).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let sequence = simulate_sequence(&mut rng, &dice, 7, 25).unwrap();
        assert_eq!(sequence.len(), 25);
        assert!(simulate_sequence(&mut rng, &dice, 7, 0).is_err());
    }

    #[test]
    fn extreme_hidden_sums_constrain_symbols() {
        let dice = DiceConfig::new(2, 6).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let at_min = simulate_sequence(&mut rng, &dice, 2, 50).unwrap();
        assert!(at_min.iter().all(|s| s != Observation::Lower));

        let at_max = simulate_sequence(&mut rng, &dice, 12, 50).unwrap();
        assert!(at_max.iter().all(|s| s != Observation::Higher));
    }

    #[test]
    fn benchmark_counts_are_consistent() {
        let model = build_model(2, 6).unwrap();
        let result = run_benchmark(&model, &seeded(200, 20)).unwrap();

        assert_eq!(result.rounds, 200);
        assert_eq!(result.seed, 42);
        assert!(result.log_domain_correct <= result.rounds);
        assert_eq!(result.unobservable, 0);

        let distribution_sum: usize = result.error_distribution.values().sum();
        assert_eq!(distribution_sum, result.rounds);
    }

    #[test]
    fn benchmark_is_reproducible_with_seed() {
        let model = build_model(2, 6).unwrap();
        let a = run_benchmark(&model, &seeded(50, 10)).unwrap();
        let b = run_benchmark(&model, &seeded(50, 10)).unwrap();

        assert_eq!(a.log_domain_correct, b.log_domain_correct);
        assert_eq!(a.direct_correct, b.direct_correct);
        assert_eq!(a.error_distribution, b.error_distribution);
    }

    #[test]
    fn engines_agree_on_short_simulations() {
        let model = build_model(2, 6).unwrap();
        let result = run_benchmark(&model, &seeded(100, 8)).unwrap();

        assert_eq!(result.agreements, result.rounds);
        assert_eq!(result.direct_underflows, 0);
        assert!((result.agreement_rate() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn long_simulations_underflow_direct_engine() {
        let model = build_model(2, 6).unwrap();
        let result = run_benchmark(&model, &seeded(20, 3000)).unwrap();

        // Hidden sums at the domain edges can keep the product representable
        assert!(result.direct_underflows > 0);
        assert!(result.direct_correct + result.direct_underflows <= result.rounds);
        assert!(result.log_domain_accuracy() > 0.5);
    }

    #[test]
    fn zero_observations_rejected() {
        let model = build_model(2, 6).unwrap();
        assert!(run_benchmark(&model, &seeded(10, 0)).is_err());
    }
}
