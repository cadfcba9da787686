//! Log-domain posterior with max-subtraction before exponentiating
//!
//! Log-likelihoods are summed rather than multiplied, so long sequences keep
//! their relative ordering. Subtracting the maximum log-posterior before
//! `exp` keeps the largest term at exactly 1.0.

use super::posterior::{Posterior, first_max_log, max_log};
use crate::core::ObservationSequence;
use crate::error::InferenceError;
use crate::model::DiceModel;

/// Log-likelihood of `sequence` for every attainable sum, in domain order
#[must_use]
pub fn log_likelihoods(model: &DiceModel, sequence: &ObservationSequence) -> Vec<f64> {
    let log_observations = model.log_observations();

    model
        .domain()
        .sums()
        .map(|sum| {
            sequence
                .iter()
                .map(|symbol| log_observations.log_probability(symbol, sum))
                .sum::<f64>()
        })
        .collect()
}

/// Unnormalized log-posterior (`log_likelihood + log_prior`), in domain order
#[must_use]
pub fn log_posterior(model: &DiceModel, sequence: &ObservationSequence) -> Vec<f64> {
    let prior = model.prior();

    model
        .domain()
        .sums()
        .zip(log_likelihoods(model, sequence))
        .map(|(sum, log_likelihood)| log_likelihood + prior.log_probability(sum))
        .collect()
}

/// Posterior via Bayes' rule in log space
///
/// # Errors
/// Returns `InferenceError::Unobservable` if every log-posterior is `-inf`.
pub fn posterior(
    model: &DiceModel,
    sequence: &ObservationSequence,
) -> Result<Posterior, InferenceError> {
    let domain = model.domain();
    let log_values = log_posterior(model, sequence);

    let unobservable = || InferenceError::Unobservable {
        sequence: sequence.to_string(),
    };

    let max = max_log(&log_values).ok_or_else(unobservable)?;
    let offset = first_max_log(&log_values).ok_or_else(unobservable)?;

    let weights: Vec<f64> = log_values.iter().map(|&lp| (lp - max).exp()).collect();
    let total: f64 = weights.iter().sum();
    let probabilities = weights.iter().map(|&w| w / total).collect();

    Ok(Posterior::new(
        domain,
        probabilities,
        domain.lower() + offset,
        max + total.ln(),
    ))
}
