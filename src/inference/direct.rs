//! Direct-probability posterior
//!
//! Multiplies linear observation probabilities. Simple, but the likelihood
//! product underflows to zero for long sequences; that case surfaces as
//! `InferenceError::Unobservable`.

use super::posterior::{Posterior, first_max_linear};
use crate::core::ObservationSequence;
use crate::error::InferenceError;
use crate::model::DiceModel;

/// Likelihood of `sequence` for every attainable sum, in domain order
///
/// `likelihood[r] = Π P(s_i | r)`
#[must_use]
pub fn likelihoods(model: &DiceModel, sequence: &ObservationSequence) -> Vec<f64> {
    let observations = model.observations();

    model
        .domain()
        .sums()
        .map(|sum| {
            sequence
                .iter()
                .fold(1.0, |acc, symbol| acc * observations.probability(symbol, sum))
        })
        .collect()
}

/// Posterior via Bayes' rule in linear space
///
/// # Errors
/// Returns `InferenceError::Unobservable` if the marginal is zero or not finite.
pub fn posterior(
    model: &DiceModel,
    sequence: &ObservationSequence,
) -> Result<Posterior, InferenceError> {
    let domain = model.domain();
    let prior = model.prior();

    let unnormalized: Vec<f64> = domain
        .sums()
        .zip(likelihoods(model, sequence))
        .map(|(sum, likelihood)| likelihood * prior.probability(sum))
        .collect();

    let marginal: f64 = unnormalized.iter().sum();
    if !marginal.is_finite() || marginal <= 0.0 {
        return Err(unobservable(sequence));
    }

    let probabilities: Vec<f64> = unnormalized.iter().map(|&u| u / marginal).collect();
    let offset = first_max_linear(&probabilities).ok_or_else(|| unobservable(sequence))?;

    Ok(Posterior::new(
        domain,
        probabilities,
        domain.lower() + offset,
        marginal.ln(),
    ))
}

fn unobservable(sequence: &ObservationSequence) -> InferenceError {
    InferenceError::Unobservable {
        sequence: sequence.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::build_model;

    fn seq(text: &str) -> ObservationSequence {
        ObservationSequence::parse(text).unwrap()
    }

    #[test]
    fn single_equal_on_one_die_stays_uniform() {
        let model = build_model(1, 6).unwrap();
        let posterior = posterior(&model, &seq("E")).unwrap();

        for (_, p) in posterior.iter() {
            assert!((p - 1.0 / 6.0).abs() < 1e-12);
        }
        assert_eq!(posterior.map_sum(), 1);
        assert!((posterior.log_evidence() - (1.0f64 / 6.0).ln()).abs() < 1e-12);
    }

    #[test]
    fn higher_favours_low_sums() {
        let model = build_model(1, 6).unwrap();
        let posterior = posterior(&model, &seq("H")).unwrap();

        // P(H|r) = (6 - r) / 6, so posterior ∝ 6 - r
        assert_eq!(posterior.map_sum(), 1);
        assert!((posterior.probability(1) - 5.0 / 15.0).abs() < 1e-12);
        assert!(posterior.probability(6).abs() < f64::EPSILON);
    }

    #[test]
    fn likelihood_is_product_of_columns() {
        let model = build_model(2, 6).unwrap();
        let values = likelihoods(&model, &seq("HL"));

        // r = 7: P(H) = 15/36, P(L) = 15/36
        let expected = (15.0 / 36.0) * (15.0 / 36.0);
        assert!((values[5] - expected).abs() < 1e-12);
    }

    #[test]
    fn impossible_sequence_is_unobservable() {
        // A single-faced die can never roll higher than itself
        let model = build_model(2, 1).unwrap();
        let err = posterior(&model, &seq("H")).unwrap_err();
        assert_eq!(
            err,
            InferenceError::Unobservable {
                sequence: "H".to_string()
            }
        );
    }

    #[test]
    fn long_sequences_underflow() {
        let model = build_model(2, 6).unwrap();
        let long = "E".repeat(2000);
        assert!(posterior(&model, &seq(&long)).is_err());
    }
}
