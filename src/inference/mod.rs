//! Bayesian inference of the hidden sum
//!
//! Two interchangeable engines share one contract: given the immutable
//! `DiceModel` and an observation sequence, return the normalized posterior
//! over the domain and its MAP sum.

pub mod direct;
pub mod log_domain;
mod posterior;
pub mod strategy;

pub use posterior::{Posterior, TIE_TOLERANCE};
pub use strategy::{DirectStrategy, InferenceStrategy, LogDomainStrategy, StrategyType};

use crate::core::ObservationSequence;
use crate::error::{DiceError, InferenceError};
use crate::model::DiceModel;

/// Parse `sequence` and compute its posterior with the log-domain engine
///
/// # Errors
/// Returns `DiceError::Observation` for an empty or malformed sequence and
/// `DiceError::Inference` if the sequence is unobservable.
///
/// # Examples
/// ```
/// use dice_posterior::inference::infer;
/// use dice_posterior::model::build_model;
///
/// let model = build_model(1, 6).unwrap();
/// let posterior = infer(&model, "E").unwrap();
/// assert_eq!(posterior.map_sum(), 1);
///
/// assert!(infer(&model, "HEX").is_err());
/// ```
pub fn infer(model: &DiceModel, sequence: &str) -> Result<Posterior, DiceError> {
    let sequence = ObservationSequence::parse(sequence)?;
    Ok(LogDomainStrategy.infer(model, &sequence)?)
}

/// Outcome of running both engines on the same sequence
#[derive(Debug, Clone, PartialEq)]
pub struct Agreement {
    pub direct: Result<Posterior, InferenceError>,
    pub log_domain: Result<Posterior, InferenceError>,
}

impl Agreement {
    /// Both engines produced a posterior with the same MAP sum
    #[must_use]
    pub fn map_agrees(&self) -> bool {
        matches!(
            (&self.direct, &self.log_domain),
            (Ok(a), Ok(b)) if a.map_sum() == b.map_sum()
        )
    }

    /// Direct engine failed while log-domain succeeded (likelihood underflow)
    #[must_use]
    pub fn direct_underflowed(&self) -> bool {
        self.direct.is_err() && self.log_domain.is_ok()
    }

    /// Largest absolute probability difference, if both engines succeeded
    #[must_use]
    pub fn max_difference(&self) -> Option<f64> {
        let (Ok(direct), Ok(log_domain)) = (&self.direct, &self.log_domain) else {
            return None;
        };

        Some(
            direct
                .probabilities()
                .iter()
                .zip(log_domain.probabilities())
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f64::max),
        )
    }
}

/// Run both engines on `sequence` for cross-validation
#[must_use]
pub fn cross_validate(model: &DiceModel, sequence: &ObservationSequence) -> Agreement {
    Agreement {
        direct: DirectStrategy.infer(model, sequence),
        log_domain: LogDomainStrategy.infer(model, sequence),
    }
}
