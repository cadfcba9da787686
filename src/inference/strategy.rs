//! Inference strategies
//!
//! Defines the `InferenceStrategy` trait and the two concrete engines.

use super::Posterior;
use crate::core::ObservationSequence;
use crate::error::InferenceError;
use crate::model::DiceModel;

/// A way of turning an observation sequence into a posterior
pub trait InferenceStrategy {
    /// Short name used in logs and reports
    fn name(&self) -> &'static str;

    /// Compute the normalized posterior and MAP sum for `sequence`
    ///
    /// # Errors
    /// Returns `InferenceError::Unobservable` if the sequence has zero
    /// probability under every sum (or, for the direct engine, underflows).
    fn infer(
        &self,
        model: &DiceModel,
        sequence: &ObservationSequence,
    ) -> Result<Posterior, InferenceError>;
}

/// Enum wrapper for all strategy types
///
/// Allows runtime selection of strategy while maintaining static dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyType {
    /// Multiply linear probabilities
    Direct(DirectStrategy),
    /// Sum log probabilities (default, underflow-safe)
    LogDomain(LogDomainStrategy),
}

impl InferenceStrategy for StrategyType {
    fn name(&self) -> &'static str {
        match self {
            Self::Direct(s) => s.name(),
            Self::LogDomain(s) => s.name(),
        }
    }

    fn infer(
        &self,
        model: &DiceModel,
        sequence: &ObservationSequence,
    ) -> Result<Posterior, InferenceError> {
        match self {
            Self::Direct(s) => s.infer(model, sequence),
            Self::LogDomain(s) => s.infer(model, sequence),
        }
    }
}

impl StrategyType {
    /// Create strategy from name string
    ///
    /// Supported names: "direct", "linear", "log", "log-domain".
    /// Defaults to log-domain if name is unrecognized.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "direct" | "linear" => Self::Direct(DirectStrategy),
            _ => Self::LogDomain(LogDomainStrategy),
        }
    }

    /// The strategy this one is cross-checked against
    #[must_use]
    pub const fn counterpart(self) -> Self {
        match self {
            Self::Direct(_) => Self::LogDomain(LogDomainStrategy),
            Self::LogDomain(_) => Self::Direct(DirectStrategy),
        }
    }
}

impl Default for StrategyType {
    fn default() -> Self {
        Self::LogDomain(LogDomainStrategy)
    }
}

/// Direct-probability engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectStrategy;

impl InferenceStrategy for DirectStrategy {
    fn name(&self) -> &'static str {
        "direct"
    }

    fn infer(
        &self,
        model: &DiceModel,
        sequence: &ObservationSequence,
    ) -> Result<Posterior, InferenceError> {
        super::direct::posterior(model, sequence)
    }
}

/// Log-domain engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogDomainStrategy;

impl InferenceStrategy for LogDomainStrategy {
    fn name(&self) -> &'static str {
        "log-domain"
    }

    fn infer(
        &self,
        model: &DiceModel,
        sequence: &ObservationSequence,
    ) -> Result<Posterior, InferenceError> {
        super::log_domain::posterior(model, sequence)
    }
}
