//! Single-sequence query command
//!
//! Computes the posterior for one observation sequence, optionally checking it
//! against the other engine.

use crate::core::{ObservationSequence, SymbolCounts};
use crate::error::DiceError;
use crate::inference::{Agreement, InferenceStrategy, Posterior, StrategyType, cross_validate};
use crate::model::DiceModel;

/// Result of querying one sequence
pub struct QueryResult {
    pub sequence: ObservationSequence,
    pub strategy: &'static str,
    pub symbol_counts: SymbolCounts,
    pub posterior: Posterior,
    /// Present when both engines were compared
    pub agreement: Option<Agreement>,
}

/// Infer the posterior of `text` with `strategy`
///
/// # Errors
///
/// Returns an error if:
/// - The sequence is empty or holds a symbol other than H, E, L
/// - The sequence is unobservable under the chosen strategy
pub fn query_sequence(
    model: &DiceModel,
    text: &str,
    strategy: StrategyType,
    compare: bool,
) -> Result<QueryResult, DiceError> {
    let sequence = ObservationSequence::parse(text)?;
    let posterior = strategy.infer(model, &sequence)?;
    let agreement = compare.then(|| cross_validate(model, &sequence));

    Ok(QueryResult {
        symbol_counts: sequence.counts(),
        sequence,
        strategy: strategy.name(),
        posterior,
        agreement,
    })
}
