//! Error types for model construction, observation parsing, and inference

use thiserror::Error;

/// Invalid dice configuration, rejected before any table is built
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("number of dice must be at least 1")]
    NoDice,

    #[error("number of sides must be at least 1")]
    NoSides,

    #[error("{num_sides}^{num_dice} outcomes do not fit in a 64-bit counter")]
    TooManyOutcomes { num_dice: usize, num_sides: usize },

    #[error("{num_dice}d{num_sides} sums exceed the table limit of {limit} entries")]
    DomainTooLarge {
        num_dice: usize,
        num_sides: usize,
        limit: usize,
    },

    #[error(
        "exhaustive enumeration of {outcomes} tuples exceeds the limit of {limit}; use convolution"
    )]
    EnumerationTooLarge { outcomes: u64, limit: u64 },
}

/// Malformed observation sequence
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObservationError {
    #[error("observation sequence is empty")]
    EmptySequence,

    #[error("invalid symbol '{symbol}' at position {position} (expected H, E, or L)")]
    InvalidSymbol { symbol: char, position: usize },
}

/// Failure while computing a posterior
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InferenceError {
    /// Every hypothesis assigns zero likelihood to the sequence, or the
    /// direct product underflowed to zero.
    #[error("sequence '{sequence}' is unobservable under every possible sum")]
    Unobservable { sequence: String },
}

/// Any failure from parsing a sequence through to its posterior
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Observation(#[from] ObservationError),

    #[error(transparent)]
    Inference(#[from] InferenceError),
}
