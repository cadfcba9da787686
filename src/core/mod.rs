//! Core domain types for dice inference
//!
//! Dice configurations, the sum domain, and observation symbols.
//! All types here are pure and validated at construction.

mod dice;
mod observation;

pub use dice::{DiceConfig, MAX_TABLE_LEN, SumDomain};
pub use observation::{Observation, ObservationSequence, SymbolCounts};
