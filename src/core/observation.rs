//! Observation symbols and parsed observation sequences
//!
//! Each symbol reports how a fresh roll's sum compared to the hidden sum:
//! - `H` = Higher (fresh roll was strictly greater)
//! - `E` = Equal
//! - `L` = Lower (fresh roll was strictly smaller)

use crate::error::ObservationError;
use std::fmt;
use std::str::FromStr;

/// One comparison outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Observation {
    Higher,
    Equal,
    Lower,
}

impl Observation {
    /// All symbols in display order
    pub const ALL: [Self; 3] = [Self::Higher, Self::Equal, Self::Lower];

    /// Parse a single case-sensitive symbol
    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            'H' => Some(Self::Higher),
            'E' => Some(Self::Equal),
            'L' => Some(Self::Lower),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Higher => 'H',
            Self::Equal => 'E',
            Self::Lower => 'L',
        }
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// How many times each symbol occurs in a sequence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SymbolCounts {
    pub higher: usize,
    pub equal: usize,
    pub lower: usize,
}

impl SymbolCounts {
    #[must_use]
    pub const fn get(&self, symbol: Observation) -> usize {
        match symbol {
            Observation::Higher => self.higher,
            Observation::Equal => self.equal,
            Observation::Lower => self.lower,
        }
    }
}

/// A non-empty sequence of observation symbols
///
/// # Examples
/// ```
/// use dice_posterior::core::{Observation, ObservationSequence};
///
/// let seq = ObservationSequence::parse("HHEL").unwrap();
/// assert_eq!(seq.len(), 4);
/// assert_eq!(seq.symbols()[2], Observation::Equal);
///
/// assert!(ObservationSequence::parse("HxL").is_err());
/// assert!(ObservationSequence::parse("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObservationSequence {
    symbols: Vec<Observation>,
}

impl ObservationSequence {
    /// Parse a string of `H`/`E`/`L` symbols
    ///
    /// # Errors
    /// Returns `ObservationError::EmptySequence` for an empty string, or
    /// `ObservationError::InvalidSymbol` naming the first unrecognized character.
    pub fn parse(text: &str) -> Result<Self, ObservationError> {
        if text.is_empty() {
            return Err(ObservationError::EmptySequence);
        }

        let symbols = text
            .chars()
            .enumerate()
            .map(|(position, symbol)| {
                Observation::from_char(symbol)
                    .ok_or(ObservationError::InvalidSymbol { symbol, position })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { symbols })
    }

    /// Build a sequence from already-typed symbols
    ///
    /// # Errors
    /// Returns `ObservationError::EmptySequence` if `symbols` is empty.
    pub fn from_symbols(symbols: Vec<Observation>) -> Result<Self, ObservationError> {
        if symbols.is_empty() {
            return Err(ObservationError::EmptySequence);
        }
        Ok(Self { symbols })
    }

    #[must_use]
    pub fn symbols(&self) -> &[Observation] {
        &self.symbols
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false; construction rejects empty sequences
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Observation> + '_ {
        self.symbols.iter().copied()
    }

    #[must_use]
    pub fn counts(&self) -> SymbolCounts {
        let mut counts = SymbolCounts::default();
        for symbol in &self.symbols {
            match symbol {
                Observation::Higher => counts.higher += 1,
                Observation::Equal => counts.equal += 1,
                Observation::Lower => counts.lower += 1,
            }
        }
        counts
    }
}

impl fmt::Display for ObservationSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.symbols {
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}

impl FromStr for ObservationSequence {
    type Err = ObservationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
