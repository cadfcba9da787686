//! Combinatorial enumeration of dice sums
//!
//! `counts[k]` holds the number of ordered roll tuples whose faces sum to `k`.

use crate::core::{DiceConfig, SumDomain};
use crate::error::ConfigError;

/// Upper bound on tuples visited by exhaustive enumeration
pub const MAX_EXHAUSTIVE_TUPLES: u64 = 50_000_000;

/// How to build the count table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Enumeration {
    /// Visit every ordered tuple (exponential in the number of dice)
    Exhaustive,
    /// Iterated convolution of the single-die distribution
    #[default]
    Convolution,
}

impl Enumeration {
    /// Create enumeration method from name string
    ///
    /// Supported names: "exhaustive", "convolution".
    /// Defaults to convolution if name is unrecognized.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "exhaustive" | "product" => Self::Exhaustive,
            _ => Self::Convolution,
        }
    }
}

/// Number of ways to roll each sum, indexed by sum over `[0, domain.table_len())`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountTable {
    domain: SumDomain,
    counts: Vec<u64>,
    total: u64,
}

impl CountTable {
    /// Count the ways each sum can be rolled
    ///
    /// # Errors
    /// Returns `ConfigError::EnumerationTooLarge` if exhaustive enumeration
    /// would visit more than [`MAX_EXHAUSTIVE_TUPLES`] tuples.
    ///
    /// # Examples
    /// ```
    /// use dice_posterior::core::DiceConfig;
    /// use dice_posterior::model::{CountTable, Enumeration};
    ///
    /// let dice = DiceConfig::new(2, 6).unwrap();
    /// let table = CountTable::enumerate(&dice, Enumeration::Convolution).unwrap();
    /// assert_eq!(table.count(7), 6);
    /// assert_eq!(table.total(), 36);
    /// ```
    pub fn enumerate(config: &DiceConfig, method: Enumeration) -> Result<Self, ConfigError> {
        let counts = match method {
            Enumeration::Exhaustive => {
                if config.outcomes() > MAX_EXHAUSTIVE_TUPLES {
                    return Err(ConfigError::EnumerationTooLarge {
                        outcomes: config.outcomes(),
                        limit: MAX_EXHAUSTIVE_TUPLES,
                    });
                }
                enumerate_exhaustive(config)
            }
            Enumeration::Convolution => enumerate_convolution(config),
        };

        Ok(Self {
            domain: config.domain(),
            total: config.outcomes(),
            counts,
        })
    }

    #[must_use]
    pub const fn domain(&self) -> SumDomain {
        self.domain
    }

    /// Ways to roll `sum` (zero outside the domain)
    #[must_use]
    pub fn count(&self, sum: usize) -> u64 {
        self.counts.get(sum).copied().unwrap_or(0)
    }

    /// Sum of all counts, always `num_sides^num_dice`
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// The raw sum-indexed table
    #[must_use]
    pub fn as_slice(&self) -> &[u64] {
        &self.counts
    }

    /// `(sum, count)` pairs across the attainable domain
    pub fn iter(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.domain.sums().map(|sum| (sum, self.counts[sum]))
    }
}

fn enumerate_exhaustive(config: &DiceConfig) -> Vec<u64> {
    let num_dice = config.num_dice();
    let num_sides = config.num_sides();
    let mut counts = vec![0u64; config.domain().table_len()];

    // Odometer over faces; `sum` tracks the current tuple's total
    let mut roll = vec![1usize; num_dice];
    let mut sum = num_dice;

    loop {
        counts[sum] += 1;

        let mut die = 0;
        loop {
            if die == num_dice {
                return counts;
            }
            if roll[die] < num_sides {
                roll[die] += 1;
                sum += 1;
                break;
            }
            sum -= roll[die] - 1;
            roll[die] = 1;
            die += 1;
        }
    }
}

fn enumerate_convolution(config: &DiceConfig) -> Vec<u64> {
    let num_sides = config.num_sides();

    // Zero dice: one way to make a sum of zero
    let mut counts = vec![1u64];

    for _ in 0..config.num_dice() {
        let mut next = vec![0u64; counts.len() + num_sides];
        for (sum, &ways) in counts.iter().enumerate() {
            if ways == 0 {
                continue;
            }
            for face in 1..=num_sides {
                next[sum + face] += ways;
            }
        }
        counts = next;
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(num_dice: usize, num_sides: usize, method: Enumeration) -> CountTable {
        let dice = DiceConfig::new(num_dice, num_sides).unwrap();
        CountTable::enumerate(&dice, method).unwrap()
    }

    #[test]
    fn classic_two_dice_distribution() {
        let expected = [1, 2, 3, 4, 5, 6, 5, 4, 3, 2, 1];

        for method in [Enumeration::Exhaustive, Enumeration::Convolution] {
            let counts = table(2, 6, method);
            let observed: Vec<u64> = counts.iter().map(|(_, c)| c).collect();
            assert_eq!(observed, expected, "{method:?}");
            assert_eq!(counts.count(0), 0);
            assert_eq!(counts.count(1), 0);
            assert_eq!(counts.count(13), 0);
        }
    }

    #[test]
    fn methods_agree() {
        for num_dice in 1..=4 {
            for num_sides in 1..=7 {
                let exhaustive = table(num_dice, num_sides, Enumeration::Exhaustive);
                let convolution = table(num_dice, num_sides, Enumeration::Convolution);
                assert_eq!(exhaustive, convolution, "{num_dice}d{num_sides}");
            }
        }
    }

    #[test]
    fn counts_sum_to_outcomes() {
        let counts = table(4, 5, Enumeration::Convolution);
        assert_eq!(counts.as_slice().iter().sum::<u64>(), 625);
        assert_eq!(counts.total(), 625);
        assert_eq!(counts.as_slice().len(), 21);
    }

    #[test]
    fn exhaustive_refuses_huge_products() {
        let dice = DiceConfig::new(12, 6).unwrap();
        assert!(matches!(
            CountTable::enumerate(&dice, Enumeration::Exhaustive),
            Err(ConfigError::EnumerationTooLarge { .. })
        ));
        assert!(CountTable::enumerate(&dice, Enumeration::Convolution).is_ok());
    }

    #[test]
    fn enumeration_from_name() {
        assert_eq!(Enumeration::from_name("exhaustive"), Enumeration::Exhaustive);
        assert_eq!(Enumeration::from_name("convolution"), Enumeration::Convolution);
        assert_eq!(Enumeration::from_name("anything"), Enumeration::Convolution);
    }
}
