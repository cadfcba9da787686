//! Dice configuration and the domain of attainable sums

use crate::error::ConfigError;
use std::fmt;
use std::ops::RangeInclusive;

/// Largest sum-indexed table (`num_dice * num_sides + 1` entries) a model may allocate
pub const MAX_TABLE_LEN: usize = 1 << 14;

/// A validated set of identical dice: `num_dice` dice with `num_sides` faces each
///
/// Construction guarantees at least one die, at least one face, and that the
/// number of ordered outcomes (`num_sides^num_dice`) fits in a `u64`, and that
/// sum-indexed tables stay within [`MAX_TABLE_LEN`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiceConfig {
    num_dice: usize,
    num_sides: usize,
    outcomes: u64,
}

impl DiceConfig {
    /// Create a new dice configuration
    ///
    /// # Errors
    /// Returns `ConfigError` if either count is zero, the outcome count overflows,
    /// or the largest sum exceeds the table limit.
    ///
    /// # Examples
    /// ```
    /// use dice_posterior::core::DiceConfig;
    ///
    /// let dice = DiceConfig::new(2, 6).unwrap();
    /// assert_eq!(dice.outcomes(), 36);
    ///
    /// assert!(DiceConfig::new(0, 6).is_err());
    /// ```
    pub fn new(num_dice: usize, num_sides: usize) -> Result<Self, ConfigError> {
        if num_dice == 0 {
            return Err(ConfigError::NoDice);
        }
        if num_sides == 0 {
            return Err(ConfigError::NoSides);
        }

        let fits_table = num_dice
            .checked_mul(num_sides)
            .and_then(|upper| upper.checked_add(1))
            .is_some_and(|len| len <= MAX_TABLE_LEN);
        if !fits_table {
            return Err(ConfigError::DomainTooLarge {
                num_dice,
                num_sides,
                limit: MAX_TABLE_LEN,
            });
        }

        let outcomes = u32::try_from(num_dice)
            .ok()
            .and_then(|exp| (num_sides as u64).checked_pow(exp))
            .ok_or(ConfigError::TooManyOutcomes {
                num_dice,
                num_sides,
            })?;

        Ok(Self {
            num_dice,
            num_sides,
            outcomes,
        })
    }

    #[inline]
    #[must_use]
    pub const fn num_dice(&self) -> usize {
        self.num_dice
    }

    #[inline]
    #[must_use]
    pub const fn num_sides(&self) -> usize {
        self.num_sides
    }

    /// Number of ordered roll tuples (`num_sides^num_dice`)
    #[inline]
    #[must_use]
    pub const fn outcomes(&self) -> u64 {
        self.outcomes
    }

    /// The inclusive range of sums these dice can produce
    #[must_use]
    pub const fn domain(&self) -> SumDomain {
        SumDomain {
            lower: self.num_dice,
            upper: self.num_dice * self.num_sides,
        }
    }
}

impl fmt::Display for DiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.num_dice, self.num_sides)
    }
}

/// Inclusive range `[lower, upper]` of attainable dice sums
///
/// Tables in this crate are indexed directly by sum and span `[0, table_len())`,
/// so entries below `lower` exist but always hold zero mass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SumDomain {
    lower: usize,
    upper: usize,
}

impl SumDomain {
    #[inline]
    #[must_use]
    pub const fn lower(&self) -> usize {
        self.lower
    }

    #[inline]
    #[must_use]
    pub const fn upper(&self) -> usize {
        self.upper
    }

    /// Number of attainable sums
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.upper - self.lower + 1
    }

    /// Always false; a validated domain holds at least one sum
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Length of a sum-indexed table (`upper + 1`)
    #[inline]
    #[must_use]
    pub const fn table_len(&self) -> usize {
        self.upper + 1
    }

    #[inline]
    #[must_use]
    pub const fn contains(&self, sum: usize) -> bool {
        sum >= self.lower && sum <= self.upper
    }

    /// Position of `sum` within the domain, if attainable
    #[inline]
    #[must_use]
    pub const fn offset(&self, sum: usize) -> Option<usize> {
        if self.contains(sum) {
            Some(sum - self.lower)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn sums(&self) -> RangeInclusive<usize> {
        self.lower..=self.upper
    }
}

impl fmt::Display for SumDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}
