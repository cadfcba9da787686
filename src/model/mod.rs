//! Probability model for a roll of identical dice
//!
//! Built once per dice configuration and shared read-only by every inference:
//! count table → prior → observation model (linear and log).

mod counts;
mod observation;
mod prior;

pub use counts::{CountTable, Enumeration, MAX_EXHAUSTIVE_TUPLES};
pub use observation::{LogObservationModel, ObservationModel};
pub use prior::Prior;

use crate::core::{DiceConfig, SumDomain};
use crate::error::ConfigError;

/// Immutable bundle of every table inference needs
#[derive(Debug, Clone)]
pub struct DiceModel {
    config: DiceConfig,
    counts: CountTable,
    prior: Prior,
    observations: ObservationModel,
    log_observations: LogObservationModel,
}

impl DiceModel {
    /// Build all tables for a dice configuration
    ///
    /// # Errors
    /// Returns `ConfigError` if the enumeration method refuses the configuration.
    pub fn build(config: DiceConfig, method: Enumeration) -> Result<Self, ConfigError> {
        let counts = CountTable::enumerate(&config, method)?;
        let prior = Prior::from_counts(&counts);
        let observations = ObservationModel::from_counts(&counts, &prior);
        let log_observations = LogObservationModel::from_linear(&observations, &prior);

        Ok(Self {
            config,
            counts,
            prior,
            observations,
            log_observations,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &DiceConfig {
        &self.config
    }

    #[must_use]
    pub const fn domain(&self) -> SumDomain {
        self.config.domain()
    }

    #[must_use]
    pub const fn counts(&self) -> &CountTable {
        &self.counts
    }

    #[must_use]
    pub const fn prior(&self) -> &Prior {
        &self.prior
    }

    #[must_use]
    pub const fn observations(&self) -> &ObservationModel {
        &self.observations
    }

    #[must_use]
    pub const fn log_observations(&self) -> &LogObservationModel {
        &self.log_observations
    }
}

/// Validate `num_dice`/`num_sides` and build the model with convolution
///
/// # Errors
/// Returns `ConfigError` for zero dice, zero sides, or an overflowing outcome count.
///
/// # Examples
/// ```
/// use dice_posterior::model::build_model;
///
/// let model = build_model(2, 6).unwrap();
/// assert_eq!(model.domain().lower(), 2);
/// assert_eq!(model.domain().upper(), 12);
/// ```
pub fn build_model(num_dice: usize, num_sides: usize) -> Result<DiceModel, ConfigError> {
    DiceModel::build(DiceConfig::new(num_dice, num_sides)?, Enumeration::default())
}
