#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::prelude::Error;

mod constellations;
mod modeling;
mod time;

pub use constellations::{ConstellationsConfig, SignalConfig};
pub use modeling::ErrorConfig;
pub use time::TimeConfig;

/// Simulation [Config]uration: time grid, emitted signals and error models.
#[derive(Default, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// [TimeConfig] defines the epoch grid
    #[cfg_attr(feature = "serde", serde(default))]
    pub time: TimeConfig,
    /// [ConstellationsConfig] defines the emitted signals
    #[cfg_attr(feature = "serde", serde(default))]
    pub constellations: ConstellationsConfig,
    /// [ErrorConfig] selects the error models
    #[cfg_attr(feature = "serde", serde(default))]
    pub errors: ErrorConfig,
}

impl Config {
    /// Verifies this [Config] is consistent. This is applied
    /// when deploying a new [crate::prelude::Simulation], so errors are reported
    /// before any expensive work.
    pub fn validate(&self) -> Result<(), Error> {
        self.time.validate()?;
        self.errors.validate()?;
        Ok(())
    }

    /// Returns [Config] for truth generation: no atmosphere,
    /// no receiver clock and no measurement noise.
    /// You can then customize [Self] as you will.
    pub fn truth_preset(time: TimeConfig) -> Self {
        Self {
            time,
            errors: ErrorConfig::no_errors(),
            constellations: ConstellationsConfig::default(),
        }
    }
}
