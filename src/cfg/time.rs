use hifitime::Epoch;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::prelude::Error;

fn default_duration() -> f64 {
    60.0
}

fn default_sampling_rate() -> f64 {
    1.0
}

fn default_year() -> i32 {
    2023
}

fn default_month() -> u8 {
    1
}

fn default_day() -> u8 {
    1
}

/// Epoch grid definition
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeConfig {
    /// Simulated duration, in seconds
    #[cfg_attr(feature = "serde", serde(default = "default_duration"))]
    pub duration_s: f64,
    /// Simulation rate, in Hz
    #[cfg_attr(feature = "serde", serde(default = "default_sampling_rate"))]
    pub sampling_rate_hz: f64,
    /// Start time: UTC year
    #[cfg_attr(feature = "serde", serde(default = "default_year"))]
    pub year: i32,
    /// Start time: month (1..=12)
    #[cfg_attr(feature = "serde", serde(default = "default_month"))]
    pub month: u8,
    /// Start time: day of month
    #[cfg_attr(feature = "serde", serde(default = "default_day"))]
    pub day: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hour: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub minute: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub second: u8,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            duration_s: default_duration(),
            sampling_rate_hz: default_sampling_rate(),
            year: default_year(),
            month: default_month(),
            day: default_day(),
            hour: 0,
            minute: 0,
            second: 0,
        }
    }
}

impl TimeConfig {
    /// Fixed simulation step, in seconds
    pub fn step_s(&self) -> f64 {
        1.0 / self.sampling_rate_hz
    }

    /// Start [Epoch], expressed in UTC
    pub fn start_epoch(&self) -> Result<Epoch, Error> {
        Epoch::maybe_from_gregorian_utc(
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
            0,
        )
        .map_err(|e| Error::InvalidStartTime(e.to_string()))
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        if !self.sampling_rate_hz.is_finite() || self.sampling_rate_hz <= 0.0 {
            return Err(Error::InvalidSamplingRate);
        }
        if !self.duration_s.is_finite() || self.duration_s < 0.0 {
            return Err(Error::InvalidDuration);
        }
        self.start_epoch()?;
        Ok(())
    }
}
