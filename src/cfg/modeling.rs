#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::prelude::Error;

#[cfg(doc)]
use crate::prelude::{ClockProfile, IonosphereModel, TroposphereModel};

fn default_sigma() -> f64 {
    0.0
}

/// Error models selection. An absent model selector turns that subsystem
/// off entirely: its contribution is then exactly zero.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ErrorConfig {
    /// [IonosphereModel] name, for example "klobuchar"
    #[cfg_attr(feature = "serde", serde(default))]
    pub ionosphere: Option<String>,
    /// [TroposphereModel] name, for example "saastamoinen"
    #[cfg_attr(feature = "serde", serde(default))]
    pub troposphere: Option<String>,
    /// Receiver [ClockProfile] name, for example "high_quality_tcxo"
    #[cfg_attr(feature = "serde", serde(default))]
    pub rx_clock: Option<String>,
    /// Code pseudo range white noise, standard deviation in meters
    #[cfg_attr(feature = "serde", serde(default = "default_sigma"))]
    pub pseudorange_awgn_sigma: f64,
    /// Carrier pseudo range white noise, standard deviation in meters
    #[cfg_attr(feature = "serde", serde(default = "default_sigma"))]
    pub carr_psr_awgn_sigma: f64,
    /// Pseudo range rate white noise, standard deviation in m.s⁻¹
    #[cfg_attr(feature = "serde", serde(default = "default_sigma"))]
    pub pseudorange_rate_awgn_sigma: f64,
    /// Seed of the noise and clock generators. When omitted,
    /// each run is seeded from system entropy.
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: Option<u64>,
}

impl Default for ErrorConfig {
    fn default() -> Self {
        Self::no_errors()
    }
}

impl ErrorConfig {
    /// Defines a null [ErrorConfig] where no error source is emulated.
    /// Observables then strictly follow the geometry.
    pub fn no_errors() -> Self {
        Self {
            ionosphere: None,
            troposphere: None,
            rx_clock: None,
            pseudorange_awgn_sigma: default_sigma(),
            carr_psr_awgn_sigma: default_sigma(),
            pseudorange_rate_awgn_sigma: default_sigma(),
            seed: None,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        for sigma in [
            self.pseudorange_awgn_sigma,
            self.carr_psr_awgn_sigma,
            self.pseudorange_rate_awgn_sigma,
        ] {
            if !sigma.is_finite() || sigma < 0.0 {
                return Err(Error::InvalidNoiseSigma);
            }
        }
        Ok(())
    }
}
