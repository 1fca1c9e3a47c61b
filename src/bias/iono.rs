use std::f64::consts::PI;

use crate::{
    bias::{IonosphereBias, IonosphereRuntime},
    constants::{L1_FREQUENCY_HZ, SPEED_OF_LIGHT_M_S},
    error::Error,
    prelude::TimeScale,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ionosphere models that we propose.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IonosphereModel {
    /// Broadcast [KbModel]
    Klobuchar(KbModel),
}

impl Default for IonosphereModel {
    fn default() -> Self {
        Self::Klobuchar(KbModel::default())
    }
}

impl std::str::FromStr for IonosphereModel {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let c = s.trim().to_lowercase();
        match c.as_str() {
            "klobuchar" | "kb" => Ok(Self::Klobuchar(KbModel::default())),
            _ => Err(Error::UnknownIonosphereModel(s.to_string())),
        }
    }
}

impl IonosphereBias for IonosphereModel {
    fn ionosphere_bias_m(&self, rtm: &IonosphereRuntime) -> Result<f64, Error> {
        match self {
            Self::Klobuchar(kb) => kb.ionosphere_bias_m(rtm),
        }
    }
}

/// Klobuchar Model
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KbModel {
    /// alpha coefficients
    pub alpha: (f64, f64, f64, f64),
    /// beta coefficients
    pub beta: (f64, f64, f64, f64),
}

impl Default for KbModel {
    /// Typical broadcast coefficients
    fn default() -> Self {
        Self {
            alpha: (0.1118E-7, 0.7451E-8, -0.5961E-7, -0.1192E-6),
            beta: (0.1167E6, -0.4267E5, -0.2621E6, 0.1311E6),
        }
    }
}

impl KbModel {
    /// Slant delay in seconds, on L1 (vertical delay mapped by the obliquity factor).
    fn delay_l1_s(&self, rtm: &IonosphereRuntime) -> f64 {
        let geo = rtm.rx_geodetic();

        // semi circles
        let phi_u = geo.latitude_deg / 180.0;
        let lambda_u = geo.longitude_deg / 180.0;
        let elev = rtm.elevation_deg / 180.0;
        let azim_rad = rtm.azimuth_deg.to_radians();

        let psi = 0.0137 / (elev + 0.11) - 0.022;

        let phi_i = (phi_u + psi * azim_rad.cos()).clamp(-0.416, 0.416);
        let lambda_i = lambda_u + psi * azim_rad.sin() / (phi_i * PI).cos();
        let phi_m = phi_i + 0.064 * ((lambda_i - 1.617) * PI).cos();

        let t_gpst = rtm
            .t
            .to_duration_in_time_scale(TimeScale::GPST)
            .to_seconds();

        let t_s = (43.2E3 * lambda_i + t_gpst).rem_euclid(86.4E3);

        let a_i = (self.alpha.0
            + self.alpha.1 * phi_m
            + self.alpha.2 * phi_m.powi(2)
            + self.alpha.3 * phi_m.powi(3))
        .max(0.0);

        let p_i = (self.beta.0
            + self.beta.1 * phi_m
            + self.beta.2 * phi_m.powi(2)
            + self.beta.3 * phi_m.powi(3))
        .max(72.0E3);

        let x_i = 2.0 * PI * (t_s - 50400.0) / p_i;
        let f = 1.0 + 16.0 * (0.53 - elev).powi(3);

        if x_i.abs() < 1.57 {
            f * (5.0E-9 + a_i * (1.0 - x_i.powi(2) / 2.0 + x_i.powi(4) / 24.0))
        } else {
            f * 5.0E-9
        }
    }
}

impl IonosphereBias for KbModel {
    fn ionosphere_bias_m(&self, rtm: &IonosphereRuntime) -> Result<f64, Error> {
        if !(rtm.frequency_hz > 0.0) {
            return Err(Error::IonosphereModel(format!(
                "invalid carrier frequency {}",
                rtm.frequency_hz
            )));
        }
        let delay_s = self.delay_l1_s(rtm) * (L1_FREQUENCY_HZ / rtm.frequency_hz).powi(2);
        Ok(delay_s * SPEED_OF_LIGHT_M_S)
    }
}
