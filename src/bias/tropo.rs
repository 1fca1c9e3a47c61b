use log::trace;

use crate::{
    bias::{TroposphereBias, TroposphereRuntime},
    error::Error,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Relative humidity of the standard atmosphere
const STANDARD_HUMIDITY: f64 = 0.7;

/// Troposphere models that we propose.
#[derive(Default, Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TroposphereModel {
    /// Refractivity based model, with a low elevation mapping
    #[default]
    Niel,
    /// Saastamoinen zenith delays (standard atmosphere), Chao mapping
    Saastamoinen,
}

impl std::str::FromStr for TroposphereModel {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let c = s.trim().to_lowercase();
        match c.as_str() {
            "niel" | "niell" => Ok(Self::Niel),
            "saastamoinen" => Ok(Self::Saastamoinen),
            _ => Err(Error::UnknownTroposphereModel(s.to_string())),
        }
    }
}

impl TroposphereBias for TroposphereModel {
    fn troposphere_bias_m(&self, rtm: &TroposphereRuntime) -> Result<f64, Error> {
        if rtm.elevation_deg <= 0.0 {
            return Ok(0.0);
        }
        match self {
            Self::Niel => Ok(niel_model(rtm)),
            Self::Saastamoinen => Ok(saastamoinen_model(rtm)),
        }
    }
}

fn niel_model(rtm: &TroposphereRuntime) -> f64 {
    const NS: f64 = 324.8;

    let h_km = rtm.rx_geodetic().altitude_m / 1000.0;
    let elev_rad = rtm.elevation_deg.to_radians();

    let f = if rtm.elevation_deg < 90.0 {
        1.0_f64 / (elev_rad.sin() + 0.00143 / (elev_rad.tan() + 0.0455))
    } else {
        1.0
    };

    let delta_n = -7.32 * (0.005577 * NS).exp();

    let delta_r =
        (NS + 0.5 * delta_n - NS * h_km - 0.5 * delta_n * h_km.powi(2) + 1430.0 + 732.0) * 0.001;

    f * delta_r
}

fn saastamoinen_model(rtm: &TroposphereRuntime) -> f64 {
    let geo = rtm.rx_geodetic();

    // standard atmosphere is only defined within the troposphere
    let h_m = geo.altitude_m;
    if !(-100.0..=1.0E4).contains(&h_m) {
        return 0.0;
    }
    let h_m = h_m.max(0.0);

    let pressure_hpa = 1013.25 * (1.0 - 2.2557E-5 * h_m).powf(5.2568);
    let temp_k = 15.0 - 6.5E-3 * h_m + 273.16;
    let e = 6.108
        * STANDARD_HUMIDITY
        * ((17.15 * temp_k - 4684.0) / (temp_k - 38.45)).exp();

    let lat_rad = geo.latitude_deg.to_radians();
    let zhd = 0.0022768 * pressure_hpa
        / (1.0 - 0.00266 * (2.0 * lat_rad).cos() - 0.00028 * h_m / 1.0E3);
    let zwd = 0.002277 * (1255.0 / temp_k + 0.05) * e;

    let sin_el = rtm.elevation_deg.to_radians().sin();
    let mapping = 1.0 / (sin_el + 0.00143 / (rtm.elevation_deg.to_radians().tan() + 0.0455));

    trace!(
        "saastamoinen - p={:.3}hPa t={:.3}K e={:.3}hPa zhd={:.3}m zwd={:.3}m",
        pressure_hpa,
        temp_k,
        e,
        zhd,
        zwd
    );

    (zhd + zwd) * mapping
}
