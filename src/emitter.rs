use std::collections::BTreeMap;

use nalgebra::Vector3;

use crate::{
    error::Error,
    geodesy::azimuth_elevation_deg,
    prelude::{Epoch, SV},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Geometry of one emitter, as seen by the receiver at one epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EmitterState {
    /// Sampling [Epoch]
    pub t: Epoch,
    /// Geometric range, in meters
    pub range_m: f64,
    /// Range rate in m.s⁻¹, positive when the emitter moves away
    pub range_rate_m_s: f64,
    /// Azimuth in degrees
    pub azimuth_deg: f64,
    /// Elevation in degrees
    pub elevation_deg: f64,
    /// Emitter ECEF position, in meters
    pub position_ecef_m: Vector3<f64>,
    /// Emitter ECEF velocity, in m.s⁻¹
    pub velocity_ecef_m_s: Vector3<f64>,
}

impl EmitterState {
    /// Builds the [EmitterState] from the receiver and emitter
    /// ECEF states (meters and m.s⁻¹).
    pub fn from_ecef(
        t: Epoch,
        rx_position_m: &Vector3<f64>,
        rx_velocity_m_s: &Vector3<f64>,
        position_m: &Vector3<f64>,
        velocity_m_s: &Vector3<f64>,
    ) -> Self {
        let los = position_m - rx_position_m;
        let range_m = los.norm();

        let range_rate_m_s = if range_m > 0.0 {
            (velocity_m_s - rx_velocity_m_s).dot(&(los / range_m))
        } else {
            0.0
        };

        let (azimuth_deg, elevation_deg) = azimuth_elevation_deg(rx_position_m, position_m);

        Self {
            t,
            range_m,
            range_rate_m_s,
            azimuth_deg,
            elevation_deg,
            position_ecef_m: *position_m,
            velocity_ecef_m_s: *velocity_m_s,
        }
    }
}

/// Emitters in view at one epoch. The key set varies from one epoch to another.
pub type EmitterSnapshot = BTreeMap<SV, EmitterState>;

/// Drops emitters below the elevation mask (degrees)
pub fn mask(snapshot: &mut EmitterSnapshot, mask_angle_deg: f64) {
    snapshot.retain(|_, state| state.elevation_deg >= mask_angle_deg);
}

/// Any constellation propagator should implement the [EmitterSource] trait
/// to contribute to the simulation.
pub trait EmitterSource {
    /// Provide the emitters in view, for each [Epoch] of the simulation.
    ///
    /// The three slices are aligned: receiver ECEF position (meters)
    /// and velocity (m.s⁻¹) at each [Epoch].
    /// This must return exactly one [EmitterSnapshot] per [Epoch],
    /// in the same order.
    /// Any error aborts the simulation.
    fn visible_emitters(
        &self,
        epochs: &[Epoch],
        rx_positions_m: &[Vector3<f64>],
        rx_velocities_m_s: &[Vector3<f64>],
    ) -> Result<Vec<EmitterSnapshot>, Error>;
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants::EARTH_SEMI_MAJOR_AXIS_WGS84;
    use crate::prelude::Constellation;

    fn t0() -> Epoch {
        Epoch::from_gregorian_utc_at_midnight(2023, 1, 1)
    }

    #[test]
    fn closing_emitter() {
        let rx = Vector3::new(EARTH_SEMI_MAJOR_AXIS_WGS84, 0.0, 0.0);
        let sv = Vector3::new(EARTH_SEMI_MAJOR_AXIS_WGS84 + 20.0E6, 0.0, 0.0);
        let vel = Vector3::new(-100.0, 0.0, 0.0);

        let state = EmitterState::from_ecef(t0(), &rx, &Vector3::zeros(), &sv, &vel);

        assert!((state.range_m - 20.0E6).abs() < 1.0E-6);
        assert!((state.range_rate_m_s + 100.0).abs() < 1.0E-9);
        assert!((state.elevation_deg - 90.0).abs() < 1.0E-6);
    }

    #[test]
    fn elevation_mask() {
        let rx = Vector3::new(EARTH_SEMI_MAJOR_AXIS_WGS84, 0.0, 0.0);
        let zero = Vector3::zeros();

        let mut snapshot = EmitterSnapshot::new();

        snapshot.insert(
            SV::new(Constellation::GPS, 1),
            EmitterState::from_ecef(
                t0(),
                &rx,
                &zero,
                &Vector3::new(EARTH_SEMI_MAJOR_AXIS_WGS84 + 20.0E6, 0.0, 0.0),
                &zero,
            ),
        );

        snapshot.insert(
            SV::new(Constellation::GPS, 2),
            EmitterState::from_ecef(
                t0(),
                &rx,
                &zero,
                &Vector3::new(EARTH_SEMI_MAJOR_AXIS_WGS84 - 1.0E3, 20.0E6, 0.0),
                &zero,
            ),
        );

        mask(&mut snapshot, 10.0);

        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.contains_key(&SV::new(Constellation::GPS, 1)));
    }
}
