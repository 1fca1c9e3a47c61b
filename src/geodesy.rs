//! ECEF / geodetic helpers
use map_3d::{ecef2aer, ecef2geodetic, rad2deg, Ellipsoid};
use nalgebra::Vector3;

/// Geodetic coordinates
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Geodetic {
    /// Latitude in degrees
    pub latitude_deg: f64,
    /// Longitude in degrees
    pub longitude_deg: f64,
    /// Altitude above the WGS84 ellipsoid, in meters
    pub altitude_m: f64,
}

/// Converts ECEF coordinates (meters) to [Geodetic] coordinates (WGS84).
pub fn ecef_to_geodetic(ecef_m: &Vector3<f64>) -> Geodetic {
    let (lat, lon, alt) = ecef2geodetic(ecef_m[0], ecef_m[1], ecef_m[2], Ellipsoid::WGS84);
    Geodetic {
        latitude_deg: rad2deg(lat),
        longitude_deg: rad2deg(lon),
        altitude_m: alt,
    }
}

/// Returns (azimuth, elevation) in degrees of `target_m` as seen from `observer_m`,
/// both expressed in ECEF meters. Azimuth is within [0, 360[.
pub fn azimuth_elevation_deg(observer_m: &Vector3<f64>, target_m: &Vector3<f64>) -> (f64, f64) {
    let (lat0, lon0, alt0) = ecef2geodetic(
        observer_m[0],
        observer_m[1],
        observer_m[2],
        Ellipsoid::WGS84,
    );

    let (azim, elev, _) = ecef2aer(
        target_m[0],
        target_m[1],
        target_m[2],
        lat0,
        lon0,
        alt0,
        Ellipsoid::WGS84,
    );

    (rad2deg(azim).rem_euclid(360.0), rad2deg(elev))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants::EARTH_SEMI_MAJOR_AXIS_WGS84;
    use map_3d::{deg2rad, geodetic2ecef};

    #[test]
    fn equator_prime_meridian() {
        let geo = ecef_to_geodetic(&Vector3::new(EARTH_SEMI_MAJOR_AXIS_WGS84, 0.0, 0.0));
        assert!(geo.latitude_deg.abs() < 1.0E-9);
        assert!(geo.longitude_deg.abs() < 1.0E-9);
        assert!(geo.altitude_m.abs() < 1.0E-3);
    }

    #[test]
    fn known_location() {
        // 45°N, 0°E, 100 m
        let (x, y, z) = geodetic2ecef(deg2rad(45.0), 0.0, 100.0, Ellipsoid::WGS84);

        let geo = ecef_to_geodetic(&Vector3::new(x, y, z));
        assert!((geo.latitude_deg - 45.0).abs() < 1.0E-8, "{:?}", geo);
        assert!(geo.longitude_deg.abs() < 1.0E-8, "{:?}", geo);
        assert!((geo.altitude_m - 100.0).abs() < 1.0E-3, "{:?}", geo);
    }

    #[test]
    fn zenith_look_angle() {
        let rx = Vector3::new(EARTH_SEMI_MAJOR_AXIS_WGS84, 0.0, 0.0);
        let sv = Vector3::new(EARTH_SEMI_MAJOR_AXIS_WGS84 + 20.0E6, 0.0, 0.0);
        let (_, elev) = azimuth_elevation_deg(&rx, &sv);
        assert!((elev - 90.0).abs() < 1.0E-6);

        // due north, on the horizon plane
        let sv = Vector3::new(EARTH_SEMI_MAJOR_AXIS_WGS84, 0.0, 1.0E6);
        let (azim, elev) = azimuth_elevation_deg(&rx, &sv);
        assert!(azim.abs() < 1.0E-6 || (azim - 360.0).abs() < 1.0E-6);
        assert!(elev.abs() < 1.0E-6);
    }

    #[test]
    fn westward_azimuth_is_positive() {
        let rx = Vector3::new(EARTH_SEMI_MAJOR_AXIS_WGS84, 0.0, 0.0);
        let sv = Vector3::new(EARTH_SEMI_MAJOR_AXIS_WGS84, -1.0E6, 0.0);
        let (azim, elev) = azimuth_elevation_deg(&rx, &sv);
        assert!((azim - 270.0).abs() < 1.0E-6, "{}", azim);
        assert!(elev.abs() < 1.0E-6);
    }
}
