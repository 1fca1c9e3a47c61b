use anise::constants::SPEED_OF_LIGHT_KM_S;

/// Speed of light in m.s⁻¹
pub const SPEED_OF_LIGHT_M_S: f64 = SPEED_OF_LIGHT_KM_S * 1000.0;

/// WGS84 Earth Frame Ellipsoid semi-major axis (meters)
pub const EARTH_SEMI_MAJOR_AXIS_WGS84: f64 = 6378137.0_f64;

/// Boltzmann constant in J.K⁻¹
pub const BOLTZMANN_J_K: f64 = 1.380649E-23;

/// Reference receiver noise temperature, in Kelvin
pub const NOISE_TEMPERATURE_K: f64 = 290.0;

/// GPS L1 carrier frequency (Hz), reference for ionospheric scaling
pub const L1_FREQUENCY_HZ: f64 = 1575.42E6;

/// C/A code chipping rate (chips.s⁻¹), used in the jamming spectral separation
pub const CA_CHIPPING_RATE: f64 = 1.023E6;
