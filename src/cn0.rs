//! Carrier to noise density model
use std::f64::consts::PI;

use crate::constants::{BOLTZMANN_J_K, CA_CHIPPING_RATE, NOISE_TEMPERATURE_K, SPEED_OF_LIGHT_M_S};

/// Spectral separation coefficient of the interference
const SPECTRAL_SEPARATION: f64 = 1.0;

/// Free space path loss in dB, over `range_m` at `frequency_hz`.
/// Returns 0 for non-positive inputs.
pub fn free_space_path_loss_db(range_m: f64, frequency_hz: f64) -> f64 {
    if range_m <= 0.0 || frequency_hz <= 0.0 {
        return 0.0;
    }
    20.0 * (4.0 * PI * range_m * frequency_hz / SPEED_OF_LIGHT_M_S).log10()
}

/// Thermal noise density (dBW/Hz) of the reference receiver
pub fn noise_density_dbw_hz() -> f64 {
    10.0 * (BOLTZMANN_J_K * NOISE_TEMPERATURE_K).log10()
}

/// Carrier to noise density ratio (dB.Hz) of one emitter.
///
/// The received power is the transmitted power (+ antenna gain) minus the free space
/// path loss. When a jamming to signal ratio `js_db` is provided, the effective C/N0
/// accounts for the interference power spread over the C/A code chipping rate.
pub fn carrier_to_noise_dbhz(
    range_m: f64,
    transmit_power_dbw: f64,
    transmit_antenna_gain_dbi: f64,
    frequency_hz: f64,
    js_db: Option<f64>,
) -> f64 {
    let carrier_dbw = transmit_power_dbw + transmit_antenna_gain_dbi
        - free_space_path_loss_db(range_m, frequency_hz);

    let cn0_dbhz = carrier_dbw - noise_density_dbw_hz();

    match js_db {
        Some(js_db) => {
            let cn0 = 10.0_f64.powf(cn0_dbhz / 10.0);
            let js = 10.0_f64.powf(js_db / 10.0);
            let effective = 1.0 / (1.0 / cn0 + js / (SPECTRAL_SEPARATION * CA_CHIPPING_RATE));
            10.0 * effective.log10()
        },
        None => cn0_dbhz,
    }
}
