use nalgebra::Vector3;

use crate::{
    error::Error,
    geodesy::{ecef_to_geodetic, Geodetic},
    prelude::Epoch,
};

pub(crate) mod iono;
pub use iono::{IonosphereModel, KbModel};

pub(crate) mod tropo;
pub use tropo::TroposphereModel;

/// Ongoing conditions, for the ionosphere delay of one emitter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IonosphereRuntime {
    /// Sampling [Epoch]
    pub t: Epoch,
    /// Receiver ECEF position, in meters
    pub rx_ecef_m: Vector3<f64>,
    /// Emitter ECEF position, in meters
    pub emitter_ecef_m: Vector3<f64>,
    /// Emitter azimuth in degrees
    pub azimuth_deg: f64,
    /// Emitter elevation in degrees
    pub elevation_deg: f64,
    /// Signal carrier frequency in Hz
    pub frequency_hz: f64,
}

impl IonosphereRuntime {
    /// Receiver [Geodetic] coordinates
    pub fn rx_geodetic(&self) -> Geodetic {
        ecef_to_geodetic(&self.rx_ecef_m)
    }
}

/// Ongoing conditions, for the troposphere delay of one emitter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TroposphereRuntime {
    /// Receiver ECEF position, in meters
    pub rx_ecef_m: Vector3<f64>,
    /// Emitter elevation in degrees
    pub elevation_deg: f64,
}

impl TroposphereRuntime {
    /// Receiver [Geodetic] coordinates
    pub fn rx_geodetic(&self) -> Geodetic {
        ecef_to_geodetic(&self.rx_ecef_m)
    }
}

/// Ionosphere delay model. You can either deploy our [IonosphereModel]
/// or apply your own equations.
///
/// Implementations must be stateless: the same [IonosphereRuntime]
/// always returns the same delay. Delay continuity across epochs
/// is managed by the simulator itself.
pub trait IonosphereBias {
    /// Returns the ionosphere (group) delay in meters, for this [IonosphereRuntime].
    /// Any error aborts the simulation.
    fn ionosphere_bias_m(&self, rtm: &IonosphereRuntime) -> Result<f64, Error>;
}

/// Troposphere delay model. You can either deploy our [TroposphereModel]
/// or apply your own equations. Same statelessness requirement as [IonosphereBias].
pub trait TroposphereBias {
    /// Returns the troposphere delay in meters, for this [TroposphereRuntime].
    /// Any error aborts the simulation.
    fn troposphere_bias_m(&self, rtm: &TroposphereRuntime) -> Result<f64, Error>;
}
