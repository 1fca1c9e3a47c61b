#![doc = include_str!("../README.md")]
#![cfg_attr(docrs, feature(doc_cfg))]

extern crate gnss_rs as gnss;

// private modules
mod bias;
mod carrier;
mod cfg;
mod clock;
mod cn0;
mod constants;
mod emitter;
mod error;
mod geodesy;
mod output;
mod receiver;
mod signal;
mod simulation;
mod synthesizer;
mod time;
mod tracker;

#[cfg(test)]
mod tests;

// prelude
pub mod prelude {
    pub use crate::bias::{
        IonosphereBias, IonosphereModel, IonosphereRuntime, KbModel, TroposphereBias,
        TroposphereModel, TroposphereRuntime,
    };
    pub use crate::carrier::Carrier;
    pub use crate::cfg::{Config, ConstellationsConfig, ErrorConfig, SignalConfig, TimeConfig};
    pub use crate::clock::{AllanClock, AllanVariance, ClockModel, ClockProfile, ClockStates};
    pub use crate::cn0::{carrier_to_noise_dbhz, free_space_path_loss_db, noise_density_dbw_hz};
    pub use crate::constants::SPEED_OF_LIGHT_M_S;
    pub use crate::emitter::{mask, EmitterSnapshot, EmitterSource, EmitterState};
    pub use crate::error::Error;
    pub use crate::geodesy::{azimuth_elevation_deg, ecef_to_geodetic, Geodetic};
    pub use crate::output::SimulationOutput;
    pub use crate::receiver::{ReceiverStates, Trajectory};
    pub use crate::signal::{Signal, SignalDescriptor, SignalTable};
    pub use crate::simulation::{Simulation, SimulationState};
    pub use crate::synthesizer::{ObservableSynthesizer, Observables};
    pub use crate::time::EpochGrid;
    pub use crate::tracker::{ChannelDelays, DelayState, DelayTable, DelayTracker, Reconciliation};
    // re-export
    pub use gnss::prelude::{Constellation, SV};
    pub use hifitime::{Duration, Epoch, TimeScale};
    pub use nalgebra::Vector3;
}

// pub export
pub use error::Error;
