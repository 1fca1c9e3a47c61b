use thiserror::Error;

use crate::prelude::{Constellation, SV};

#[cfg(doc)]
use crate::prelude::{EmitterSource, Simulation};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Constellation name could not be interpreted
    #[error("unknown constellation \"{0}\"")]
    UnknownConstellation(String),

    /// Signal name does not match any entry of our catalog
    #[error("unknown signal \"{0}\"")]
    UnknownSignal(String),

    /// An emitter belongs to a constellation for which no signal was described.
    /// This is raised before any epoch gets processed.
    #[error("no signal descriptor for constellation {0}")]
    MissingSignalDescriptor(Constellation),

    #[error("sampling rate must be strictly positive")]
    InvalidSamplingRate,

    #[error("simulation duration must be positive")]
    InvalidDuration,

    #[error("invalid start time: {0}")]
    InvalidStartTime(String),

    /// Noise standard deviations must be positive (or null)
    #[error("invalid noise standard deviation")]
    InvalidNoiseSigma,

    #[error("unknown ionosphere model \"{0}\"")]
    UnknownIonosphereModel(String),

    #[error("unknown troposphere model \"{0}\"")]
    UnknownTroposphereModel(String),

    #[error("unknown clock profile \"{0}\"")]
    UnknownClockProfile(String),

    /// Receiver trajectory does not cover the epoch grid
    #[error("trajectory too short: {found} samples for {expected} epochs")]
    TrajectoryTooShort { expected: usize, found: usize },

    #[error("empty trajectory")]
    EmptyTrajectory,

    /// Failure reported by an ionosphere model
    #[error("ionosphere model failure: {0}")]
    IonosphereModel(String),

    /// Failure reported by a troposphere model
    #[error("troposphere model failure: {0}")]
    TroposphereModel(String),

    /// Failure reported by the receiver clock model
    #[error("clock model failure: {0}")]
    ClockModel(String),

    /// Failure reported by the [EmitterSource]
    #[error("emitter source failure: {0}")]
    EmitterSource(String),

    /// [EmitterSource] did not return one snapshot per epoch
    #[error("emitter source returned {found} snapshots for {expected} epochs")]
    MisalignedSnapshots { expected: usize, found: usize },

    /// An emitter in view was given no propagation delays
    #[error("no propagation delays for {0}")]
    MissingChannelDelays(SV),

    /// [Simulation::run] invoked before [Simulation::prepare]
    #[error("simulation is not ready: prepare it first")]
    NotReady,

    /// A [Simulation] is single pass: build a new one for each run
    #[error("simulation already complete")]
    AlreadyComplete,
}
