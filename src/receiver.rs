use nalgebra::Vector3;

use crate::{clock::ClockStates, error::Error, prelude::Epoch, time::EpochGrid};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Receiver [Trajectory], expressed in ECEF.
#[derive(Debug, Clone, PartialEq)]
pub enum Trajectory {
    /// Static receiver, position in meters.
    /// The position is repeated at every epoch and the velocity is null.
    Static(Vector3<f64>),
    /// Dynamic receiver: one position (meters) and velocity (m.s⁻¹) per epoch.
    /// Exceeding samples are dropped, but both series must cover the whole grid.
    Dynamic {
        positions: Vec<Vector3<f64>>,
        velocities: Vec<Vector3<f64>>,
    },
}

impl Trajectory {
    /// Static receiver from ECEF coordinates in meters
    pub fn fixed(x_m: f64, y_m: f64, z_m: f64) -> Self {
        Self::Static(Vector3::new(x_m, y_m, z_m))
    }

    /// Aligns this [Trajectory] with `n` epochs.
    /// Returns (positions, velocities), both exactly `n` long.
    pub(crate) fn align(
        &self,
        n: usize,
    ) -> Result<(Vec<Vector3<f64>>, Vec<Vector3<f64>>), Error> {
        match self {
            Self::Static(position) => Ok((vec![*position; n], vec![Vector3::zeros(); n])),
            Self::Dynamic {
                positions,
                velocities,
            } => {
                if positions.is_empty() || velocities.is_empty() {
                    return Err(Error::EmptyTrajectory);
                }
                let found = positions.len().min(velocities.len());
                if found < n {
                    return Err(Error::TrajectoryTooShort { expected: n, found });
                }
                Ok((positions[..n].to_vec(), velocities[..n].to_vec()))
            },
        }
    }
}

/// Receiver truth states, one sample per epoch.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReceiverStates {
    /// Elapsed time since the initial epoch, in seconds
    pub time_s: Vec<f64>,
    /// Sampling [Epoch]s
    pub epochs: Vec<Epoch>,
    /// ECEF position, in meters
    pub position_m: Vec<Vector3<f64>>,
    /// ECEF velocity, in m.s⁻¹
    pub velocity_m_s: Vec<Vector3<f64>>,
    /// Clock bias, in meters
    pub clock_bias_m: Vec<f64>,
    /// Clock drift, in m.s⁻¹
    pub clock_drift_m_s: Vec<f64>,
}

impl ReceiverStates {
    /// Builds the [ReceiverStates] over the [EpochGrid].
    /// [ClockStates] must match the grid length.
    pub(crate) fn new(
        grid: &EpochGrid,
        trajectory: &Trajectory,
        clock: ClockStates,
    ) -> Result<Self, Error> {
        let n = grid.len();
        let (position_m, velocity_m_s) = trajectory.align(n)?;

        if clock.bias_m.len() != n || clock.drift_m_s.len() != n {
            return Err(Error::ClockModel(format!(
                "expecting {} samples, got {}",
                n,
                clock.bias_m.len().min(clock.drift_m_s.len())
            )));
        }

        Ok(Self {
            time_s: grid.offsets_s().to_vec(),
            epochs: grid.epochs().to_vec(),
            position_m,
            velocity_m_s,
            clock_bias_m: clock.bias_m,
            clock_drift_m_s: clock.drift_m_s,
        })
    }

    /// Number of epochs
    pub fn len(&self) -> usize {
        self.epochs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.epochs.is_empty()
    }
}
