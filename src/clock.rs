//! Receiver clock model
use std::f64::consts::PI;

use log::debug;
use nalgebra::{Matrix2, Vector2};
use rand::{rngs::SmallRng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

use crate::{constants::SPEED_OF_LIGHT_M_S, error::Error};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Allan variance (power law) coefficients of an oscillator
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AllanVariance {
    /// White frequency noise coefficient
    pub h0: f64,
    /// Flicker frequency noise coefficient.
    /// Informative only: the two-state bias/drift process has no flicker
    /// component and ignores it.
    pub h_1: f64,
    /// Random walk frequency noise coefficient
    pub h_2: f64,
}

impl AllanVariance {
    /// Two-state process noise covariance, over one step of `step_s` seconds,
    /// in (m², m².s⁻¹, m².s⁻²). Driven by `h0` and `h_2` only.
    pub(crate) fn process_covariance(&self, step_s: f64) -> Matrix2<f64> {
        let s_f = self.h0 / 2.0;
        let s_g = 2.0 * PI * PI * self.h_2;
        let c2 = SPEED_OF_LIGHT_M_S.powi(2);
        Matrix2::new(
            s_f * step_s + s_g * step_s.powi(3) / 3.0,
            s_g * step_s.powi(2) / 2.0,
            s_g * step_s.powi(2) / 2.0,
            s_g * step_s,
        ) * c2
    }
}

/// [ClockProfile] can be used to select typical [AllanVariance] coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ClockProfile {
    /// Low quality temperature compensated crystal
    LowQualityTcxo,
    /// High quality temperature compensated crystal
    HighQualityTcxo,
    /// Oven controlled crystal
    Ocxo,
    /// Rubidium standard
    Rubidium,
    /// Cesium standard
    Cesium,
}

impl ClockProfile {
    /// [AllanVariance] coefficients of this [ClockProfile]
    pub fn allan_variance(&self) -> AllanVariance {
        let (h0, h_1, h_2) = match self {
            Self::LowQualityTcxo => (2.0E-19, 7.0E-21, 2.0E-20),
            Self::HighQualityTcxo => (2.0E-21, 1.0E-22, 2.0E-20),
            Self::Ocxo => (2.0E-25, 7.0E-25, 6.0E-25),
            Self::Rubidium => (2.0E-22, 4.5E-26, 1.0E-30),
            Self::Cesium => (2.0E-22, 5.0E-27, 1.5E-33),
        };
        AllanVariance { h0, h_1, h_2 }
    }
}

impl std::str::FromStr for ClockProfile {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let c = s.trim().to_lowercase().replace(['-', ' '], "_");
        match c.as_str() {
            "low_quality_tcxo" | "tcxo" => Ok(Self::LowQualityTcxo),
            "high_quality_tcxo" => Ok(Self::HighQualityTcxo),
            "ocxo" => Ok(Self::Ocxo),
            "rubidium" => Ok(Self::Rubidium),
            "cesium" => Ok(Self::Cesium),
            _ => Err(Error::UnknownClockProfile(s.to_string())),
        }
    }
}

impl std::fmt::Display for ClockProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::LowQualityTcxo => write!(f, "low quality TCXO"),
            Self::HighQualityTcxo => write!(f, "high quality TCXO"),
            Self::Ocxo => write!(f, "OCXO"),
            Self::Rubidium => write!(f, "rubidium"),
            Self::Cesium => write!(f, "cesium"),
        }
    }
}

/// Receiver clock bias and drift, one sample per epoch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClockStates {
    /// Clock bias, in meters
    pub bias_m: Vec<f64>,
    /// Clock drift, in m.s⁻¹
    pub drift_m_s: Vec<f64>,
}

impl ClockStates {
    /// Null [ClockStates] (perfect receiver clock)
    pub fn zeros(n_epochs: usize) -> Self {
        Self {
            bias_m: vec![0.0; n_epochs],
            drift_m_s: vec![0.0; n_epochs],
        }
    }
}

/// Receiver clock model. Must return exactly `n_epochs` samples.
pub trait ClockModel {
    /// Generates the clock states for `n_epochs` epochs spaced by `step_s` seconds.
    /// Any error aborts the simulation.
    fn clock_states(&mut self, step_s: f64, n_epochs: usize) -> Result<ClockStates, Error>;
}

/// Two-state (bias, drift) random process driven by [AllanVariance] coefficients.
/// The process starts from a null state.
pub struct AllanClock {
    variance: AllanVariance,
    rng: SmallRng,
}

impl AllanClock {
    /// Builds a new [AllanClock] with reproducible random generator
    pub fn new(variance: AllanVariance, seed: u64) -> Self {
        Self {
            variance,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Builds a new [AllanClock] seeded from system entropy
    pub fn from_entropy(variance: AllanVariance) -> Self {
        let mut generator = rand::rng();
        Self {
            variance,
            rng: SmallRng::from_rng(&mut generator),
        }
    }
}

impl ClockModel for AllanClock {
    fn clock_states(&mut self, step_s: f64, n_epochs: usize) -> Result<ClockStates, Error> {
        let q_k = self.variance.process_covariance(step_s);

        if !(q_k[(0, 0)] > 0.0 && q_k.determinant() > 0.0) {
            return Err(Error::ClockModel(
                "process covariance is not positive definite".to_string(),
            ));
        }

        let l_k = q_k
            .cholesky()
            .ok_or(Error::ClockModel("cholesky decomposition".to_string()))?
            .l();

        let f_k = Matrix2::new(1.0, step_s, 0.0, 1.0);

        debug!("clock process noise: {}", q_k);

        let mut states = ClockStates {
            bias_m: Vec::with_capacity(n_epochs),
            drift_m_s: Vec::with_capacity(n_epochs),
        };

        let mut x_k = Vector2::<f64>::zeros();

        for _ in 0..n_epochs {
            states.bias_m.push(x_k[0]);
            states.drift_m_s.push(x_k[1]);

            let w_k = Vector2::<f64>::new(
                StandardNormal.sample(&mut self.rng),
                StandardNormal.sample(&mut self.rng),
            );

            x_k = f_k * x_k + l_k * w_k;
        }

        Ok(states)
    }
}
