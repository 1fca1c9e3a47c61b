

use log::LevelFilter;
use std::sync::Once;

use crate::prelude::{
    Constellation, EmitterSnapshot, EmitterSource, EmitterState, Epoch, Error, Vector3, SV,
};

static INIT: Once = Once::new();

pub fn init_logger() {
    INIT.call_once(|| {
        env_logger::builder()
            .is_test(true)
            .filter_level(LevelFilter::Debug)
            .init();
    });
}

pub fn gps(prn: u8) -> SV {
    SV::new(Constellation::GPS, prn)
}

pub fn galileo(prn: u8) -> SV {
    SV::new(Constellation::Galileo, prn)
}

pub fn reference_epoch() -> Epoch {
    Epoch::from_gregorian_utc_at_midnight(2023, 1, 1)
}

/// Emitter geometry, built directly (no orbit)
pub fn emitter(range_m: f64, range_rate_m_s: f64, elevation_deg: f64) -> EmitterState {
    EmitterState {
        t: reference_epoch(),
        range_m,
        range_rate_m_s,
        azimuth_deg: 120.0,
        elevation_deg,
        position_ecef_m: Vector3::new(26_378_137.0, 0.0, 0.0),
        velocity_ecef_m_s: Vector3::zeros(),
    }
}

/// [EmitterSource] that replays predefined snapshots,
/// whatever the requested epochs.
pub struct ScriptedSource {
    pub snapshots: Vec<EmitterSnapshot>,
}

impl EmitterSource for ScriptedSource {
    fn visible_emitters(
        &self,
        _: &[Epoch],
        _: &[Vector3<f64>],
        _: &[Vector3<f64>],
    ) -> Result<Vec<EmitterSnapshot>, Error> {
        Ok(self.snapshots.clone())
    }
}

/// [EmitterSource] with the same emitters in view at every epoch
pub struct ConstantSource {
    pub snapshot: EmitterSnapshot,
}

impl ConstantSource {
    /// Single GPS emitter, at constant range
    pub fn single(range_m: f64, range_rate_m_s: f64) -> Self {
        let mut snapshot = EmitterSnapshot::new();
        snapshot.insert(gps(1), emitter(range_m, range_rate_m_s, 45.0));
        Self { snapshot }
    }
}

impl EmitterSource for ConstantSource {
    fn visible_emitters(
        &self,
        epochs: &[Epoch],
        _: &[Vector3<f64>],
        _: &[Vector3<f64>],
    ) -> Result<Vec<EmitterSnapshot>, Error> {
        Ok(epochs
            .iter()
            .map(|t| {
                self.snapshot
                    .iter()
                    .map(|(sv, state)| {
                        let mut state = *state;
                        state.t = *t;
                        (*sv, state)
                    })
                    .collect()
            })
            .collect())
    }
}

/// [EmitterSource] that always fails
pub struct FailingSource;

impl EmitterSource for FailingSource {
    fn visible_emitters(
        &self,
        _: &[Epoch],
        _: &[Vector3<f64>],
        _: &[Vector3<f64>],
    ) -> Result<Vec<EmitterSnapshot>, Error> {
        Err(Error::EmitterSource("propagation failure".to_string()))
    }
}

/// Static receiver on the equator
pub fn reference_position() -> Vector3<f64> {
    Vector3::new(6_378_137.0, 0.0, 0.0)
}
