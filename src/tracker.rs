//! Per emitter delay tracking, across epochs
use std::collections::{BTreeMap, HashMap};

use itertools::Itertools;
use log::debug;
use nalgebra::Vector3;

use crate::{
    bias::{IonosphereBias, IonosphereRuntime, TroposphereBias, TroposphereRuntime},
    emitter::EmitterSnapshot,
    error::Error,
    prelude::SV,
    signal::SignalTable,
};

/// Outcome of one [DelayTable] reconciliation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciliation {
    /// Emitters that were not tracked and got seeded to 0.
    pub entering: Vec<SV>,
    /// Emitters that were tracked and got dropped.
    pub leaving: Vec<SV>,
}

impl Reconciliation {
    /// True when the visible set did not change
    pub fn is_empty(&self) -> bool {
        self.entering.is_empty() && self.leaving.is_empty()
    }
}

/// Most recent delay (in meters) of each tracked emitter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DelayTable {
    inner: HashMap<SV, f64>,
}

impl DelayTable {
    /// Aligns the tracked emitters with the visible set:
    /// entering emitters are seeded to 0, leaving emitters are dropped.
    /// Both lists are returned in [SV] order.
    pub fn reconcile(&mut self, visible: &EmitterSnapshot) -> Reconciliation {
        let entering = visible
            .keys()
            .filter(|sv| !self.inner.contains_key(sv))
            .copied()
            .collect::<Vec<_>>();

        let leaving = self
            .inner
            .keys()
            .filter(|sv| !visible.contains_key(sv))
            .copied()
            .sorted()
            .collect::<Vec<_>>();

        for sv in entering.iter() {
            self.inner.insert(*sv, 0.0);
        }

        for sv in leaving.iter() {
            self.inner.remove(sv);
        }

        Reconciliation { entering, leaving }
    }

    /// Previous delay of this emitter, if tracked
    pub fn previous(&self, sv: &SV) -> Option<f64> {
        self.inner.get(sv).copied()
    }

    /// Overwrites the delay of this emitter
    pub fn update(&mut self, sv: SV, delay_m: f64) {
        self.inner.insert(sv, delay_m);
    }

    pub fn contains(&self, sv: &SV) -> bool {
        self.inner.contains_key(sv)
    }

    /// Tracked emitters, in [SV] order
    pub fn tracked(&self) -> Vec<SV> {
        self.inner.keys().copied().sorted().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// Cross epoch [DelayState], one [DelayTable] per error source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DelayState {
    pub ionosphere: DelayTable,
    pub troposphere: DelayTable,
}

/// Delays and drift applied to one channel, at one epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChannelDelays {
    /// Delay applied to the code pseudo range, in meters
    pub code_m: f64,
    /// Delay applied to the carrier pseudo range, in meters
    pub carrier_m: f64,
    /// Delay drift applied to the pseudo range rate, in m.s⁻¹
    pub drift_m_s: f64,
}

impl ChannelDelays {
    /// Composes [ChannelDelays] from the atmospheric contributions.
    /// The ionosphere delays the code and advances the carrier phase.
    pub fn compose(iono_m: f64, tropo_m: f64, iono_drift_m_s: f64, tropo_drift_m_s: f64) -> Self {
        Self {
            code_m: iono_m + tropo_m,
            carrier_m: -iono_m + tropo_m,
            drift_m_s: -iono_drift_m_s + tropo_drift_m_s,
        }
    }
}

/// [DelayTracker] owns the [DelayState] and the atmosphere models.
/// Epochs must be processed in chronological order:
/// drifts are backward differences against the previous epoch.
pub struct DelayTracker {
    /// Nominal step, in seconds
    step_s: f64,
    signals: SignalTable,
    ionosphere: Option<Box<dyn IonosphereBias>>,
    troposphere: Option<Box<dyn TroposphereBias>>,
    state: Option<DelayState>,
}

impl DelayTracker {
    /// Builds a new [DelayTracker] with both atmosphere models disabled.
    pub fn new(step_s: f64, signals: SignalTable) -> Self {
        Self {
            step_s,
            signals,
            ionosphere: None,
            troposphere: None,
            state: None,
        }
    }

    /// Enables the ionosphere delay, using this model
    pub fn with_ionosphere(mut self, model: Box<dyn IonosphereBias>) -> Self {
        self.ionosphere = Some(model);
        self
    }

    /// Enables the troposphere delay, using this model
    pub fn with_troposphere(mut self, model: Box<dyn TroposphereBias>) -> Self {
        self.troposphere = Some(model);
        self
    }

    pub(crate) fn set_ionosphere(&mut self, model: Option<Box<dyn IonosphereBias>>) {
        self.ionosphere = model;
    }

    pub(crate) fn set_troposphere(&mut self, model: Option<Box<dyn TroposphereBias>>) {
        self.troposphere = model;
    }

    pub fn ionosphere_enabled(&self) -> bool {
        self.ionosphere.is_some()
    }

    pub fn troposphere_enabled(&self) -> bool {
        self.troposphere.is_some()
    }

    /// Current [DelayState]. None until the first epoch is processed.
    pub fn state(&self) -> Option<&DelayState> {
        self.state.as_ref()
    }

    /// Reconciles the [DelayState] with the emitters in view, then computes
    /// the [ChannelDelays] of each visible emitter. The returned map covers
    /// exactly the keys of `emitters`.
    pub fn reconcile_and_compute(
        &mut self,
        emitters: &EmitterSnapshot,
        rx_position_m: &Vector3<f64>,
        epoch_index: usize,
    ) -> Result<BTreeMap<SV, ChannelDelays>, Error> {
        let state = self.state.get_or_insert_with(DelayState::default);

        let iono_churn = state.ionosphere.reconcile(emitters);
        let tropo_churn = state.troposphere.reconcile(emitters);

        if !iono_churn.is_empty() {
            debug!(
                "epoch #{} - entering: {:?} leaving: {:?}",
                epoch_index, iono_churn.entering, iono_churn.leaving
            );
        }

        debug_assert_eq!(iono_churn, tropo_churn);

        let mut delays = BTreeMap::new();

        for (sv, emitter) in emitters.iter() {
            let descriptor = self.signals.resolve(&sv.constellation)?;

            let iono_m = match &self.ionosphere {
                Some(model) => model.ionosphere_bias_m(&IonosphereRuntime {
                    t: emitter.t,
                    rx_ecef_m: *rx_position_m,
                    emitter_ecef_m: emitter.position_ecef_m,
                    azimuth_deg: emitter.azimuth_deg,
                    elevation_deg: emitter.elevation_deg,
                    frequency_hz: descriptor.frequency_hz,
                })?,
                None => 0.0,
            };

            let tropo_m = match &self.troposphere {
                Some(model) => model.troposphere_bias_m(&TroposphereRuntime {
                    rx_ecef_m: *rx_position_m,
                    elevation_deg: emitter.elevation_deg,
                })?,
                None => 0.0,
            };

            let prev_iono_m = state.ionosphere.previous(sv).unwrap_or_default();
            let prev_tropo_m = state.troposphere.previous(sv).unwrap_or_default();

            let iono_drift_m_s = (iono_m - prev_iono_m) / self.step_s;
            let tropo_drift_m_s = (tropo_m - prev_tropo_m) / self.step_s;

            state.ionosphere.update(*sv, iono_m);
            state.troposphere.update(*sv, tropo_m);

            let channel = ChannelDelays::compose(iono_m, tropo_m, iono_drift_m_s, tropo_drift_m_s);

            debug!(
                "epoch #{} ({}) - iono={:.3}m tropo={:.3}m drift={:.3E}m/s",
                epoch_index, sv, iono_m, tropo_m, channel.drift_m_s
            );

            delays.insert(*sv, channel);
        }

        Ok(delays)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::emitter::EmitterState;
    use crate::prelude::{Constellation, Epoch};
    use crate::signal::{Signal, SignalDescriptor};

    struct ConstantIono(f64);

    impl IonosphereBias for ConstantIono {
        fn ionosphere_bias_m(&self, _: &IonosphereRuntime) -> Result<f64, Error> {
            Ok(self.0)
        }
    }

    struct ConstantTropo(f64);

    impl TroposphereBias for ConstantTropo {
        fn troposphere_bias_m(&self, _: &TroposphereRuntime) -> Result<f64, Error> {
            Ok(self.0)
        }
    }

    fn gps(prn: u8) -> SV {
        SV::new(Constellation::GPS, prn)
    }

    fn snapshot(svs: &[SV]) -> EmitterSnapshot {
        let t = Epoch::from_gregorian_utc_at_midnight(2023, 1, 1);
        svs.iter()
            .map(|sv| {
                (
                    *sv,
                    EmitterState {
                        t,
                        range_m: 20.0E6,
                        range_rate_m_s: 0.0,
                        azimuth_deg: 0.0,
                        elevation_deg: 45.0,
                        position_ecef_m: Vector3::zeros(),
                        velocity_ecef_m_s: Vector3::zeros(),
                    },
                )
            })
            .collect()
    }

    fn signals() -> SignalTable {
        let mut table = SignalTable::default();
        table.insert(Constellation::GPS, SignalDescriptor::new(Signal::GpsL1CA));
        table
    }

    #[test]
    fn table_reconciliation() {
        let mut table = DelayTable::default();

        let churn = table.reconcile(&snapshot(&[gps(3), gps(1)]));
        assert_eq!(churn.entering, vec![gps(1), gps(3)]);
        assert!(churn.leaving.is_empty());
        assert_eq!(table.previous(&gps(1)), Some(0.0));

        table.update(gps(1), 4.0);
        table.update(gps(3), 2.0);

        let churn = table.reconcile(&snapshot(&[gps(1), gps(5)]));
        assert_eq!(churn.entering, vec![gps(5)]);
        assert_eq!(churn.leaving, vec![gps(3)]);

        assert_eq!(table.tracked(), vec![gps(1), gps(5)]);
        assert_eq!(table.previous(&gps(1)), Some(4.0));
        assert_eq!(table.previous(&gps(5)), Some(0.0));
        assert_eq!(table.previous(&gps(3)), None);

        let churn = table.reconcile(&snapshot(&[gps(1), gps(5)]));
        assert!(churn.is_empty());
    }

    #[test]
    fn sign_convention() {
        let mut tracker = DelayTracker::new(1.0, signals())
            .with_ionosphere(Box::new(ConstantIono(10.0)))
            .with_troposphere(Box::new(ConstantTropo(5.0)));

        let delays = tracker
            .reconcile_and_compute(&snapshot(&[gps(1)]), &Vector3::zeros(), 0)
            .unwrap();

        let channel = delays[&gps(1)];
        assert_eq!(channel.code_m, 15.0);
        assert_eq!(channel.carrier_m, -5.0);
        // one epoch transient against the null seed
        assert_eq!(channel.drift_m_s, -10.0 + 5.0);

        let delays = tracker
            .reconcile_and_compute(&snapshot(&[gps(1)]), &Vector3::zeros(), 1)
            .unwrap();
        assert_eq!(delays[&gps(1)].drift_m_s, 0.0);
    }

    #[test]
    fn disabled_models() {
        let mut tracker = DelayTracker::new(0.5, signals());
        assert!(tracker.state().is_none());

        let delays = tracker
            .reconcile_and_compute(&snapshot(&[gps(1), gps(2)]), &Vector3::zeros(), 0)
            .unwrap();

        for channel in delays.values() {
            assert_eq!(*channel, ChannelDelays::default());
        }

        // bookkeeping still runs
        let state = tracker.state().unwrap();
        assert_eq!(state.ionosphere.tracked(), vec![gps(1), gps(2)]);
        assert_eq!(state.troposphere.tracked(), vec![gps(1), gps(2)]);
    }

    #[test]
    fn missing_descriptor() {
        let mut tracker = DelayTracker::new(1.0, signals());
        let galileo = SV::new(Constellation::Galileo, 1);
        assert_eq!(
            tracker.reconcile_and_compute(&snapshot(&[galileo]), &Vector3::zeros(), 0),
            Err(Error::MissingSignalDescriptor(Constellation::Galileo))
        );
    }
}
