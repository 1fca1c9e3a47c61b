use std::collections::BTreeMap;

use crate::{
    emitter::EmitterSnapshot,
    prelude::{Constellation, Epoch, SV},
    receiver::ReceiverStates,
    signal::{SignalDescriptor, SignalTable},
    synthesizer::Observables,
    time::EpochGrid,
};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Simulation results, handed over verbatim to exporters.
/// Everything is epoch indexed and aligned with [ReceiverStates].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SimulationOutput<'a> {
    /// Initial [Epoch]
    pub start: Epoch,
    /// Simulated duration, in seconds
    pub duration_s: f64,
    /// Sampling rate, in Hz
    pub sampling_rate_hz: f64,
    /// Receiver truth states
    pub receiver: &'a ReceiverStates,
    /// Emitters in view, at each epoch
    pub emitters: &'a [EmitterSnapshot],
    /// Emulated [Observables], at each epoch
    pub observables: &'a [BTreeMap<SV, Observables>],
    /// [SignalDescriptor] of each [Constellation]
    pub signals: BTreeMap<Constellation, &'a SignalDescriptor>,
}

impl<'a> SimulationOutput<'a> {
    pub(crate) fn new(
        grid: &EpochGrid,
        receiver: &'a ReceiverStates,
        emitters: &'a [EmitterSnapshot],
        observables: &'a [BTreeMap<SV, Observables>],
        signals: &'a SignalTable,
    ) -> Self {
        Self {
            start: grid.start,
            duration_s: grid.duration_s,
            sampling_rate_hz: grid.sampling_rate_hz,
            receiver,
            emitters,
            observables,
            signals: signals.iter().map(|(k, v)| (*k, v)).collect(),
        }
    }

    /// Output file name (without extension), for results produced at `now`:
    /// "{now}_GNSSSIM_{start}_{duration}_{rate}", dates formatted as YYYYMMDD-HHMMSS.
    pub fn file_stem(&self, now: Epoch) -> String {
        format!(
            "{}_GNSSSIM_{}_{}_{:?}",
            compact_datetime(now),
            compact_datetime(self.start),
            self.duration_s as u64,
            self.sampling_rate_hz,
        )
    }

    /// Number of epochs
    pub fn len(&self) -> usize {
        self.observables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observables.is_empty()
    }
}

fn compact_datetime(t: Epoch) -> String {
    let (y, m, d, hh, mm, ss, _) = t.to_gregorian_utc();
    format!("{:04}{:02}{:02}-{:02}{:02}{:02}", y, m, d, hh, mm, ss)
}
