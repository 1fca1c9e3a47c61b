//! Measurement simulation driver
use std::collections::BTreeMap;
use std::str::FromStr;

use itertools::Itertools;
use log::{debug, info, warn};

use crate::{
    bias::{IonosphereBias, IonosphereModel, TroposphereBias, TroposphereModel},
    cfg::Config,
    clock::{AllanClock, ClockModel, ClockProfile, ClockStates},
    emitter::{mask, EmitterSnapshot, EmitterSource},
    error::Error,
    output::SimulationOutput,
    prelude::SV,
    receiver::{ReceiverStates, Trajectory},
    signal::SignalTable,
    synthesizer::{ObservableSynthesizer, Observables},
    time::EpochGrid,
    tracker::DelayTracker,
};

/// [Simulation] life cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SimulationState {
    /// Configured, nothing computed yet
    #[default]
    Uninitialized,
    /// Receiver states and emitters in view are known
    Ready,
    /// All epochs were processed. A [Simulation] is single pass.
    Complete,
}

impl std::fmt::Display for SimulationState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "uninitialized"),
            Self::Ready => write!(f, "ready"),
            Self::Complete => write!(f, "complete"),
        }
    }
}

/// [Simulation] emulates the measurements of a receiver following a
/// [Trajectory], tracking the emitters provided by an [EmitterSource].
///
/// ```
/// use gnss_sim::prelude::*;
///
/// struct NoEmitters;
///
/// impl EmitterSource for NoEmitters {
///     fn visible_emitters(
///         &self,
///         epochs: &[Epoch],
///         _: &[Vector3<f64>],
///         _: &[Vector3<f64>],
///     ) -> Result<Vec<EmitterSnapshot>, Error> {
///         Ok(vec![EmitterSnapshot::new(); epochs.len()])
///     }
/// }
///
/// let cfg = Config::default();
/// let mut simulation = Simulation::new(&cfg, Box::new(NoEmitters)).unwrap();
///
/// simulation
///     .simulate(&Trajectory::fixed(6378137.0, 0.0, 0.0))
///     .unwrap();
///
/// assert_eq!(simulation.state(), SimulationState::Complete);
/// assert_eq!(simulation.observables().len(), 61);
/// ```
pub struct Simulation {
    cfg: Config,
    state: SimulationState,
    grid: EpochGrid,
    signals: SignalTable,
    source: Box<dyn EmitterSource>,
    clock: Option<Box<dyn ClockModel>>,
    tracker: DelayTracker,
    synthesizer: ObservableSynthesizer,
    receiver: Option<ReceiverStates>,
    emitters: Vec<EmitterSnapshot>,
    observables: Vec<BTreeMap<SV, Observables>>,
}

impl Simulation {
    /// Deploys a new [Simulation]. The [Config] is entirely verified
    /// and the selected error models are built, so configuration errors
    /// are reported here, before any expensive work.
    pub fn new(cfg: &Config, source: Box<dyn EmitterSource>) -> Result<Self, Error> {
        cfg.validate()?;

        let grid = EpochGrid::from_config(&cfg.time)?;
        let signals = SignalTable::from_config(&cfg.constellations)?;

        if signals.is_empty() {
            warn!("no signal described: emitters will not be tracked");
        }

        let ionosphere = cfg
            .errors
            .ionosphere
            .as_ref()
            .map(|name| IonosphereModel::from_str(name))
            .transpose()?;

        let troposphere = cfg
            .errors
            .troposphere
            .as_ref()
            .map(|name| TroposphereModel::from_str(name))
            .transpose()?;

        let profile = cfg
            .errors
            .rx_clock
            .as_ref()
            .map(|name| ClockProfile::from_str(name))
            .transpose()?;

        let (synthesizer, clock) = match cfg.errors.seed {
            Some(seed) => {
                let synthesizer = ObservableSynthesizer::new(&cfg.errors, signals.clone(), seed)?;
                let clock = profile.map(|profile| {
                    AllanClock::new(profile.allan_variance(), seed.wrapping_add(1))
                });
                (synthesizer, clock)
            },
            None => {
                let synthesizer = ObservableSynthesizer::from_entropy(&cfg.errors, signals.clone())?;
                let clock =
                    profile.map(|profile| AllanClock::from_entropy(profile.allan_variance()));
                (synthesizer, clock)
            },
        };

        let mut tracker = DelayTracker::new(grid.step_s, signals.clone());

        if let Some(model) = ionosphere {
            debug!("ionosphere model: {:?}", model);
            tracker.set_ionosphere(Some(Box::new(model)));
        }

        if let Some(model) = troposphere {
            debug!("troposphere model: {:?}", model);
            tracker.set_troposphere(Some(Box::new(model)));
        }

        if let Some(profile) = profile {
            debug!("receiver clock: {}", profile);
        }

        info!(
            "epoch grid: {} epochs from {} to {} ({}s step)",
            grid.len(),
            grid.start,
            grid.end(),
            grid.step_s
        );

        Ok(Self {
            cfg: cfg.clone(),
            state: SimulationState::Uninitialized,
            grid,
            signals,
            source,
            clock: clock.map(|clock| Box::new(clock) as Box<dyn ClockModel>),
            tracker,
            synthesizer,
            receiver: None,
            emitters: Vec::new(),
            observables: Vec::new(),
        })
    }

    /// Replaces the ionosphere model with your own implementation
    pub fn with_ionosphere(mut self, model: Box<dyn IonosphereBias>) -> Self {
        self.tracker.set_ionosphere(Some(model));
        self
    }

    /// Replaces the troposphere model with your own implementation
    pub fn with_troposphere(mut self, model: Box<dyn TroposphereBias>) -> Self {
        self.tracker.set_troposphere(Some(model));
        self
    }

    /// Replaces the receiver clock model with your own implementation
    pub fn with_clock(mut self, model: Box<dyn ClockModel>) -> Self {
        self.clock = Some(model);
        self
    }

    /// Computes the receiver states and the emitters in view at every epoch.
    /// Every emitter must belong to a described constellation:
    /// this is verified here, before any epoch gets processed.
    pub fn prepare(&mut self, trajectory: &Trajectory) -> Result<(), Error> {
        if self.state == SimulationState::Complete {
            return Err(Error::AlreadyComplete);
        }

        let n = self.grid.len();

        let clock = match &mut self.clock {
            Some(clock) => clock.clock_states(self.grid.step_s, n)?,
            None => ClockStates::zeros(n),
        };

        let receiver = ReceiverStates::new(&self.grid, trajectory, clock)?;

        info!("{} receiver states", receiver.len());

        let mut emitters = self.source.visible_emitters(
            self.grid.epochs(),
            &receiver.position_m,
            &receiver.velocity_m_s,
        )?;

        if emitters.len() != n {
            return Err(Error::MisalignedSnapshots {
                expected: n,
                found: emitters.len(),
            });
        }

        for snapshot in emitters.iter_mut() {
            mask(snapshot, self.cfg.constellations.mask_angle_deg);
        }

        for constellation in emitters
            .iter()
            .flat_map(|snapshot| snapshot.keys())
            .map(|sv| sv.constellation)
            .unique()
        {
            self.signals.resolve(&constellation)?;
        }

        info!(
            "{} distinct emitters in view",
            emitters
                .iter()
                .flat_map(|snapshot| snapshot.keys())
                .unique()
                .count()
        );

        self.receiver = Some(receiver);
        self.emitters = emitters;
        self.state = SimulationState::Ready;
        Ok(())
    }

    /// Processes all epochs, in chronological order.
    /// Must be [Self::prepare]d first. Any failure aborts the run:
    /// observables of the epochs processed so far are kept.
    pub fn run(&mut self) -> Result<(), Error> {
        match self.state {
            SimulationState::Uninitialized => return Err(Error::NotReady),
            SimulationState::Complete => return Err(Error::AlreadyComplete),
            SimulationState::Ready => {},
        }

        let receiver = self.receiver.as_ref().ok_or(Error::NotReady)?;

        // single pass, even on failure
        self.state = SimulationState::Complete;

        for (k, snapshot) in self.emitters.iter().enumerate() {
            let delays =
                self.tracker
                    .reconcile_and_compute(snapshot, &receiver.position_m[k], k)?;

            let observables = self.synthesizer.synthesize(
                snapshot,
                &delays,
                receiver.clock_bias_m[k],
                receiver.clock_drift_m_s[k],
            )?;

            self.observables.push(observables);
        }

        info!("simulation complete: {} epochs", self.observables.len());
        Ok(())
    }

    /// [Self::prepare] then [Self::run]
    pub fn simulate(&mut self, trajectory: &Trajectory) -> Result<(), Error> {
        self.prepare(trajectory)?;
        self.run()
    }

    /// Current [SimulationState]
    pub fn state(&self) -> SimulationState {
        self.state
    }

    /// [Config] of this [Simulation]
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn epoch_grid(&self) -> &EpochGrid {
        &self.grid
    }

    /// [ReceiverStates], once [SimulationState::Ready]
    pub fn receiver_states(&self) -> Option<&ReceiverStates> {
        self.receiver.as_ref()
    }

    /// Emitters in view at each epoch, once [SimulationState::Ready]
    pub fn emitter_states(&self) -> &[EmitterSnapshot] {
        &self.emitters
    }

    /// [Observables] of each epoch
    pub fn observables(&self) -> &[BTreeMap<SV, Observables>] {
        &self.observables
    }

    pub fn signal_descriptors(&self) -> &SignalTable {
        &self.signals
    }

    /// [DelayTracker] and its current state
    pub fn tracker(&self) -> &DelayTracker {
        &self.tracker
    }

    /// Results to hand over to an exporter, once [SimulationState::Complete]
    pub fn output(&self) -> Option<SimulationOutput<'_>> {
        if self.state != SimulationState::Complete {
            return None;
        }
        let receiver = self.receiver.as_ref()?;
        Some(SimulationOutput::new(
            &self.grid,
            receiver,
            &self.emitters,
            &self.observables,
            &self.signals,
        ))
    }
}
