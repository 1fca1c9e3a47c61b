use crate::{
    cfg::TimeConfig,
    error::Error,
    prelude::{Duration, Epoch},
};

/// Fixed step sampling grid of the simulation.
///
/// The grid holds `ceil(duration / step) + 1` samples, with `step = 1 / rate`,
/// evenly spread over [0, duration] (both ends included).
#[derive(Debug, Clone, PartialEq)]
pub struct EpochGrid {
    /// Initial [Epoch]
    pub start: Epoch,
    /// Sampling rate, in Hz
    pub sampling_rate_hz: f64,
    /// Nominal step, in seconds
    pub step_s: f64,
    /// Total duration, in seconds
    pub duration_s: f64,
    offsets_s: Vec<f64>,
    epochs: Vec<Epoch>,
}

impl EpochGrid {
    /// Builds a new [EpochGrid]
    pub fn new(start: Epoch, duration_s: f64, sampling_rate_hz: f64) -> Result<Self, Error> {
        if !(sampling_rate_hz > 0.0) || !sampling_rate_hz.is_finite() {
            return Err(Error::InvalidSamplingRate);
        }
        if !(duration_s >= 0.0) || !duration_s.is_finite() {
            return Err(Error::InvalidDuration);
        }

        let step_s = 1.0 / sampling_rate_hz;
        let n = (duration_s / step_s).ceil() as usize + 1;

        let offsets_s = (0..n)
            .map(|i| {
                if i == n - 1 {
                    duration_s
                } else {
                    duration_s * i as f64 / (n - 1) as f64
                }
            })
            .collect::<Vec<_>>();

        let epochs = offsets_s
            .iter()
            .map(|dt| start + Duration::from_seconds(*dt))
            .collect();

        Ok(Self {
            start,
            sampling_rate_hz,
            step_s,
            duration_s,
            offsets_s,
            epochs,
        })
    }

    /// Builds the [EpochGrid] described by [TimeConfig]
    pub fn from_config(cfg: &TimeConfig) -> Result<Self, Error> {
        Self::new(cfg.start_epoch()?, cfg.duration_s, cfg.sampling_rate_hz)
    }

    /// Number of epochs
    pub fn len(&self) -> usize {
        self.epochs.len()
    }

    /// Always false: a grid holds at least its initial epoch.
    pub fn is_empty(&self) -> bool {
        self.epochs.is_empty()
    }

    /// Elapsed time since [Self::start], in seconds, for each epoch
    pub fn offsets_s(&self) -> &[f64] {
        &self.offsets_s
    }

    /// Sampling [Epoch]s
    pub fn epochs(&self) -> &[Epoch] {
        &self.epochs
    }

    /// Final [Epoch]
    pub fn end(&self) -> Epoch {
        self.epochs.last().copied().unwrap_or(self.start)
    }
}
