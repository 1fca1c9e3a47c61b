//! Observables synthesis
use std::collections::BTreeMap;

use rand::{rngs::SmallRng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::{
    cfg::ErrorConfig,
    cn0::carrier_to_noise_dbhz,
    constants::SPEED_OF_LIGHT_M_S,
    emitter::EmitterSnapshot,
    error::Error,
    prelude::SV,
    signal::SignalTable,
    tracker::ChannelDelays,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// [Observables] emulated for one emitter, at one epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Observables {
    /// Code pseudo range, in meters
    pub code_pseudorange: f64,
    /// Carrier pseudo range, in meters
    pub carrier_pseudorange: f64,
    /// Pseudo range rate, in m.s⁻¹
    pub pseudorange_rate: f64,
    /// Carrier Doppler shift, in Hz. Positive for closing emitters.
    pub carrier_doppler: f64,
    /// Carrier to noise density ratio, in dB.Hz
    pub cn0: f64,
}

/// Additive white gaussian noise, on each observable.
#[derive(Debug, Clone)]
struct NoiseModel {
    code: Option<Normal<f64>>,
    carrier: Option<Normal<f64>>,
    rate: Option<Normal<f64>>,
    rng: SmallRng,
}

impl NoiseModel {
    fn new(cfg: &ErrorConfig, rng: SmallRng) -> Result<Self, Error> {
        Ok(Self {
            code: Self::distribution(cfg.pseudorange_awgn_sigma)?,
            carrier: Self::distribution(cfg.carr_psr_awgn_sigma)?,
            rate: Self::distribution(cfg.pseudorange_rate_awgn_sigma)?,
            rng,
        })
    }

    /// Null sigma means noiseless: the generator is then not consumed.
    fn distribution(sigma: f64) -> Result<Option<Normal<f64>>, Error> {
        if sigma == 0.0 {
            Ok(None)
        } else {
            let normal = Normal::new(0.0, sigma).map_err(|_| Error::InvalidNoiseSigma)?;
            Ok(Some(normal))
        }
    }

    fn draw(rng: &mut SmallRng, normal: &Option<Normal<f64>>) -> f64 {
        match normal {
            Some(normal) => normal.sample(rng),
            None => 0.0,
        }
    }
}

/// [ObservableSynthesizer] combines geometry, delays, receiver clock and noise.
/// Other than its random generator, it is stateless.
#[derive(Debug, Clone)]
pub struct ObservableSynthesizer {
    signals: SignalTable,
    noise: NoiseModel,
}

impl ObservableSynthesizer {
    /// Builds a new [ObservableSynthesizer]. Noise sigmas are picked from
    /// [ErrorConfig], the noise generator is seeded with `seed`.
    pub fn new(cfg: &ErrorConfig, signals: SignalTable, seed: u64) -> Result<Self, Error> {
        Ok(Self {
            signals,
            noise: NoiseModel::new(cfg, SmallRng::seed_from_u64(seed))?,
        })
    }

    /// Builds a new [ObservableSynthesizer] seeded from system entropy
    pub fn from_entropy(cfg: &ErrorConfig, signals: SignalTable) -> Result<Self, Error> {
        let mut generator = rand::rng();
        Ok(Self {
            signals,
            noise: NoiseModel::new(cfg, SmallRng::from_rng(&mut generator))?,
        })
    }

    /// Synthesizes the [Observables] of each emitter in view.
    /// `delays` must cover every emitter in view: use
    /// [ChannelDelays::default] for a delay free channel.
    /// Noise is drawn in [SV] order, code then carrier then rate,
    /// so seeded runs are reproducible.
    pub fn synthesize(
        &mut self,
        emitters: &EmitterSnapshot,
        delays: &BTreeMap<SV, ChannelDelays>,
        clock_bias_m: f64,
        clock_drift_m_s: f64,
    ) -> Result<BTreeMap<SV, Observables>, Error> {
        let mut observables = BTreeMap::new();

        for (sv, emitter) in emitters.iter() {
            let descriptor = self.signals.resolve(&sv.constellation)?;
            let delay = delays
                .get(sv)
                .copied()
                .ok_or(Error::MissingChannelDelays(*sv))?;

            let noise = &mut self.noise;
            let code_noise = NoiseModel::draw(&mut noise.rng, &noise.code);
            let carrier_noise = NoiseModel::draw(&mut noise.rng, &noise.carrier);
            let rate_noise = NoiseModel::draw(&mut noise.rng, &noise.rate);

            let code_pseudorange = emitter.range_m + delay.code_m + clock_bias_m + code_noise;

            let carrier_pseudorange =
                emitter.range_m + delay.carrier_m + clock_bias_m + carrier_noise;

            let pseudorange_rate =
                emitter.range_rate_m_s + delay.drift_m_s + clock_drift_m_s + rate_noise;

            let carrier_doppler = -pseudorange_rate * descriptor.frequency_hz / SPEED_OF_LIGHT_M_S;

            let cn0 = carrier_to_noise_dbhz(
                emitter.range_m,
                descriptor.transmit_power_dbw,
                descriptor.transmit_antenna_gain_dbi,
                descriptor.frequency_hz,
                descriptor.js_db,
            );

            observables.insert(
                *sv,
                Observables {
                    code_pseudorange,
                    carrier_pseudorange,
                    pseudorange_rate,
                    carrier_doppler,
                    cn0,
                },
            );
        }

        Ok(observables)
    }
}
