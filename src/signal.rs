//! Navigation signals and per-constellation signal descriptors
use std::collections::BTreeMap;
use std::str::FromStr;

use log::warn;

use crate::{
    carrier::Carrier,
    cfg::ConstellationsConfig,
    error::Error,
    prelude::Constellation,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Navigation [Signal]s we know how to emulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Signal {
    /// GPS L1 C/A
    GpsL1CA,
    /// GPS L2C
    GpsL2C,
    /// GPS L5
    GpsL5,
    /// Galileo E1 OS
    GalileoE1,
    /// Galileo E5a
    GalileoE5a,
    /// BeiDou B1I
    BeidouB1I,
    /// Glonass L1 OF (center frequency)
    GlonassL1OF,
}

impl std::str::FromStr for Signal {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let c = s.trim().to_lowercase().replace(['_', '-', ' '], "");
        match c.as_str() {
            "gpsl1ca" | "gpsl1" => Ok(Self::GpsL1CA),
            "gpsl2c" | "gpsl2" => Ok(Self::GpsL2C),
            "gpsl5" => Ok(Self::GpsL5),
            "galileoe1" | "gale1" => Ok(Self::GalileoE1),
            "galileoe5a" | "gale5a" => Ok(Self::GalileoE5a),
            "beidoub1i" | "bdsb1i" => Ok(Self::BeidouB1I),
            "glonassl1of" | "glol1of" | "glonassl1" => Ok(Self::GlonassL1OF),
            _ => Err(Error::UnknownSignal(s.to_string())),
        }
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::GpsL1CA => write!(f, "GPS L1 C/A"),
            Self::GpsL2C => write!(f, "GPS L2C"),
            Self::GpsL5 => write!(f, "GPS L5"),
            Self::GalileoE1 => write!(f, "Galileo E1"),
            Self::GalileoE5a => write!(f, "Galileo E5a"),
            Self::BeidouB1I => write!(f, "BeiDou B1I"),
            Self::GlonassL1OF => write!(f, "Glonass L1OF"),
        }
    }
}

impl Signal {
    /// [Carrier] this [Signal] is modulated onto
    pub fn carrier(&self) -> Carrier {
        match self {
            Self::GpsL1CA => Carrier::L1,
            Self::GpsL2C => Carrier::L2,
            Self::GpsL5 => Carrier::L5,
            Self::GalileoE1 => Carrier::E1,
            Self::GalileoE5a => Carrier::E5A,
            Self::BeidouB1I => Carrier::B1I,
            Self::GlonassL1OF => Carrier::G1,
        }
    }

    /// Nominal transmit power in dBW
    pub fn transmit_power_dbw(&self) -> f64 {
        match self {
            Self::GpsL1CA => 14.3,
            Self::GpsL2C => 12.0,
            Self::GpsL5 => 15.0,
            Self::GalileoE1 | Self::GalileoE5a => 15.0,
            Self::BeidouB1I => 14.5,
            Self::GlonassL1OF => 14.0,
        }
    }

    /// Nominal transmit antenna gain in dBi
    pub fn transmit_antenna_gain_dbi(&self) -> f64 {
        match self {
            Self::GpsL1CA | Self::GpsL2C | Self::GpsL5 => 13.5,
            Self::GalileoE1 | Self::GalileoE5a | Self::BeidouB1I => 13.0,
            Self::GlonassL1OF => 12.0,
        }
    }
}

/// Static signal properties of one constellation, for the whole run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SignalDescriptor {
    /// Emulated [Signal]
    pub signal: Signal,
    /// Carrier frequency in Hz
    pub frequency_hz: f64,
    /// Transmit power in dBW
    pub transmit_power_dbw: f64,
    /// Transmit antenna gain in dBi
    pub transmit_antenna_gain_dbi: f64,
    /// Jamming to signal ratio in dB, when interference is emulated
    pub js_db: Option<f64>,
}

impl SignalDescriptor {
    /// Builds a [SignalDescriptor] from catalog values
    pub fn new(signal: Signal) -> Self {
        Self {
            signal,
            js_db: None,
            frequency_hz: signal.carrier().frequency(),
            transmit_power_dbw: signal.transmit_power_dbw(),
            transmit_antenna_gain_dbi: signal.transmit_antenna_gain_dbi(),
        }
    }

    /// Copies and returns [SignalDescriptor] with jamming to signal ratio (dB)
    pub fn with_jamming(&self, js_db: f64) -> Self {
        let mut s = *self;
        s.js_db = Some(js_db);
        s
    }
}

/// Per [Constellation] [SignalDescriptor] lookup table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignalTable {
    inner: BTreeMap<Constellation, SignalDescriptor>,
}

impl SignalTable {
    /// Builds the [SignalTable] described by [ConstellationsConfig].
    /// Constellation and signal names are case insensitive.
    pub fn from_config(cfg: &ConstellationsConfig) -> Result<Self, Error> {
        let mut table = Self::default();
        for (name, props) in cfg.emitters.iter() {
            let constellation = parse_constellation(name)?;
            let signal = Signal::from_str(&props.signal)?;

            let mut descriptor = SignalDescriptor::new(signal);
            if let Some(js_db) = props.js_db {
                if js_db > 60.0 {
                    warn!("{} - J/S={}dB will most likely prevent tracking", name, js_db);
                }
                descriptor = descriptor.with_jamming(js_db);
            }

            table.insert(constellation, descriptor);
        }
        Ok(table)
    }

    /// Defines (or replaces) the [SignalDescriptor] of this [Constellation]
    pub fn insert(&mut self, constellation: Constellation, descriptor: SignalDescriptor) {
        self.inner.insert(constellation, descriptor);
    }

    /// Resolves the [SignalDescriptor] of this [Constellation]
    pub fn resolve(&self, constellation: &Constellation) -> Result<&SignalDescriptor, Error> {
        self.inner
            .get(constellation)
            .ok_or(Error::MissingSignalDescriptor(*constellation))
    }

    /// Resolves the [SignalDescriptor] from a (case insensitive) constellation name
    pub fn resolve_name(&self, name: &str) -> Result<&SignalDescriptor, Error> {
        let constellation = parse_constellation(name)?;
        self.resolve(&constellation)
    }

    /// Iterates over all described [Constellation]s
    pub fn iter(&self) -> impl Iterator<Item = (&Constellation, &SignalDescriptor)> + '_ {
        self.inner.iter()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

pub(crate) fn parse_constellation(name: &str) -> Result<Constellation, Error> {
    Constellation::from_str(name).map_err(|_| Error::UnknownConstellation(name.to_string()))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::cfg::SignalConfig;
    use rstest::*;

    #[rstest]
    #[case("gpsl1ca", Signal::GpsL1CA)]
    #[case("GPSL1CA", Signal::GpsL1CA)]
    #[case("gps_l5", Signal::GpsL5)]
    #[case("Galileo-E1", Signal::GalileoE1)]
    #[case(" beidoub1i ", Signal::BeidouB1I)]
    fn signal_parsing(#[case] name: &str, #[case] expected: Signal) {
        assert_eq!(Signal::from_str(name), Ok(expected));
    }

    #[test]
    fn unknown_signal() {
        assert_eq!(
            Signal::from_str("l42"),
            Err(Error::UnknownSignal("l42".to_string()))
        );
    }

    #[test]
    fn case_insensitive_resolution() {
        let mut cfg = ConstellationsConfig::default();
        cfg.emitters.clear();
        cfg.emitters.insert(
            "GPS".to_string(),
            SignalConfig {
                signal: "gpsl1ca".to_string(),
                js_db: Some(10.0),
            },
        );

        let table = SignalTable::from_config(&cfg).unwrap();
        assert_eq!(table.len(), 1);

        for name in ["gps", "GPS", "Gps"] {
            let descriptor = table.resolve_name(name).unwrap();
            assert_eq!(descriptor.signal, Signal::GpsL1CA);
            assert_eq!(descriptor.frequency_hz, 1575.42E6);
            assert_eq!(descriptor.js_db, Some(10.0));
        }

        assert_eq!(
            table.resolve(&Constellation::Galileo),
            Err(Error::MissingSignalDescriptor(Constellation::Galileo))
        );
    }
}
