use crate::constants::SPEED_OF_LIGHT_M_S;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Eq, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Carrier {
    /// L1 (GPS/QZSS/SBAS) same frequency as E1 and B1aB1c
    #[default]
    L1,
    /// L2 (GPS/QZSS)
    L2,
    /// L5 (GPS/QZSS/SBAS) same frequency as E5A and B2A
    L5,
    /// E1 (Galileo)
    E1,
    /// E5A (Galileo) same frequency as L5
    E5A,
    /// B1I (BDS)
    B1I,
    /// G1 (Glonass) FDMA band, center frequency
    G1,
}

impl std::fmt::Display for Carrier {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        match self {
            Self::L1 => write!(f, "L1"),
            Self::L2 => write!(f, "L2"),
            Self::L5 => write!(f, "L5"),
            Self::E1 => write!(f, "E1"),
            Self::E5A => write!(f, "E5A"),
            Self::B1I => write!(f, "B1I"),
            Self::G1 => write!(f, "G1"),
        }
    }
}

impl Carrier {
    /// Carrier frequency in Hz
    pub fn frequency(&self) -> f64 {
        match self {
            Self::L1 | Self::E1 => 1575.42E6_f64,
            Self::L2 => 1227.60E6_f64,
            Self::L5 | Self::E5A => 1176.45E6_f64,
            Self::B1I => 1561.098E6_f64,
            Self::G1 => 1602.0E6_f64,
        }
    }

    /// Carrier wavelength in meters
    pub fn wavelength(&self) -> f64 {
        SPEED_OF_LIGHT_M_S / self.frequency()
    }
}

#[cfg(test)]
mod test {
    use super::Carrier;

    #[test]
    fn l1_wavelength() {
        let lambda = Carrier::L1.wavelength();
        assert!((lambda - 0.1903).abs() < 1.0E-4, "L1 wavelength: {}", lambda);
        assert_eq!(Carrier::E1.frequency(), Carrier::L1.frequency());
        assert_eq!(Carrier::E5A.frequency(), Carrier::L5.frequency());
    }
}
