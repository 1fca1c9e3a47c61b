use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

fn default_mask_angle() -> f64 {
    10.0
}

fn default_emitters() -> BTreeMap<String, SignalConfig> {
    let mut emitters = BTreeMap::new();
    emitters.insert(
        "gps".to_string(),
        SignalConfig {
            signal: "gpsl1ca".to_string(),
            js_db: None,
        },
    );
    emitters
}

/// Signal emitted by one constellation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SignalConfig {
    /// Signal name, for example "gpsl1ca" (case insensitive)
    pub signal: String,
    /// Jamming to signal ratio (dB), when interference is emulated
    #[cfg_attr(feature = "serde", serde(default))]
    pub js_db: Option<f64>,
}

/// Emitting constellations
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConstellationsConfig {
    /// Elevation mask (degrees): emitters below are not in view
    #[cfg_attr(feature = "serde", serde(default = "default_mask_angle"))]
    pub mask_angle_deg: f64,
    /// Emitted signal, per constellation name (case insensitive)
    #[cfg_attr(feature = "serde", serde(default = "default_emitters"))]
    pub emitters: BTreeMap<String, SignalConfig>,
}

impl Default for ConstellationsConfig {
    fn default() -> Self {
        Self {
            mask_angle_deg: default_mask_angle(),
            emitters: default_emitters(),
        }
    }
}
