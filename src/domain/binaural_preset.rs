use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const CARRIER_HZ: f64 = 440.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinauralPreset {
    #[default]
    Alpha,
    Beta,
    Theta,
    Delta,
}

impl BinauralPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinauralPreset::Alpha => "alpha",
            BinauralPreset::Beta => "beta",
            BinauralPreset::Theta => "theta",
            BinauralPreset::Delta => "delta",
        }
    }

    pub fn beat_hz(&self) -> f64 {
        match self {
            BinauralPreset::Alpha => 10.0,
            BinauralPreset::Beta => 20.0,
            BinauralPreset::Theta => 6.0,
            BinauralPreset::Delta => 3.0,
        }
    }

    pub fn tones(&self) -> BinauralTones {
        BinauralTones::around(CARRIER_HZ, self.beat_hz())
    }
}

impl FromStr for BinauralPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "alpha" => Ok(BinauralPreset::Alpha),
            "beta" => Ok(BinauralPreset::Beta),
            "theta" => Ok(BinauralPreset::Theta),
            "delta" => Ok(BinauralPreset::Delta),
            other => Err(format!(
                "Invalid binaural preset: {}. Expected: alpha, beta, theta, or delta",
                other
            )),
        }
    }
}

impl fmt::Display for BinauralPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Left/right tone pair whose difference is the perceived beat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinauralTones {
    pub left_hz: f64,
    pub right_hz: f64,
}

impl BinauralTones {
    pub fn around(carrier_hz: f64, beat_hz: f64) -> Self {
        Self {
            left_hz: carrier_hz - beat_hz / 2.0,
            right_hz: carrier_hz + beat_hz / 2.0,
        }
    }

    pub fn carrier_hz(&self) -> f64 {
        (self.left_hz + self.right_hz) / 2.0
    }

    pub fn beat_hz(&self) -> f64 {
        (self.right_hz - self.left_hz).abs()
    }
}
