use serde::{Deserialize, Serialize};

/// Gain fractions applied to each layer of the final mix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeMix {
    pub voice: f64,
    pub binaural: f64,
    pub background: f64,
    pub environment: f64,
}

impl VolumeMix {
    pub fn validate(&self) -> Result<(), VolumeMixError> {
        for (name, gain) in [
            ("voice", self.voice),
            ("binaural", self.binaural),
            ("background", self.background),
            ("environment", self.environment),
        ] {
            if !gain.is_finite() || !(0.0..=1.0).contains(&gain) {
                return Err(VolumeMixError::OutOfRange { name, gain });
            }
        }
        Ok(())
    }
}

impl Default for VolumeMix {
    fn default() -> Self {
        Self {
            voice: 0.05,
            binaural: 0.1,
            background: 0.7,
            environment: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VolumeMixError {
    #[error("{name} gain must be within [0, 1], got {gain}")]
    OutOfRange { name: &'static str, gain: f64 },
}
