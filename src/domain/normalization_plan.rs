/// How a source track is brought to an exact target length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NormalizationPlan {
    Truncate { target_secs: f64 },
    Loop { repetitions: u32, target_secs: f64 },
}

impl NormalizationPlan {
    pub fn new(source_secs: f64, target_secs: f64) -> Result<Self, NormalizationError> {
        if !source_secs.is_finite() || source_secs <= 0.0 {
            return Err(NormalizationError::InvalidSource(source_secs));
        }
        if !target_secs.is_finite() || target_secs <= 0.0 {
            return Err(NormalizationError::InvalidTarget(target_secs));
        }

        if source_secs >= target_secs {
            return Ok(Self::Truncate { target_secs });
        }

        let repetitions = (target_secs / source_secs).ceil();
        if repetitions > u32::MAX as f64 {
            return Err(NormalizationError::TooManyRepetitions(repetitions));
        }

        Ok(Self::Loop {
            repetitions: repetitions as u32,
            target_secs,
        })
    }

    pub fn target_secs(&self) -> f64 {
        match self {
            Self::Truncate { target_secs } | Self::Loop { target_secs, .. } => *target_secs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NormalizationError {
    #[error("source duration must be positive, got {0}")]
    InvalidSource(f64),
    #[error("target duration must be positive, got {0}")]
    InvalidTarget(f64),
    #[error("source would need {0} repetitions")]
    TooManyRepetitions(f64),
}
