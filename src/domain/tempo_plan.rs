/// Per-application ratio bounds of the time-stretch primitive.
pub const MAX_STAGE_RATIO: f64 = 2.0;
pub const MIN_STAGE_RATIO: f64 = 0.5;

/// A tempo multiplier split into stages that each stay within the
/// primitive's bounds and whose product is the requested multiplier.
#[derive(Debug, Clone, PartialEq)]
pub struct TempoPlan {
    multiplier: f64,
    stages: Vec<f64>,
}

impl TempoPlan {
    pub fn new(multiplier: f64) -> Result<Self, TempoPlanError> {
        Self::with_bounds(multiplier, MIN_STAGE_RATIO, MAX_STAGE_RATIO)
    }

    pub fn with_bounds(multiplier: f64, min_stage: f64, max_stage: f64) -> Result<Self, TempoPlanError> {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(TempoPlanError::InvalidMultiplier(multiplier));
        }
        if !(min_stage > 0.0 && min_stage < 1.0 && max_stage > 1.0 && max_stage.is_finite()) {
            return Err(TempoPlanError::InvalidBounds { min_stage, max_stage });
        }

        let mut stages = Vec::new();
        let mut remaining = multiplier;
        while remaining > max_stage {
            stages.push(max_stage);
            remaining /= max_stage;
        }
        while remaining < min_stage {
            stages.push(min_stage);
            remaining /= min_stage;
        }
        stages.push(remaining);

        Ok(Self { multiplier, stages })
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn stages(&self) -> &[f64] {
        &self.stages
    }

    pub fn product(&self) -> f64 {
        self.stages.iter().product()
    }

    pub fn is_identity(&self) -> bool {
        (self.multiplier - 1.0).abs() < f64::EPSILON
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TempoPlanError {
    #[error("tempo multiplier must be positive and finite, got {0}")]
    InvalidMultiplier(f64),
    #[error("invalid stage bounds [{min_stage}, {max_stage}]")]
    InvalidBounds { min_stage: f64, max_stage: f64 },
}
