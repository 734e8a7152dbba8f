use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::ports::AudioToolkit;
use crate::domain::TempoPlan;

use super::TrackPreparationError;

pub struct TempoAdjuster {
    toolkit: Arc<dyn AudioToolkit>,
}

impl TempoAdjuster {
    pub fn new(toolkit: Arc<dyn AudioToolkit>) -> Self {
        Self { toolkit }
    }

    /// Returns the path of the adjusted track. A multiplier of exactly 1
    /// leaves the input untouched and returns it as is.
    pub async fn adjust(
        &self,
        input: &Path,
        multiplier: f64,
        output: &Path,
    ) -> Result<PathBuf, TrackPreparationError> {
        let plan = TempoPlan::new(multiplier)?;
        if plan.is_identity() {
            return Ok(input.to_path_buf());
        }

        tracing::debug!(
            multiplier,
            stages = ?plan.stages(),
            "Applying tempo stages"
        );

        self.toolkit
            .change_tempo(input, plan.stages(), output)
            .await
            .map_err(TrackPreparationError::Render)?;

        Ok(output.to_path_buf())
    }
}
