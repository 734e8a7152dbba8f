use std::path::Path;
use std::sync::Arc;

use crate::application::ports::AudioToolkit;
use crate::domain::NormalizationPlan;

use super::TrackPreparationError;

/// Brings any track to an exact length by truncating it or by looping it and
/// trimming the concatenation.
pub struct DurationNormalizer {
    toolkit: Arc<dyn AudioToolkit>,
}

impl DurationNormalizer {
    pub fn new(toolkit: Arc<dyn AudioToolkit>) -> Self {
        Self { toolkit }
    }

    pub async fn normalize(
        &self,
        input: &Path,
        target_secs: f64,
        output: &Path,
    ) -> Result<NormalizationPlan, TrackPreparationError> {
        let source_secs = self
            .toolkit
            .measure_duration(input)
            .await
            .map_err(TrackPreparationError::Measure)?;

        let plan = NormalizationPlan::new(source_secs, target_secs)?;

        match plan {
            NormalizationPlan::Truncate { target_secs } => {
                tracing::debug!(
                    input = %input.display(),
                    source_secs,
                    target_secs,
                    "Truncating track"
                );
                self.toolkit
                    .truncate(input, target_secs, output)
                    .await
                    .map_err(TrackPreparationError::Render)?;
            }
            NormalizationPlan::Loop {
                repetitions,
                target_secs,
            } => {
                tracing::debug!(
                    input = %input.display(),
                    source_secs,
                    target_secs,
                    repetitions,
                    "Looping track to fill duration"
                );
                self.toolkit
                    .loop_concat(input, repetitions, target_secs, output)
                    .await
                    .map_err(TrackPreparationError::Render)?;
            }
        }

        Ok(plan)
    }
}
