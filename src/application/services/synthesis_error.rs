use crate::application::ports::AudioToolError;
use crate::domain::{NormalizationError, TempoPlanError};

#[derive(Debug, thiserror::Error)]
pub enum TrackPreparationError {
    #[error("measure duration: {0}")]
    Measure(#[source] AudioToolError),
    #[error("normalization plan: {0}")]
    Plan(#[from] NormalizationError),
    #[error("tempo plan: {0}")]
    Tempo(#[from] TempoPlanError),
    #[error("render: {0}")]
    Render(#[source] AudioToolError),
}

#[derive(Debug, thiserror::Error)]
pub enum BinauralError {
    #[error("every binaural rendering method failed, last error: {0}")]
    Exhausted(#[source] AudioToolError),
}

#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("no tracks available to mix")]
    NoTracksAvailable,
    #[error("voice preparation: {0}")]
    Voice(#[source] TrackPreparationError),
    #[error("mix: {0}")]
    Mix(#[source] AudioToolError),
}
